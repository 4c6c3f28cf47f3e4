//! Protocol module containing the inbound envelope, the typed event model,
//! and the decoder between them.

pub mod decoder;
pub mod envelope;
pub mod events;
mod pixels;

pub use decoder::{decode_envelope, decode_message, decode_script_message};
pub use envelope::MessageEnvelope;
pub use events::WebEvent;
