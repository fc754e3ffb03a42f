//! Ledger events: immutable facts recorded against an account stream.

pub mod envelope;
pub mod event;

pub use envelope::EventEnvelope;
pub use event::Event;
