//! # Memoria Core
//!
//! Domain types, traits, and error definitions for the Memoria assistant.
//! This crate carries no runtime policy. It defines the model that the
//! assistant engine and the terminal screen are written against.
//!
//! ## Seams
//!
//! - [`Responder`] turns an utterance into reply text. The rule engine is one
//!   implementation; a network backend would be another.
//! - [`RandomSource`] is injected wherever a choice is random, so tests can
//!   substitute a deterministic source.
//! - [`EventBus`] carries [`SessionEvent`]s to whoever renders the transcript.

pub mod error;
pub mod event;
pub mod message;
pub mod random;
pub mod responder;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use event::{EventBus, SessionEvent};
pub use message::{Message, MessageId, Sender, SessionId, Transcript};
pub use random::RandomSource;
pub use responder::Responder;
