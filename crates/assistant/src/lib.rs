//! The Memoria conversational assistant.
//!
//! A chat session runs a small request/response cycle:
//!
//! 1. **Submit** an utterance; the user message is appended at once
//! 2. **Wait** a randomized 1–3 s, standing in for network latency
//! 3. **Respond** by running the utterance through the ordered intent rules
//!    (or a random fallback when none match)
//! 4. **Append** the reply and go back to idle
//!
//! Only one request may be in flight per session. Extra submissions while
//! waiting are ignored rather than queued.

pub mod engine;
pub mod latency;
pub mod random;
pub mod rules;
pub mod session;
pub mod suggestions;
pub mod templates;

pub use engine::ResponseEngine;
pub use latency::LatencyPolicy;
pub use random::{ScriptedRandom, StdRandom};
pub use rules::{Intent, IntentRule, Predicate, ResponseSource};
pub use session::{ChatSession, SessionState, SubmitOutcome, THINKING_LABEL};
pub use suggestions::SuggestedPrompts;
