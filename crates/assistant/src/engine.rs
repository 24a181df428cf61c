//! The rule-based response engine.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use memoria_core::error::ResponderError;
use memoria_core::random::RandomSource;
use memoria_core::responder::Responder;
use tracing::debug;

use crate::random::StdRandom;
use crate::rules::{self, Intent, IntentRule, ResponseSource};

/// Maps an utterance to reply text using the ordered [`rules::RULES`] table.
///
/// Deterministic apart from the fallback pick, which draws from the injected
/// [`RandomSource`].
pub struct ResponseEngine {
    rules: &'static [IntentRule],
    fallback: ResponseSource,
    rng: Mutex<Box<dyn RandomSource>>,
}

impl ResponseEngine {
    /// Create an engine over the built-in rules.
    pub fn new(rng: impl RandomSource + 'static) -> Self {
        Self {
            rules: rules::RULES,
            fallback: rules::FALLBACK,
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// The intent `utterance` resolves to, or `None` when the fallback pool
    /// would answer.
    pub fn classify(&self, utterance: &str) -> Option<Intent> {
        rules::first_match(self.rules, utterance).map(|rule| rule.intent)
    }

    /// Reply text for `utterance`. Always returns something.
    pub fn classify_and_respond(&self, utterance: &str) -> String {
        match rules::first_match(self.rules, utterance) {
            Some(rule) => {
                debug!(intent = %rule.intent, "Matched intent rule");
                self.resolve(rule.response)
            }
            None => {
                debug!("No intent rule matched, using fallback pool");
                self.resolve(self.fallback)
            }
        }
    }

    fn resolve(&self, source: ResponseSource) -> String {
        match source {
            ResponseSource::Template(text) => text.to_string(),
            ResponseSource::Pool(pool) => {
                if pool.is_empty() {
                    return String::new();
                }
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                pool[rng.index(pool.len()).min(pool.len() - 1)].to_string()
            }
        }
    }
}

impl Default for ResponseEngine {
    fn default() -> Self {
        Self::new(StdRandom::new())
    }
}

#[async_trait]
impl Responder for ResponseEngine {
    fn name(&self) -> &str {
        "rules"
    }

    async fn respond(&self, utterance: &str) -> Result<String, ResponderError> {
        Ok(self.classify_and_respond(utterance))
    }
}
