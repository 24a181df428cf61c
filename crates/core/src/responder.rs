//! Responder trait, the abstraction over whatever produces reply text.
//!
//! The built-in implementation is the keyword rule engine. A remote model
//! could implement the same trait; the session's single-flight pipeline does
//! not change either way.

use async_trait::async_trait;

use crate::error::ResponderError;

/// Turns one utterance into reply text.
#[async_trait]
pub trait Responder: Send + Sync {
    /// A human-readable name for logs (e.g., "rules").
    fn name(&self) -> &str;

    /// Produce the reply for `utterance`.
    ///
    /// The utterance has already been trimmed and is never empty.
    async fn respond(&self, utterance: &str) -> Result<String, ResponderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Responder for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn respond(&self, utterance: &str) -> Result<String, ResponderError> {
            Ok(format!("you said: {utterance}"))
        }
    }

    #[tokio::test]
    async fn responder_is_object_safe() {
        let responder: Box<dyn Responder> = Box::new(Echo);
        assert_eq!(responder.name(), "echo");
        assert_eq!(responder.respond("hi").await.unwrap(), "you said: hi");
    }
}
