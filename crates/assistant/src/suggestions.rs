//! Suggested prompts shown before the first exchange.

use memoria_config::AssistantConfig;
use memoria_core::message::Transcript;

/// A fixed list of example utterances.
///
/// Visible only while the transcript holds nothing but the greeting. The
/// transcript is append-only, so once hidden the list never comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedPrompts {
    prompts: Vec<String>,
}

impl SuggestedPrompts {
    pub fn new(prompts: Vec<String>) -> Self {
        Self { prompts }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(config.suggested_prompts.clone())
    }

    pub fn all(&self) -> &[String] {
        &self.prompts
    }

    pub fn is_visible(&self, transcript: &Transcript) -> bool {
        transcript.len() <= 1 && !transcript.has_user_message()
    }

    /// The prompts to show for `transcript`, empty when hidden.
    pub fn visible(&self, transcript: &Transcript) -> &[String] {
        if self.is_visible(transcript) {
            &self.prompts
        } else {
            &[]
        }
    }

    /// The prompt equal to `text`, if it is one of ours.
    pub fn find(&self, text: &str) -> Option<&str> {
        self.prompts.iter().map(String::as_str).find(|p| *p == text)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.prompts.get(index).map(String::as_str)
    }
}

impl Default for SuggestedPrompts {
    fn default() -> Self {
        Self::from_config(&AssistantConfig::default())
    }
}
