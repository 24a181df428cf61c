//! Ordered intent rules.
//!
//! Each rule tests the lower-cased utterance for keyword substrings. Rules
//! overlap ("weekend birthday" matches two of them), so the table order is
//! the priority order and the first match wins.

use serde::Serialize;

use crate::templates;

/// What the user is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    WeekendPlans,
    BirthdayLookup,
    MemoryRecall,
    MotivationalQuote,
    OrganizationTips,
    SurprisePlanning,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeekendPlans => "weekend-plans",
            Self::BirthdayLookup => "birthday-lookup",
            Self::MemoryRecall => "memory-recall",
            Self::MotivationalQuote => "motivational-quote",
            Self::OrganizationTips => "organization-tips",
            Self::SurprisePlanning => "surprise-planning",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substring test over lower-cased text.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    /// At least one keyword occurs
    AnyOf(&'static [&'static str]),
    /// Every keyword occurs
    AllOf(&'static [&'static str]),
}

impl Predicate {
    /// `lowered` must already be lower case.
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Self::AnyOf(keywords) => keywords.iter().any(|k| lowered.contains(k)),
            Self::AllOf(keywords) => keywords.iter().all(|k| lowered.contains(k)),
        }
    }
}

/// Where a reply comes from.
#[derive(Debug, Clone, Copy)]
pub enum ResponseSource {
    /// Always the same text
    Template(&'static str),
    /// One entry picked uniformly at random
    Pool(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub predicate: Predicate,
    pub response: ResponseSource,
}

/// The rule table, highest priority first.
pub const RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::WeekendPlans,
        predicate: Predicate::AnyOf(&["weekend", "do this"]),
        response: ResponseSource::Template(templates::WEEKEND_PLANS),
    },
    IntentRule {
        intent: Intent::BirthdayLookup,
        predicate: Predicate::AnyOf(&["birthday", "birthdays"]),
        response: ResponseSource::Template(templates::BIRTHDAY_LOOKUP),
    },
    IntentRule {
        intent: Intent::MemoryRecall,
        predicate: Predicate::AnyOf(&["memory", "memories"]),
        response: ResponseSource::Template(templates::MEMORY_RECALL),
    },
    IntentRule {
        intent: Intent::MotivationalQuote,
        predicate: Predicate::AnyOf(&["motivational", "motivation", "quote"]),
        response: ResponseSource::Template(templates::MOTIVATIONAL_QUOTE),
    },
    IntentRule {
        intent: Intent::OrganizationTips,
        predicate: Predicate::AnyOf(&["organized", "organization"]),
        response: ResponseSource::Template(templates::ORGANIZATION_TIPS),
    },
    IntentRule {
        intent: Intent::SurprisePlanning,
        predicate: Predicate::AllOf(&["plan", "surprise"]),
        response: ResponseSource::Template(templates::SURPRISE_PLANNING),
    },
];

/// Used when no rule in [`RULES`] matches.
pub const FALLBACK: ResponseSource = ResponseSource::Pool(templates::FALLBACK_RESPONSES);

/// First rule in `rules` whose predicate holds for `utterance`.
///
/// Only the case is normalized; whitespace is left alone.
pub fn first_match<'a>(rules: &'a [IntentRule], utterance: &str) -> Option<&'a IntentRule> {
    let lowered = utterance.to_lowercase();
    rules.iter().find(|rule| rule.predicate.matches(&lowered))
}
