//! Baseline answer composition.
//!
//! Renders a classified rule's template against the knowledge base. No
//! network or model is involved, so a baseline is always available.

use chrono::{Local, Timelike};

use spu_core::KnowledgeBase;

use crate::classifier::Rule;

/// Ambient facts a template may read beyond the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeContext {
    /// Local hour of day, 0 to 23.
    pub hour: u32,
}

impl ComposeContext {
    pub fn now() -> Self {
        Self {
            hour: Local::now().hour(),
        }
    }

    pub fn at_hour(hour: u32) -> Self {
        Self { hour: hour % 24 }
    }

    /// Salutation for the time of day.
    pub fn salutation(&self) -> &'static str {
        match self.hour {
            0..=11 => "Good morning",
            12..=16 => "Good afternoon",
            _ => "Good evening",
        }
    }
}

// =============================================================================
// ResponseComposer
// =============================================================================

/// Produces the rule-based baseline answer for a classified utterance.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseComposer;

impl ResponseComposer {
    pub fn new() -> Self {
        Self
    }

    /// Compose using the current local time.
    pub fn compose(&self, rule: &Rule, kb: &KnowledgeBase) -> String {
        self.compose_with(rule, kb, &ComposeContext::now())
    }

    /// Compose as if the local clock read `hour`.
    pub fn compose_at(&self, rule: &Rule, kb: &KnowledgeBase, hour: u32) -> String {
        self.compose_with(rule, kb, &ComposeContext::at_hour(hour))
    }

    pub fn compose_with(&self, rule: &Rule, kb: &KnowledgeBase, ctx: &ComposeContext) -> String {
        (rule.template)(kb, ctx)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::IntentClassifier;

    fn answer(text: &str) -> String {
        let classifier = IntentClassifier::new();
        let kb = KnowledgeBase::revx();
        ResponseComposer::new().compose_at(classifier.classify(text).rule, &kb, 10)
    }

    #[test]
    fn test_salutation_by_hour() {
        assert_eq!(ComposeContext::at_hour(0).salutation(), "Good morning");
        assert_eq!(ComposeContext::at_hour(11).salutation(), "Good morning");
        assert_eq!(ComposeContext::at_hour(12).salutation(), "Good afternoon");
        assert_eq!(ComposeContext::at_hour(16).salutation(), "Good afternoon");
        assert_eq!(ComposeContext::at_hour(17).salutation(), "Good evening");
        assert_eq!(ComposeContext::at_hour(23).salutation(), "Good evening");
    }

    #[test]
    fn test_hour_wraps() {
        assert_eq!(ComposeContext::at_hour(25).hour, 1);
    }

    #[test]
    fn test_greeting_uses_hour() {
        let classifier = IntentClassifier::new();
        let kb = KnowledgeBase::revx();
        let rule = classifier.classify("hello").rule;
        let composer = ResponseComposer::new();

        assert!(composer.compose_at(rule, &kb, 9).starts_with("Good morning!"));
        assert!(composer.compose_at(rule, &kb, 14).starts_with("Good afternoon!"));
        assert!(composer.compose_at(rule, &kb, 20).starts_with("Good evening!"));
        assert!(composer.compose_at(rule, &kb, 9).contains("I'm Spu"));
    }

    #[test]
    fn test_services_lists_every_service_in_order() {
        let text = answer("What services do you offer?");
        let kb = KnowledgeBase::revx();
        let mut cursor = 0;
        for service in &kb.services {
            let found = text[cursor..].find(service.as_str());
            assert!(found.is_some(), "missing {} in {}", service, text);
            cursor += found.unwrap() + service.len();
        }
    }

    #[test]
    fn test_contact_includes_both_offices() {
        let text = answer("contact");
        assert!(text.contains("info@revx.pro"));
        assert!(text.contains("+1 5107340774"));
        assert!(text.contains("Richmond California, USA"));
        assert!(text.contains("Sherpa Mall, Durbarmarg, Kathmandu, Nepal"));
        assert!(text.contains("+977985031513"));
    }

    #[test]
    fn test_fallback_is_clarification() {
        let text = answer("xyzzy plugh");
        assert!(text.starts_with("I'm not sure I understand your question."));
        assert!(text.contains("RevX's services"));
    }

    #[test]
    fn test_compose_is_pure_for_fixed_hour() {
        assert_eq!(answer("revenue"), answer("revenue"));
    }

    #[test]
    fn test_compose_with_current_time_does_not_panic() {
        let classifier = IntentClassifier::new();
        let kb = KnowledgeBase::revx();
        let text = ResponseComposer::new().compose(classifier.classify("hi").rule, &kb);
        assert!(text.contains("How can I help you today?"));
    }
}
