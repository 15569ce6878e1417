//! Ordered, first-match intent classification.
//!
//! Every utterance is normalized and tested against the rule table in
//! declaration order. The first rule whose matcher accepts the input wins;
//! when nothing matches, the fallback rule answers with a clarification.

use regex::Regex;
use tracing::debug;

use spu_core::{normalize, KnowledgeBase, Utterance};

use crate::composer::ComposeContext;
use crate::rules;

/// Renders a rule's answer from the knowledge base.
pub type Template = fn(&KnowledgeBase, &ComposeContext) -> String;

// =============================================================================
// Matcher
// =============================================================================

/// Predicate over a normalized utterance.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Accepts when any keyword occurs as a substring.
    Contains(&'static [&'static str]),
    /// Accepts when the expression finds a match anywhere.
    Pattern(Regex),
    /// Never accepts. Used by the fallback rule.
    Never,
}

impl Matcher {
    pub fn matches(&self, normalized: &str) -> bool {
        match self {
            Matcher::Contains(keywords) => keywords.iter().any(|k| normalized.contains(k)),
            Matcher::Pattern(re) => re.is_match(normalized),
            Matcher::Never => false,
        }
    }
}

// =============================================================================
// Rule
// =============================================================================

/// A named matcher bound to a response template.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: &'static str,
    pub matcher: Matcher,
    pub template: Template,
}

impl Rule {
    pub fn new(name: &'static str, matcher: Matcher, template: Template) -> Self {
        Self {
            name,
            matcher,
            template,
        }
    }

    pub fn matches(&self, normalized: &str) -> bool {
        self.matcher.matches(normalized)
    }
}

/// Outcome of classifying one utterance.
#[derive(Debug, Clone, Copy)]
pub struct RuleMatch<'a> {
    pub rule: &'a Rule,
    /// Position in the table, or `None` when the fallback answered.
    pub position: Option<usize>,
}

impl RuleMatch<'_> {
    pub fn is_fallback(&self) -> bool {
        self.position.is_none()
    }

    pub fn name(&self) -> &'static str {
        self.rule.name
    }
}

// =============================================================================
// IntentClassifier
// =============================================================================

/// First-match classifier over an ordered rule table.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<Rule>,
    fallback: Rule,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Classifier over the built-in rule table.
    pub fn new() -> Self {
        Self::with_rules(rules::default_rules())
    }

    /// Classifier over a caller-supplied table. Order is precedence.
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            fallback: rules::fallback_rule(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fallback(&self) -> &Rule {
        &self.fallback
    }

    /// Classify raw text. Total: always yields a rule.
    pub fn classify(&self, text: &str) -> RuleMatch<'_> {
        let normalized = normalize(text);
        let found = self
            .rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(&normalized));

        match found {
            Some((position, rule)) => {
                debug!(rule = rule.name, position, "Utterance classified");
                RuleMatch {
                    rule,
                    position: Some(position),
                }
            }
            None => {
                debug!(rule = self.fallback.name, "No rule matched, using fallback");
                RuleMatch {
                    rule: &self.fallback,
                    position: None,
                }
            }
        }
    }

    pub fn classify_utterance(&self, utterance: &Utterance) -> RuleMatch<'_> {
        self.classify(&utterance.text)
    }
}

// =============================================================================
// Tests
// =============================================================================
