//! Rule-based query validation.
//!
//! A rule set is an ordered list of predicates over a query; running one
//! yields pass/fail plus the first failure's message. The baseline
//! `explorer` set must pass for every query; the
//! `email_extraction_explorer` set is layered on top only for the email
//! extraction variant, and only after baseline passes.

use crate::types::Query;

/// A single validation rule: a predicate plus the message shown when it
/// fails.
pub struct Rule {
    pub message: &'static str,
    check: fn(&Query) -> bool,
}

impl Rule {
    pub fn new(message: &'static str, check: fn(&Query) -> bool) -> Self {
        Self { message, check }
    }
}

/// An ordered, named list of rules.
pub struct RuleSet {
    name: &'static str,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: &'static str, rules: Vec<Rule>) -> Self {
        Self { name, rules }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Outcome of running a rule set against a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    /// Message of the first failing rule, if any.
    pub last_error: Option<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            last_error: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            last_error: Some(message.into()),
        }
    }
}

/// Run every rule in order; the outcome carries the first failure.
pub fn run_validations(set: &RuleSet, query: &Query) -> ValidationOutcome {
    let mut first_error: Option<&'static str> = None;
    for rule in &set.rules {
        if !(rule.check)(query) && first_error.is_none() {
            first_error = Some(rule.message);
        }
    }
    match first_error {
        None => ValidationOutcome::valid(),
        Some(message) => ValidationOutcome::invalid(message),
    }
}

/// Baseline rules every query must satisfy regardless of analysis type.
pub fn explorer() -> RuleSet {
    RuleSet::new(
        "explorer",
        vec![
            Rule::new("Choose an Event Collection.", |q| {
                q.event_collection
                    .as_deref()
                    .is_some_and(|v| !v.trim().is_empty())
            }),
            Rule::new("Choose an Analysis Type.", |q| q.analysis_type.is_some()),
            Rule::new("Choose a Target Property.", |q| {
                match q.analysis_type {
                    Some(analysis) if analysis.requires_target_property() => q
                        .target_property
                        .as_deref()
                        .is_some_and(|v| !v.trim().is_empty()),
                    _ => true,
                }
            }),
        ],
    )
}

/// Additional rules required only for the email extraction variant.
pub fn email_extraction_explorer() -> RuleSet {
    RuleSet::new(
        "emailExtractionExplorer",
        vec![
            Rule::new("Enter a valid email address.", |q| {
                q.email
                    .as_deref()
                    .is_some_and(|v| !v.trim().is_empty() && v.contains('@'))
            }),
            Rule::new("Enter a valid number of events to extract.", |q| {
                match q.latest.as_deref().map(str::trim) {
                    None | Some("") => true,
                    Some(value) => value.parse::<u64>().map(|n| n > 0).unwrap_or(false),
                }
            }),
        ],
    )
}
