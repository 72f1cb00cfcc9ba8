//! Builder API for creating rule sets.

use crate::enforcement::rules::{RuleCheck, Rules};
use crate::enforcement::violations::Violation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for creating rule sets
pub struct RulesBuilder<R> {
    checks: Vec<RuleCheck<R>>,
}

impl<R: 'static> RulesBuilder<R> {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&R) -> Validation<(), NonEmptyVec<Violation>> + Send + Sync + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// Add a predicate check that reports `violation` when it fails
    pub fn require_pred<P, V>(mut self, predicate: P, violation: V) -> Self
    where
        P: Fn(&R) -> bool + Send + Sync + 'static,
        V: Fn(&R) -> Violation + Send + Sync + 'static,
    {
        let check = move |request: &R| {
            if predicate(request) {
                Validation::success(())
            } else {
                Validation::fail(violation(request))
            }
        };
        self.checks.push(Box::new(check));
        self
    }

    /// Build the rule set
    pub fn build(self) -> Rules<R> {
        Rules { checks: self.checks }
    }
}

impl<R: 'static> Default for RulesBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
