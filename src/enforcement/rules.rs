//! Rule sets evaluated with Validation.

use crate::enforcement::violations::Violation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for validation check functions
pub type RuleCheck<R> = Box<dyn Fn(&R) -> Validation<(), NonEmptyVec<Violation>> + Send + Sync>;

/// Checks run against a request of type `R`.
/// Uses Validation to accumulate ALL violations.
pub struct Rules<R> {
    pub(crate) checks: Vec<RuleCheck<R>>,
}

impl<R> Rules<R> {
    /// Enforce all rules, accumulating ALL violations.
    pub fn enforce(&self, request: &R) -> Validation<(), NonEmptyVec<Violation>> {
        if self.checks.is_empty() {
            return Validation::success(());
        }

        let checks: Vec<Validation<(), NonEmptyVec<Violation>>> =
            self.checks.iter().map(|check| check(request)).collect();

        Validation::all_vec(checks).map(|_| ())
    }

    pub fn permits(&self, request: &R) -> bool {
        self.enforce(request).is_success()
    }

    /// Every violated rule, in declaration order.
    pub fn violations(&self, request: &R) -> Vec<Violation> {
        match self.enforce(request) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enforcement::builder::RulesBuilder;

    struct Order {
        quantity: i64,
        cost: i64,
        balance: i64,
    }

    fn rules() -> Rules<Order> {
        RulesBuilder::new()
            .require_pred(|o: &Order| o.quantity > 0, |_| Violation::InvalidQuantity)
            .require_pred(
                |o: &Order| o.cost <= o.balance,
                |o| Violation::InsufficientFunds {
                    needed: o.cost,
                    available: o.balance,
                },
            )
            .build()
    }

    #[test]
    fn enforcement_accumulates_all_violations() {
        let order = Order {
            quantity: 0,
            cost: 500,
            balance: 100,
        };

        match rules().enforce(&order) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| matches!(e, Violation::InvalidQuantity)));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, Violation::InsufficientFunds { .. })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn enforcement_succeeds_when_all_checks_pass() {
        let order = Order {
            quantity: 2,
            cost: 50,
            balance: 100,
        };
        assert!(rules().permits(&order));
        assert!(rules().violations(&order).is_empty());
    }

    #[test]
    fn violations_keep_declaration_order() {
        let order = Order {
            quantity: -1,
            cost: 500,
            balance: 0,
        };
        let violations = rules().violations(&order);
        assert_eq!(violations[0], Violation::InvalidQuantity);
        assert!(matches!(violations[1], Violation::InsufficientFunds { needed: 500, .. }));
    }

    #[test]
    fn empty_rules_permit_everything() {
        let rules: Rules<Order> = RulesBuilder::new().build();
        assert!(rules.is_empty());
        assert!(rules.permits(&Order {
            quantity: -5,
            cost: 0,
            balance: 0
        }));
    }
}
