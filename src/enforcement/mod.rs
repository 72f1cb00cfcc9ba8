//! Validation-based rules for trading and shipyard commands.
//!
//! Every rule set runs all of its checks and accumulates the failures with
//! Stillwater's `Validation`, so a rejected command reports every problem at
//! once rather than the first one found.
//!
//! # Example
//!
//! ```rust
//! use tradewinds::economy::Good;
//! use tradewinds::enforcement::{purchase_rules, PurchaseRequest, Violation};
//!
//! let request = PurchaseRequest {
//!     good: Good::Tea,
//!     quantity: 50,
//!     cost: 2_000,
//!     balance: 1_000,
//!     storage: 20,
//! };
//!
//! let violations = purchase_rules().violations(&request);
//! assert_eq!(violations.len(), 2);
//! assert!(matches!(violations[0], Violation::InsufficientFunds { .. }));
//! ```

pub mod builder;
pub mod policies;
pub mod requests;
pub mod rules;
pub mod violations;

pub use builder::RulesBuilder;
pub use policies::{
    dismiss_rules, fleet_upgrade_rules, hire_rules, intelligence_rules, purchase_rules, repair_rules,
    sale_rules, upgrade_rules,
};
pub use requests::{FleetRequest, IntelligenceRequest, PurchaseRequest, RepairRequest, SaleRequest, UpgradeRequest};
pub use rules::{RuleCheck, Rules};
pub use violations::{Violation, ViolationKind};
