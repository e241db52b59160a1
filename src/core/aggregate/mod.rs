//! Derived Aggregate Maintainer
//!
//! Blood units are per-group aggregates whose `bags` count must equal the
//! number of active bag records of that group, and whose `status` is always
//! the threshold function of that count.
//!
//! - [`reducer`] turns a confirmed record transition into a per-group delta
//! - [`maintainer`] applies the delta to the aggregate rows through the store
//! - [`audit`] reports groups whose recorded count has drifted
//!
//! A missing aggregate row is a soft failure: it is logged and counted, and
//! the bag mutation that triggered it stands.

pub mod audit;
pub mod maintainer;
pub mod reducer;
pub mod threshold;

pub use audit::{AuditEntry, InventoryAudit};
pub use maintainer::{Adjustment, AggregateMaintainer, AggregateOutcome};
pub use reducer::{reduce, InventoryDelta};
pub use threshold::{tier, StockTier};
