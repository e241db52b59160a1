//! Stock tier threshold function

pub use crate::domain::records::StockTier;

/// Tier for a bag count: `<= 2` Critical, `<= 5` Low, otherwise Adequate
pub fn tier(count: u32) -> StockTier {
    StockTier::for_count(count)
}
