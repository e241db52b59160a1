//! What happens to an optimistic change the remote authority refuses

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Failure handling for optimistic creates and updates
///
/// Deletes are never optimistic, so under either policy a failed delete
/// leaves the row in place; `KeepAndMark` additionally flags it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Undo the optimistic change (remove the inserted row, restore the
    /// pre-patch record)
    #[default]
    Rollback,
    /// Keep the optimistic change and mark the row `Failed` so the UI can
    /// offer retry or discard
    KeepAndMark,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Rollback => "rollback",
            FailurePolicy::KeepAndMark => "keep_and_mark",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "rollback" => Ok(FailurePolicy::Rollback),
            "keep_and_mark" => Ok(FailurePolicy::KeepAndMark),
            other => Err(format!(
                "Invalid failure policy '{other}'. Must be one of: rollback, keep_and_mark"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_rollback() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::Rollback);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "keep-and-mark".parse::<FailurePolicy>().unwrap(),
            FailurePolicy::KeepAndMark
        );
        assert!("retry".parse::<FailurePolicy>().is_err());
    }
}
