//! # Authorization Decisions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of an authorize call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// At least one candidate policy grants the action.
    Allowed,
    /// Consumer is known but no candidate policy grants the action.
    Forbidden,
    /// Resource path has fewer than two segments.
    InvalidResource,
    /// Consumer key does not resolve.
    Unauthenticated,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Decision::Allowed => "allowed",
            Decision::Forbidden => "forbidden",
            Decision::InvalidResource => "invalid_resource",
            Decision::Unauthenticated => "unauthenticated",
        };
        f.write_str(label)
    }
}
