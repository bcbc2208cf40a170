//! Advisory domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of a compliance advisory, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorySeverity {
    /// Informational note, never blocks.
    Info = 0,
    /// A notice tellers should see, never blocks.
    Notice = 1,
    /// Blocks until the teller acknowledges it.
    RequiresAcknowledgment = 2,
    /// Blocks unconditionally.
    Restriction = 3,
}

impl AdvisorySeverity {
    /// Returns the string representation of the severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Notice => "notice",
            Self::RequiresAcknowledgment => "requires_acknowledgment",
            Self::Restriction => "restriction",
        }
    }

    /// Parses a severity from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "info" => Some(Self::Info),
            "notice" => Some(Self::Notice),
            "requires_acknowledgment" => Some(Self::RequiresAcknowledgment),
            "restriction" => Some(Self::Restriction),
            _ => None,
        }
    }
}

/// A compliance advisory attached to a party or account scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisory {
    /// Unique identifier.
    pub id: Uuid,
    /// Severity determining gate behavior.
    pub severity: AdvisorySeverity,
    /// Title surfaced to the teller when the advisory blocks.
    pub title: String,
    /// Start of the active window (inclusive), open when absent.
    pub effective_start_at: Option<DateTime<Utc>>,
    /// End of the active window (exclusive), open when absent.
    pub effective_end_at: Option<DateTime<Utc>>,
    /// Last edit time; any edit invalidates older acknowledgments.
    pub updated_at: DateTime<Utc>,
}

/// A teller's recorded acknowledgment of an advisory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acknowledgment {
    /// The acknowledged advisory.
    pub advisory_id: Uuid,
    /// The acknowledging user.
    pub user_id: Uuid,
    /// When the acknowledgment was recorded.
    pub acknowledged_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(AdvisorySeverity::Info < AdvisorySeverity::Notice);
        assert!(AdvisorySeverity::Notice < AdvisorySeverity::RequiresAcknowledgment);
        assert!(AdvisorySeverity::RequiresAcknowledgment < AdvisorySeverity::Restriction);
    }

    #[test]
    fn test_severity_round_trip() {
        for severity in [
            AdvisorySeverity::Info,
            AdvisorySeverity::Notice,
            AdvisorySeverity::RequiresAcknowledgment,
            AdvisorySeverity::Restriction,
        ] {
            assert_eq!(AdvisorySeverity::parse(severity.as_str()), Some(severity));
        }
        assert_eq!(AdvisorySeverity::parse("fatal"), None);
    }
}
