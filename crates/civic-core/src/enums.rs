//! Ticket status and department enums.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `TicketStatus` carries the state machine through `allowed_next_states()`;
//! the store itself does not enforce transitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Lowercase, trim, and fold spaces/hyphens into underscores.
fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

// ---------------------------------------------------------------------------
// TicketStatus
// ---------------------------------------------------------------------------

/// Status of a citizen ticket.
///
/// ```text
/// open → in_progress → resolved → closed
///      → closed      → on_hold → in_progress
///                      resolved → in_progress (reopened)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    OnHold,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const ALL: [Self; 5] = [
        Self::Open,
        Self::InProgress,
        Self::OnHold,
        Self::Resolved,
        Self::Closed,
    ];

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Open => &[Self::InProgress, Self::Closed],
            Self::InProgress => &[Self::OnHold, Self::Resolved],
            Self::OnHold => &[Self::InProgress],
            Self::Resolved => &[Self::Closed, Self::InProgress],
            Self::Closed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether a ticket in this state no longer needs a technician.
    #[must_use]
    pub const fn releases_technician(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::OnHold => "on_hold",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the canonical names plus legacy spellings such as `"In Progress"`.
impl FromStr for TicketStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| CoreError::Validation(format!("unknown ticket status '{s}'")))
    }
}

/// A ticket status as read back from storage.
///
/// Rows written by older tooling may carry a status outside [`TicketStatus`];
/// those are kept verbatim so the ticket stays readable and can be moved back
/// under the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum StoredStatus {
    Known(TicketStatus),
    Legacy(String),
}

impl StoredStatus {
    /// Classify a stored string, accepting the same spellings as `FromStr`.
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        raw.parse()
            .map_or_else(|_| Self::Legacy(raw.to_string()), Self::Known)
    }

    #[must_use]
    pub const fn known(&self) -> Option<TicketStatus> {
        match self {
            Self::Known(status) => Some(*status),
            Self::Legacy(_) => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(status) => status.as_str(),
            Self::Legacy(raw) => raw,
        }
    }
}

impl From<TicketStatus> for StoredStatus {
    fn from(status: TicketStatus) -> Self {
        Self::Known(status)
    }
}

impl PartialEq<TicketStatus> for StoredStatus {
    fn eq(&self, other: &TicketStatus) -> bool {
        self.known() == Some(*other)
    }
}

impl fmt::Display for StoredStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Department
// ---------------------------------------------------------------------------

/// A city department. Technicians and assignment queues are partitioned by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    PublicWork,
    SanitationUtilities,
    ParksCommunityCivic,
    LicensingTransportSafety,
}

impl Department {
    pub const ALL: [Self; 4] = [
        Self::PublicWork,
        Self::SanitationUtilities,
        Self::ParksCommunityCivic,
        Self::LicensingTransportSafety,
    ];

    /// Name stored in `technicians.department`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PublicWork => "Public Work",
            Self::SanitationUtilities => "Sanitation Utilities",
            Self::ParksCommunityCivic => "Parks Community Civic",
            Self::LicensingTransportSafety => "Licensing Transport Safety",
        }
    }

    /// Short alias used by the department agents.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::PublicWork => "public_work",
            Self::SanitationUtilities => "sanitation",
            Self::ParksCommunityCivic => "civic",
            Self::LicensingTransportSafety => "safety",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "public_work" | "public_works" => Ok(Self::PublicWork),
            "sanitation_utilities" | "sanitation" => Ok(Self::SanitationUtilities),
            "parks_community_civic" | "civic" | "parks" => Ok(Self::ParksCommunityCivic),
            "licensing_transport_safety" | "safety" | "licensing" => {
                Ok(Self::LicensingTransportSafety)
            }
            _ => Err(CoreError::Validation(format!("unknown department '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(
        status_in_progress,
        TicketStatus,
        TicketStatus::InProgress,
        "in_progress"
    );
    test_serde_roundtrip!(status_on_hold, TicketStatus, TicketStatus::OnHold, "on_hold");
    test_serde_roundtrip!(
        department_public_work,
        Department,
        Department::PublicWork,
        "public_work"
    );
    test_serde_roundtrip!(
        department_safety,
        Department,
        Department::LicensingTransportSafety,
        "licensing_transport_safety"
    );

    // --- Transition tests ---

    #[test]
    fn status_valid_transitions() {
        assert!(TicketStatus::Open.can_transition_to(TicketStatus::InProgress));
        assert!(TicketStatus::Open.can_transition_to(TicketStatus::Closed));
        assert!(TicketStatus::InProgress.can_transition_to(TicketStatus::Resolved));
        assert!(TicketStatus::InProgress.can_transition_to(TicketStatus::OnHold));
        assert!(TicketStatus::OnHold.can_transition_to(TicketStatus::InProgress));
        assert!(TicketStatus::Resolved.can_transition_to(TicketStatus::Closed));
        assert!(TicketStatus::Resolved.can_transition_to(TicketStatus::InProgress));
    }

    #[test]
    fn status_invalid_transitions() {
        assert!(!TicketStatus::Open.can_transition_to(TicketStatus::Resolved));
        assert!(!TicketStatus::Open.can_transition_to(TicketStatus::Open));
        assert!(!TicketStatus::OnHold.can_transition_to(TicketStatus::Closed));
        assert!(!TicketStatus::Closed.can_transition_to(TicketStatus::Open));
    }

    #[test]
    fn closed_is_terminal() {
        assert!(TicketStatus::Closed.allowed_next_states().is_empty());
    }

    #[test]
    fn only_finished_states_release_technicians() {
        let releasing: Vec<_> = TicketStatus::ALL
            .into_iter()
            .filter(|s| s.releases_technician())
            .collect();
        assert_eq!(releasing, vec![TicketStatus::Resolved, TicketStatus::Closed]);
    }

    // --- Parsing tests ---

    #[rstest]
    #[case("open", TicketStatus::Open)]
    #[case("In Progress", TicketStatus::InProgress)]
    #[case("in-progress", TicketStatus::InProgress)]
    #[case(" RESOLVED ", TicketStatus::Resolved)]
    #[case("on_hold", TicketStatus::OnHold)]
    fn parses_status_spellings(#[case] raw: &str, #[case] expected: TicketStatus) {
        assert_eq!(raw.parse::<TicketStatus>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_status() {
        let err = "done".parse::<TicketStatus>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("unknown ticket status 'done'"));
    }

    #[test]
    fn stored_status_keeps_unknown_strings() {
        assert_eq!(StoredStatus::from_stored("In Progress"), TicketStatus::InProgress);
        let legacy = StoredStatus::from_stored("Pending Review");
        assert_eq!(legacy, StoredStatus::Legacy("Pending Review".into()));
        assert_eq!(legacy.known(), None);
        assert_eq!(legacy.as_str(), "Pending Review");
    }

    #[test]
    fn stored_status_serializes_as_plain_string() {
        let known = serde_json::to_string(&StoredStatus::Known(TicketStatus::OnHold)).unwrap();
        assert_eq!(known, "\"on_hold\"");
        let back: StoredStatus = serde_json::from_str("\"Pending Review\"").unwrap();
        assert_eq!(back, StoredStatus::Legacy("Pending Review".into()));
        let back: StoredStatus = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(back, TicketStatus::Closed);
    }

    #[rstest]
    #[case("Public Work", Department::PublicWork)]
    #[case("public_work", Department::PublicWork)]
    #[case("Sanitation Utilities", Department::SanitationUtilities)]
    #[case("sanitation", Department::SanitationUtilities)]
    #[case("civic", Department::ParksCommunityCivic)]
    #[case("Licensing Transport Safety", Department::LicensingTransportSafety)]
    #[case("safety", Department::LicensingTransportSafety)]
    fn parses_department_names(#[case] raw: &str, #[case] expected: Department) {
        assert_eq!(raw.parse::<Department>().unwrap(), expected);
    }

    #[test]
    fn department_names_roundtrip_through_storage_form() {
        for department in Department::ALL {
            assert_eq!(department.as_str().parse::<Department>().unwrap(), department);
            assert_eq!(department.slug().parse::<Department>().unwrap(), department);
        }
    }

    #[test]
    fn rejects_unknown_department() {
        assert!("fire brigade".parse::<Department>().is_err());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", TicketStatus::InProgress), "in_progress");
        assert_eq!(format!("{}", Department::SanitationUtilities), "Sanitation Utilities");
    }
}
