//! Viewer and owner contexts for visibility decisions.
//!
//! These are explicit inputs to the visibility guard; the engine never reads
//! session state or impersonation cookies.

use serde::{Deserialize, Serialize};

/// Role a user holds across the whole application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GlobalRole {
    /// Regular user.
    #[default]
    Member,
    /// Administrator with access to every user's data.
    Admin,
}

/// Role a user holds inside one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupRole {
    /// Regular group member.
    #[default]
    Member,
    /// Group referent, with edit rights over the group's members.
    Referent,
}

/// Membership of a user in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMembership {
    /// The group identifier.
    pub group_id: String,
    /// The role within that group.
    #[serde(default)]
    pub role: GroupRole,
}

/// The user asking to see or change data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerContext {
    /// The viewer's user id.
    pub user_id: String,
    /// Application-wide role.
    #[serde(default)]
    pub global_role: GlobalRole,
    /// Groups the viewer belongs to.
    #[serde(default)]
    pub memberships: Vec<GroupMembership>,
}

/// Categories of data an owner can mark private.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    /// Session attendance and daily/weekly completions.
    Attendance,
    /// Verse coverage and mastery progress.
    Progress,
    /// Aggregated statistics.
    Stats,
    /// Referent evaluations and mastery validation.
    Evaluations,
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataKind::Attendance => write!(f, "attendance"),
            DataKind::Progress => write!(f, "progress"),
            DataKind::Stats => write!(f, "stats"),
            DataKind::Evaluations => write!(f, "evaluations"),
        }
    }
}

/// The owner's four privacy switches.
///
/// # Example
///
/// ```
/// use hifz_engine::models::{DataKind, PrivacyFlags};
///
/// let flags = PrivacyFlags {
///     private_progress: true,
///     ..Default::default()
/// };
/// assert!(flags.is_private(DataKind::Progress));
/// assert!(!flags.is_private(DataKind::Attendance));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyFlags {
    /// Hide attendance from group peers.
    #[serde(default)]
    pub private_attendance: bool,
    /// Hide progress from group peers.
    #[serde(default)]
    pub private_progress: bool,
    /// Hide statistics from group peers.
    #[serde(default)]
    pub private_stats: bool,
    /// Hide evaluations from group peers.
    #[serde(default)]
    pub private_evaluations: bool,
}

impl PrivacyFlags {
    /// Returns the flag that governs `kind`.
    pub fn is_private(&self, kind: DataKind) -> bool {
        match kind {
            DataKind::Attendance => self.private_attendance,
            DataKind::Progress => self.private_progress,
            DataKind::Stats => self.private_stats,
            DataKind::Evaluations => self.private_evaluations,
        }
    }
}

/// The user whose data is being accessed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerContext {
    /// The owner's user id.
    pub user_id: String,
    /// Groups the owner belongs to.
    #[serde(default)]
    pub group_ids: Vec<String>,
    /// The owner's privacy switches.
    #[serde(default)]
    pub privacy: PrivacyFlags,
}

/// Which rule of the visibility guard produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityReason {
    /// Viewer is the owner.
    Owner,
    /// Viewer is a global administrator.
    Administrator,
    /// Viewer and owner share no group.
    NoSharedGroup,
    /// Viewer is a referent of a group the owner belongs to.
    GroupReferent,
    /// Same-group peer, data not marked private.
    SharedGroupPublic,
    /// Same-group peer, data marked private.
    SharedGroupPrivate,
}

/// Outcome of a visibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    /// The viewer may read the data.
    pub can_view: bool,
    /// The viewer may modify the data.
    pub can_edit: bool,
    /// The rule that decided.
    pub reason: VisibilityReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_defaults_to_member_without_groups() {
        let viewer: ViewerContext = serde_json::from_str(r#"{"user_id": "u1"}"#).unwrap();
        assert_eq!(viewer.global_role, GlobalRole::Member);
        assert!(viewer.memberships.is_empty());
    }

    #[test]
    fn test_group_role_uses_uppercase_codes() {
        let membership: GroupMembership =
            serde_json::from_str(r#"{"group_id": "g1", "role": "REFERENT"}"#).unwrap();
        assert_eq!(membership.role, GroupRole::Referent);
    }

    #[test]
    fn test_each_flag_governs_its_kind() {
        let flags = PrivacyFlags {
            private_attendance: true,
            private_progress: false,
            private_stats: true,
            private_evaluations: false,
        };
        assert!(flags.is_private(DataKind::Attendance));
        assert!(!flags.is_private(DataKind::Progress));
        assert!(flags.is_private(DataKind::Stats));
        assert!(!flags.is_private(DataKind::Evaluations));
    }

    #[test]
    fn test_data_kind_display() {
        assert_eq!(DataKind::Evaluations.to_string(), "evaluations");
    }
}
