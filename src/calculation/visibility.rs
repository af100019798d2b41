//! Visibility guard.
//!
//! Decides whether a viewer may read or change another user's data. The
//! rules are checked in order and the first one that applies decides:
//!
//! 1. the viewer is the owner: view and edit
//! 2. the viewer is a global administrator: view and edit
//! 3. viewer and owner share no group: nothing
//! 4. the viewer is a referent of a shared group: view and edit, whatever
//!    the owner's privacy flags say
//! 5. otherwise: view unless the owner marked the data kind private, never edit

use crate::error::{EngineError, EngineResult};
use crate::models::{
    DataKind, GlobalRole, GroupRole, OwnerContext, ViewerContext, Visibility, VisibilityReason,
};

/// Evaluates the visibility rules for one data kind.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::check_visibility;
/// use hifz_engine::models::{
///     DataKind, GlobalRole, GroupMembership, GroupRole, OwnerContext, PrivacyFlags,
///     ViewerContext, VisibilityReason,
/// };
///
/// let owner = OwnerContext {
///     user_id: "student".to_string(),
///     group_ids: vec!["g1".to_string()],
///     privacy: PrivacyFlags { private_progress: true, ..Default::default() },
/// };
/// let classmate = ViewerContext {
///     user_id: "classmate".to_string(),
///     global_role: GlobalRole::Member,
///     memberships: vec![GroupMembership { group_id: "g1".to_string(), role: GroupRole::Member }],
/// };
///
/// let progress = check_visibility(&classmate, &owner, DataKind::Progress);
/// assert!(!progress.can_view);
/// assert_eq!(progress.reason, VisibilityReason::SharedGroupPrivate);
///
/// let attendance = check_visibility(&classmate, &owner, DataKind::Attendance);
/// assert!(attendance.can_view);
/// assert!(!attendance.can_edit);
/// ```
pub fn check_visibility(
    viewer: &ViewerContext,
    owner: &OwnerContext,
    kind: DataKind,
) -> Visibility {
    if viewer.user_id == owner.user_id {
        return full(VisibilityReason::Owner);
    }
    if viewer.global_role == GlobalRole::Admin {
        return full(VisibilityReason::Administrator);
    }

    let mut shared = viewer
        .memberships
        .iter()
        .filter(|m| owner.group_ids.contains(&m.group_id))
        .peekable();
    if shared.peek().is_none() {
        return none(VisibilityReason::NoSharedGroup);
    }
    if shared.any(|m| m.role == GroupRole::Referent) {
        return full(VisibilityReason::GroupReferent);
    }

    if owner.privacy.is_private(kind) {
        none(VisibilityReason::SharedGroupPrivate)
    } else {
        Visibility {
            can_view: true,
            can_edit: false,
            reason: VisibilityReason::SharedGroupPublic,
        }
    }
}

fn full(reason: VisibilityReason) -> Visibility {
    Visibility {
        can_view: true,
        can_edit: true,
        reason,
    }
}

fn none(reason: VisibilityReason) -> Visibility {
    Visibility {
        can_view: false,
        can_edit: false,
        reason,
    }
}

/// Fails with [`EngineError::AccessDenied`] unless the viewer may read.
pub fn require_view(
    viewer: &ViewerContext,
    owner: &OwnerContext,
    kind: DataKind,
) -> EngineResult<Visibility> {
    let visibility = check_visibility(viewer, owner, kind);
    if visibility.can_view {
        Ok(visibility)
    } else {
        Err(denied(viewer, owner, kind))
    }
}

/// Fails with [`EngineError::AccessDenied`] unless the viewer may edit.
pub fn require_edit(
    viewer: &ViewerContext,
    owner: &OwnerContext,
    kind: DataKind,
) -> EngineResult<Visibility> {
    let visibility = check_visibility(viewer, owner, kind);
    if visibility.can_edit {
        Ok(visibility)
    } else {
        Err(denied(viewer, owner, kind))
    }
}

fn denied(viewer: &ViewerContext, owner: &OwnerContext, kind: DataKind) -> EngineError {
    EngineError::AccessDenied {
        viewer_id: viewer.user_id.clone(),
        owner_id: owner.user_id.clone(),
        data_kind: kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupMembership, PrivacyFlags};

    fn owner(private_progress: bool) -> OwnerContext {
        OwnerContext {
            user_id: "owner".to_string(),
            group_ids: vec!["halaqa_a".to_string(), "halaqa_b".to_string()],
            privacy: PrivacyFlags {
                private_progress,
                ..Default::default()
            },
        }
    }

    fn viewer(role: GlobalRole, memberships: &[(&str, GroupRole)]) -> ViewerContext {
        ViewerContext {
            user_id: "viewer".to_string(),
            global_role: role,
            memberships: memberships
                .iter()
                .map(|(group, role)| GroupMembership {
                    group_id: group.to_string(),
                    role: *role,
                })
                .collect(),
        }
    }

    // ==========================================================================
    // VIS-001: Private progress hidden from a same-group member
    // ==========================================================================
    #[test]
    fn test_vis_001_private_progress_hidden_from_member() {
        let result = check_visibility(
            &viewer(GlobalRole::Member, &[("halaqa_a", GroupRole::Member)]),
            &owner(true),
            DataKind::Progress,
        );
        assert!(!result.can_view);
        assert!(!result.can_edit);
        assert_eq!(result.reason, VisibilityReason::SharedGroupPrivate);
    }

    // ==========================================================================
    // VIS-002: A same-group referent sees and edits private data
    // ==========================================================================
    #[test]
    fn test_vis_002_referent_overrides_privacy() {
        let result = check_visibility(
            &viewer(GlobalRole::Member, &[("halaqa_b", GroupRole::Referent)]),
            &owner(true),
            DataKind::Progress,
        );
        assert!(result.can_view);
        assert!(result.can_edit);
        assert_eq!(result.reason, VisibilityReason::GroupReferent);
    }

    // ==========================================================================
    // VIS-003: No shared group means no access, even to public data
    // ==========================================================================
    #[test]
    fn test_vis_003_no_shared_group() {
        let result = check_visibility(
            &viewer(GlobalRole::Member, &[("halaqa_z", GroupRole::Referent)]),
            &owner(false),
            DataKind::Attendance,
        );
        assert!(!result.can_view);
        assert_eq!(result.reason, VisibilityReason::NoSharedGroup);
    }

    // ==========================================================================
    // VIS-004: Owner and administrator always have full access
    // ==========================================================================
    #[test]
    fn test_vis_004_owner_and_admin() {
        let mut me = viewer(GlobalRole::Member, &[]);
        me.user_id = "owner".to_string();
        assert_eq!(
            check_visibility(&me, &owner(true), DataKind::Evaluations).reason,
            VisibilityReason::Owner
        );

        let admin = check_visibility(
            &viewer(GlobalRole::Admin, &[]),
            &owner(true),
            DataKind::Stats,
        );
        assert!(admin.can_view && admin.can_edit);
        assert_eq!(admin.reason, VisibilityReason::Administrator);
    }

    #[test]
    fn test_public_data_is_view_only_for_members() {
        let result = check_visibility(
            &viewer(GlobalRole::Member, &[("halaqa_a", GroupRole::Member)]),
            &owner(true),
            DataKind::Stats,
        );
        assert!(result.can_view);
        assert!(!result.can_edit);
    }

    #[test]
    fn test_referent_role_must_be_in_shared_group() {
        let result = check_visibility(
            &viewer(
                GlobalRole::Member,
                &[("halaqa_z", GroupRole::Referent), ("halaqa_a", GroupRole::Member)],
            ),
            &owner(true),
            DataKind::Progress,
        );
        assert_eq!(result.reason, VisibilityReason::SharedGroupPrivate);
    }

    #[test]
    fn test_require_edit_denies_member() {
        let err = require_edit(
            &viewer(GlobalRole::Member, &[("halaqa_a", GroupRole::Member)]),
            &owner(false),
            DataKind::Progress,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::AccessDenied {
                data_kind: DataKind::Progress,
                ..
            }
        ));
    }

    #[test]
    fn test_require_view_allows_public_data() {
        let visibility = require_view(
            &viewer(GlobalRole::Member, &[("halaqa_a", GroupRole::Member)]),
            &owner(false),
            DataKind::Progress,
        )
        .unwrap();
        assert_eq!(visibility.reason, VisibilityReason::SharedGroupPublic);
    }
}
