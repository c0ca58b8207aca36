//! Auto-selection policy.
//!
//! Selection defaults are derived by a pure function and applied explicitly
//! by the fetcher after every transition that can enable one: permissions
//! becoming available, and a class list settling.

use campusdesk_core::permissions::NormalizedPermissions;
use campusdesk_models::ids::{ClassId, CollegeId};
use campusdesk_models::users::UserContext;

use crate::hierarchy::SelectionState;

/// Values to fill in. `None` fields leave the level alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionPatch {
    pub college: Option<CollegeId>,
    pub class: Option<ClassId>,
}

impl SelectionPatch {
    pub fn is_empty(&self) -> bool {
        self.college.is_none() && self.class.is_none()
    }
}

/// Decide which levels should be selected automatically.
///
/// - A user who cannot choose a college gets their home college, once.
/// - A teacher with exactly one class gets that class, once per college,
///   after the class list has settled.
///
/// Nothing already selected (or deliberately cleared) is overridden, and the
/// class rule waits while a college is being filled in by the same patch.
pub fn derive_auto_selection(
    permissions: Option<&NormalizedPermissions>,
    user: Option<&UserContext>,
    state: &SelectionState,
) -> SelectionPatch {
    let Some(permissions) = permissions else {
        return SelectionPatch::default();
    };

    let mut patch = SelectionPatch::default();

    if !permissions.can_choose_college()
        && state.selected_college.is_none()
        && !state.college_chosen
    {
        patch.college = user.and_then(|u| u.college_id);
    }

    if patch.college.is_none()
        && permissions.is_teacher()
        && state.selected_class.is_none()
        && !state.class_chosen
        && !state.is_loading_classes
        && let [only] = state.classes.as_slice()
    {
        patch.class = Some(only.id);
    }

    patch
}
