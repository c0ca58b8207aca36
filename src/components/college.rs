use campusdesk_context::{PermissionsContext, SelectionState};

use super::{LOADING_PLACEHOLDER, SelectorView};

/// Selector for the college level. Visible to users who may choose a college.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollegeSelector {
    pub label: String,
    pub placeholder: String,
}

impl Default for CollegeSelector {
    fn default() -> Self {
        Self {
            label: "College".into(),
            placeholder: "Select college".into(),
        }
    }
}

impl CollegeSelector {
    pub fn render(
        &self,
        permissions: &PermissionsContext,
        state: &SelectionState,
    ) -> Option<SelectorView> {
        if !permissions.permissions()?.can_choose_college() {
            return None;
        }

        let disabled = state.is_loading_colleges;
        let placeholder = if state.is_loading_colleges {
            LOADING_PLACEHOLDER.to_string()
        } else {
            self.placeholder.clone()
        };

        Some(SelectorView::build(
            &self.label,
            placeholder,
            disabled,
            &state.colleges,
            state.selected_college,
        ))
    }
}
