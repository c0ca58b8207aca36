use campusdesk_context::{PermissionsContext, SelectionState};

use super::{LOADING_PLACEHOLDER, SelectorView};

/// Selector for the section level. Disabled until a class is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSelector {
    pub label: String,
    pub placeholder: String,
}

impl Default for SectionSelector {
    fn default() -> Self {
        Self {
            label: "Section".into(),
            placeholder: "Select section".into(),
        }
    }
}

impl SectionSelector {
    pub fn render(
        &self,
        permissions: &PermissionsContext,
        state: &SelectionState,
    ) -> Option<SelectorView> {
        if !permissions.permissions()?.can_choose_section() {
            return None;
        }

        let needs_class = state.selected_class.is_none();
        let placeholder = if state.is_loading_sections {
            LOADING_PLACEHOLDER.to_string()
        } else if needs_class {
            "Select class first".to_string()
        } else {
            self.placeholder.clone()
        };

        Some(SelectorView::build(
            &self.label,
            placeholder,
            state.is_loading_sections || needs_class,
            &state.sections,
            state.selected_section,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_core::permissions::{RawPermissions, Role};
    use campusdesk_models::ids::{ClassId, SectionId};
    use campusdesk_models::options::SectionOption;
    use campusdesk_models::users::UserContext;

    fn context(role: Role) -> PermissionsContext {
        PermissionsContext::loaded(UserContext::new(role), RawPermissions::new())
    }

    #[test]
    fn test_renders_nothing_without_capability() {
        let state = SelectionState {
            selected_class: Some(ClassId::new(1)),
            sections: vec![SectionOption::new(1, "A")],
            ..SelectionState::default()
        };
        assert_eq!(SectionSelector::default().render(&context(Role::StoreManager), &state), None);
        assert_eq!(SectionSelector::default().render(&PermissionsContext::new(), &state), None);
    }

    #[test]
    fn test_waits_for_class() {
        let view = SectionSelector::default()
            .render(&context(Role::Teacher), &SelectionState::default())
            .unwrap();
        assert!(view.disabled);
        assert_eq!(view.placeholder, "Select class first");
    }

    #[test]
    fn test_selected_section() {
        let state = SelectionState {
            selected_class: Some(ClassId::new(1)),
            sections: vec![SectionOption::new(4, "B")],
            selected_section: Some(SectionId::new(4)),
            ..SelectionState::default()
        };
        let view = SectionSelector::default()
            .render(&context(Role::CollegeAdmin), &state)
            .unwrap();
        assert!(!view.disabled);
        assert_eq!(view.value.as_deref(), Some("4"));
        assert_eq!(view.selected_label(), Some("B"));
    }
}
