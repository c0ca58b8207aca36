use campusdesk_context::{PermissionsContext, SelectionState};

use super::{LOADING_PLACEHOLDER, SelectorView};

/// Selector for the class level.
///
/// Disabled while classes load, and while no college is selected for a user
/// who has to choose one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSelector {
    pub label: String,
    pub placeholder: String,
}

impl Default for ClassSelector {
    fn default() -> Self {
        Self {
            label: "Class".into(),
            placeholder: "Select class".into(),
        }
    }
}

impl ClassSelector {
    pub fn render(
        &self,
        permissions: &PermissionsContext,
        state: &SelectionState,
    ) -> Option<SelectorView> {
        let permissions = permissions.permissions()?;
        if !permissions.can_choose_class() {
            return None;
        }

        let needs_college = permissions.can_choose_college() && state.selected_college.is_none();
        let placeholder = if state.is_loading_classes {
            LOADING_PLACEHOLDER.to_string()
        } else if needs_college {
            "Select college first".to_string()
        } else {
            self.placeholder.clone()
        };

        Some(SelectorView::build(
            &self.label,
            placeholder,
            state.is_loading_classes || needs_college,
            &state.classes,
            state.selected_class,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_core::permissions::{RawPermissions, Role};
    use campusdesk_models::ids::CollegeId;
    use campusdesk_models::options::ClassOption;
    use campusdesk_models::users::UserContext;

    fn context(role: Role) -> PermissionsContext {
        PermissionsContext::loaded(UserContext::new(role), RawPermissions::new())
    }

    #[test]
    fn test_hidden_for_student() {
        let view = ClassSelector::default().render(&context(Role::Student), &SelectionState::default());
        assert_eq!(view, None);
    }

    #[test]
    fn test_waits_for_college_when_college_is_choosable() {
        let view = ClassSelector::default()
            .render(&context(Role::SuperAdmin), &SelectionState::default())
            .unwrap();
        assert!(view.disabled);
        assert_eq!(view.placeholder, "Select college first");
    }

    #[test]
    fn test_teacher_is_not_blocked_on_college() {
        let state = SelectionState {
            classes: vec![ClassOption::new(7, "Grade 7")],
            ..SelectionState::default()
        };
        let view = ClassSelector::default()
            .render(&context(Role::Teacher), &state)
            .unwrap();
        assert!(!view.disabled);
        assert_eq!(view.placeholder, "Select class");
        assert_eq!(view.options.len(), 1);
    }

    #[test]
    fn test_loading_wins_over_parent_hint() {
        let state = SelectionState {
            selected_college: Some(CollegeId::new(1)),
            is_loading_classes: true,
            ..SelectionState::default()
        };
        let view = ClassSelector::default()
            .render(&context(Role::SuperAdmin), &state)
            .unwrap();
        assert!(view.disabled);
        assert_eq!(view.placeholder, "Loading…");
        assert_eq!(view.to_string(), "Class: <Loading…> (disabled)");
    }
}
