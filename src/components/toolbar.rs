use campusdesk_context::{PermissionsContext, SelectionState};
use std::fmt;

use super::{ClassSelector, CollegeSelector, SectionSelector, SelectorView};

/// The three selectors laid out in hierarchy order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextSelectorToolbar {
    pub college: CollegeSelector,
    pub class: ClassSelector,
    pub section: SectionSelector,
}

impl ContextSelectorToolbar {
    /// Views of the selectors the user may see, in order.
    pub fn render(&self, permissions: &PermissionsContext, state: &SelectionState) -> ToolbarView {
        let selectors = [
            self.college.render(permissions, state),
            self.class.render(permissions, state),
            self.section.render(permissions, state),
        ]
        .into_iter()
        .flatten()
        .collect();

        ToolbarView { selectors }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ToolbarView {
    pub selectors: Vec<SelectorView>,
}

impl ToolbarView {
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl fmt::Display for ToolbarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.selectors.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_core::permissions::{RawPermissions, Role};
    use campusdesk_models::users::UserContext;

    fn labels(view: &ToolbarView) -> Vec<&str> {
        view.selectors.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn test_empty_without_permissions() {
        let view = ContextSelectorToolbar::default()
            .render(&PermissionsContext::new(), &SelectionState::default());
        assert!(view.is_empty());
        assert_eq!(view.to_string(), "");
    }

    #[test]
    fn test_selectors_per_role() {
        let toolbar = ContextSelectorToolbar::default();
        let state = SelectionState::default();
        let render = |role| {
            toolbar.render(
                &PermissionsContext::loaded(UserContext::new(role), RawPermissions::new()),
                &state,
            )
        };

        assert_eq!(labels(&render(Role::SuperAdmin)), vec!["College", "Class", "Section"]);
        assert_eq!(labels(&render(Role::Teacher)), vec!["Class", "Section"]);
        assert!(render(Role::Student).is_empty());
    }
}
