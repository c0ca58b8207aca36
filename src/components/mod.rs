//! Permission-gated context selectors.
//!
//! A selector renders to a [`SelectorView`], or to `None` when the user may
//! not see it at all. Absence is the contract for missing permissions: a
//! hidden selector is never rendered as a disabled one.

pub mod class;
pub mod college;
pub mod section;
pub mod toolbar;

pub use class::ClassSelector;
pub use college::CollegeSelector;
pub use section::SectionSelector;
pub use toolbar::ContextSelectorToolbar;

use campusdesk_models::options::ContextOption;
use serde::Serialize;
use std::fmt;

pub const LOADING_PLACEHOLDER: &str = "Loading…";

/// One entry of a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn from_option<O: ContextOption>(option: &O) -> Self {
        Self {
            value: option.id().to_string(),
            label: option.name().to_string(),
        }
    }
}

/// Rendered state of a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorView {
    pub label: String,
    pub placeholder: String,
    pub disabled: bool,
    pub options: Vec<SelectOption>,
    pub value: Option<String>,
}

impl SelectorView {
    pub(crate) fn build<O: ContextOption>(
        label: &str,
        placeholder: String,
        disabled: bool,
        options: &[O],
        selected: Option<O::Id>,
    ) -> Self {
        Self {
            label: label.to_string(),
            placeholder,
            disabled,
            options: options.iter().map(SelectOption::from_option).collect(),
            value: selected.map(|id| id.to_string()),
        }
    }

    /// Label of the selected option, if it is among the options.
    pub fn selected_label(&self) -> Option<&str> {
        let value = self.value.as_deref()?;
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}

/// `College: North` / `Class: <Select college first> (disabled)`
impl fmt::Display for SelectorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.label)?;
        match (self.selected_label(), &self.value) {
            (Some(label), _) => f.write_str(label)?,
            (None, Some(value)) => write!(f, "#{}", value)?,
            (None, None) => write!(f, "<{}>", self.placeholder)?,
        }
        if self.disabled {
            f.write_str(" (disabled)")?;
        }
        Ok(())
    }
}
