//! The College → Class → Section selection store.
//!
//! All mutation goes through the methods below so the cascade invariants
//! hold after every call:
//!
//! - a change of college clears the class and section levels (selection,
//!   options and loading flags);
//! - a change of class clears the section level.
//!
//! Responses for option lists are written with [`HierarchicalContext::resolve_classes`]
//! and friends, which drop any response whose parent no longer matches the
//! current selection.

use campusdesk_models::ids::{ClassId, CollegeId, SectionId};
use campusdesk_models::options::{ClassOption, CollegeOption, SectionOption};
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::auto_select::SelectionPatch;

/// Current selection plus the option lists and loading flags of each level.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionState {
    pub selected_college: Option<CollegeId>,
    pub selected_class: Option<ClassId>,
    pub selected_section: Option<SectionId>,
    pub colleges: Vec<CollegeOption>,
    pub classes: Vec<ClassOption>,
    pub sections: Vec<SectionOption>,
    pub is_loading_colleges: bool,
    pub is_loading_classes: bool,
    pub is_loading_sections: bool,
    /// A college has been selected, explicitly or automatically.
    #[serde(skip)]
    pub college_chosen: bool,
    /// A class has been selected for the current college.
    #[serde(skip)]
    pub class_chosen: bool,
}

impl SelectionState {
    fn clear_class_level(&mut self) {
        self.selected_class = None;
        self.classes.clear();
        self.is_loading_classes = false;
        self.class_chosen = false;
        self.clear_section_level();
    }

    fn clear_section_level(&mut self) {
        self.selected_section = None;
        self.sections.clear();
        self.is_loading_sections = false;
    }

    pub fn college(&self) -> Option<&CollegeOption> {
        let id = self.selected_college?;
        self.colleges.iter().find(|c| c.id == id)
    }

    pub fn class(&self) -> Option<&ClassOption> {
        let id = self.selected_class?;
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn section(&self) -> Option<&SectionOption> {
        let id = self.selected_section?;
        self.sections.iter().find(|s| s.id == id)
    }
}

/// Store owning the [`SelectionState`] of one application tree.
#[derive(Debug)]
pub struct HierarchicalContext {
    state: watch::Sender<SelectionState>,
}

impl Default for HierarchicalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchicalContext {
    /// A store with nothing selected and every list empty.
    pub fn new() -> Self {
        let (state, _) = watch::channel(SelectionState::default());
        Self { state }
    }

    pub fn snapshot(&self) -> SelectionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.state.subscribe()
    }

    pub fn selected_college(&self) -> Option<CollegeId> {
        self.state.borrow().selected_college
    }

    pub fn selected_class(&self) -> Option<ClassId> {
        self.state.borrow().selected_class
    }

    pub fn selected_section(&self) -> Option<SectionId> {
        self.state.borrow().selected_section
    }

    /// Select a college. Any change of value clears the class and section levels.
    pub fn set_selected_college(&self, college_id: Option<CollegeId>) {
        self.state.send_if_modified(|s| {
            let was_chosen = s.college_chosen;
            s.college_chosen = true;
            if s.selected_college == college_id {
                return !was_chosen;
            }
            debug!(from = ?s.selected_college, to = ?college_id, "College changed");
            s.selected_college = college_id;
            s.clear_class_level();
            true
        });
    }

    /// Select a class. Any change of value clears the section level.
    pub fn set_selected_class(&self, class_id: Option<ClassId>) {
        self.state.send_if_modified(|s| {
            let was_chosen = s.class_chosen;
            s.class_chosen = true;
            if s.selected_class == class_id {
                return !was_chosen;
            }
            debug!(from = ?s.selected_class, to = ?class_id, "Class changed");
            s.selected_class = class_id;
            s.clear_section_level();
            true
        });
    }

    pub fn set_selected_section(&self, section_id: Option<SectionId>) {
        self.state.send_if_modified(|s| {
            if s.selected_section == section_id {
                return false;
            }
            s.selected_section = section_id;
            true
        });
    }

    /// Apply an auto-selection patch. Levels that already hold a value are kept.
    pub fn apply_patch(&self, patch: SelectionPatch) {
        if let Some(college_id) = patch.college
            && self.selected_college().is_none()
        {
            self.set_selected_college(Some(college_id));
        }
        if let Some(class_id) = patch.class
            && self.selected_class().is_none()
        {
            self.set_selected_class(Some(class_id));
        }
    }

    // ------------------------------------------------------------------------
    // Option list bookkeeping, driven by the fetcher
    // ------------------------------------------------------------------------

    pub fn begin_colleges(&self) {
        self.state.send_if_modified(|s| {
            let changed = !s.is_loading_colleges;
            s.is_loading_colleges = true;
            changed
        });
    }

    pub fn resolve_colleges(&self, colleges: Vec<CollegeOption>) {
        self.state.send_modify(|s| {
            s.colleges = colleges;
            s.is_loading_colleges = false;
        });
    }

    /// Mark classes as loading for `parent`, unless the selection moved on.
    pub fn begin_classes(&self, parent: Option<CollegeId>) -> bool {
        self.state.send_if_modified(|s| {
            if s.selected_college != parent {
                return false;
            }
            s.is_loading_classes = true;
            true
        })
    }

    /// Write a class list fetched for `parent`. Returns `false` and leaves
    /// the state untouched when `parent` is no longer the selected college.
    pub fn resolve_classes(&self, parent: Option<CollegeId>, classes: Vec<ClassOption>) -> bool {
        let accepted = self.state.send_if_modified(|s| {
            if s.selected_college != parent {
                return false;
            }
            s.classes = classes;
            s.is_loading_classes = false;
            true
        });
        if !accepted {
            debug!(parent = ?parent, "Discarded stale class list");
        }
        accepted
    }

    /// Mark sections as loading for `parent`, unless the selection moved on.
    pub fn begin_sections(&self, parent: Option<ClassId>) -> bool {
        self.state.send_if_modified(|s| {
            if s.selected_class != parent {
                return false;
            }
            s.is_loading_sections = true;
            true
        })
    }

    /// Write a section list fetched for `parent`; stale lists are dropped.
    pub fn resolve_sections(
        &self,
        parent: Option<ClassId>,
        sections: Vec<SectionOption>,
    ) -> bool {
        let accepted = self.state.send_if_modified(|s| {
            if s.selected_class != parent {
                return false;
            }
            s.sections = sections;
            s.is_loading_sections = false;
            true
        });
        if !accepted {
            debug!(parent = ?parent, "Discarded stale section list");
        }
        accepted
    }
}
