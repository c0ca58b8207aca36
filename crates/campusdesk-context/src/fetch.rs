//! Fetching of the context option lists.
//!
//! Each fetch reads its parent key from the store, marks the level as
//! loading, awaits the backend (or the cache) and writes the result back
//! through the store's guarded `resolve_*` methods. A response whose parent
//! is no longer selected is dropped there, so the last selection always
//! wins regardless of the order in which responses arrive.

use campusdesk_cache::{OptionCache, keys};
use campusdesk_models::ids::{ClassId, CollegeId, SectionId};
use campusdesk_models::options::{ClassOption, CollegeOption, SectionOption};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::api::{ContextApi, FetchError};
use crate::auto_select::{SelectionPatch, derive_auto_selection};
use crate::hierarchy::HierarchicalContext;
use crate::permissions::PermissionsProvider;

/// Binds the selection store to a backend and a cache.
#[derive(Clone)]
pub struct ContextFetcher {
    api: Arc<dyn ContextApi>,
    permissions: Arc<PermissionsProvider>,
    hierarchy: Arc<HierarchicalContext>,
    cache: OptionCache,
}

impl std::fmt::Debug for ContextFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextFetcher")
            .field("hierarchy", &self.hierarchy)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl ContextFetcher {
    pub fn new(
        api: Arc<dyn ContextApi>,
        permissions: Arc<PermissionsProvider>,
        hierarchy: Arc<HierarchicalContext>,
        cache: OptionCache,
    ) -> Self {
        Self {
            api,
            permissions,
            hierarchy,
            cache,
        }
    }

    pub fn permissions(&self) -> &PermissionsProvider {
        &self.permissions
    }

    pub fn hierarchy(&self) -> &HierarchicalContext {
        &self.hierarchy
    }

    /// Derive and apply the auto-selection patch for the current state.
    pub fn auto_select(&self) -> SelectionPatch {
        let context = self.permissions.current();
        let state = self.hierarchy.snapshot();
        let patch = derive_auto_selection(context.permissions(), context.user(), &state);

        if !patch.is_empty() {
            info!(college = ?patch.college, class = ?patch.class, "Applying auto-selection");
            self.hierarchy.apply_patch(patch);
        }

        patch
    }

    /// Load the college list. Only users who may choose a college fetch it.
    #[instrument(skip(self))]
    pub async fn fetch_colleges(&self) -> Result<(), FetchError> {
        let enabled = self
            .permissions
            .current()
            .permissions()
            .is_some_and(|p| p.can_choose_college());

        if !enabled {
            self.hierarchy.resolve_colleges(Vec::new());
            return Ok(());
        }

        let key = keys::colleges::all();
        if let Some(colleges) = self.cache.get::<Vec<CollegeOption>>(&key).await {
            self.hierarchy.resolve_colleges(colleges);
            return Ok(());
        }

        self.hierarchy.begin_colleges();
        match self.api.colleges().await {
            Ok(colleges) => {
                self.store(&key, &colleges).await;
                self.hierarchy.resolve_colleges(colleges);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch colleges");
                self.hierarchy.resolve_colleges(Vec::new());
                Err(e)
            }
        }
    }

    /// Load the classes of the selected college.
    ///
    /// Users who cannot choose a college fetch the classes of their own
    /// scope even when no college is selected.
    #[instrument(skip(self))]
    pub async fn fetch_classes(&self) -> Result<(), FetchError> {
        let parent = self.hierarchy.selected_college();
        let enabled = self
            .permissions
            .current()
            .permissions()
            .is_some_and(|p| parent.is_some() || !p.can_choose_college());

        if !enabled {
            self.hierarchy.resolve_classes(parent, Vec::new());
            return Ok(());
        }

        let key = keys::classes::by_college(parent);
        if let Some(classes) = self.cache.get::<Vec<ClassOption>>(&key).await {
            self.hierarchy.resolve_classes(parent, classes);
            return Ok(());
        }

        if !self.hierarchy.begin_classes(parent) {
            return Ok(());
        }

        match self.api.classes(parent).await {
            Ok(classes) => {
                self.store(&key, &classes).await;
                self.hierarchy.resolve_classes(parent, classes);
                Ok(())
            }
            Err(e) => {
                warn!(college_id = ?parent, error = %e, "Failed to fetch classes");
                self.hierarchy.resolve_classes(parent, Vec::new());
                Err(e)
            }
        }
    }

    /// Load the sections of the selected class.
    #[instrument(skip(self))]
    pub async fn fetch_sections(&self) -> Result<(), FetchError> {
        let Some(class_id) = self.hierarchy.selected_class() else {
            self.hierarchy.resolve_sections(None, Vec::new());
            return Ok(());
        };
        let parent = Some(class_id);

        let key = keys::sections::by_class(class_id);
        if let Some(sections) = self.cache.get::<Vec<SectionOption>>(&key).await {
            self.hierarchy.resolve_sections(parent, sections);
            return Ok(());
        }

        if !self.hierarchy.begin_sections(parent) {
            return Ok(());
        }

        match self.api.sections(class_id).await {
            Ok(sections) => {
                self.store(&key, &sections).await;
                self.hierarchy.resolve_sections(parent, sections);
                Ok(())
            }
            Err(e) => {
                warn!(class_id = %class_id, error = %e, "Failed to fetch sections");
                self.hierarchy.resolve_sections(parent, Vec::new());
                Err(e)
            }
        }
    }

    /// Bring every level up to date, auto-selecting between steps.
    ///
    /// All three levels are attempted; the first error is returned.
    #[instrument(skip(self))]
    pub async fn sync(&self) -> Result<(), FetchError> {
        let mut first_error = None;

        let colleges = self.fetch_colleges().await;
        first_error = first_error.or(colleges.err());
        self.auto_select();

        let classes = self.fetch_classes().await;
        first_error = first_error.or(classes.err());
        self.auto_select();

        let sections = self.fetch_sections().await;
        first_error = first_error.or(sections.err());

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Select a college and load what depends on it.
    pub async fn choose_college(&self, college_id: Option<CollegeId>) -> Result<(), FetchError> {
        self.hierarchy.set_selected_college(college_id);
        self.fetch_classes().await?;
        self.auto_select();
        self.fetch_sections().await
    }

    /// Select a class and load its sections.
    pub async fn choose_class(&self, class_id: Option<ClassId>) -> Result<(), FetchError> {
        self.hierarchy.set_selected_class(class_id);
        self.fetch_sections().await
    }

    pub fn choose_section(&self, section_id: Option<SectionId>) {
        self.hierarchy.set_selected_section(section_id);
    }

    /// Drop every cached list and sync again.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), FetchError> {
        let mut dropped = 0;
        for prefix in [
            keys::colleges::invalidation_prefix(),
            keys::classes::invalidation_prefix(),
            keys::sections::invalidation_prefix(),
        ] {
            dropped += self.cache.invalidate_prefix(&prefix).await;
        }
        info!(dropped, "Option cache cleared");

        self.sync().await
    }

    async fn store<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.cache.set(key, value).await {
            warn!(cache.key = %key, error = %e, "Failed to cache option list");
        }
    }
}
