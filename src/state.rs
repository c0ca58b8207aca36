use campusdesk_cache::{CacheConfig, OptionCache};
use campusdesk_config::{ApiConfig, StorageConfig};
use campusdesk_context::{
    ContextApi, ContextFetcher, HierarchicalContext, PermissionSource, PermissionsContext,
    PermissionsProvider, SelectionState,
};
use campusdesk_core::AppError;
use campusdesk_settings::{FileStorage, SettingsProvider, SettingsStorage};
use std::sync::Arc;

use crate::client::ApiClient;
use crate::components::toolbar::ToolbarView;
use crate::components::ContextSelectorToolbar;
use crate::drawer::SettingsDrawer;

/// Everything one session of the application owns.
///
/// The two stores are independent: the context side needs a backend, the
/// settings side only durable storage.
#[derive(Clone)]
pub struct AppState {
    pub api_config: ApiConfig,
    pub storage_config: StorageConfig,
    pub permissions: Arc<PermissionsProvider>,
    pub hierarchy: Arc<HierarchicalContext>,
    pub fetcher: ContextFetcher,
    pub settings: Arc<SettingsProvider>,
    pub toolbar: ContextSelectorToolbar,
    source: Arc<dyn PermissionSource>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("api_config", &self.api_config)
            .field("storage_config", &self.storage_config)
            .field("fetcher", &self.fetcher)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the stores around an already built backend and storage.
    pub fn new<B>(
        backend: Arc<B>,
        storage: Arc<dyn SettingsStorage>,
        api_config: ApiConfig,
        storage_config: StorageConfig,
        cache_config: &CacheConfig,
    ) -> Self
    where
        B: ContextApi + PermissionSource + 'static,
    {
        let permissions = Arc::new(PermissionsProvider::new());
        let hierarchy = Arc::new(HierarchicalContext::new());
        let fetcher = ContextFetcher::new(
            backend.clone(),
            permissions.clone(),
            hierarchy.clone(),
            OptionCache::new(cache_config),
        );
        let settings = Arc::new(SettingsProvider::mount(
            storage,
            storage_config.settings_key.clone(),
        ));

        Self {
            api_config,
            storage_config,
            permissions,
            hierarchy,
            fetcher,
            settings,
            toolbar: ContextSelectorToolbar::default(),
            source: backend,
        }
    }

    pub async fn load_permissions(&self) -> Result<(), AppError> {
        self.permissions
            .load(self.source.as_ref())
            .await
            .map_err(AppError::fetch)
    }

    /// Load permissions and bring the selection up to date.
    pub async fn start_session(&self) -> Result<(), AppError> {
        self.load_permissions().await?;
        self.fetcher.sync().await.map_err(AppError::fetch)
    }

    pub fn permissions_context(&self) -> PermissionsContext {
        self.permissions.current()
    }

    pub fn selection(&self) -> SelectionState {
        self.hierarchy.snapshot()
    }

    pub fn toolbar_view(&self) -> ToolbarView {
        self.toolbar
            .render(&self.permissions.current(), &self.hierarchy.snapshot())
    }

    pub fn drawer(&self) -> SettingsDrawer {
        SettingsDrawer::new(self.settings.clone())
    }
}

/// Build the application state from the environment.
pub fn init_app_state() -> Result<AppState, AppError> {
    let api_config = ApiConfig::from_env().map_err(AppError::config)?;
    let storage_config = StorageConfig::from_env();
    let cache_config = CacheConfig::from_env();

    let client = Arc::new(ApiClient::new(api_config.clone()).map_err(AppError::config)?);
    let storage: Arc<dyn SettingsStorage> = Arc::new(FileStorage::from_config(&storage_config));

    Ok(AppState::new(
        client,
        storage,
        api_config,
        storage_config,
        &cache_config,
    ))
}
