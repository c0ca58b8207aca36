//! Holder of the normalized permissions and the user context.

use campusdesk_core::permissions::{NormalizedPermissions, RawPermissions, normalize};
use campusdesk_models::users::{PermissionPayload, UserContext};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, instrument};

use crate::api::{FetchError, PermissionSource};

/// Immutable snapshot of what the signed-in user may do.
///
/// The default value is the "not loaded yet" state: no permissions and no
/// user. Gated UI treats it as "render nothing".
#[derive(Debug, Clone, Default)]
pub struct PermissionsContext {
    permissions: Option<Arc<NormalizedPermissions>>,
    user: Option<UserContext>,
}

impl PermissionsContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize `raw` once for `user`.
    pub fn loaded(user: UserContext, raw: RawPermissions) -> Self {
        let permissions = normalize(user.role, raw);
        Self {
            permissions: Some(Arc::new(permissions)),
            user: Some(user),
        }
    }

    pub fn from_payload(payload: PermissionPayload) -> Self {
        Self::loaded(payload.user, payload.permissions)
    }

    pub fn permissions(&self) -> Option<&NormalizedPermissions> {
        self.permissions.as_deref()
    }

    pub fn user(&self) -> Option<&UserContext> {
        self.user.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.permissions.is_some()
    }
}

/// Owner of the current [`PermissionsContext`].
///
/// Consumers read cheap clones through [`PermissionsProvider::current`] or
/// watch for changes through [`PermissionsProvider::subscribe`]; nobody
/// mutates a context in place.
#[derive(Debug)]
pub struct PermissionsProvider {
    state: watch::Sender<PermissionsContext>,
}

impl Default for PermissionsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionsProvider {
    pub fn new() -> Self {
        let (state, _) = watch::channel(PermissionsContext::new());
        Self { state }
    }

    pub fn with_context(context: PermissionsContext) -> Self {
        let (state, _) = watch::channel(context);
        Self { state }
    }

    pub fn current(&self) -> PermissionsContext {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PermissionsContext> {
        self.state.subscribe()
    }

    pub fn replace(&self, context: PermissionsContext) {
        self.state.send_replace(context);
    }

    /// Fetch the payload from `source` and publish the normalized context.
    ///
    /// On failure the previous context stays in place.
    #[instrument(skip_all)]
    pub async fn load(&self, source: &dyn PermissionSource) -> Result<(), FetchError> {
        let payload = source.permissions().await?;
        let context = PermissionsContext::from_payload(payload);

        if let (Some(perms), Some(user)) = (context.permissions(), context.user()) {
            info!(
                role = %user.role,
                college_id = ?user.college_id,
                can_choose_college = perms.can_choose_college(),
                can_choose_class = perms.can_choose_class(),
                can_choose_section = perms.can_choose_section(),
                "Permissions loaded"
            );
        }

        self.replace(context);
        Ok(())
    }
}
