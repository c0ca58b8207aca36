//! Backend seams used by the context engine.
//!
//! The engine never talks HTTP itself. Anything that can produce option lists
//! and the permission payload (an HTTP client, a fixture, a test double)
//! implements these traits.

use campusdesk_models::ids::{ClassId, CollegeId};
use campusdesk_models::options::{ClassOption, CollegeOption, SectionOption};
use campusdesk_models::users::PermissionPayload;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by the backend traits.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send + 'a>>;

/// Error type for backend fetches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("response from {url} could not be decoded: {message}")]
    Decode { url: String, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },
}

/// Source of the three context option lists.
///
/// Implementations must have idempotent GET semantics: the same parent key
/// yields the same list, in backend order.
pub trait ContextApi: Send + Sync {
    /// Colleges the user may pick from.
    fn colleges(&self) -> ApiFuture<'_, Vec<CollegeOption>>;

    /// Classes of a college; `None` asks for the classes in the user's own scope.
    fn classes(&self, college_id: Option<CollegeId>) -> ApiFuture<'_, Vec<ClassOption>>;

    /// Sections of a class.
    fn sections(&self, class_id: ClassId) -> ApiFuture<'_, Vec<SectionOption>>;
}

/// Source of the signed-in user's context and raw permissions.
pub trait PermissionSource: Send + Sync {
    fn permissions(&self) -> ApiFuture<'_, PermissionPayload>;
}
