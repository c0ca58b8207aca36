//! HTTP client for the campusdesk backend.
//!
//! Implements the context engine's [`ContextApi`] and [`PermissionSource`]
//! seams over `reqwest`. Every request carries a fresh `x-request-id` and,
//! when configured, a bearer token.

use campusdesk_config::ApiConfig;
use campusdesk_context::{ApiFuture, ContextApi, FetchError, PermissionSource};
use campusdesk_models::ids::{ClassId, CollegeId};
use campusdesk_models::options::{ClassOption, CollegeOption, SectionOption};
use campusdesk_models::users::PermissionPayload;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub const PERMISSIONS_PATH: &str = "/api/me/permissions";
pub const COLLEGES_PATH: &str = "/api/context/colleges";
pub const CLASSES_PATH: &str = "/api/context/classes";
pub const SECTIONS_PATH: &str = "/api/context/sections";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[instrument(skip(self), fields(request_id))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, FetchError> {
        let url = self.config.endpoint(path);
        let request_id = Uuid::new_v4();
        tracing::Span::current().record("request_id", tracing::field::display(request_id));

        let mut request = self
            .http
            .get(&url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .query(query);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "Backend responded");
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout { url: url.clone() }
            } else {
                FetchError::Decode {
                    url: url.clone(),
                    message: e.to_string(),
                }
            }
        })
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

impl ContextApi for ApiClient {
    fn colleges(&self) -> ApiFuture<'_, Vec<CollegeOption>> {
        Box::pin(async move {
            self.get_json::<Vec<CollegeOption>>(COLLEGES_PATH, &[])
                .await
        })
    }

    fn classes(&self, college_id: Option<CollegeId>) -> ApiFuture<'_, Vec<ClassOption>> {
        Box::pin(async move {
            let query: Vec<(&'static str, String)> = college_id
                .map(|id| ("college_id", id.to_string()))
                .into_iter()
                .collect();
            self.get_json::<Vec<ClassOption>>(CLASSES_PATH, &query).await
        })
    }

    fn sections(&self, class_id: ClassId) -> ApiFuture<'_, Vec<SectionOption>> {
        Box::pin(async move {
            let query = [("class_id", class_id.to_string())];
            self.get_json::<Vec<SectionOption>>(SECTIONS_PATH, &query)
                .await
        })
    }
}

impl PermissionSource for ApiClient {
    fn permissions(&self) -> ApiFuture<'_, PermissionPayload> {
        Box::pin(async move {
            self.get_json::<PermissionPayload>(PERMISSIONS_PATH, &[])
                .await
        })
    }
}
