//! Shared fixtures for the integration suites: an in-process backend that
//! serves the permission and context endpoints.

#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use campusdesk::client::{
    ApiClient, CLASSES_PATH, COLLEGES_PATH, PERMISSIONS_PATH, REQUEST_ID_HEADER, SECTIONS_PATH,
};
use campusdesk::state::AppState;
use campusdesk_cache::CacheConfig;
use campusdesk_config::{ApiConfig, StorageConfig};
use campusdesk_models::options::{ClassOption, CollegeOption, SectionOption};
use campusdesk_observability::init_basic_console_logging;
use campusdesk_settings::{MemoryStorage, SettingsStorage};
use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::name::en::LastName;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TEST_TOKEN: &str = "test-token";

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub request_id: Option<String>,
    pub authorization: Option<String>,
}

/// Canned responses keyed by parent id.
#[derive(Debug, Default)]
pub struct MockBackend {
    pub permissions: Value,
    pub fail_permissions: bool,
    pub colleges: Vec<CollegeOption>,
    /// Classes per college. The `None` entry answers unscoped requests.
    pub classes: HashMap<Option<i64>, Vec<ClassOption>>,
    pub sections: HashMap<i64, Vec<SectionOption>>,
    pub seen: Mutex<Vec<SeenRequest>>,
}

impl MockBackend {
    /// Two colleges; college 1 has two classes, college 2 has one. Every
    /// class has two sections.
    pub fn school(permissions: Value) -> Self {
        let colleges = vec![
            CollegeOption::new(1, format!("{} College", CityName().fake::<String>())),
            CollegeOption::new(2, format!("{} College", CityName().fake::<String>())),
        ];

        let mut classes = HashMap::new();
        classes.insert(
            Some(1),
            vec![
                ClassOption::new(10, "Grade 10").in_college(1),
                ClassOption::new(11, "Grade 11").in_college(1),
            ],
        );
        classes.insert(Some(2), vec![ClassOption::new(20, "Grade 9").in_college(2)]);
        classes.insert(None, vec![ClassOption::new(20, "Grade 9").in_college(2)]);

        let mut sections = HashMap::new();
        for class_id in [10, 11, 20] {
            sections.insert(
                class_id,
                vec![
                    SectionOption::new(class_id * 10 + 1, format!("{} A", LastName().fake::<String>()))
                        .in_class(class_id),
                    SectionOption::new(class_id * 10 + 2, format!("{} B", LastName().fake::<String>()))
                        .in_class(class_id),
                ],
            );
        }

        Self {
            permissions,
            colleges,
            classes,
            sections,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }

    fn record(&self, path: &str, headers: &HeaderMap) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.seen.lock().unwrap().push(SeenRequest {
            path: path.to_string(),
            request_id: header(REQUEST_ID_HEADER),
            authorization: header("authorization"),
        });
    }
}

pub fn super_admin() -> Value {
    json!({
        "user": { "user_id": 1, "email": "root@campus.test", "role": "super_admin" },
        "permissions": {}
    })
}

pub fn teacher(college_id: &str) -> Value {
    json!({
        "user": { "user_id": "15", "email": "t@campus.test", "role": "teacher", "college_id": college_id },
        "permissions": { "classes": { "view": { "enabled": true, "scope": "team" } } }
    })
}

pub fn student() -> Value {
    json!({
        "user": { "user_id": 40, "role": "student", "college_id": 2 },
        "permissions": {}
    })
}

#[derive(Deserialize)]
struct ClassQuery {
    college_id: Option<i64>,
}

#[derive(Deserialize)]
struct SectionQuery {
    class_id: i64,
}

async fn permissions(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    backend.record(PERMISSIONS_PATH, &headers);
    if backend.fail_permissions {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "unauthorized" })),
        )
            .into_response();
    }
    Json(backend.permissions.clone()).into_response()
}

async fn colleges(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
) -> Json<Vec<CollegeOption>> {
    backend.record(COLLEGES_PATH, &headers);
    Json(backend.colleges.clone())
}

async fn classes(
    State(backend): State<Arc<MockBackend>>,
    Query(query): Query<ClassQuery>,
    headers: HeaderMap,
) -> Json<Vec<ClassOption>> {
    backend.record(CLASSES_PATH, &headers);
    Json(
        backend
            .classes
            .get(&query.college_id)
            .cloned()
            .unwrap_or_default(),
    )
}

async fn sections(
    State(backend): State<Arc<MockBackend>>,
    Query(query): Query<SectionQuery>,
    headers: HeaderMap,
) -> Json<Vec<SectionOption>> {
    backend.record(SECTIONS_PATH, &headers);
    Json(
        backend
            .sections
            .get(&query.class_id)
            .cloned()
            .unwrap_or_default(),
    )
}

/// Serve `backend` on an ephemeral port; returns its base URL.
pub async fn spawn_backend(backend: MockBackend) -> (String, Arc<MockBackend>) {
    init_basic_console_logging();
    let backend = Arc::new(backend);
    let app = Router::new()
        .route(PERMISSIONS_PATH, get(permissions))
        .route(COLLEGES_PATH, get(colleges))
        .route(CLASSES_PATH, get(classes))
        .route(SECTIONS_PATH, get(sections))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), backend)
}

/// Application state talking to `base_url` with in-memory settings storage.
pub fn app_state(base_url: &str) -> AppState {
    let api_config = ApiConfig {
        base_url: base_url.to_string(),
        token: Some(TEST_TOKEN.to_string()),
        timeout_secs: 5,
    };
    let client = Arc::new(ApiClient::new(api_config.clone()).unwrap());
    let storage: Arc<dyn SettingsStorage> = Arc::new(MemoryStorage::new());

    AppState::new(
        client,
        storage,
        api_config,
        StorageConfig::default(),
        &CacheConfig::default(),
    )
}

/// Spawn a school backend for `permissions` and wire an app state to it.
pub async fn session(permissions: Value) -> (AppState, Arc<MockBackend>) {
    let (url, backend) = spawn_backend(MockBackend::school(permissions)).await;
    (app_state(&url), backend)
}
