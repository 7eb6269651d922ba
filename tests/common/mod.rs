use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum_extra::headers::{Authorization, HeaderMapExt};
use coursebook::coursebook_config::{CorsConfig, ServerConfig};
use coursebook::coursebook_core::hash_password;
use coursebook::coursebook_db::memory::InMemoryStore;
use coursebook::coursebook_db::{CourseRepository, UserRepository};
use coursebook::coursebook_models::{Course, CourseDto, NewUser, User};
use coursebook::router::init_router;
use coursebook::state::AppState;
use http_body_util::BodyExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub password: String,
}

pub fn setup_test_app() -> (axum::Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let state = AppState::new(
        store.clone(),
        ServerConfig::default(),
        CorsConfig::default(),
    );
    (init_router(state), store)
}

pub async fn create_test_user(store: &InMemoryStore, password: &str) -> TestUser {
    let email = generate_unique_email();
    let user: User = UserRepository::create(
        store,
        NewUser {
            first_name: "Joe".to_string(),
            last_name: "Smith".to_string(),
            email_address: email.clone(),
            password_hash: hash_password(password).unwrap(),
        },
    )
    .await
    .unwrap();

    TestUser {
        id: user.id,
        email,
        password: password.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_course(store: &InMemoryStore, owner_id: i64, title: &str) -> Course {
    CourseRepository::create(
        store,
        owner_id,
        &CourseDto {
            title: title.to_string(),
            description: "Learn by building".to_string(),
            estimated_time: Some("12 hours".to_string()),
            materials_needed: Some("* Saw\n* Glue".to_string()),
            user_id: None,
        },
    )
    .await
    .unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Builds a request, with Basic credentials when `auth` is given and a JSON
/// body when `body` is given.
pub fn request(
    method: &str,
    uri: &str,
    auth: Option<(&str, &str)>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let mut request = builder
        .body(match body {
            Some(body) => Body::from(serde_json::to_string(&body).unwrap()),
            None => Body::empty(),
        })
        .unwrap();

    if let Some((user, password)) = auth {
        request
            .headers_mut()
            .typed_insert(Authorization::basic(user, password));
    }
    request
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
