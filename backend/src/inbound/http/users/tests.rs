//! Tests for users API handlers.

use super::*;
use crate::Trace;
use crate::domain::ports::{MockUserRepository, UserPersistenceError, UserRepository};
use crate::domain::TRACE_ID_HEADER;
use crate::outbound::memory::InMemoryUserRepository;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;

const NEVER_ISSUED: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

#[fixture]
fn repo() -> InMemoryUserRepository {
    InMemoryUserRepository::new()
}

fn test_app(
    users: Arc<dyn UserRepository>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(users)))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .app_data(json_config())
                .service(create_user)
                .service(get_user)
                .service(update_user)
                .service(delete_user),
        )
}

fn dto(name: &str, password: &str, email: &str) -> Value {
    json!({ "name": name, "password": password, "email": email })
}

async fn create(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    body: &Value,
) -> ServiceResponse {
    let request = actix_test::TestRequest::post()
        .uri(USERS_PATH)
        .set_json(body)
        .to_request();
    actix_test::call_service(app, request).await
}

async fn error_body(response: ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("error payload")
}

#[rstest]
#[actix_web::test]
async fn create_returns_location_and_identifier(repo: InMemoryUserRepository) {
    let app = actix_test::init_service(test_app(Arc::new(repo.clone()))).await;

    let response = create(&app, &dto("Dmitry", "123456", "os_dimay@mail.ru")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("location header");
    let created: CreatedUser = actix_test::read_body_json(response).await;
    assert_eq!(location, format!("{USERS_PATH}/{}", created.id));

    let stored = repo.find_one(&created.id).await.expect("user stored");
    assert_eq!(stored.name(), "Dmitry");
    assert!(stored.password_hash().starts_with("$argon2id$"));
}

#[rstest]
#[actix_web::test]
async fn get_returns_user_without_password(repo: InMemoryUserRepository) {
    let app = actix_test::init_service(test_app(Arc::new(repo))).await;
    let created: CreatedUser =
        actix_test::read_body_json(create(&app, &dto("Dmitry", "123456", "os_dimay@mail.ru")).await)
            .await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("{USERS_PATH}/{}", created.id))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(
        body,
        json!({ "id": created.id.as_str(), "name": "Dmitry", "email": "os_dimay@mail.ru" })
    );
}

#[rstest]
#[actix_web::test]
async fn update_replaces_fields_and_returns_no_content(repo: InMemoryUserRepository) {
    let app = actix_test::init_service(test_app(Arc::new(repo.clone()))).await;
    let created: CreatedUser =
        actix_test::read_body_json(create(&app, &dto("Dmitry2", "123456", "os_dimay@mail.ru2")).await)
            .await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("{USERS_PATH}/{}", created.id))
        .set_json(dto("Dmitry2", "123456", "newEmail@here.ok"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let stored = repo.find_one(&created.id).await.expect("user stored");
    assert_eq!(stored.email(), "newEmail@here.ok");
    assert_eq!(stored.id(), Some(&created.id));
}

#[rstest]
#[actix_web::test]
async fn delete_then_get_is_not_found(repo: InMemoryUserRepository) {
    let app = actix_test::init_service(test_app(Arc::new(repo))).await;
    let created: CreatedUser =
        actix_test::read_body_json(create(&app, &dto("Dmitry", "123456", "os_dimay@mail.ru")).await)
            .await;
    let uri = format!("{USERS_PATH}/{}", created.id);

    let deleted =
        actix_test::call_service(&app, actix_test::TestRequest::delete().uri(&uri).to_request())
            .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let fetched =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
    assert!(fetched.headers().contains_key(TRACE_ID_HEADER));
    let body = error_body(fetched).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("not_found"));
}

#[rstest]
#[case(actix_test::TestRequest::get())]
#[case(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn malformed_identifiers_are_bad_requests(
    repo: InMemoryUserRepository,
    #[case] request: actix_test::TestRequest,
) {
    let app = actix_test::init_service(test_app(Arc::new(repo))).await;

    let response =
        actix_test::call_service(&app, request.uri(&format!("{USERS_PATH}/abc")).to_request())
            .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("invalid_request"));
}

#[rstest]
#[actix_web::test]
async fn update_unknown_user_is_not_found(repo: InMemoryUserRepository) {
    let app = actix_test::init_service(test_app(Arc::new(repo.clone()))).await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("{USERS_PATH}/{NEVER_ISSUED}"))
        .set_json(dto("Dmitry", "123456", "os_dimay@mail.ru"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(repo.is_empty(), Ok(true));
}

#[rstest]
#[case(dto("  ", "123456", "os_dimay@mail.ru"), "name", "empty_name")]
#[case(dto("Dmitry", "123456", ""), "email", "empty_email")]
#[case(dto("Dmitry", "123456", "os_dimay"), "email", "invalid_email")]
#[case(dto("Dmitry", "", "os_dimay@mail.ru"), "password", "empty_password")]
#[case(json!({ "name": "Dmitry" }), "body", "invalid_body")]
#[actix_web::test]
async fn invalid_payloads_are_rejected_before_storage(
    repo: InMemoryUserRepository,
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(Arc::new(repo.clone()))).await;

    let response = create(&app, &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value = error_body(response).await;
    assert_eq!(value.get("code").and_then(Value::as_str), Some("invalid_request"));
    let details = value
        .get("details")
        .and_then(Value::as_object)
        .expect("details present");
    assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
    assert_eq!(details.get("code").and_then(Value::as_str), Some(code));
    assert_eq!(repo.is_empty(), Ok(true));
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(UserPersistenceError::timeout("find_one"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(UserPersistenceError::decoding("missing field `email`"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn store_failures_map_to_status_codes(
    #[case] failure: UserPersistenceError,
    #[case] status: StatusCode,
) {
    let mut mock = MockUserRepository::new();
    mock.expect_find_one()
        .times(1)
        .returning(move |_| Err(failure.clone()));
    let app = actix_test::init_service(test_app(Arc::new(mock))).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("{USERS_PATH}/{NEVER_ISSUED}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    let body = error_body(response).await;
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Internal server error")
        );
    }
    assert!(body.get("traceId").and_then(Value::as_str).is_some());
}

#[rstest]
#[actix_web::test]
async fn create_passes_hashed_user_without_identifier_to_repository() {
    let mut mock = MockUserRepository::new();
    mock.expect_create()
        .withf(|user| {
            user.id().is_none()
                && user.name() == "Dmitry"
                && user.email() == "os_dimay@mail.ru"
                && user.password_hash() != "123456"
        })
        .times(1)
        .returning(|_| Ok(UserId::new(NEVER_ISSUED)));
    let app = actix_test::init_service(test_app(Arc::new(mock))).await;

    let response = create(&app, &dto(" Dmitry ", "123456", "os_dimay@mail.ru")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: CreatedUser = actix_test::read_body_json(response).await;
    assert_eq!(created.id.as_str(), NEVER_ISSUED);
}
