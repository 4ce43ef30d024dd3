//! Users API handlers.
//!
//! ```text
//! POST   /api/v1/users       {"name":"Dmitry","password":"123456","email":"os_dimay@mail.ru"}
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id}  {"name":"Dmitry2","password":"123456","email":"newEmail@here.ok"}
//! DELETE /api/v1/users/{id}
//! ```
//!
//! Each handler performs exactly one repository call. Request bodies are
//! validated and their passwords hashed before the repository is reached.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{Error, User, UserDraft, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_error_handler, map_user_draft_error};

/// Path prefix under which the users resource is mounted.
pub const USERS_PATH: &str = "/api/v1/users";

/// Request body for creating or replacing a user.
///
/// Example JSON:
/// `{"name":"Dmitry","password":"123456","email":"os_dimay@mail.ru"}`
#[derive(Deserialize, Serialize, ToSchema)]
pub struct UserDto {
    /// Display name; surrounding whitespace is trimmed.
    #[schema(example = "Dmitry")]
    pub name: String,
    /// Plaintext password, hashed before storage and never echoed back.
    #[schema(example = "123456")]
    pub password: String,
    /// Contact address; must contain a single `@`.
    #[schema(example = "os_dimay@mail.ru")]
    pub email: String,
}

impl TryFrom<UserDto> for UserDraft {
    type Error = Error;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let UserDto {
            name,
            password,
            email,
        } = value;
        let password = Zeroizing::new(password);
        Self::try_from_parts(&name, &password, &email).map_err(map_user_draft_error)
    }
}

/// Response body returned by `POST /api/v1/users`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatedUser {
    /// Store-assigned identifier of the new user.
    #[schema(value_type = String, example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: UserId,
}

/// JSON extractor configuration reporting undecodable bodies through the
/// shared error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Validate a payload and derive the user it describes.
///
/// Argon2 is CPU-bound, so hashing runs on actix's blocking pool.
async fn user_from_payload(payload: UserDto) -> ApiResult<User> {
    let draft = UserDraft::try_from(payload)?;
    let user = web::block(move || draft.into_user())
        .await
        .map_err(|err| Error::internal(format!("credential hashing task failed: {err}")))??;
    Ok(user)
}

/// Create a user and return its identifier.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::inbound::http::users::create_user;
///
/// let app = App::new().service(create_user);
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserDto,
    responses(
        (status = 201, description = "User created", body = CreatedUser,
            headers(("Location" = String, description = "URL of the created user"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "User store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserDto>,
) -> ApiResult<HttpResponse> {
    let user = user_from_payload(payload.into_inner()).await?;
    let id = state.users.create(&user).await?;
    debug!(user_id = %id, "user created");

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{USERS_PATH}/{id}")))
        .json(CreatedUser { id }))
}

/// Fetch a user by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "User store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = UserId::new(path.into_inner());
    let user = state.users.find_one(&id).await?;
    Ok(web::Json(user))
}

/// Replace every field of an existing user.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserDto,
    responses(
        (status = 204, description = "User updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "User store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserDto>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner());
    let user = user_from_payload(payload.into_inner())
        .await?
        .with_id(id);
    state.users.update(&user).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Remove a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "User store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner());
    state.users.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
