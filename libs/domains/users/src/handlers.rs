use axum::{
    Json, Router,
    extract::{FromRequestParts, Path, State},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(schemas(User, CreateUser, UpdateUser, UserEnvelope, UserListEnvelope)),
    tags(
        (name = "Users", description = "User management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Path extractor that validates the user identifier format.
///
/// A path segment that is not a well-formed UUID is rejected with 400
/// before any repository lookup happens.
pub struct UserId(pub Uuid);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        match Uuid::parse_str(&id) {
            Ok(id) => Ok(UserId(id)),
            Err(_) => Err(UserError::InvalidId.into_response()),
        }
    }
}

/// Response envelope wrapping a single user
#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub message: &'static str,
    pub data: Option<User>,
}

/// Response envelope wrapping the full collection
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListEnvelope {
    pub message: &'static str,
    pub data: Vec<User>,
    pub total: usize,
}

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .with_state(shared_service)
}

/// List all users, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = UserListEnvelope),
        (status = 500, description = "Persistence failure")
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<UserListEnvelope>> {
    let users = service.list_users().await?;

    Ok(Json(UserListEnvelope {
        message: "GET all users success",
        total: users.len(),
        data: users,
    }))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created successfully", body = UserEnvelope),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Email already exists"),
        (status = 500, description = "Persistence failure")
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Json(input): Json<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            message: "CREATE new user success",
            data: Some(user),
        }),
    ))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserEnvelope),
        (status = 400, description = "Malformed user ID"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Persistence failure")
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UserId(id): UserId,
) -> UserResult<Json<UserEnvelope>> {
    let user = service.get_user(id).await?;

    Ok(Json(UserEnvelope {
        message: "GET user by ID success",
        data: Some(user),
    }))
}

/// Apply a partial update to a user
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated successfully", body = UserEnvelope),
        (status = 400, description = "Malformed ID, empty payload or invalid fields"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already exists"),
        (status = 500, description = "Persistence failure")
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UserId(id): UserId,
    Json(input): Json<UpdateUser>,
) -> UserResult<Json<UserEnvelope>> {
    let user = service.update_user(id, input).await?;

    Ok(Json(UserEnvelope {
        message: "UPDATE user success",
        data: Some(user),
    }))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = UserEnvelope),
        (status = 400, description = "Malformed user ID"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Persistence failure")
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UserId(id): UserId,
) -> UserResult<Json<UserEnvelope>> {
    let user = service.delete_user(id).await?;

    Ok(Json(UserEnvelope {
        message: "DELETE user success",
        data: Some(user),
    }))
}
