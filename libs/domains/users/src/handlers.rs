use axum::{
    Json, Router,
    extract::{OriginalUri, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, ClientInfo, ErrorResponse, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestJsonResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{User, UserFields, UserPayload};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, get_user, create_user, update_user, delete_user),
    components(
        schemas(User, UserPayload, ErrorResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestJsonResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User directory endpoints")
    )
)]
pub struct ApiDoc;

/// `/users` and `/users/{id}` routes with the service as state
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(shared_service)
}

fn audit<T>(action: &str, id: Option<Uuid>, client: &ClientInfo, result: &UserResult<T>) {
    let resource = id.map(|id| format!("user:{}", id));

    let event = match result {
        Ok(_) => AuditEvent::new(action, resource, AuditOutcome::Success),
        Err(e) => AuditEvent::new(action, resource, AuditOutcome::Failure)
            .with_details(json!({ "error": e.to_string() })),
    };

    event.with_client(client).log();
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = TAG,
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<User>> {
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

/// Create a user
///
/// The server assigns the id; the `Location` header points at the new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = TAG,
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = User,
            headers(("Location" = String, description = "URL of the created user"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    client: ClientInfo,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> UserResult<impl IntoResponse> {
    let fields = UserFields::try_from(payload)?;

    let result = service.create_user(fields).await;
    audit("user.create", result.as_ref().ok().map(|u| u.id), &client, &result);
    let user = result?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), user.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

/// Replace a user
///
/// Every field is overwritten; there is no partial update.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UserPayload,
    responses(
        (status = 204, description = "User replaced"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    client: ClientInfo,
    UuidPath(id): UuidPath,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> UserResult<StatusCode> {
    let fields = UserFields::try_from(payload)?;

    let result = service.update_user(id, fields).await;
    audit("user.update", Some(id), &client, &result);
    result?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    client: ClientInfo,
    UuidPath(id): UuidPath,
) -> UserResult<StatusCode> {
    let result = service.delete_user(id).await;
    audit("user.delete", Some(id), &client, &result);
    result?;

    Ok(StatusCode::NO_CONTENT)
}

