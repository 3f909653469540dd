use axum::{
    Extension, Json, Router,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{JwtAuth, JwtClaims, USER_ID_HEADER, ValidatedJson, jwt_auth_middleware};
use std::sync::Arc;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, LoginRequest, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Create the users router; mount it under `/users`.
///
/// Only `GET /` sits behind the bearer-token middleware; create and login
/// are public.
pub fn router<R: UserRepository + 'static>(service: UserService<R>, auth: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_users)
                // Applies to the GET handler registered above, not to POST below
                .route_layer(from_fn_with_state(auth, jwt_auth_middleware))
                .post(create_user),
        )
        .route("/login", post(login))
        .with_state(shared_service)
}

/// OpenAPI document for the users routes
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, login),
    components(schemas(CreateUser, LoginRequest, UserResponse)),
    modifiers(&BearerAuthAddon),
    tags((name = "users", description = "User registration, login and listing"))
)]
pub struct UsersApiDoc;

struct BearerAuthAddon;

impl Modify for BearerAuthAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All known users", body = Vec<UserResponse>),
        (status = 403, description = "Missing, invalid or expired bearer token")
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Extension(claims): Extension<JwtClaims>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.list_users().await?;

    tracing::debug!(caller = %claims.sub, count = users.len(), "Listed users");
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already registered")
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<Json<UserResponse>> {
    let user = service.create_user(input).await?;
    Ok(Json(user))
}

/// Log in with email/password
///
/// The token comes back in the `Authorization` header as `Bearer <jwt>`,
/// alongside a `UserID` header; the body is empty.
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", headers(
            ("Authorization" = String, description = "Bearer token"),
            ("UserID" = String, description = "Authenticated user id")
        )),
        (status = 401, description = "Invalid email or password")
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<impl IntoResponse> {
    let session = service.login(&input.email, &input.password).await?;

    let bearer = HeaderValue::from_str(&format!("Bearer {}", session.token))
        .map_err(|e| UserError::Internal(format!("Failed to build auth header: {}", e)))?;
    let user_id = HeaderValue::from_str(&session.user_id.to_string())
        .map_err(|e| UserError::Internal(format!("Failed to build user id header: {}", e)))?;

    Ok((
        StatusCode::OK,
        [(header::AUTHORIZATION, bearer), (USER_ID_HEADER, user_id)],
    ))
}
