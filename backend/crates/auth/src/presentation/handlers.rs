//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::cookie::extract_cookie;
use platform::password::PasswordHasher;

use crate::application::config::AuthConfig;
use crate::application::{
    DeleteUserUseCase, GetUserUseCase, LogInInput, LogInUseCase, RefreshSessionUseCase,
    SessionOutput, SignUpInput, SignUpUseCase, TokenService, UpdateUserInput, UpdateUserUseCase,
    ValidateAccessTokenUseCase,
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{TenantId, UserId};
use crate::error::{AuthError, AuthResult, Endpoint, EndpointError};
use crate::presentation::dto::{
    CreateUserRequest, LogInRequest, LoggedUserView, SessionResponse, SignUpRequest,
    UpdateUserRequest, UserResponse,
};
use crate::presentation::middleware::{CurrentPrincipal, bearer_token};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
    pub hasher: Arc<PasswordHasher>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    /// Fails if the configured hash cost is unusable
    pub fn new(repo: R, config: AuthConfig) -> AuthResult<Self> {
        let hasher = PasswordHasher::new(config.password_cost)?;
        let tokens = TokenService::new(&config);

        Ok(Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            hasher: Arc::new(hasher),
        })
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/sign-up
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), EndpointError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload
        .map_err(|e| AuthError::Validation(e.body_text()).at(Endpoint::SignUp))?;

    let use_case = SignUpUseCase::new(state.repo.clone(), state.hasher.clone());

    let input = SignUpInput {
        tenant_id: TenantId::new(req.tenant_id),
        email: req.email,
        password: req.password,
        first_name: req.first_name,
        last_name: req.last_name,
        phone: req.phone,
        role: req.role,
    };

    let user = use_case
        .execute(input)
        .await
        .map_err(|e| e.at(Endpoint::SignUp))?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

// ============================================================================
// Log In
// ============================================================================

/// POST /api/auth/login
pub async fn log_in<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LogInRequest>, JsonRejection>,
) -> Result<Response, EndpointError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) =
        payload.map_err(|e| AuthError::Validation(e.body_text()).at(Endpoint::LogIn))?;

    let use_case = LogInUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.tokens.clone(),
    );

    let input = LogInInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case
        .execute(input)
        .await
        .map_err(|e| e.at(Endpoint::LogIn))?;

    session_response(&state.config, output).map_err(|e| e.at(Endpoint::LogIn))
}

// ============================================================================
// Token Endpoints
// ============================================================================

/// POST /api/auth/validate-access-token
pub async fn validate_access_token<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> Result<Response, EndpointError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let endpoint = Endpoint::ValidateAccessToken;
    let token = bearer_token(&headers).map_err(|e| AuthError::from(e).at(endpoint))?;

    let use_case = ValidateAccessTokenUseCase::new(state.repo.clone(), state.tokens.clone());
    let output = use_case.execute(token).await.map_err(|e| e.at(endpoint))?;

    session_response(&state.config, output).map_err(|e| e.at(endpoint))
}

/// POST /api/auth/refresh-access-token
pub async fn refresh_access_token<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> Result<Response, EndpointError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let endpoint = Endpoint::RefreshAccessToken;
    let refresh_token = extract_cookie(&headers, &state.config.refresh_cookie_name);

    let use_case = RefreshSessionUseCase::new(state.repo.clone(), state.tokens.clone());
    let output = use_case
        .execute(refresh_token.as_deref())
        .await
        .map_err(|e| e.at(endpoint))?;

    session_response(&state.config, output).map_err(|e| e.at(endpoint))
}

// ============================================================================
// Users (behind the access guard)
// ============================================================================

/// GET /api/user/info
pub async fn user_info<R>(
    State(state): State<AuthAppState<R>>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = GetUserUseCase::new(state.repo.clone())
        .execute(principal.id())
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/user (administrators)
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|e| AuthError::Validation(e.body_text()))?;

    let use_case = SignUpUseCase::new(state.repo.clone(), state.hasher.clone());

    let input = SignUpInput {
        tenant_id: principal.tenant_id(),
        email: req.email,
        password: req.password,
        first_name: req.first_name,
        last_name: req.last_name,
        phone: req.phone,
        role: req.role,
    };

    let user = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// PUT /api/user, the caller's own profile
pub async fn update_current_user<R>(
    State(state): State<AuthAppState<R>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|e| AuthError::Validation(e.body_text()))?;

    let user = UpdateUserUseCase::new(state.repo.clone())
        .execute(&principal, principal.id(), update_input(req))
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// PATCH /api/user/{id} (administrators)
pub async fn update_user<R>(
    State(state): State<AuthAppState<R>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|e| AuthError::Validation(e.body_text()))?;

    let user = UpdateUserUseCase::new(state.repo.clone())
        .execute(&principal, UserId::new(id), update_input(req))
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/user/{id} (administrators)
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<i64>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    DeleteUserUseCase::new(state.repo.clone())
        .execute(&principal, UserId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Helper Functions
// ============================================================================

fn update_input(req: UpdateUserRequest) -> UpdateUserInput {
    UpdateUserInput {
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        phone: req.phone,
    }
}

/// `200` with the access token in the body and the refresh token in the cookie
fn session_response(config: &AuthConfig, output: SessionOutput) -> AuthResult<Response> {
    let cookie = config
        .refresh_cookie()
        .set_cookie_header(&output.tokens.refresh_token)
        .ok_or_else(|| AuthError::Internal("Refresh token is not a valid cookie value".into()))?;

    let body = SessionResponse {
        user: LoggedUserView::from(&output.user),
        access_token: output.tokens.access_token,
    };

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(body)).into_response())
}
