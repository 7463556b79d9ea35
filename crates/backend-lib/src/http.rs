// ============================
// crates/backend-lib/src/http.rs
// ============================
//! HTTP router and request handlers for the auth endpoints.
use crate::error::AuthError;
use crate::validation::{
    validate_code, validate_email, validate_name, validate_password, validate_preference,
};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use credence_common::{
    ForgotPasswordRequest, ForgotPasswordResetRequest, LoginRequest, ProfileResponse,
    ResendVerificationRequest, SessionTokenResponse, SignUpRequest, StatusResponse,
    VerifyEmailRequest,
};
use tower_http::trace::TraceLayer;

/// Create the authentication router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/auth/signUp", post(sign_up))
        .route("/auth/login", post(login))
        .route("/auth/verifyEmail/verify", post(verify_email))
        .route("/auth/verifyEmail/resend", post(resend_verification))
        .route("/auth/password/forgot", post(forgot_password))
        .route("/auth/password/reset", post(forgot_password_reset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handler for account creation
async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<impl IntoResponse, AuthError> {
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    validate_name(&req.first_name)?;
    validate_name(&req.last_name)?;
    if let Some(preference) = req.preference {
        validate_preference(preference)?;
    }

    let profile = state
        .engine
        .sign_up(
            &req.email,
            req.password,
            &req.first_name,
            &req.last_name,
            req.preference,
        )
        .await?;

    let reply = ProfileResponse {
        id: profile.id.to_string(),
        account_id: profile.account_id.to_string(),
        first_name: profile.first_name,
        last_name: profile.last_name,
    };
    Ok((StatusCode::CREATED, Json(reply)))
}

/// Handler for credential login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionTokenResponse>, AuthError> {
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let access_token = state.engine.login(&req.email, req.password).await?;
    Ok(Json(SessionTokenResponse { access_token }))
}

/// Handler for consuming an emailed verification code
async fn verify_email(
    State(state): State<AppState>,
    Json(req): Json<VerifyEmailRequest>,
) -> Result<Json<SessionTokenResponse>, AuthError> {
    validate_email(&req.email)?;
    validate_code(&req.code)?;

    let access_token = state.engine.verify_email(&req.email, &req.code).await?;
    Ok(Json(SessionTokenResponse { access_token }))
}

/// Handler for reissuing a verification code
async fn resend_verification(
    State(state): State<AppState>,
    Json(req): Json<ResendVerificationRequest>,
) -> Result<Json<StatusResponse>, AuthError> {
    validate_email(&req.email)?;

    let status = state.engine.resend_verification(&req.email).await?;
    Ok(Json(StatusResponse {
        status: status.as_status_str().to_string(),
    }))
}

/// Handler for starting a password reset
async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<StatusResponse>, AuthError> {
    validate_email(&req.email)?;

    let status = state.engine.forgot_password(&req.email).await?;
    Ok(Json(StatusResponse {
        status: status.to_string(),
    }))
}

/// Handler for completing a password reset
async fn forgot_password_reset(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordResetRequest>,
) -> Result<Json<StatusResponse>, AuthError> {
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    validate_code(&req.code)?;

    let status = state
        .engine
        .forgot_password_reset(&req.email, req.password, &req.code)
        .await?;
    Ok(Json(StatusResponse {
        status: status.to_string(),
    }))
}
