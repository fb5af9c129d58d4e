use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::{
    extractors::MaybeUser,
    names,
    rejections::{AppError, ResultExt},
    utils, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::REGISTER_URL, post(register))
        .route(names::LOGIN_URL, post(login))
        .route(names::LOGOUT_URL, post(logout))
        .route(names::ME_URL, get(me))
}

#[derive(Deserialize)]
struct RegisterBody {
    email: String,
    password: String,
    name: Option<String>,
    role: Option<String>,
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.email.is_empty() || body.password.is_empty() {
        return Err(AppError::Input("email and password required"));
    }

    // Duplicate email is the one registration failure reported distinctly.
    if state
        .db
        .email_exists(&body.email)
        .await
        .reject("could not check email")?
    {
        return Err(AppError::Input("user already exists"));
    }

    // The first user to register becomes the admin.
    let count = state
        .db
        .users_count()
        .await
        .reject("could not count users")?;
    let role = if count == 0 {
        names::ADMIN_ROLE
    } else {
        match body.role.as_deref() {
            Some(role) if names::ROLES.contains(&role) => role,
            _ => names::DEFAULT_ROLE,
        }
    };

    state
        .db
        .create_user(&body.email, &body.password, body.name.as_deref(), role)
        .await
        .reject_input("registration failed")?;

    let session_id = state
        .db
        .create_session(&body.email)
        .await
        .reject("could not create session")?;

    Ok((
        session_headers(&session_id, state.secure_cookies),
        Json(json!({ "ok": true })),
    ))
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.email.is_empty() || body.password.is_empty() {
        return Err(AppError::Input("email and password required"));
    }

    let valid = state
        .db
        .verify_user_password(&body.email, &body.password)
        .await
        .reject("could not verify credentials")?;
    if !valid {
        return Err(AppError::InvalidCredentials);
    }

    let session_id = state
        .db
        .create_session(&body.email)
        .await
        .reject("could not create session")?;

    Ok((
        session_headers(&session_id, state.secure_cookies),
        Json(json!({ "ok": true })),
    ))
}

async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    if let Some(cookie) = jar.get(names::SESSION_COOKIE_NAME) {
        state
            .db
            .delete_session(cookie.value())
            .await
            .reject("could not delete session")?;
    }

    let mut headers = HeaderMap::new();
    let cleared = utils::expired_cookie(names::SESSION_COOKIE_NAME);
    if let Ok(value) = cleared.parse() {
        headers.insert(SET_COOKIE, value);
    }

    Ok((headers, Json(json!({ "ok": true }))))
}

/// `{"user": null}` for anonymous callers, the profile projection otherwise.
async fn me(MaybeUser(user): MaybeUser) -> Json<serde_json::Value> {
    let user = user.map(|u| {
        json!({
            "email": u.email,
            "name": u.name,
            "role": u.role,
            "profile_image": u.profile_image,
        })
    });
    Json(json!({ "user": user }))
}

fn session_headers(session_id: &str, secure: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let cookie = utils::cookie(names::SESSION_COOKIE_NAME, session_id, secure);
    if let Ok(value) = cookie.parse() {
        headers.insert(SET_COOKIE, value);
    }
    headers
}
