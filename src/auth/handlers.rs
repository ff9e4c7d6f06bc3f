use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RefreshRequest, RegisterRequest},
        repo::{self, User},
        services::{is_valid_email, AuthUser, JwtKeys},
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn issue_tokens(state: &AppState, user: &User) -> Result<AuthResponse, (StatusCode, String)> {
    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign_access(&user.email).map_err(internal)?;
    let refresh_token = keys.sign_refresh(&user.email).map_err(internal)?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        user: PublicUser {
            email: user.email.clone(),
            name: user.name.clone(),
        },
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    if payload.password.len() < 8 {
        warn!("password too short");
        return Err((StatusCode::BAD_REQUEST, "Password too short".into()));
    }

    if payload.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Name is required".into()));
    }

    let mut users = repo::load(state.kv.as_ref()).await.map_err(internal)?;
    if users.iter().any(|u| u.email == payload.email) {
        warn!(email = %payload.email, "email already registered");
        return Err((StatusCode::CONFLICT, "Email already registered".into()));
    }

    let user = User {
        email: payload.email,
        password: payload.password,
        name: payload.name.trim().to_string(),
    };
    users.push(user.clone());
    repo::save(state.kv.as_ref(), &users)
        .await
        .map_err(internal)?;

    info!(user = %user.email, "user registered");
    Ok(Json(issue_tokens(&state, &user)?))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    let user = match repo::find_by_email(state.kv.as_ref(), &payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    // Plaintext comparison, matching how passwords are stored.
    if user.password != payload.password {
        warn!(email = %payload.email, "login invalid password");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
    }

    info!(user = %user.email, "user logged in");
    Ok(Json(issue_tokens(&state, &user)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| (StatusCode::UNAUTHORIZED, e.to_string()))?;

    let user = repo::find_by_email(state.kv.as_ref(), &claims.sub)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;

    Ok(Json(issue_tokens(&state, &user)?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    let user = repo::find_by_email(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?
        .ok_or_else(|| {
            error!(user = %email, "user not found");
            (StatusCode::UNAUTHORIZED, "User not found".to_string())
        })?;

    Ok(Json(PublicUser {
        email: user.email,
        name: user.name,
    }))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_then_login_round_trips() {
        let state = AppState::fake();
        let response = register(
            State(state.clone()),
            Json(RegisterRequest {
                email: "Ada@Example.COM".into(),
                password: "plain-password".into(),
                name: "Ada".into(),
            }),
        )
        .await
        .expect("register");
        assert_eq!(response.0.user.email, "ada@example.com");

        let login_response = login(
            State(state),
            Json(LoginRequest {
                email: "ada@example.com".into(),
                password: "plain-password".into(),
            }),
        )
        .await
        .expect("login");
        assert_eq!(login_response.0.user.name, "Ada");
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let state = AppState::fake();
        let request = || RegisterRequest {
            email: "ada@example.com".into(),
            password: "plain-password".into(),
            name: "Ada".into(),
        };
        register(State(state.clone()), Json(request())).await.unwrap();
        let (status, _) = register(State(state), Json(request())).await.unwrap_err();
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let state = AppState::fake();
        register(
            State(state.clone()),
            Json(RegisterRequest {
                email: "ada@example.com".into(),
                password: "plain-password".into(),
                name: "Ada".into(),
            }),
        )
        .await
        .unwrap();

        let (status, _) = login(
            State(state),
            Json(LoginRequest {
                email: "ada@example.com".into(),
                password: "wrong".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn register_rejects_short_password_and_bad_email() {
        let state = AppState::fake();
        let (status, _) = register(
            State(state.clone()),
            Json(RegisterRequest {
                email: "ada@example.com".into(),
                password: "short".into(),
                name: "Ada".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = register(
            State(state),
            Json(RegisterRequest {
                email: "not-an-email".into(),
                password: "plain-password".into(),
                name: "Ada".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn refresh_issues_new_pair() {
        let state = AppState::fake();
        let response = register(
            State(state.clone()),
            Json(RegisterRequest {
                email: "ada@example.com".into(),
                password: "plain-password".into(),
                name: "Ada".into(),
            }),
        )
        .await
        .unwrap();

        let refreshed = refresh(
            State(state),
            Json(RefreshRequest {
                refresh_token: response.0.refresh_token.clone(),
            }),
        )
        .await
        .expect("refresh");
        assert_eq!(refreshed.0.user.email, "ada@example.com");
    }
}
