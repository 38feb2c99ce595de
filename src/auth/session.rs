use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::models::{
    generate_session_token, hash_session_token, AuthenticatedUser, Session, User,
};
use crate::db::auth_repository::AuthRepository;
use crate::error::AppError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "mediahub_session";

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: AuthenticatedUser,
}

/// Check credentials and open a session.
///
/// Returns the cookie token (only its hash is stored) and the logged-in user.
pub async fn process_login(
    repo: &dyn AuthRepository,
    email: &str,
    password: &str,
    ttl_hours: i64,
) -> Result<(String, AuthenticatedUser), AppError> {
    let user = repo
        .find_user_by_email(email)
        .await?
        .filter(|user| user.verify_password(password))
        .ok_or_else(|| AppError::Auth("Invalid email or password".into()))?;

    let token = generate_session_token();
    repo.insert_session(Session {
        token_hash: hash_session_token(&token),
        user_id: user.id.clone(),
        email: user.email.clone(),
        expires_at: Utc::now() + Duration::hours(ttl_hours),
    })
    .await?;

    tracing::info!(user_id = %user.id, "editor logged in");

    Ok((
        token,
        AuthenticatedUser {
            user_id: user.id,
            email: user.email,
        },
    ))
}

/// Resolve a session token to its user. Expired sessions are removed.
pub async fn authenticate_session(
    repo: &dyn AuthRepository,
    token: &str,
) -> Result<AuthenticatedUser, AppError> {
    let token_hash = hash_session_token(token);
    let session = repo
        .find_session(&token_hash)
        .await?
        .ok_or_else(|| AppError::Auth("Not logged in".into()))?;

    if session.is_expired(Utc::now()) {
        repo.delete_session(&token_hash).await?;
        return Err(AppError::Auth("Session expired".into()));
    }

    Ok(AuthenticatedUser {
        user_id: session.user_id,
        email: session.email,
    })
}

/// The user behind the request's session cookie, or an `Auth` error.
pub async fn require_user(
    repo: &dyn AuthRepository,
    jar: &CookieJar,
) -> Result<AuthenticatedUser, AppError> {
    let cookie = jar
        .get(SESSION_COOKIE)
        .ok_or_else(|| AppError::Auth("Not logged in".into()))?;
    authenticate_session(repo, cookie.value()).await
}

/// Create the configured editor account if it does not exist yet.
pub async fn ensure_admin(
    repo: &dyn AuthRepository,
    config: &crate::config::AuthConfig,
) -> Result<(), AppError> {
    match (&config.admin_email, &config.admin_password) {
        (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
            repo.create_user_if_absent(User::new(email, password)).await?;
            tracing::info!(email = %email.trim().to_lowercase(), "editor account ensured");
            Ok(())
        }
        _ => Ok(()),
    }
}

/// `POST /api/auth/login`
///
/// On success sets the session cookie and returns the user info.
pub async fn login_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: CookieJar,
    axum::Json(req): axum::Json<LoginRequest>,
) -> Result<(CookieJar, axum::Json<LoginResponse>), AppError> {
    let (token, user) = process_login(
        state.auth_repo.as_ref(),
        &req.email,
        &req.password,
        state.session_ttl_hours,
    )
    .await?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(state.session_ttl_hours))
        .build();

    Ok((
        jar.add(cookie),
        axum::Json(LoginResponse {
            message: "Login successful".to_string(),
            user,
        }),
    ))
}

/// `GET /api/auth/me`. Returns the user behind the session cookie.
pub async fn me_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: CookieJar,
) -> Result<axum::Json<AuthenticatedUser>, AppError> {
    let user = require_user(state.auth_repo.as_ref(), &jar).await?;
    Ok(axum::Json(user))
}

/// `POST /api/auth/logout`. Ends the session and clears the cookie.
pub async fn logout_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: CookieJar,
) -> Result<CookieJar, AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state
            .auth_repo
            .delete_session(&hash_session_token(cookie.value()))
            .await?;
    }

    let cookie = Cookie::build((SESSION_COOKIE, "")).path("/").removal().build();
    Ok(jar.remove(cookie))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::db::memory::InMemoryAuthRepository;

    async fn repo_with_editor() -> InMemoryAuthRepository {
        let repo = InMemoryAuthRepository::new();
        repo.create_user_if_absent(User::new("editor@example.com", "letmein"))
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn test_login_success() {
        let repo = repo_with_editor().await;
        let (token, user) = process_login(&repo, "Editor@Example.com", "letmein", 24)
            .await
            .unwrap();
        assert_eq!(user.email, "editor@example.com");

        let resolved = authenticate_session(&repo, &token).await.unwrap();
        assert_eq!(resolved, user);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let repo = repo_with_editor().await;
        let result = process_login(&repo, "editor@example.com", "nope", 24).await;
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let repo = repo_with_editor().await;
        let result = process_login(&repo, "ghost@example.com", "letmein", 24).await;
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[tokio::test]
    async fn test_expired_session_rejected_and_removed() {
        let repo = repo_with_editor().await;
        let (token, _) = process_login(&repo, "editor@example.com", "letmein", -1)
            .await
            .unwrap();

        let result = authenticate_session(&repo, &token).await;
        assert!(matches!(result, Err(AppError::Auth(msg)) if msg.contains("expired")));
        assert!(repo
            .find_session(&hash_session_token(&token))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_unknown_token_rejected() {
        let repo = repo_with_editor().await;
        assert!(authenticate_session(&repo, "forged").await.is_err());
    }

    #[tokio::test]
    async fn test_ensure_admin() {
        let repo = InMemoryAuthRepository::new();
        let config = AuthConfig {
            session_ttl_hours: 24,
            admin_email: Some("admin@example.com".to_string()),
            admin_password: Some("pw".to_string()),
        };
        ensure_admin(&repo, &config).await.unwrap();
        assert!(repo
            .find_user_by_email("admin@example.com")
            .await
            .unwrap()
            .is_some());

        let empty = InMemoryAuthRepository::new();
        let config = AuthConfig {
            session_ttl_hours: 24,
            admin_email: None,
            admin_password: Some("pw".to_string()),
        };
        ensure_admin(&empty, &config).await.unwrap();
        assert!(empty
            .find_user_by_email("admin@example.com")
            .await
            .unwrap()
            .is_none());
    }
}
