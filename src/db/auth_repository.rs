use async_trait::async_trait;

use crate::auth::models::{Session, User};
use crate::error::AppError;

/// Repository trait for editor accounts and login sessions.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Find a user by (lower-cased) email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Insert a user; an existing user with the same email is left untouched.
    async fn create_user_if_absent(&self, user: User) -> Result<(), AppError>;

    async fn insert_session(&self, session: Session) -> Result<(), AppError>;

    async fn find_session(&self, token_hash: &str) -> Result<Option<Session>, AppError>;

    async fn delete_session(&self, token_hash: &str) -> Result<(), AppError>;
}

/// MongoDB implementation of the AuthRepository.
#[cfg(feature = "ssr")]
pub struct MongoAuthRepository {
    users: mongodb::Collection<User>,
    sessions: mongodb::Collection<Session>,
}

#[cfg(feature = "ssr")]
impl MongoAuthRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            users: db.collection("users"),
            sessions: db.collection("sessions"),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl AuthRepository for MongoAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        use mongodb::bson::doc;

        self.users
            .find_one(doc! { "email": email.trim().to_lowercase() })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn create_user_if_absent(&self, user: User) -> Result<(), AppError> {
        if self.find_user_by_email(&user.email).await?.is_some() {
            return Ok(());
        }

        self.users
            .insert_one(&user)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn insert_session(&self, session: Session) -> Result<(), AppError> {
        self.sessions
            .insert_one(&session)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_session(&self, token_hash: &str) -> Result<Option<Session>, AppError> {
        use mongodb::bson::doc;

        self.sessions
            .find_one(doc! { "token_hash": token_hash })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn delete_session(&self, token_hash: &str) -> Result<(), AppError> {
        use mongodb::bson::doc;

        self.sessions
            .delete_one(doc! { "token_hash": token_hash })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
