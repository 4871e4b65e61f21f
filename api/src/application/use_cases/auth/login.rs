use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use super::normalize_email;
use crate::application::ports::settings_repository::SettingsRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct Login<'a, R, S>
where
    R: UserRepository + ?Sized,
    S: SettingsRepository + ?Sized,
{
    pub repo: &'a R,
    pub settings: &'a S,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(thiserror::Error, Debug)]
pub enum LoginError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Login is currently disabled by Administrator.")]
    Disabled,
    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

impl<'a, R, S> Login<'a, R, S>
where
    R: UserRepository + ?Sized,
    S: SettingsRepository + ?Sized,
{
    /// Admins may sign in while the global login switch is off.
    pub async fn execute(&self, req: &LoginRequest) -> Result<User, LoginError> {
        let email = normalize_email(&req.email);
        let creds = self
            .repo
            .find_credentials(&email)
            .await?
            .ok_or(LoginError::InvalidCredentials)?;
        let parsed = match PasswordHash::new(&creds.password_hash) {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(user_id = %creds.user.id, error = %err, "stored_password_hash_unparseable");
                return Err(LoginError::InvalidCredentials);
            }
        };
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_err()
        {
            return Err(LoginError::InvalidCredentials);
        }
        if !creds.user.is_admin() && !self.settings.get_or_create().await?.is_login_enabled {
            return Err(LoginError::Disabled);
        }
        Ok(creds.user)
    }
}
