use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use super::normalize_email;
use crate::application::ports::user_repository::{NewUser, UserRepository};
use crate::domain::users::user::User;

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub mobile: String,
}

#[derive(thiserror::Error, Debug)]
pub enum RegisterError {
    #[error("User already exists")]
    AlreadyExists,
    #[error("{0}")]
    Invalid(&'static str),
    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> Result<User, RegisterError> {
        if req.name.trim().is_empty() {
            return Err(RegisterError::Invalid("Please add a name"));
        }
        let email = normalize_email(&req.email);
        if email.is_empty() {
            return Err(RegisterError::Invalid("Please add an email"));
        }
        if req.password.is_empty() {
            return Err(RegisterError::Invalid("Please add a password"));
        }
        if req.mobile.trim().is_empty() {
            return Err(RegisterError::Invalid("Please add a mobile number"));
        }
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(RegisterError::AlreadyExists);
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();
        let new_user = NewUser {
            name: req.name.trim().to_string(),
            email,
            mobile: req.mobile.trim().to_string(),
            password_hash: hash,
        };
        // A concurrent registration can still win the unique index.
        self.repo
            .create_user(&new_user)
            .await?
            .ok_or(RegisterError::AlreadyExists)
    }
}
