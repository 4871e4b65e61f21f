pub mod login;
pub mod register;

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
