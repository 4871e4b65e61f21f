pub const DEFAULT_SITE_NAME: &str = "My BookStore";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLinks {
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
}

/// Singleton row holding storefront branding and the global login switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSettings {
    pub site_name: String,
    pub logo: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub social_links: SocialLinks,
    pub is_login_enabled: bool,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            logo: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            social_links: SocialLinks::default(),
            is_login_enabled: true,
            updated_at: None,
        }
    }
}
