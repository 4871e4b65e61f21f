use crate::application::ports::settings_repository::SettingsRepository;
use crate::domain::settings::system_settings::{SocialLinks, SystemSettings};

#[derive(Debug, Clone, Default)]
pub struct SocialLinksPatch {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
}

/// Absent fields keep their stored value. A present `social_links` replaces all
/// three links, blanking the ones it omits.
#[derive(Debug, Clone, Default)]
pub struct UpdateSettingsRequest {
    pub site_name: Option<String>,
    pub logo: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub social_links: Option<SocialLinksPatch>,
    pub is_login_enabled: Option<bool>,
}

pub struct UpdateSettings<'a, S: SettingsRepository + ?Sized> {
    pub repo: &'a S,
}

impl<'a, S: SettingsRepository + ?Sized> UpdateSettings<'a, S> {
    pub async fn execute(&self, req: UpdateSettingsRequest) -> anyhow::Result<SystemSettings> {
        let current = self.repo.get_or_create().await?;
        let next = apply(current, req);
        let saved = self.repo.save(&next).await?;
        tracing::info!(login_enabled = saved.is_login_enabled, "settings_updated");
        Ok(saved)
    }
}

fn apply(mut s: SystemSettings, req: UpdateSettingsRequest) -> SystemSettings {
    if let Some(v) = req.site_name {
        s.site_name = v;
    }
    if let Some(v) = req.logo {
        s.logo = v;
    }
    if let Some(v) = req.phone {
        s.phone = v;
    }
    if let Some(v) = req.email {
        s.email = v;
    }
    if let Some(v) = req.address {
        s.address = v;
    }
    if let Some(links) = req.social_links {
        s.social_links = SocialLinks {
            facebook: links.facebook.unwrap_or_default(),
            instagram: links.instagram.unwrap_or_default(),
            twitter: links.twitter.unwrap_or_default(),
        };
    }
    if let Some(enabled) = req.is_login_enabled {
        s.is_login_enabled = enabled;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_keeps_untouched_fields() {
        let mut current = SystemSettings::default();
        current.phone = "+91 98765 43210".into();
        current.social_links.facebook = "fb.com/shop".into();

        let next = apply(
            current,
            UpdateSettingsRequest {
                site_name: Some("Readers Den".into()),
                is_login_enabled: Some(false),
                ..Default::default()
            },
        );
        assert_eq!(next.site_name, "Readers Den");
        assert_eq!(next.phone, "+91 98765 43210");
        assert_eq!(next.social_links.facebook, "fb.com/shop");
        assert!(!next.is_login_enabled);
    }

    #[test]
    fn social_links_are_replaced_as_a_group() {
        let mut current = SystemSettings::default();
        current.social_links.facebook = "fb.com/shop".into();
        current.social_links.twitter = "x.com/shop".into();

        let next = apply(
            current,
            UpdateSettingsRequest {
                social_links: Some(SocialLinksPatch {
                    instagram: Some("instagram.com/shop".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        assert_eq!(next.social_links.facebook, "");
        assert_eq!(next.social_links.instagram, "instagram.com/shop");
        assert_eq!(next.social_links.twitter, "");
        assert!(next.is_login_enabled);
    }
}
