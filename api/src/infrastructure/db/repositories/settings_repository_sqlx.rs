use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::settings_repository::SettingsRepository;
use crate::domain::settings::system_settings::{SocialLinks, SystemSettings};
use crate::infrastructure::db::PgPool;

pub struct SqlxSettingsRepository {
    pub pool: PgPool,
}

impl SqlxSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SETTINGS_COLUMNS: &str = "site_name, logo, phone, email, address, facebook, instagram, \
     twitter, is_login_enabled, updated_at";

fn map_settings(r: &PgRow) -> SystemSettings {
    SystemSettings {
        site_name: r.get("site_name"),
        logo: r.get("logo"),
        phone: r.get("phone"),
        email: r.get("email"),
        address: r.get("address"),
        social_links: SocialLinks {
            facebook: r.get("facebook"),
            instagram: r.get("instagram"),
            twitter: r.get("twitter"),
        },
        is_login_enabled: r.get("is_login_enabled"),
        updated_at: r.try_get("updated_at").ok(),
    }
}

#[async_trait]
impl SettingsRepository for SqlxSettingsRepository {
    async fn get_or_create(&self) -> anyhow::Result<SystemSettings> {
        sqlx::query("INSERT INTO system_settings (id) VALUES (true) ON CONFLICT (id) DO NOTHING")
            .execute(&self.pool)
            .await?;
        let row = sqlx::query(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM system_settings WHERE id"
        ))
        .fetch_one(&self.pool)
        .await?;
        Ok(map_settings(&row))
    }

    async fn save(&self, settings: &SystemSettings) -> anyhow::Result<SystemSettings> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO system_settings (
                    id, site_name, logo, phone, email, address,
                    facebook, instagram, twitter, is_login_enabled
               ) VALUES (true, $1, $2, $3, $4, $5, $6, $7, $8, $9)
               ON CONFLICT (id) DO UPDATE SET
                    site_name = EXCLUDED.site_name,
                    logo = EXCLUDED.logo,
                    phone = EXCLUDED.phone,
                    email = EXCLUDED.email,
                    address = EXCLUDED.address,
                    facebook = EXCLUDED.facebook,
                    instagram = EXCLUDED.instagram,
                    twitter = EXCLUDED.twitter,
                    is_login_enabled = EXCLUDED.is_login_enabled,
                    updated_at = now()
               RETURNING {SETTINGS_COLUMNS}"#
        ))
        .bind(&settings.site_name)
        .bind(&settings.logo)
        .bind(&settings.phone)
        .bind(&settings.email)
        .bind(&settings.address)
        .bind(&settings.social_links.facebook)
        .bind(&settings.social_links.instagram)
        .bind(&settings.social_links.twitter)
        .bind(settings.is_login_enabled)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_settings(&row))
    }
}
