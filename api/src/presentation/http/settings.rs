use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::settings::get_settings::GetSettings;
use crate::application::use_cases::settings::update_settings::{
    SocialLinksPatch, UpdateSettings, UpdateSettingsRequest,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::settings::system_settings::SystemSettings;
use crate::presentation::http::auth::AdminUser;
use crate::presentation::http::error::{ApiResult, MessageResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SocialLinksBody {
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub site_name: String,
    pub logo: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub social_links: SocialLinksBody,
    pub is_login_enabled: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<SystemSettings> for SettingsResponse {
    fn from(s: SystemSettings) -> Self {
        Self {
            site_name: s.site_name,
            logo: s.logo,
            phone: s.phone,
            email: s.email,
            address: s.address,
            social_links: SocialLinksBody {
                facebook: Some(s.social_links.facebook),
                instagram: Some(s.social_links.instagram),
                twitter: Some(s.social_links.twitter),
            },
            is_login_enabled: s.is_login_enabled,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsBody {
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub social_links: Option<SocialLinksBody>,
    #[serde(default, deserialize_with = "login_flag")]
    #[schema(value_type = Option<bool>)]
    pub is_login_enabled: Option<bool>,
    /// Older admin panels send the switch under this name.
    #[serde(default, deserialize_with = "login_flag")]
    #[schema(value_type = Option<bool>)]
    pub force_login: Option<bool>,
}

/// `true` or `"true"` enable login; any other present value disables it.
fn login_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(Some(match raw {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => s == "true",
        _ => false,
    }))
}

impl From<UpdateSettingsBody> for UpdateSettingsRequest {
    fn from(b: UpdateSettingsBody) -> Self {
        UpdateSettingsRequest {
            site_name: b.site_name,
            logo: b.logo,
            phone: b.phone,
            email: b.email,
            address: b.address,
            social_links: b.social_links.map(|l| SocialLinksPatch {
                facebook: l.facebook,
                instagram: l.instagram,
                twitter: l.twitter,
            }),
            is_login_enabled: b.is_login_enabled.or(b.force_login),
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/settings", get(get_settings).put(update_settings))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/settings", tag = "Settings", security(()), responses(
    (status = 200, body = SettingsResponse)
))]
pub async fn get_settings(State(ctx): State<AppContext>) -> ApiResult<Json<SettingsResponse>> {
    let repo = ctx.settings_repo();
    let uc = GetSettings {
        repo: repo.as_ref(),
    };
    let settings = uc.execute().await?;
    Ok(Json(settings.into()))
}

#[utoipa::path(put, path = "/api/settings", tag = "Settings", request_body = UpdateSettingsBody, responses(
    (status = 200, body = SettingsResponse),
    (status = 401, body = MessageResponse)
))]
pub async fn update_settings(
    State(ctx): State<AppContext>,
    AdminUser(admin): AdminUser,
    Json(body): Json<UpdateSettingsBody>,
) -> ApiResult<Json<SettingsResponse>> {
    let repo = ctx.settings_repo();
    let uc = UpdateSettings {
        repo: repo.as_ref(),
    };
    let saved = uc.execute(body.into()).await?;
    tracing::info!(admin_id = %admin.id, "settings_saved_by_admin");
    Ok(Json(saved.into()))
}
