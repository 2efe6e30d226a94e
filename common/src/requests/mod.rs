use crate::model::banner::Banner;
use serde::{Deserialize, Serialize};

/// Request payload for `POST /api/admin/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request payload for `POST /api/admin/categories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategoryRequest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Request payload for `PUT /api/admin/categories/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Request payload for `POST /api/admin/channels`.
///
/// `url` may be any supported YouTube channel URL; it is resolved to the
/// canonical channel id before the channel is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewChannelRequest {
    pub url: String,
    pub category: String,
    pub subject: String,
}

/// Request payload for `PUT /api/admin/channels/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateChannelRequest {
    pub name: String,
    pub subject: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturedRequest {
    pub featured: bool,
}

/// Request payload for `PUT /api/admin/banners`. Replaces both banner slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannersRequest {
    #[serde(default)]
    pub cover: Option<Banner>,
    #[serde(default)]
    pub promotional: Vec<Banner>,
}

/// Query string of `GET /api/catalog/channels`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelFilter {
    pub category: Option<String>,
    pub subject: Option<String>,
}
