//! API 请求/响应类型定义
//!
//! 带 TS 导出的结构会生成到 web 前端，字段名即线上契约：
//! lead 表单字段沿用 snake_case，评论/联系表单沿用 camelCase。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::services::TrackedLocation;
use crate::storage::{EventItem, Recipe, Review, Store};
use crate::utils::Ingredient;

/// 输出目录常量
pub const TS_EXPORT_PATH: &str = "../web/src/types/api.generated.ts";

// ============ 请求类型 ============

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PostLeadRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub zip_code: Option<String>,
    /// YYYY-MM-DD，可选；填了就校验法定年龄
    pub date_of_birth: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct VerifyQuery {
    pub token: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct PostReviewRequest {
    pub product_slug: Option<String>,
    pub author_name: Option<String>,
    pub rating: Option<i64>,
    pub review_text: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ReviewsQuery {
    pub slug: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StoresQuery {
    #[serde(rename = "productSlug")]
    pub product_slug: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct PostInquiryRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub inquiry_type: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct RecipesQuery {
    #[serde(rename = "productSlug")]
    pub product_slug: Option<String>,
}

// ============ 响应类型 ============

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        SuccessResponse { success: true }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ReviewResponse {
    pub id: String,
    pub product_slug: String,
    pub author_name: String,
    pub rating: i32,
    pub review_text: String,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        ReviewResponse {
            id: review.id,
            product_slug: review.product_slug,
            author_name: review.author_name,
            rating: review.rating,
            review_text: review.review_text,
            status: review.status.to_string(),
            created_at: review.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ReviewsListResponse {
    pub reviews: Vec<ReviewResponse>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct StoreResponse {
    pub id: String,
    pub name: String,
    pub address_line1: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

impl From<Store> for StoreResponse {
    fn from(store: Store) -> Self {
        StoreResponse {
            id: store.id,
            name: store.name,
            address_line1: store.address_line1,
            city: store.city,
            state: store.state,
            zip_code: store.zip_code,
            phone: store.phone,
            lat: store.lat,
            lng: store.lng,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct StoresListResponse {
    pub stores: Vec<StoreResponse>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct TrackLocationResponse {
    pub zip_code: Option<String>,
    pub city: Option<String>,
}

impl From<TrackedLocation> for TrackLocationResponse {
    fn from(location: TrackedLocation) -> Self {
        TrackLocationResponse {
            zip_code: location.zip_code,
            city: location.city,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    /// 展示用格式，如 "Dec 15, 2025 | 7:00 PM"
    pub date: String,
    pub event_datetime: chrono::DateTime<chrono::Utc>,
    pub location: String,
    pub category: String,
    pub cta_link: String,
}

impl From<EventItem> for EventResponse {
    fn from(event: EventItem) -> Self {
        let date = event
            .event_datetime
            .format("%b %-d, %Y | %-I:%M %p")
            .to_string();

        EventResponse {
            id: event.id,
            name: event.name,
            slug: event.slug,
            image: event.image_url,
            date,
            event_datetime: event.event_datetime,
            location: event.location,
            category: event.category,
            cta_link: event.cta_link.unwrap_or_else(|| "#".to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct EventsListResponse {
    pub events: Vec<EventResponse>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct RecipeResponse {
    pub slug: String,
    pub name: String,
    pub product_slug: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        RecipeResponse {
            slug: recipe.slug,
            name: recipe.name,
            product_slug: recipe.product_slug,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct RecipesListResponse {
    pub recipes: Vec<RecipeResponse>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HealthResponse {
    pub status: String,
    pub uptime: i64,
    pub backend: String,
}
