use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::utils::Ingredient;

/// 营销表单产生的潜在客户记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub zip_code: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// 服务端生成的一次性验证 token，创建后只读
    pub verification_token: String,
    pub is_verified: bool,
    pub coupon_code: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// lead 插入参数（token、优惠码、时间戳都由存储层生成）
#[derive(Debug, Clone, Default)]
pub struct NewLead {
    pub email: String,
    pub first_name: Option<String>,
    pub zip_code: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// 评论审核状态，公开读只返回 Approved
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString, Default,
)]
pub enum ReviewStatus {
    #[default]
    Approved,
    Pending,
    Rejected,
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub product_slug: String,
    pub author_name: String,
    pub rating: i32,
    pub review_text: String,
    pub status: ReviewStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_slug: String,
    pub author_name: String,
    pub rating: i32,
    pub review_text: String,
}

/// 线下门店（store locator 数据）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
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

/// 流量日志条目。geo 字段可空，查询失败时照样落库
#[derive(Debug, Clone)]
pub struct NewTrafficLog {
    pub city: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub path: String,
    pub device_type: String,
}

#[derive(Debug, Clone)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub inquiry_type: String,
    pub message: String,
}

/// 活动列表条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventItem {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub event_datetime: chrono::DateTime<chrono::Utc>,
    pub location: String,
    pub category: String,
    pub cta_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub slug: String,
    pub name: String,
    pub product_slug: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub slug: String,
    pub name: String,
    pub product_slug: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
}
