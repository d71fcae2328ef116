//! 实体 Model 与领域结构之间的转换

use crate::storage::models::{EventItem, Lead, Recipe, Review, ReviewStatus, Store};
use crate::utils::Ingredient;

use migration::entities::{event, lead, recipe, review, store};

pub fn model_to_lead(model: lead::Model) -> Lead {
    Lead {
        id: model.id,
        email: model.email,
        first_name: model.first_name,
        zip_code: model.zip_code,
        date_of_birth: model.date_of_birth,
        verification_token: model.verification_token,
        is_verified: model.is_verified,
        coupon_code: model.coupon_code,
        created_at: model.created_at,
    }
}

pub fn model_to_review(model: review::Model) -> Review {
    Review {
        id: model.id,
        product_slug: model.product_slug,
        author_name: model.author_name,
        rating: model.rating,
        review_text: model.review_text,
        // 库里出现未知状态时按 Pending 处理，不会进入公开读
        status: model.status.parse().unwrap_or(ReviewStatus::Pending),
        created_at: model.created_at,
    }
}

pub fn model_to_store(model: store::Model) -> Store {
    Store {
        id: model.id,
        name: model.name,
        address_line1: model.address_line1,
        city: model.city,
        state: model.state,
        zip_code: model.zip_code,
        phone: model.phone,
        lat: model.lat,
        lng: model.lng,
    }
}

pub fn model_to_event(model: event::Model) -> EventItem {
    EventItem {
        id: model.id,
        name: model.name,
        slug: model.slug,
        image_url: model.image_url,
        event_datetime: model.event_datetime,
        location: model.location,
        category: model.category,
        cta_link: model.cta_link,
    }
}

pub fn model_to_recipe(model: recipe::Model) -> Recipe {
    let ingredients: Vec<Ingredient> =
        serde_json::from_str(&model.ingredients).unwrap_or_default();

    Recipe {
        slug: model.slug,
        name: model.name,
        product_slug: model.product_slug,
        ingredients,
        instructions: model.instructions,
        created_at: model.created_at,
    }
}
