//! 评论提交与查询

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::error;

use crate::api::helpers::{error_from_tikaram, error_response, success_response};
use crate::api::types::{PostReviewRequest, ReviewResponse, ReviewsListResponse, ReviewsQuery};
use crate::storage::{NewReview, SeaOrmStorage};

pub struct ReviewService {}

impl ReviewService {
    /// POST /reviews
    pub async fn post_review(
        body: web::Json<PostReviewRequest>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> impl Responder {
        let body = body.into_inner();

        // 四个字段全部必填
        let (Some(product_slug), Some(author_name), Some(rating), Some(review_text)) = (
            body.product_slug.filter(|s| !s.is_empty()),
            body.author_name.filter(|s| !s.is_empty()),
            body.rating,
            body.review_text.filter(|s| !s.is_empty()),
        ) else {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Missing required fields: productSlug, authorName, rating, reviewText",
            );
        };

        // 整数且在 [1, 5]
        if !(1..=5).contains(&rating) {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Rating must be a number between 1 and 5",
            );
        }

        let new_review = NewReview {
            product_slug,
            author_name,
            rating: rating as i32,
            review_text,
        };

        match storage.insert_review(new_review).await {
            Ok(_) => success_response(StatusCode::CREATED),
            Err(e) => {
                error!("Review insert failed: {}", e);
                // 底层消息透传给运维排查，不保证给调用方做程序化匹配
                error_from_tikaram(&e)
            }
        }
    }

    /// GET /reviews?slug=<productSlug>
    pub async fn get_reviews(
        query: web::Query<ReviewsQuery>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> impl Responder {
        let Some(slug) = query.slug.as_deref().filter(|s| !s.is_empty()) else {
            return error_response(StatusCode::BAD_REQUEST, "Product slug is required");
        };

        match storage.approved_reviews_by_slug(slug).await {
            Ok(reviews) => {
                let reviews: Vec<ReviewResponse> =
                    reviews.into_iter().map(ReviewResponse::from).collect();
                HttpResponse::Ok().json(ReviewsListResponse { reviews })
            }
            Err(e) => {
                error!("Review query failed: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

/// 评论路由配置
pub fn review_routes() -> actix_web::Scope {
    web::scope("/reviews")
        .route("", web::post().to(ReviewService::post_review))
        .route("", web::get().to(ReviewService::get_reviews))
}
