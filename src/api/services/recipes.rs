//! 鸡尾酒配方列表

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::error;

use crate::api::helpers::error_response;
use crate::api::types::{RecipeResponse, RecipesListResponse, RecipesQuery};
use crate::storage::SeaOrmStorage;

pub struct RecipeService {}

impl RecipeService {
    /// GET /recipes?productSlug=<slug>，不带参数返回全部配方
    pub async fn get_recipes(
        query: web::Query<RecipesQuery>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> impl Responder {
        let result = match query.product_slug.as_deref().filter(|s| !s.is_empty()) {
            Some(slug) => storage.recipes_by_product_slug(slug).await,
            None => storage.all_recipes().await,
        };

        match result {
            Ok(recipes) => {
                let recipes: Vec<RecipeResponse> =
                    recipes.into_iter().map(RecipeResponse::from).collect();
                HttpResponse::Ok().json(RecipesListResponse { recipes })
            }
            Err(e) => {
                error!("Recipe query failed: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

/// 配方路由配置
pub fn recipe_routes() -> actix_web::Scope {
    web::scope("/recipes").route("", web::get().to(RecipeService::get_recipes))
}
