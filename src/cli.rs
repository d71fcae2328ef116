//! 命令行入口定义与配方导入
//!
//! 默认启动 HTTP 服务；`import-recipes` 把站点内容仓库导出的配方
//! JSON 解析后灌进数据库，按 slug upsert，可以反复执行。

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::info;

use crate::errors::Result;
use crate::storage::{NewRecipe, SeaOrmStorage};
use crate::utils::parse_ingredient;

#[derive(Debug, Parser)]
#[command(name = "tikaram-api", about = "Tikaram Spirits backend API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// 启动 HTTP 服务（默认）
    Serve,
    /// 从 JSON 文件导入鸡尾酒配方
    ImportRecipes {
        /// 配方 JSON 文件路径
        file: PathBuf,
    },
    /// 输出示例配置文件内容
    ConfigGen,
}

/// 导入文件里的原始配方行
#[derive(Debug, Deserialize)]
struct RawRecipe {
    name: String,
    slug: String,
    /// rum | bourbon | liqueur | tequila
    base_spirit: String,
    ingredients: Vec<String>,
    instructions: String,
}

/// baseSpirit → 产品 slug 映射，key lime 系列单独归类
fn map_product_slug(base_spirit: &str, recipe_slug: &str, recipe_name: &str) -> String {
    let is_key_lime = recipe_slug.contains("keylime")
        || recipe_slug.contains("key-lime")
        || recipe_name.to_lowercase().contains("key lime");

    match base_spirit {
        "rum" => "ponce-de-leon-rum".to_string(),
        "bourbon" => "florida-bourbon".to_string(),
        "liqueur" => {
            if is_key_lime {
                "keylime".to_string()
            } else {
                "paan-liqueur".to_string()
            }
        }
        "tequila" => {
            if is_key_lime {
                "keylime".to_string()
            } else {
                "tequila".to_string()
            }
        }
        _ => "tequila".to_string(),
    }
}

/// 执行配方导入，返回导入条数
pub async fn run_import_recipes(storage: &SeaOrmStorage, file: &Path) -> Result<usize> {
    let text = std::fs::read_to_string(file)?;
    let raw_recipes: Vec<RawRecipe> = serde_json::from_str(&text)?;

    let total = raw_recipes.len();
    for raw in raw_recipes {
        let product_slug = map_product_slug(&raw.base_spirit, &raw.slug, &raw.name);
        let ingredients = raw
            .ingredients
            .iter()
            .map(|line| parse_ingredient(line))
            .collect();

        storage
            .upsert_recipe(NewRecipe {
                slug: raw.slug,
                name: raw.name,
                product_slug,
                ingredients,
                instructions: raw.instructions,
            })
            .await?;
    }

    info!("Imported {} recipes from {}", total, file.display());
    Ok(total)
}
