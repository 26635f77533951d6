pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod validation;

pub use db::create_pool;
pub use error::ApiError;

use actix_web::web;

/// Mount the versioned API. Callers supply the app data: a
/// `DatabaseConnection`, a `JwtSecret` and a `CacheData`.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/v1").configure(handlers::init_routes));
}
