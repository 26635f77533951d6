use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;
use storefront_backend::auth::middleware::JwtSecret;
use storefront_backend::cache::{RecordCache, RedisCache};
use storefront_backend::config::AppConfig;
use storefront_backend::{api_routes, create_pool};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let db = create_pool(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;
    let db_data = web::Data::new(db);
    tracing::info!("Connected to database, migrations applied");

    let ttl = Duration::from_secs(config.cache_ttl_secs);
    let cache = match &config.redis_url {
        Some(url) => match RedisCache::new(url).await {
            Ok(redis) => RecordCache::redis(redis, ttl),
            Err(e) => {
                tracing::warn!("Redis unavailable ({e}), falling back to in-process cache");
                RecordCache::local(ttl)
            }
        },
        None => RecordCache::local(ttl),
    };
    tracing::info!("Using {} record cache", cache.backend_name());
    let cache_data = web::Data::new(Arc::new(cache));

    let jwt_secret = web::Data::new(JwtSecret(config.jwt_secret.clone()));

    let bind_addr = config.bind_addr();
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(cache_data.clone())
            .app_data(jwt_secret.clone())
            .configure(api_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
