use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::authorization::Right;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheData, keys};
use crate::db::products as product_db;
use crate::error::ApiError;
use crate::models::products::{CreateProduct, ProductFilter, ProductResponse, UpdateProduct};
use crate::pagination::{PaginateOptions, PaginateQuery};
use crate::validation::products::{CREATE_PRODUCT, UPDATE_PRODUCT};

/// Query string of `GET /v1/products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    #[serde(flatten)]
    pub paging: PaginateQuery,
}

impl ProductListQuery {
    fn filter(&self) -> ProductFilter {
        ProductFilter {
            name: self.name.clone(),
            category: self.category.clone(),
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::validation("id: must be a valid UUID"))
}

fn decode_body<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::validation(e.to_string()))
}

/// POST /v1/products — create a product (requires `manageProducts`).
pub async fn create_product(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    user.require(Right::ManageProducts)?;

    let body = body.into_inner();
    CREATE_PRODUCT.check(&body)?;
    let input: CreateProduct = decode_body(body)?;

    let product = product_db::insert_product(db.get_ref(), input).await?;
    tracing::info!(product_id = %product.id, user_id = %user.id, "Product created");

    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// GET /v1/products — filtered, sorted, paginated product list.
/// Query params: ?name=&category=&sortBy=price:desc&limit=10&page=1
pub async fn get_products(
    db: web::Data<DatabaseConnection>,
    query: web::Query<ProductListQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = query.filter();
    let options = PaginateOptions::parse(&query.paging)?;

    let page = product_db::query_products(db.get_ref(), &filter, &options).await?;
    Ok(HttpResponse::Ok().json(page.map(ProductResponse::from)))
}

/// GET /v1/products/{id} — get a single product.
pub async fn get_product(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;
    let cache_key = keys::product(&id.to_string());

    // Try to get from cache first
    match cache.get::<ProductResponse>(&cache_key).await {
        Ok(Some(cached)) => return Ok(HttpResponse::Ok().json(cached)),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache error: {}", e),
    }

    let product = product_db::get_product_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product {id} not found")))?;

    let response = ProductResponse::from(product);
    if let Err(e) = cache.set(&cache_key, &response).await {
        tracing::warn!("Cache error: {}", e);
    }

    Ok(HttpResponse::Ok().json(response))
}

/// PATCH /v1/products/{id} — update some fields of a product (requires `manageProducts`).
pub async fn update_product(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    user.require(Right::ManageProducts)?;
    let id = parse_id(&path)?;

    let body = body.into_inner();
    UPDATE_PRODUCT.check(&body)?;
    let input: UpdateProduct = decode_body(body)?;

    let updated = product_db::update_product(db.get_ref(), id, input).await?;
    let updated = ProductResponse::from(updated);
    // The cached entry must hold the record this update wrote.
    if let Err(e) = cache.set(&keys::product(&id.to_string()), &updated).await {
        tracing::warn!("Cache error: {}", e);
        invalidate(&cache, id).await;
    }
    tracing::info!(product_id = %id, user_id = %user.id, "Product updated");

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /v1/products/{id} — delete a product (requires `manageProducts`).
pub async fn delete_product(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    user.require(Right::ManageProducts)?;
    let id = parse_id(&path)?;

    product_db::delete_product(db.get_ref(), id).await?;
    invalidate(&cache, id).await;
    tracing::info!(product_id = %id, user_id = %user.id, "Product deleted");

    Ok(HttpResponse::NoContent().finish())
}

async fn invalidate(cache: &CacheData, id: Uuid) {
    if let Err(e) = cache.delete(&keys::product(&id.to_string())).await {
        tracing::warn!("Cache error: {}", e);
    }
}
