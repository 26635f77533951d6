use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::products::{self, CreateProduct, InTheBox, ProductFilter, UpdateProduct};
use crate::pagination::{self, Page, PaginateOptions};

/// Insert a new product.
pub async fn insert_product(
    db: &DatabaseConnection,
    input: CreateProduct,
) -> Result<products::Model, DbErr> {
    let new_product = products::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name.trim().to_string()),
        description: Set(input.description.trim().to_string()),
        category: Set(input.category),
        price: Set(input.price),
        features: Set(input.features.trim().to_string()),
        in_the_box: Set(InTheBox(input.in_the_box)),
        is_show: Set(input.is_show),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_product.insert(db).await
}

/// Fetch a single product by ID.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<products::Model>, DbErr> {
    products::Entity::find_by_id(id).one(db).await
}

/// One page of products matching `filter`.
pub async fn query_products(
    db: &DatabaseConnection,
    filter: &ProductFilter,
    options: &PaginateOptions,
) -> Result<Page<products::Model>, ApiError> {
    pagination::paginate::<products::Entity, _>(db, filter.condition(), options).await
}

/// Overwrite the fields present in `input`. Arrays are replaced, not merged.
pub async fn update_product(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProduct,
) -> Result<products::Model, ApiError> {
    let product = get_product_by_id(db, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let mut active: products::ActiveModel = product.into();

    if let Some(name) = input.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(description) = input.description {
        active.description = Set(description.trim().to_string());
    }
    if let Some(category) = input.category {
        active.category = Set(category);
    }
    if let Some(price) = input.price {
        active.price = Set(price);
    }
    if let Some(features) = input.features {
        active.features = Set(features.trim().to_string());
    }
    if let Some(is_show) = input.is_show {
        active.is_show = Set(is_show);
    }
    if let Some(in_the_box) = input.in_the_box {
        active.in_the_box = Set(InTheBox(in_the_box));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    Ok(active.update(db).await?)
}

/// Delete a product and hand back what was removed.
pub async fn delete_product(db: &DatabaseConnection, id: Uuid) -> Result<products::Model, ApiError> {
    let product = get_product_by_id(db, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    products::Entity::delete_by_id(id).exec(db).await?;
    Ok(product)
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Product {id} not found"))
}
