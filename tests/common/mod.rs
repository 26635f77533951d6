#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use serde_json::{Value, json};
use uuid::Uuid;

use storefront_backend::auth::jwt::Claims;
use storefront_backend::models::products::{self, BoxItem, Category, InTheBox};

/// A fake secret for testing — never use the real one in tests committed to git.
pub const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

/// Fresh in-memory SQLite database with the schema applied.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // Every pooled connection would otherwise get its own empty database.
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

fn box_contents() -> InTheBox {
    InTheBox(vec![
        BoxItem { name: "headphone unit".into(), total: 1 },
        BoxItem { name: "user manual".into(), total: 1 },
        BoxItem { name: "replacement earcup".into(), total: 2 },
    ])
}

/// Insert products in the given order, one second apart, so natural order
/// is the slice order.
pub async fn insert_products(
    db: &DatabaseConnection,
    specs: &[(&str, Category, f64)],
) -> Vec<products::Model> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut inserted = Vec::new();

    for (index, (name, category, price)) in specs.iter().enumerate() {
        let model = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(format!("{name} description")),
            category: Set(*category),
            price: Set(*price),
            features: Set(format!("{name} features")),
            in_the_box: Set(box_contents()),
            is_show: Set(false),
            created_at: Set(base + Duration::seconds(index as i64)),
            updated_at: Set(None),
        }
        .insert(db)
        .await
        .expect("Failed to insert fixture product");
        inserted.push(model);
    }

    inserted
}

/// headphones(599), headphones(299), earphones(350), speakers(799), in that order.
pub async fn insert_catalog(db: &DatabaseConnection) -> Vec<products::Model> {
    insert_products(
        db,
        &[
            ("Aria", Category::Headphones, 599.0),
            ("Bolt", Category::Headphones, 299.0),
            ("Cleo", Category::Earphones, 350.0),
            ("Dune", Category::Speakers, 799.0),
        ],
    )
    .await
}

pub fn new_product_body() -> Value {
    json!({
        "name": "Nova",
        "description": "Open-back reference headphones",
        "category": "headphones",
        "price": 450,
        "features": "Planar drivers",
        "isShow": false,
        "inTheBox": [
            { "name": "headphone unit", "total": 1 },
            { "name": "user manual", "total": 1 },
            { "name": "replacement earcup", "total": 2 }
        ]
    })
}

/// Helper: mint a JWT signed with HS256 using the test secret.
pub fn mint_token(role: Option<&str>, exp_offset_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: (now + exp_offset_secs) as usize,
        iat: Some(now as usize),
        role: role.map(str::to_string),
        email: Some("someone@example.com".to_string()),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}

pub fn admin_token() -> String {
    mint_token(Some("admin"), 3600)
}

pub fn user_token() -> String {
    mint_token(Some("user"), 3600)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// Build the service under test around `db`.
#[macro_export]
macro_rules! test_app {
    ($db:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($db.clone()))
                .app_data(actix_web::web::Data::new(std::sync::Arc::new(
                    storefront_backend::cache::RecordCache::local(std::time::Duration::from_secs(60)),
                )))
                .app_data(actix_web::web::Data::new(
                    storefront_backend::auth::middleware::JwtSecret(
                        common::TEST_SECRET.to_string(),
                    ),
                ))
                .configure(storefront_backend::api_routes),
        )
        .await
    };
}
