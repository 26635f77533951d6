use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, Order};
use serde::{Deserialize, Serialize};

use crate::pagination::Paginated;

/// Product categories, stored as lowercase strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Category {
    #[sea_orm(string_value = "headphones")]
    Headphones,
    #[sea_orm(string_value = "earphones")]
    Earphones,
    #[sea_orm(string_value = "speakers")]
    Speakers,
}

impl Category {
    pub const NAMES: &'static [&'static str] = &["headphones", "earphones", "speakers"];
}

/// One line of the "what's in the box" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxItem {
    pub name: String,
    pub total: i64,
}

/// Stored as a single JSON column; replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct InTheBox(pub Vec<BoxItem>);

/// SeaORM entity for the `products` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: Category,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    #[sea_orm(column_type = "Text")]
    pub features: String,
    #[sea_orm(column_type = "Json")]
    pub in_the_box: InTheBox,
    pub is_show: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Paginated for Entity {
    fn sort_column(field: &str) -> Option<Column> {
        let column = match field {
            "id" => Column::Id,
            "name" => Column::Name,
            "description" => Column::Description,
            "category" => Column::Category,
            "price" => Column::Price,
            "features" => Column::Features,
            "isShow" | "is_show" => Column::IsShow,
            "createdAt" | "created_at" => Column::CreatedAt,
            "updatedAt" | "updated_at" => Column::UpdatedAt,
            _ => return None,
        };
        Some(column)
    }

    fn natural_order() -> Vec<(Column, Order)> {
        vec![(Column::CreatedAt, Order::Asc), (Column::Id, Order::Asc)]
    }
}

// ── DTOs ──

/// Body of `POST /v1/products`, deserialized after schema validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub price: f64,
    pub features: String,
    #[serde(default)]
    pub is_show: bool,
    pub in_the_box: Vec<BoxItem>,
}

/// Body of `PATCH /v1/products/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub price: Option<f64>,
    pub features: Option<String>,
    pub is_show: Option<bool>,
    pub in_the_box: Option<Vec<BoxItem>>,
}

/// Exact-match filter of the list endpoint.
///
/// `category` is kept as the raw query value: a name outside [`Category`]
/// is not an error, it just matches no product.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(name) = &self.name {
            condition = condition.add(Column::Name.eq(name.clone()));
        }
        if let Some(category) = &self.category {
            condition = condition.add(Column::Category.eq(category.clone()));
        }
        condition
    }
}

/// Public JSON shape of a product; timestamps stay internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub price: f64,
    pub features: String,
    pub in_the_box: Vec<BoxItem>,
    pub is_show: bool,
}

impl From<Model> for ProductResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            category: m.category,
            price: m.price,
            features: m.features,
            in_the_box: m.in_the_box.0,
            is_show: m.is_show,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_round_trip() {
        for name in Category::NAMES {
            let category: Category = serde_json::from_value(serde_json::json!(name)).unwrap();
            assert_eq!(serde_json::to_value(category).unwrap(), *name);
        }
        assert!(serde_json::from_value::<Category>(serde_json::json!("invalid")).is_err());
    }

    #[test]
    fn sort_columns_accept_json_and_column_names() {
        assert!(matches!(Entity::sort_column("isShow"), Some(Column::IsShow)));
        assert!(matches!(Entity::sort_column("is_show"), Some(Column::IsShow)));
        assert!(matches!(Entity::sort_column("price"), Some(Column::Price)));
        assert!(Entity::sort_column("role").is_none());
    }

    #[test]
    fn response_strips_timestamps_and_uses_camel_case() {
        let model = Model {
            id: Uuid::new_v4(),
            name: "Aria".into(),
            description: "Over-ear".into(),
            category: Category::Headphones,
            price: 599.0,
            features: "Noise cancelling".into(),
            in_the_box: InTheBox(vec![BoxItem {
                name: "user manual".into(),
                total: 1,
            }]),
            is_show: false,
            created_at: chrono::Utc::now(),
            updated_at: None,
        };

        let json = serde_json::to_value(ProductResponse::from(model)).unwrap();
        let obj = json.as_object().unwrap();

        assert!(obj.contains_key("inTheBox"));
        assert!(obj.contains_key("isShow"));
        assert!(!obj.contains_key("createdAt"));
        assert!(!obj.contains_key("created_at"));
        assert_eq!(obj.len(), 8);
        assert_eq!(json["inTheBox"][0]["total"], 1);
    }
}
