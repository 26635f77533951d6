use super::{Constraint, FieldRule, Kind, Schema};
use crate::models::products::Category;

const NON_EMPTY: &[Constraint] = &[Constraint::NonEmpty];
const CATEGORY: &[Constraint] = &[Constraint::OneOf(Category::NAMES)];
const PRICE: &[Constraint] = &[Constraint::GreaterThan(0.0)];
const TOTAL: &[Constraint] = &[Constraint::AtLeast(0.0)];

const fn field(
    name: &'static str,
    kind: Kind,
    required: bool,
    constraints: &'static [Constraint],
) -> FieldRule {
    FieldRule {
        name,
        kind,
        required,
        constraints,
    }
}

/// One `inTheBox` entry. An update replaces the whole list, so every item
/// needs both fields on PATCH as well as on POST.
pub const BOX_ITEM: Schema = Schema {
    fields: &[
        field("name", Kind::String, true, NON_EMPTY),
        field("total", Kind::Integer, true, TOTAL),
    ],
    min_fields: 0,
};

/// `POST /v1/products`
pub const CREATE_PRODUCT: Schema = Schema {
    fields: &[
        field("name", Kind::String, true, NON_EMPTY),
        field("description", Kind::String, true, NON_EMPTY),
        field("category", Kind::String, true, CATEGORY),
        field("price", Kind::Number, true, PRICE),
        field("features", Kind::String, true, NON_EMPTY),
        field("isShow", Kind::Boolean, false, &[]),
        field("inTheBox", Kind::Array(&BOX_ITEM), true, &[]),
    ],
    min_fields: 0,
};

/// `PATCH /v1/products/{id}`: same fields, all optional, at least one present.
pub const UPDATE_PRODUCT: Schema = Schema {
    fields: &[
        field("name", Kind::String, false, NON_EMPTY),
        field("description", Kind::String, false, NON_EMPTY),
        field("category", Kind::String, false, CATEGORY),
        field("price", Kind::Number, false, PRICE),
        field("features", Kind::String, false, NON_EMPTY),
        field("isShow", Kind::Boolean, false, &[]),
        field("inTheBox", Kind::Array(&BOX_ITEM), false, &[]),
    ],
    min_fields: 1,
};
