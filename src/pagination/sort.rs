use sea_orm::Order;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl From<Direction> for Order {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Asc => Order::Asc,
            Direction::Desc => Order::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: Direction,
}

/// Parse a `sortBy` value such as `"category:desc,name:asc"`.
///
/// Keys come back in input order, first key primary. `desc` sorts descending;
/// any other direction, or none at all, sorts ascending. A token without a
/// field name is rejected. Blank input means "no explicit order".
pub fn parse_sort_by(raw: &str) -> Result<Vec<SortKey>, ApiError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    raw.split(',')
        .map(|token| {
            let token = token.trim();
            let (field, direction) = match token.split_once(':') {
                Some((field, direction)) => (field.trim(), direction.trim()),
                None => (token, ""),
            };

            if field.is_empty() {
                return Err(ApiError::InvalidSortSpec(format!(
                    "token '{token}' has no field name"
                )));
            }

            let direction = if direction == "desc" {
                Direction::Desc
            } else {
                Direction::Asc
            };

            Ok(SortKey {
                field: field.to_string(),
                direction,
            })
        })
        .collect()
}
