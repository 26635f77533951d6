//! Offset pagination over any SeaORM entity.
//!
//! The list endpoint hands a filter and a [`PaginateOptions`] to [`paginate`],
//! which counts the matching rows and fetches one sorted page of them in a
//! single round of queries.

pub mod sort;

use sea_orm::{
    Condition, ConnectionTrait, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
pub use sort::{Direction, SortKey, parse_sort_by};

pub const DEFAULT_LIMIT: u64 = 10;
pub const DEFAULT_PAGE: u64 = 1;

/// An entity the list endpoints can page through.
pub trait Paginated: EntityTrait {
    /// Column behind a public sort field name, if that field is sortable.
    fn sort_column(field: &str) -> Option<Self::Column>;

    /// Creation order. Applied when no sort is requested and appended after
    /// the caller's keys so that ties always break the same way.
    fn natural_order() -> Vec<(Self::Column, Order)>;

    /// Relation names `populate` may ask for.
    fn relations() -> &'static [&'static str] {
        &[]
    }
}

/// Raw paging parameters as they arrive in the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginateQuery {
    pub sort_by: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
    pub populate: Option<String>,
}

/// Validated paging parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginateOptions {
    pub sort_by: Vec<SortKey>,
    pub limit: u64,
    pub page: u64,
    pub populate: Vec<String>,
}

impl Default for PaginateOptions {
    fn default() -> Self {
        Self {
            sort_by: Vec::new(),
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
            populate: Vec::new(),
        }
    }
}

impl PaginateOptions {
    pub fn parse(query: &PaginateQuery) -> Result<Self, ApiError> {
        let sort_by = match &query.sort_by {
            Some(raw) => parse_sort_by(raw)?,
            None => Vec::new(),
        };

        let populate = query
            .populate
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            sort_by,
            limit: positive("limit", query.limit.as_deref(), DEFAULT_LIMIT)?,
            page: positive("page", query.page.as_deref(), DEFAULT_PAGE)?,
            populate,
        })
    }

    /// Rows to skip before the requested page.
    pub fn skip(&self) -> Result<u64, ApiError> {
        (self.page - 1)
            .checked_mul(self.limit)
            .ok_or_else(|| ApiError::InvalidPageParams("page is too large".to_string()))
    }
}

fn positive(name: &str, raw: Option<&str>, default: u64) -> Result<u64, ApiError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ApiError::InvalidPageParams(format!(
            "{name} must be at least 1"
        ))),
        Ok(value) => Ok(value),
        Err(_) => Err(ApiError::InvalidPageParams(format!(
            "{name} must be a positive integer, got '{raw}'"
        ))),
    }
}

/// One page of results plus the paging metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub total_results: u64,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, options: &PaginateOptions, total_results: u64) -> Self {
        Self {
            results,
            page: options.page,
            limit: options.limit,
            // An empty match set reports zero pages, not one.
            total_pages: total_results.div_ceil(options.limit),
            total_results,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            results: self.results.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

/// Count the rows matching `filter` and fetch the requested page of them.
///
/// Sort fields the entity does not have are skipped, so the natural order
/// decides; populate names it does not declare are ignored the same way. The
/// count and the page fetch run concurrently and are not read from one
/// snapshot.
pub async fn paginate<E, C>(
    db: &C,
    filter: Condition,
    options: &PaginateOptions,
) -> Result<Page<E::Model>, ApiError>
where
    E: Paginated,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    for name in &options.populate {
        if !E::relations().contains(&name.as_str()) {
            tracing::debug!("Ignoring unknown populate path '{name}'");
        }
    }

    let mut select = E::find().filter(filter.clone());
    for key in &options.sort_by {
        match E::sort_column(&key.field) {
            Some(column) => select = select.order_by(column, key.direction.into()),
            None => tracing::debug!("Ignoring unknown sort field '{}'", key.field),
        }
    }
    for (column, order) in E::natural_order() {
        select = select.order_by(column, order);
    }

    let skip = options.skip()?;
    tracing::debug!(
        page = options.page,
        limit = options.limit,
        skip,
        sort_keys = options.sort_by.len(),
        "Paginating"
    );

    let count = E::find().filter(filter).count(db);
    let fetch = select.offset(skip).limit(options.limit).all(db);
    let (total_results, results) = futures_util::try_join!(count, fetch)?;

    Ok(Page::new(results, options, total_results))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>, page: Option<&str>) -> PaginateQuery {
        PaginateQuery {
            limit: limit.map(str::to_string),
            page: page.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_apply_when_absent() {
        let options = PaginateOptions::parse(&PaginateQuery::default()).unwrap();
        assert_eq!(options, PaginateOptions::default());
        assert_eq!(options.limit, 10);
        assert_eq!(options.page, 1);
        assert_eq!(options.skip().unwrap(), 0);
    }

    #[test]
    fn skip_is_zero_based_page_times_limit() {
        let options = PaginateOptions::parse(&query(Some("2"), Some("3"))).unwrap();
        assert_eq!(options.skip().unwrap(), 4);
    }

    #[test]
    fn zero_and_non_numeric_values_are_rejected() {
        for (limit, page) in [
            (Some("0"), None),
            (None, Some("0")),
            (Some("-1"), None),
            (None, Some("two")),
            (Some("1.5"), None),
        ] {
            assert!(
                matches!(
                    PaginateOptions::parse(&query(limit, page)),
                    Err(ApiError::InvalidPageParams(_))
                ),
                "limit={limit:?} page={page:?} should be rejected"
            );
        }
    }

    #[test]
    fn overflowing_skip_is_rejected() {
        let options = PaginateOptions {
            page: u64::MAX,
            limit: 10,
            ..Default::default()
        };
        assert!(matches!(
            options.skip(),
            Err(ApiError::InvalidPageParams(_))
        ));
    }

    #[test]
    fn populate_is_split_and_trimmed() {
        let options = PaginateOptions::parse(&PaginateQuery {
            populate: Some("owner, reviews,,".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(options.populate, vec!["owner", "reviews"]);
    }

    #[test]
    fn total_pages_rounds_up_and_is_zero_when_empty() {
        let options = PaginateOptions {
            limit: 2,
            ..Default::default()
        };
        assert_eq!(Page::<()>::new(vec![], &options, 0).total_pages, 0);
        assert_eq!(Page::<()>::new(vec![], &options, 3).total_pages, 2);
        assert_eq!(Page::<()>::new(vec![], &options, 4).total_pages, 2);
    }

    #[test]
    fn page_serializes_camel_case() {
        let page = Page::new(vec![1, 2], &PaginateOptions::default(), 2);
        let json = serde_json::to_value(page.map(|n| n * 10)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "results": [10, 20],
                "page": 1,
                "limit": 10,
                "totalPages": 1,
                "totalResults": 2,
            })
        );
    }
}
