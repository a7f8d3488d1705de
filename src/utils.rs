use serde::Deserialize;

use crate::error::ApiError;

/// Raw query values. Parsed by [`Pagination::new`] so malformed numbers
/// produce the same error as out-of-range ones.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationDefaults {
    pub page: i64,
    pub page_size: i64,
}

impl Default for PaginationDefaults {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub fn new(params: &PaginationParams, defaults: PaginationDefaults) -> Result<Self, ApiError> {
        let page = parse_positive(params.page.as_deref(), defaults.page)?;
        let limit = parse_positive(params.page_size.as_deref(), defaults.page_size)?;
        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or(ApiError::InvalidPagination)?;

        Ok(Self {
            page,
            limit,
            offset,
        })
    }
}

fn parse_positive(raw: Option<&str>, default: i64) -> Result<i64, ApiError> {
    let value = match raw {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::InvalidPagination)?,
        None => default,
    };
    if value < 1 {
        return Err(ApiError::InvalidPagination);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::Query;

    fn params(query: &str) -> PaginationParams {
        Query::<PaginationParams>::from_query(query)
            .unwrap()
            .into_inner()
    }

    #[test]
    fn test_defaults_apply() {
        let pagination = Pagination::new(&params(""), PaginationDefaults::default()).unwrap();
        assert_eq!(
            pagination,
            Pagination {
                page: 1,
                limit: 10,
                offset: 0
            }
        );
    }

    #[test]
    fn test_offset_calculation() {
        let pagination =
            Pagination::new(&params("page=3&pageSize=25"), PaginationDefaults::default()).unwrap();
        assert_eq!(pagination.page, 3);
        assert_eq!(pagination.limit, 25);
        assert_eq!(pagination.offset, 50);
    }

    #[test]
    fn test_custom_defaults() {
        let defaults = PaginationDefaults {
            page: 2,
            page_size: 5,
        };
        let pagination = Pagination::new(&params(""), defaults).unwrap();
        assert_eq!(pagination.offset, 5);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let invalid = [
            "page=0",
            "page=-1",
            "pageSize=0",
            "pageSize=-1",
            "page=abc",
            "pageSize=ten",
            "page=1.5",
            "page=",
        ];
        for query in invalid {
            let result = Pagination::new(&params(query), PaginationDefaults::default());
            assert!(
                matches!(result, Err(ApiError::InvalidPagination)),
                "Expected error for query: {query}"
            );
        }
    }

    #[test]
    fn test_rejects_offset_overflow() {
        let query = format!("page={}&pageSize={}", i64::MAX, 2);
        let result = Pagination::new(&params(&query), PaginationDefaults::default());
        assert!(matches!(result, Err(ApiError::InvalidPagination)));
    }

    #[test]
    fn test_limit_is_not_a_page_size_alias() {
        let pagination =
            Pagination::new(&params("limit=50"), PaginationDefaults::default()).unwrap();
        assert_eq!(pagination.limit, 10);
    }
}
