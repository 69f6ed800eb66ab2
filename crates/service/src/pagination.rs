//! Pagination utilities for service layer
//!
//! Offset-based: `offset = (page - 1) * limit`. Raw query values that do not
//! parse, or are below 1, fall back to the defaults.

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub limit: u64,
}

impl Pagination {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 20;

    /// Build from raw query-string values.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(Self::DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(Self::DEFAULT_LIMIT),
        }
    }

    /// Rows to skip, capped so it always fits an SQL integer.
    pub fn offset(&self) -> u64 {
        (self.page.max(1) - 1).saturating_mul(self.limit).min(i64::MAX as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: Self::DEFAULT_PAGE, limit: Self::DEFAULT_LIMIT } }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    let n = raw?.trim().parse::<i64>().ok()?;
    if n < 1 { None } else { Some(n as u64) }
}
