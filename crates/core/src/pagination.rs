//! Pagination over fully materialized result sets.
//!
//! Two strategies are supported:
//!
//! - **Page-based**: 1-indexed pages of a fixed `size` ([`PageParams`] → [`Page`]).
//! - **Limit/offset**: a contiguous slice `[offset, offset + limit)`
//!   ([`LimitOffsetParams`] → [`LimitOffsetPage`]).
//!
//! Parameters are validated once at construction; slicing itself never fails.
//! Out-of-range requests produce empty item lists with correct metadata.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Default and maximum page size enforced by the pagination layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLimits {
    pub default_size: u32,
    pub max_size: u32,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self {
            default_size: 50,
            max_size: 100,
        }
    }
}

impl PaginationLimits {
    /// Build limits, clamping the default to the maximum.
    pub fn new(default_size: u32, max_size: u32) -> DomainResult<Self> {
        if max_size == 0 {
            return Err(DomainError::validation("max page size must be positive"));
        }
        if default_size == 0 {
            return Err(DomainError::validation("default page size must be positive"));
        }
        Ok(Self {
            default_size: default_size.min(max_size),
            max_size,
        })
    }
}

/// Validated page-based parameters (1-indexed page, bounded size).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct PageParams {
    page: u64,
    size: u32,
}

impl PageParams {
    /// Validate raw request values. Missing values take the defaults
    /// (`page = 1`, `size = limits.default_size`).
    pub fn new(page: Option<i64>, size: Option<i64>, limits: &PaginationLimits) -> DomainResult<Self> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(DomainError::validation(format!("page must be >= 1 (got {page})")));
        }
        let page = page as u64;

        let size = size.unwrap_or(i64::from(limits.default_size));
        if size < 1 || size > i64::from(limits.max_size) {
            return Err(DomainError::validation(format!(
                "size must be between 1 and {} (got {size})",
                limits.max_size
            )));
        }

        Ok(Self {
            page,
            size: size as u32,
        })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Saturates; a saturated offset is always past the end.
    fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(u64::from(self.size))
    }
}

/// Validated limit/offset parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct LimitOffsetParams {
    limit: u32,
    offset: u64,
}

impl LimitOffsetParams {
    /// Validate raw request values. Missing values take the defaults
    /// (`limit = limits.default_size`, `offset = 0`). A zero limit is allowed
    /// and always yields an empty slice.
    pub fn new(limit: Option<i64>, offset: Option<i64>, limits: &PaginationLimits) -> DomainResult<Self> {
        let limit = limit.unwrap_or(i64::from(limits.default_size));
        if limit < 0 {
            return Err(DomainError::validation(format!("limit must be >= 0 (got {limit})")));
        }
        if limit > i64::from(limits.max_size) {
            return Err(DomainError::validation(format!(
                "limit must be <= {} (got {limit})",
                limits.max_size
            )));
        }

        let offset = offset.unwrap_or(0);
        if offset < 0 {
            return Err(DomainError::validation(format!("offset must be >= 0 (got {offset})")));
        }

        Ok(Self {
            limit: limit as u32,
            offset: offset as u64,
        })
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }
}

/// One page of a page-based listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of items across all pages.
    pub total: u64,
    pub page: u64,
    pub size: u32,
    /// `ceil(total / size)`; zero for an empty result set.
    pub pages: u64,
}

impl<T> Page<T> {
    /// Cut the requested page out of the complete result set.
    pub fn paginate(all: Vec<T>, params: PageParams) -> Self {
        let total = all.len() as u64;
        let size = u64::from(params.size());
        let pages = total.div_ceil(size);

        let items = slice(all, params.offset(), size);

        Self {
            items,
            total,
            page: params.page(),
            size: params.size(),
            pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
            pages: self.pages,
        }
    }
}

/// One slice of a limit/offset listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOffsetPage<T> {
    pub items: Vec<T>,
    /// Number of items in the whole (filtered) result set.
    pub total: u64,
    pub limit: u32,
    pub offset: u64,
}

impl<T> LimitOffsetPage<T> {
    /// Cut `[offset, offset + limit)` out of the complete result set.
    pub fn paginate(all: Vec<T>, params: LimitOffsetParams) -> Self {
        let total = all.len() as u64;
        let items = slice(all, params.offset(), u64::from(params.limit()));

        Self {
            items,
            total,
            limit: params.limit(),
            offset: params.offset(),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> LimitOffsetPage<U> {
        LimitOffsetPage {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

fn slice<T>(all: Vec<T>, offset: u64, len: u64) -> Vec<T> {
    if offset >= all.len() as u64 || len == 0 {
        return Vec::new();
    }
    // offset < all.len() so it fits in usize.
    let start = offset as usize;
    let take = usize::try_from(len).unwrap_or(usize::MAX);
    all.into_iter().skip(start).take(take).collect()
}
