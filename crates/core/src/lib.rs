//! `catalog-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model and the pagination arithmetic shared by
//! every listing endpoint.

pub mod error;
pub mod id;
pub mod pagination;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use pagination::{LimitOffsetPage, LimitOffsetParams, Page, PageParams, PaginationLimits};
