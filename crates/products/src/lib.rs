//! Products domain module.
//!
//! This crate contains the catalog's business types, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::{NewProduct, Product, ProductFilter};
