use serde::{Deserialize, Serialize};

use catalog_core::DomainResult;
use catalog_products::{NewProduct, Product, ProductFilter};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub code: String,
    pub category: String,
    pub price: String,
}

impl CreateProductRequest {
    pub fn into_draft(self) -> DomainResult<NewProduct> {
        NewProduct::new(self.name, self.code, self.category, self.price)
    }
}

/// `GET /products?name=&code=&page=&size=`
#[derive(Debug, Default, Deserialize)]
pub struct PagedListQuery {
    pub name: Option<String>,
    pub code: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl PagedListQuery {
    pub fn filter(&self) -> ProductFilter {
        ProductFilter::new(self.name.clone(), self.code.clone())
    }
}

/// `GET /products/limit-offset?name=&code=&limit=&offset=`
#[derive(Debug, Default, Deserialize)]
pub struct LimitOffsetListQuery {
    pub name: Option<String>,
    pub code: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl LimitOffsetListQuery {
    pub fn filter(&self) -> ProductFilter {
        ProductFilter::new(self.name.clone(), self.code.clone())
    }
}

// -------------------------
// Response DTOs
// -------------------------

/// Wire shape of a product.
///
/// Kept apart from [`Product`] so the HTTP contract is pinned here and does not
/// move with the domain type's serde derives (`Product.id` is a typed id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub category: String,
    pub price: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id.get(),
            name: p.name,
            code: p.code,
            category: p.category,
            price: p.price,
        }
    }
}
