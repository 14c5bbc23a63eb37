use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, DomainResult, ProductId};

/// A persisted catalog product.
///
/// `code` is the business identifier and is unique across the whole catalog;
/// `id` is assigned by the store. `price` is kept as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub code: String,
    pub category: String,
    pub price: String,
}

impl Product {
    /// Attach a store-assigned id to a validated draft.
    pub fn from_draft(id: ProductId, draft: NewProduct) -> Self {
        Self {
            id,
            name: draft.name,
            code: draft.code,
            category: draft.category,
            price: draft.price,
        }
    }
}

/// A product that has not been stored yet.
///
/// Only constructible through [`NewProduct::new`], so every draft that reaches
/// a store has passed field validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProduct {
    name: String,
    code: String,
    category: String,
    price: String,
}

impl NewProduct {
    /// Validate a product draft.
    ///
    /// The code must contain at least one non-whitespace character. All other
    /// fields are free-form text and stored exactly as given.
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        category: impl Into<String>,
        price: impl Into<String>,
    ) -> DomainResult<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(DomainError::validation("code must not be blank"));
        }

        Ok(Self {
            name: name.into(),
            code,
            category: category.into(),
            price: price.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> &str {
        &self.price
    }
}

/// Exact-match listing filter. Present fields are combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub code: Option<String>,
}

impl ProductFilter {
    /// Build a filter from raw query values. Empty strings mean "no filter".
    pub fn new(name: Option<String>, code: Option<String>) -> Self {
        Self {
            name: name.filter(|s| !s.is_empty()),
            code: code.filter(|s| !s.is_empty()),
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self::new(Some(name.into()), None)
    }

    pub fn by_code(code: impl Into<String>) -> Self {
        Self::new(None, Some(code.into()))
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.code.is_none()
    }

    pub fn matches(&self, product: &Product) -> bool {
        let name_ok = self.name.as_deref().is_none_or(|n| n == product.name);
        let code_ok = self.code.as_deref().is_none_or(|c| c == product.code);
        name_ok && code_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, code: &str) -> Product {
        Product::from_draft(
            ProductId::new(id),
            NewProduct::new(name, code, "tools", "9.99").unwrap(),
        )
    }

    #[test]
    fn new_product_keeps_fields_verbatim() {
        let draft = NewProduct::new(" Widget ", "W1", "tools", "9.99").unwrap();
        assert_eq!(draft.name(), " Widget ");
        assert_eq!(draft.code(), "W1");
        assert_eq!(draft.category(), "tools");
        assert_eq!(draft.price(), "9.99");
    }

    #[test]
    fn new_product_rejects_blank_code() {
        for code in ["", "   ", "\t"] {
            let err = NewProduct::new("Widget", code, "tools", "9.99").unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn price_is_opaque_text() {
        let draft = NewProduct::new("Widget", "W1", "tools", "about ten bucks").unwrap();
        assert_eq!(draft.price(), "about ten bucks");
    }

    #[test]
    fn from_draft_assigns_id() {
        let draft = NewProduct::new("Widget", "W1", "tools", "9.99").unwrap();
        let p = Product::from_draft(ProductId::new(1), draft);
        assert_eq!(p.id, ProductId::new(1));
        assert_eq!(p.code, "W1");
    }

    #[test]
    fn empty_filter_matches_everything() {
        let f = ProductFilter::default();
        assert!(f.is_empty());
        assert!(f.matches(&product(1, "X", "A")));
    }

    #[test]
    fn empty_strings_are_not_filters() {
        let f = ProductFilter::new(Some(String::new()), Some(String::new()));
        assert!(f.is_empty());
    }

    #[test]
    fn filters_combine_with_and() {
        let a = product(1, "X", "A");
        let b = product(2, "X", "B");

        let by_name = ProductFilter::by_name("X");
        assert!(by_name.matches(&a) && by_name.matches(&b));

        let by_code = ProductFilter::by_code("A");
        assert!(by_code.matches(&a));
        assert!(!by_code.matches(&b));

        let both = ProductFilter::new(Some("X".into()), Some("B".into()));
        assert!(!both.matches(&a));
        assert!(both.matches(&b));
    }

    #[test]
    fn filter_is_exact_match() {
        let p = product(1, "Widget", "W1");
        assert!(!ProductFilter::by_name("widget").matches(&p));
        assert!(!ProductFilter::by_name("Widg").matches(&p));
        assert!(!ProductFilter::by_code("W1 ").matches(&p));
    }

    #[test]
    fn product_json_shape() {
        let json = serde_json::to_value(product(3, "Widget", "W1")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "name": "Widget",
                "code": "W1",
                "category": "tools",
                "price": "9.99",
            })
        );
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a combined filter matches exactly when both single-field filters match.
            #[test]
            fn combined_filter_is_conjunction(
                name in "[a-c]{1,2}",
                code in "[a-c]{1,2}",
                f_name in proptest::option::of("[a-c]{1,2}"),
                f_code in proptest::option::of("[a-c]{1,2}"),
            ) {
                let p = product(1, &name, &code);
                let combined = ProductFilter::new(f_name.clone(), f_code.clone());
                let only_name = ProductFilter::new(f_name, None);
                let only_code = ProductFilter::new(None, f_code);
                prop_assert_eq!(
                    combined.matches(&p),
                    only_name.matches(&p) && only_code.matches(&p)
                );
            }
        }
    }
}
