use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId};

/// Product category (closed set).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Café")]
    Cafe,
    Pimenta,
    Cacau,
    Outros,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 4] = [
        Category::Cafe,
        Category::Pimenta,
        Category::Cacau,
        Category::Outros,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Cafe => "Café",
            Category::Pimenta => "Pimenta",
            Category::Cacau => "Cacau",
            Category::Outros => "Outros",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl core::str::FromStr for Category {
    type Err = DomainError;

    /// Accepts the display label, case-insensitively, with or without the accent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "café" | "cafe" => Ok(Category::Cafe),
            "pimenta" => Ok(Category::Pimenta),
            "cacau" => Ok(Category::Cacau),
            "outros" => Ok(Category::Outros),
            other => Err(DomainError::validation(format!("unknown category: {other}"))),
        }
    }
}

/// Stock health of a single product, derived from quantity and minimum stock.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    Low,
    InStock,
}

impl StockStatus {
    /// Zero wins over low: an empty product is out of stock even when its
    /// minimum is zero.
    pub fn of(product: &Product) -> Self {
        if product.quantity == 0 {
            StockStatus::OutOfStock
        } else if product.quantity < product.min_stock {
            StockStatus::Low
        } else {
            StockStatus::InStock
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Esgotado",
            StockStatus::Low => "Estoque Baixo",
            StockStatus::InStock => "Em Estoque",
        }
    }
}

/// A catalog product and its current stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub quantity: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub min_stock: u64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Build a product from catalog fields plus store-assigned identity.
    pub fn from_fields(id: ProductId, fields: NewProduct, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            category: fields.category,
            quantity: fields.quantity,
            unit_price: fields.unit_price,
            min_stock: fields.min_stock,
            created_at,
        }
    }

    /// Stock value: quantity × unit price, saturating at the `Decimal` range.
    pub fn stock_value(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }

    pub fn status(&self) -> StockStatus {
        StockStatus::of(self)
    }

    pub fn is_below_minimum(&self) -> bool {
        self.quantity < self.min_stock
    }
}

/// Combined stock value of `products`, saturating at the `Decimal` range.
pub fn total_stock_value<'a>(products: impl IntoIterator<Item = &'a Product>) -> Decimal {
    products
        .into_iter()
        .fold(Decimal::ZERO, |total, p| total.saturating_add(p.stock_value()))
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Catalog fields supplied by the caller when adding a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    pub quantity: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub min_stock: u64,
}

impl NewProduct {
    /// Catalog-form rules. The store accepts unvalidated input, so callers that
    /// take user input run this first.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.unit_price.is_sign_negative() {
            return Err(DomainError::validation("unit price cannot be negative"));
        }
        Ok(())
    }
}

/// Partial update: only `Some` fields are merged into the product.
///
/// `id` and `created_at` are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub unit_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<u64>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.quantity.is_none()
            && self.unit_price.is_none()
            && self.min_stock.is_none()
    }

    /// Return `product` with the provided fields replaced.
    pub fn merged_into(&self, product: &Product) -> Product {
        let mut merged = product.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(category) = self.category {
            merged.category = category;
        }
        if let Some(quantity) = self.quantity {
            merged.quantity = quantity;
        }
        if let Some(unit_price) = self.unit_price {
            merged.unit_price = unit_price;
        }
        if let Some(min_stock) = self.min_stock {
            merged.min_stock = min_stock;
        }
        merged
    }
}
