//! Default catalog used when no snapshot has been saved yet.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use stockroom_core::{MovementId, ProductId};

use crate::movement::{Movement, MovementKind};
use crate::product::{Category, Product};
use crate::state::InventoryState;

struct SeedProduct {
    name: &'static str,
    category: Category,
    quantity: u64,
    /// Price in cents.
    price_cents: i64,
    min_stock: u64,
}

const SEED_PRODUCTS: [SeedProduct; 6] = [
    SeedProduct {
        name: "Café Arábica Premium",
        category: Category::Cafe,
        quantity: 150,
        price_cents: 2550,
        min_stock: 20,
    },
    SeedProduct {
        name: "Café Robusta",
        category: Category::Cafe,
        quantity: 200,
        price_cents: 1800,
        min_stock: 30,
    },
    SeedProduct {
        name: "Pimenta Preta em Grão",
        category: Category::Pimenta,
        quantity: 75,
        price_cents: 1250,
        min_stock: 10,
    },
    SeedProduct {
        name: "Pimenta Vermelha",
        category: Category::Pimenta,
        quantity: 45,
        price_cents: 1500,
        min_stock: 8,
    },
    SeedProduct {
        name: "Cacau em Pó Premium",
        category: Category::Cacau,
        quantity: 120,
        price_cents: 3200,
        min_stock: 15,
    },
    SeedProduct {
        name: "Cacau em Grão",
        category: Category::Cacau,
        quantity: 85,
        price_cents: 2850,
        min_stock: 12,
    },
];

/// Six starter products and two historical movements, timestamped relative to
/// `now`. The historical movements do not change the seeded quantities.
pub fn default_catalog(now: DateTime<Utc>) -> InventoryState {
    let products: Vec<Product> = SEED_PRODUCTS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(),
            name: seed.name.to_string(),
            category: seed.category,
            quantity: seed.quantity,
            unit_price: Decimal::new(seed.price_cents, 2),
            min_stock: seed.min_stock,
            created_at: now,
        })
        .collect();

    let movements = vec![
        Movement {
            id: MovementId::new(),
            product_id: products[0].id,
            kind: MovementKind::Entrada,
            quantity: 50,
            date: now - Duration::days(5),
            notes: "Compra fornecedor A".to_string(),
        },
        Movement {
            id: MovementId::new(),
            product_id: products[1].id,
            kind: MovementKind::Saida,
            quantity: 30,
            date: now - Duration::days(3),
            notes: "Venda cliente B".to_string(),
        },
    ];

    // Both collections are built together above, so the references always resolve.
    InventoryState::from_parts(products, movements).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_consistent() {
        let now = Utc::now();
        let state = default_catalog(now);

        assert_eq!(state.products().len(), 6);
        assert_eq!(state.movements().len(), 2);
        assert!(state.verify().is_ok());
        assert_eq!(state.products()[0].name, "Café Arábica Premium");
        assert_eq!(state.products()[0].unit_price, Decimal::new(2550, 2));
        assert_eq!(state.movements()[0].date, now - Duration::days(5));
        assert_eq!(state.products_in(Category::Cafe).len(), 2);
    }
}
