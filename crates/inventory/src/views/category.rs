use rust_decimal::Decimal;
use serde::Serialize;

use crate::product::{Category, Product, total_stock_value};

/// Stock held in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub category: Category,
    pub quantity: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

/// Totals for every category in display order, including empty ones.
pub fn category_totals(products: &[Product]) -> Vec<CategoryTotals> {
    Category::ALL
        .iter()
        .map(|&category| {
            let in_category: Vec<&Product> = products.iter().filter(|p| p.category == category).collect();
            let quantity = in_category
                .iter()
                .fold(0u64, |total, p| total.saturating_add(p.quantity));
            let value = total_stock_value(in_category);
            CategoryTotals {
                category,
                quantity,
                value,
            }
        })
        .collect()
}

/// Categories that currently hold stock (the dashboard chart series).
pub fn populated_categories(products: &[Product]) -> Vec<CategoryTotals> {
    category_totals(products)
        .into_iter()
        .filter(|totals| totals.quantity > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::tests::product;

    #[test]
    fn sums_quantity_and_value_per_category() {
        let products = vec![
            product("Café Arábica Premium", Category::Cafe, 150, Decimal::new(2550, 2), 20),
            product("Café Robusta", Category::Cafe, 200, Decimal::new(1800, 2), 30),
            product("Pimenta Vermelha", Category::Pimenta, 45, Decimal::new(1500, 2), 8),
        ];

        let totals = category_totals(&products);

        assert_eq!(totals.len(), 4);
        assert_eq!(totals[0].category, Category::Cafe);
        assert_eq!(totals[0].quantity, 350);
        assert_eq!(totals[0].value, Decimal::new(742500, 2));
        assert_eq!(totals[1].quantity, 45);
        assert_eq!(totals[2].quantity, 0);
        assert_eq!(totals[3].value, Decimal::ZERO);
    }

    #[test]
    fn totals_saturate_at_the_top_of_the_range() {
        let products = vec![
            product("Silo", Category::Cafe, u64::MAX, Decimal::ONE, 0),
            product("Saca", Category::Cafe, 1, Decimal::ONE, 0),
        ];

        let totals = category_totals(&products);

        assert_eq!(totals[0].quantity, u64::MAX);
        assert_eq!(totals[0].value, Decimal::from(u64::MAX) + Decimal::ONE);
    }

    #[test]
    fn populated_categories_skip_empty_ones() {
        let products = vec![
            product("Cacau em Grão", Category::Cacau, 85, Decimal::new(2850, 2), 12),
            product("Sem estoque", Category::Outros, 0, Decimal::ONE, 1),
        ];

        let populated = populated_categories(&products);

        assert_eq!(populated.len(), 1);
        assert_eq!(populated[0].category, Category::Cacau);
    }
}
