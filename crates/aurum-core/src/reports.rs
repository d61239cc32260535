//! # Derived Read Models
//!
//! Pure report functions over the ledger collections. Nothing here caches:
//! every call rescans its inputs, which is the right trade at the scale of
//! a single shop's ledger. (If the collections ever grow past that,
//! the same groupings - month, category, seller - are the keys an
//! incremental accumulator would maintain.)
//!
//! ## Determinism
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  "today" and "year" are ARGUMENTS, never clock reads.            │
//! │                                                                  │
//! │  ledger_stats(products, sales, withdrawals, today)               │
//! │  monthly_series(sales, year)                                     │
//! │                                                                  │
//! │  The stateful layer (aurum-store) supplies the current date;     │
//! │  tests supply fixed ones.                                        │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::money::Money;
use crate::types::{Category, Product, Sale, Withdrawal};
use crate::{LOW_STOCK_THRESHOLD, RECENT_SALES_LIMIT, UNASSIGNED_SELLER};

/// Month labels for the fixed Jan-Dec series, as the shop's reports have
/// always shown them.
pub const MONTH_LABELS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

// =============================================================================
// Aggregate Totals
// =============================================================================

/// Headline totals for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
    /// Sum of all recorded sale totals.
    pub total_sales_cents: i64,
    /// Sum of all recorded sale profits.
    pub total_profit_cents: i64,
    /// Number of products in the catalog.
    pub product_count: usize,
    /// Number of sales dated today.
    pub sales_today: usize,
    /// Sale totals for the current calendar month.
    pub sales_this_month_cents: i64,
    /// Sale profits for the current calendar month.
    pub profit_this_month_cents: i64,
    /// Sum of all withdrawal amounts.
    pub total_withdrawals_cents: i64,
    /// Derived balance: total sales − total withdrawals. Never stored.
    pub available_cash_cents: i64,
}

/// Computes the headline totals as of `today`.
pub fn ledger_stats(
    products: &[Product],
    sales: &[Sale],
    withdrawals: &[Withdrawal],
    today: NaiveDate,
) -> LedgerStats {
    let total_sales: Money = sales.iter().map(Sale::total).sum();
    let total_profit: Money = sales.iter().map(Sale::profit).sum();
    let total_withdrawals: Money = withdrawals.iter().map(Withdrawal::amount).sum();

    let sales_today = sales.iter().filter(|s| s.date == today).count();

    let in_current_month =
        |s: &&Sale| s.date.month() == today.month() && s.date.year() == today.year();
    let sales_this_month: Money = sales.iter().filter(in_current_month).map(Sale::total).sum();
    let profit_this_month: Money = sales
        .iter()
        .filter(in_current_month)
        .map(Sale::profit)
        .sum();

    LedgerStats {
        total_sales_cents: total_sales.cents(),
        total_profit_cents: total_profit.cents(),
        product_count: products.len(),
        sales_today,
        sales_this_month_cents: sales_this_month.cents(),
        profit_this_month_cents: profit_this_month.cents(),
        total_withdrawals_cents: total_withdrawals.cents(),
        available_cash_cents: (total_sales - total_withdrawals).cents(),
    }
}

/// Available cash: cumulative sale totals minus cumulative withdrawals.
///
/// Always recomputed fresh; the ledger never stores this balance.
pub fn available_cash(sales: &[Sale], withdrawals: &[Withdrawal]) -> Money {
    let sold: Money = sales.iter().map(Sale::total).sum();
    let withdrawn: Money = withdrawals.iter().map(Withdrawal::amount).sum();
    sold - withdrawn
}

// =============================================================================
// Monthly Series
// =============================================================================

/// One bucket of the fixed Jan-Dec series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    pub month: &'static str,
    pub sales_cents: i64,
    pub profit_cents: i64,
}

/// Sales/profit totals bucketed into the 12 calendar months of `year`.
///
/// Always returns exactly 12 points, Ene through Dic; sales from other
/// years fall into no bucket.
pub fn monthly_series(sales: &[Sale], year: i32) -> Vec<MonthlyPoint> {
    MONTH_LABELS
        .iter()
        .enumerate()
        .map(|(index, month)| {
            let in_bucket = |s: &&Sale| {
                s.date.year() == year && s.date.month0() as usize == index
            };
            let sales_total: Money = sales.iter().filter(in_bucket).map(Sale::total).sum();
            let profit_total: Money = sales.iter().filter(in_bucket).map(Sale::profit).sum();
            MonthlyPoint {
                month,
                sales_cents: sales_total.cents(),
                profit_cents: profit_total.cents(),
            }
        })
        .collect()
}

// =============================================================================
// Category Distribution
// =============================================================================

/// Share of the catalog held by one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: Category,
    /// Rounded integer percentage of product count, in [0, 100].
    pub percent: u8,
}

/// Category distribution as integer percentages of product count.
///
/// Categories are listed in first-appearance order; entries that round to
/// zero are dropped. There is no rounding-remainder reconciliation, so the
/// percentages may not sum to exactly 100 (three equal categories yield
/// 33 + 33 + 33).
pub fn category_distribution(products: &[Product]) -> Vec<CategoryShare> {
    if products.is_empty() {
        return Vec::new();
    }

    let mut seen: Vec<Category> = Vec::new();
    for product in products {
        if !seen.contains(&product.category) {
            seen.push(product.category);
        }
    }

    let total = products.len() as f64;
    seen.into_iter()
        .map(|category| {
            let count = products.iter().filter(|p| p.category == category).count();
            CategoryShare {
                category,
                percent: (count as f64 / total * 100.0).round() as u8,
            }
        })
        .filter(|share| share.percent > 0)
        .collect()
}

// =============================================================================
// Recent Sales / Low Stock
// =============================================================================

/// The five most recent sales, by date descending.
///
/// Same-date sales keep their ledger order.
pub fn recent_sales(sales: &[Sale]) -> Vec<Sale> {
    let mut sorted = sales.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(RECENT_SALES_LIMIT);
    sorted
}

/// Products at or below the low-stock threshold.
pub fn low_stock(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.stock <= LOW_STOCK_THRESHOLD)
        .cloned()
        .collect()
}

// =============================================================================
// Seller Leaderboard
// =============================================================================

/// Per-salesperson rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerStats {
    pub name: String,
    pub total_sales_cents: i64,
    pub total_profit_cents: i64,
    pub sale_count: usize,
}

impl SellerStats {
    /// Average sale amount, for the export report.
    pub fn average_sale_cents(&self) -> i64 {
        if self.sale_count == 0 {
            0
        } else {
            self.total_sales_cents / self.sale_count as i64
        }
    }
}

/// Rolls sales up by salesperson name, sorted by total sales descending.
///
/// Sales with an empty seller land in the literal [`UNASSIGNED_SELLER`]
/// bucket. Only the empty string is unassigned; a whitespace name is a
/// name. Ties keep first-appearance order.
pub fn seller_leaderboard(sales: &[Sale]) -> Vec<SellerStats> {
    let mut rollup: Vec<SellerStats> = Vec::new();

    for sale in sales {
        let name = if sale.seller.is_empty() {
            UNASSIGNED_SELLER
        } else {
            sale.seller.as_str()
        };

        let index = match rollup.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                rollup.push(SellerStats {
                    name: name.to_string(),
                    total_sales_cents: 0,
                    total_profit_cents: 0,
                    sale_count: 0,
                });
                rollup.len() - 1
            }
        };

        let entry = &mut rollup[index];
        entry.total_sales_cents += sale.total_cents;
        entry.total_profit_cents += sale.profit_cents;
        entry.sale_count += 1;
    }

    rollup.sort_by(|a, b| b.total_sales_cents.cmp(&a.total_sales_cents));
    rollup
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaymentMethod, WithdrawalKind};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn product(id: u64, category: Category, stock: i64) -> Product {
        Product {
            id,
            name: format!("Producto {id}"),
            category,
            price_cents: 10000,
            cost_cents: 4000,
            stock,
            description: String::new(),
            supplier: String::new(),
            intake_date: date("2024-01-01"),
            image: None,
        }
    }

    fn sale(id: u64, day: &str, seller: &str, total: i64, profit: i64) -> Sale {
        Sale {
            id,
            date: date(day),
            client: "Cliente".to_string(),
            seller: seller.to_string(),
            items: vec![],
            total_cents: total,
            profit_cents: profit,
            payment_method: PaymentMethod::Cash,
        }
    }

    fn withdrawal(id: u64, day: &str, amount: i64) -> Withdrawal {
        Withdrawal {
            id,
            date: date(day),
            amount_cents: amount,
            memo: "retiro".to_string(),
            kind: WithdrawalKind::PersonalDraw,
        }
    }

    #[test]
    fn test_ledger_stats() {
        let products = vec![
            product(1, Category::Rings, 10),
            product(2, Category::Necklaces, 2),
        ];
        let sales = vec![
            sale(1, "2024-06-10", "Ana", 10000, 4000),
            sale(2, "2024-06-01", "Ana", 5000, 2000),
            sale(3, "2024-05-20", "", 3000, 1000),
        ];
        let withdrawals = vec![withdrawal(1, "2024-06-05", 2000)];

        let stats = ledger_stats(&products, &sales, &withdrawals, date("2024-06-10"));

        assert_eq!(stats.total_sales_cents, 18000);
        assert_eq!(stats.total_profit_cents, 7000);
        assert_eq!(stats.product_count, 2);
        assert_eq!(stats.sales_today, 1);
        assert_eq!(stats.sales_this_month_cents, 15000);
        assert_eq!(stats.profit_this_month_cents, 6000);
        assert_eq!(stats.total_withdrawals_cents, 2000);
        assert_eq!(stats.available_cash_cents, 16000);
    }

    #[test]
    fn test_available_cash_recomputed() {
        let sales = vec![
            sale(1, "2024-06-10", "Ana", 10000, 0),
            sale(2, "2024-06-11", "Ana", 2500, 0),
        ];
        let withdrawals = vec![
            withdrawal(1, "2024-06-12", 3000),
            withdrawal(2, "2024-06-13", 500),
        ];
        assert_eq!(available_cash(&sales, &withdrawals).cents(), 9000);

        // Withdrawals can outrun sales; the balance just goes negative.
        let withdrawals = vec![withdrawal(1, "2024-06-12", 20000)];
        assert_eq!(available_cash(&sales, &withdrawals).cents(), -7500);
    }

    #[test]
    fn test_monthly_series_buckets_by_current_year() {
        let sales = vec![
            sale(1, "2024-01-15", "Ana", 1000, 400),
            sale(2, "2024-01-20", "Ana", 2000, 800),
            sale(3, "2024-12-01", "Ana", 500, 100),
            // Different year: falls into no bucket
            sale(4, "2023-01-10", "Ana", 9999, 9999),
        ];

        let series = monthly_series(&sales, 2024);
        assert_eq!(series.len(), 12);
        assert_eq!(series[0].month, "Ene");
        assert_eq!(series[0].sales_cents, 3000);
        assert_eq!(series[0].profit_cents, 1200);
        assert_eq!(series[11].month, "Dic");
        assert_eq!(series[11].sales_cents, 500);
        assert!(series[1..11].iter().all(|p| p.sales_cents == 0));
    }

    #[test]
    fn test_category_distribution_rounding_artifact() {
        // Three categories with one product each: 33% + 33% + 33% = 99%
        let products = vec![
            product(1, Category::Rings, 1),
            product(2, Category::Necklaces, 1),
            product(3, Category::Earrings, 1),
        ];
        let shares = category_distribution(&products);
        assert_eq!(shares.len(), 3);
        assert!(shares.iter().all(|s| s.percent == 33));
        let sum: u32 = shares.iter().map(|s| s.percent as u32).sum();
        assert_eq!(sum, 99);
    }

    #[test]
    fn test_category_distribution_drops_zero_percent() {
        let mut products = vec![product(1, Category::Rings, 1)];
        for id in 2..=300 {
            products.push(product(id, Category::Other, 1));
        }

        let shares = category_distribution(&products);
        // 1/300 rounds to 0% and is dropped; 299/300 rounds to 100%.
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].category, Category::Other);
        assert_eq!(shares[0].percent, 100);
    }

    #[test]
    fn test_category_distribution_empty_catalog() {
        assert!(category_distribution(&[]).is_empty());
    }

    #[test]
    fn test_recent_sales_top_five_by_date() {
        let sales: Vec<Sale> = (1..=7)
            .map(|id| sale(id, &format!("2024-06-{:02}", id), "Ana", 1000, 400))
            .collect();

        let recent = recent_sales(&sales);
        assert_eq!(recent.len(), 5);
        let ids: Vec<u64> = recent.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_low_stock_threshold_boundary() {
        let products = vec![
            product(1, Category::Rings, 5),
            product(2, Category::Rings, 6),
            product(3, Category::Rings, 0),
        ];
        let low = low_stock(&products);
        let ids: Vec<u64> = low.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_seller_leaderboard_with_unassigned_bucket() {
        let sales = vec![
            sale(1, "2024-06-01", "Ana", 10000, 4000),
            sale(2, "2024-06-02", "Ana", 5000, 2000),
            sale(3, "2024-06-03", "", 3000, 1000),
        ];

        let board = seller_leaderboard(&sales);
        assert_eq!(board.len(), 2);

        assert_eq!(board[0].name, "Ana");
        assert_eq!(board[0].total_sales_cents, 15000);
        assert_eq!(board[0].total_profit_cents, 6000);
        assert_eq!(board[0].sale_count, 2);

        assert_eq!(board[1].name, UNASSIGNED_SELLER);
        assert_eq!(board[1].total_sales_cents, 3000);
        assert_eq!(board[1].sale_count, 1);
    }

    #[test]
    fn test_only_empty_seller_is_unassigned() {
        // A whitespace name is still a name; only "" falls into the bucket.
        let sales = vec![
            sale(1, "2024-06-01", " ", 1000, 400),
            sale(2, "2024-06-02", "", 500, 200),
        ];

        let board = seller_leaderboard(&sales);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].name, " ");
        assert_eq!(board[1].name, UNASSIGNED_SELLER);
        assert_eq!(board[1].total_sales_cents, 500);
    }

    #[test]
    fn test_seller_average() {
        let stats = SellerStats {
            name: "Ana".to_string(),
            total_sales_cents: 15000,
            total_profit_cents: 6000,
            sale_count: 2,
        };
        assert_eq!(stats.average_sale_cents(), 7500);
    }
}
