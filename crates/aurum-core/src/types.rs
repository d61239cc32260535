//! # Domain Types
//!
//! Core domain types for the Aurum POS ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                             │
//! │                                                                  │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐       │
//! │  │   Product     │   │     Sale      │   │  Withdrawal   │       │
//! │  │  ───────────  │   │  ───────────  │   │  ───────────  │       │
//! │  │  id (u64)     │   │  id (u64)     │   │  id (u64)     │       │
//! │  │  category     │   │  items[]      │   │  kind         │       │
//! │  │  price_cents  │   │  total_cents  │   │  amount_cents │       │
//! │  │  stock        │   │  profit_cents │   │  memo         │       │
//! │  └───────────────┘   └───────────────┘   └───────────────┘       │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every collection assigns `max(existing ids) + 1` (1 when empty). Ids are
//! unique and strictly increasing within a collection for append-only use,
//! but deleted ids can be reused after the maximum shrinks - exactly the
//! contract of the ledger this models.
//!
//! ## Drafts and Patches
//! - A *draft* is an entity without its id: the input to an `add_*` call.
//! - A *patch* is a partial entity: `Some` fields overwrite, `None` fields
//!   are left untouched. The input to an `update_*` call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Fixed Vocabularies
// =============================================================================

/// Product category.
///
/// The shop works with a closed set of categories; the serialized form is
/// the Spanish vocabulary the ledger has always used, so persisted data and
/// exports stay readable to the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Anillos")]
    Rings,
    #[serde(rename = "Collares")]
    Necklaces,
    #[serde(rename = "Aretes")]
    Earrings,
    #[serde(rename = "Pulseras")]
    Bracelets,
    #[serde(rename = "Relojes")]
    Watches,
    #[serde(rename = "Otros")]
    Other,
}

impl Category {
    /// All categories, in the order the shop lists them.
    pub const ALL: [Category; 6] = [
        Category::Rings,
        Category::Necklaces,
        Category::Earrings,
        Category::Bracelets,
        Category::Watches,
        Category::Other,
    ];

    /// The display/persisted label.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Rings => "Anillos",
            Category::Necklaces => "Collares",
            Category::Earrings => "Aretes",
            Category::Bracelets => "Pulseras",
            Category::Watches => "Relojes",
            Category::Other => "Otros",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Efectivo")]
    Cash,
    #[serde(rename = "Tarjeta")]
    Card,
    #[serde(rename = "Transferencia")]
    Transfer,
}

impl PaymentMethod {
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Efectivo",
            PaymentMethod::Card => "Tarjeta",
            PaymentMethod::Transfer => "Transferencia",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification of a cash-ledger deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithdrawalKind {
    /// A personal draw by the owner.
    #[serde(rename = "retiro")]
    PersonalDraw,
    /// A shop expense (supplies, rent, repairs).
    #[serde(rename = "gasto")]
    ShopExpense,
}

impl fmt::Display for WithdrawalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WithdrawalKind::PersonalDraw => "retiro",
            WithdrawalKind::ShopExpense => "gasto",
        })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A sellable inventory item.
///
/// ## Stock
/// `stock` is conceptually ≥ 0 but deliberately not enforced: sale
/// mutations adjust it blindly and the reporting layer simply shows what
/// the ledger says. Drift is visible, never fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub category: Category,
    pub price_cents: i64,
    pub cost_cents: i64,
    pub stock: i64,
    pub description: String,
    pub supplier: String,
    /// Date the item entered inventory.
    pub intake_date: NaiveDate,
    /// Optional product photo as a data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    /// Margin on a single unit (price − cost).
    pub fn unit_profit(&self) -> Money {
        self.price() - self.cost()
    }
}

/// Input for creating a product: a [`Product`] without its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub category: Category,
    pub price_cents: i64,
    pub cost_cents: i64,
    pub stock: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub supplier: String,
    pub intake_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductDraft {
    /// Materializes the draft into a product with the assigned id.
    pub fn into_product(self, id: u64) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price_cents: self.price_cents,
            cost_cents: self.cost_cents,
            stock: self.stock,
            description: self.description,
            supplier: self.supplier,
            intake_date: self.intake_date,
            image: self.image,
        }
    }
}

/// Partial update for a product. `Some` fields overwrite, `None` fields are
/// kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub price_cents: Option<i64>,
    pub cost_cents: Option<i64>,
    pub stock: Option<i64>,
    pub description: Option<String>,
    pub supplier: Option<String>,
    pub intake_date: Option<NaiveDate>,
    pub image: Option<String>,
}

impl ProductPatch {
    /// Merges the patch into an existing product.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price_cents) = self.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(cost_cents) = self.cost_cents {
            product.cost_cents = cost_cents;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(supplier) = self.supplier {
            product.supplier = supplier;
        }
        if let Some(intake_date) = self.intake_date {
            product.intake_date = intake_date;
        }
        if let Some(image) = self.image {
            product.image = Some(image);
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One line of a sale: a product snapshot at the moment of sale.
///
/// ## Snapshot Semantics
/// Unit price and cost are frozen here; later product edits never change a
/// recorded sale.
///
/// ## Name-Keyed Reference
/// The line refers to the product **by name**, not id - the ledger has
/// always worked this way and stock reconciliation depends on it. Renaming
/// a product breaks the link for existing sales: their stock adjustments
/// silently stop matching. Known wart, kept for compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub unit_cost_cents: i64,
}

impl SaleItem {
    /// Line total: unit price × quantity.
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }

    /// Line profit: (unit price − unit cost) × quantity.
    pub fn line_profit(&self) -> Money {
        (Money::from_cents(self.unit_price_cents) - Money::from_cents(self.unit_cost_cents))
            .multiply_quantity(self.quantity)
    }
}

/// Total and profit of a set of sale lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleTotals {
    pub total: Money,
    pub profit: Money,
}

/// Computes total and profit over a set of sale lines.
///
/// This is the recomputation helper the calling layer is expected to run
/// when it edits line items; the stores record whatever totals they are
/// handed and never re-validate them.
pub fn sale_totals(items: &[SaleItem]) -> SaleTotals {
    SaleTotals {
        total: items.iter().map(SaleItem::line_total).sum(),
        profit: items.iter().map(SaleItem::line_profit).sum(),
    }
}

/// A completed transaction.
///
/// `total_cents` / `profit_cents` were computed from the line items when
/// the sale was created and are stored verbatim - they are not recomputed
/// on later reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: u64,
    pub date: NaiveDate,
    pub client: String,
    /// Salesperson name; empty string means unattributed.
    pub seller: String,
    pub items: Vec<SaleItem>,
    pub total_cents: i64,
    pub profit_cents: i64,
    pub payment_method: PaymentMethod,
}

impl Sale {
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    pub fn profit(&self) -> Money {
        Money::from_cents(self.profit_cents)
    }
}

/// Input for creating a sale. Totals are not part of the draft: they are
/// computed from the items at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    pub date: NaiveDate,
    pub client: String,
    #[serde(default)]
    pub seller: String,
    pub items: Vec<SaleItem>,
    pub payment_method: PaymentMethod,
}

/// Partial update for a sale.
///
/// Carrying new `items` without matching `total_cents` / `profit_cents`
/// leaves the stored totals stale; run [`sale_totals`] and fill all three.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePatch {
    pub date: Option<NaiveDate>,
    pub client: Option<String>,
    pub seller: Option<String>,
    pub items: Option<Vec<SaleItem>>,
    pub total_cents: Option<i64>,
    pub profit_cents: Option<i64>,
    pub payment_method: Option<PaymentMethod>,
}

impl SalePatch {
    /// Merges the patch into an existing sale.
    pub fn apply_to(self, sale: &mut Sale) {
        if let Some(date) = self.date {
            sale.date = date;
        }
        if let Some(client) = self.client {
            sale.client = client;
        }
        if let Some(seller) = self.seller {
            sale.seller = seller;
        }
        if let Some(items) = self.items {
            sale.items = items;
        }
        if let Some(total_cents) = self.total_cents {
            sale.total_cents = total_cents;
        }
        if let Some(profit_cents) = self.profit_cents {
            sale.profit_cents = profit_cents;
        }
        if let Some(payment_method) = self.payment_method {
            sale.payment_method = payment_method;
        }
    }
}

// =============================================================================
// Withdrawal
// =============================================================================

/// A cash-ledger deduction, not tied to inventory.
///
/// Withdrawals are additive ledger entries: created and deleted, never
/// edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub id: u64,
    pub date: NaiveDate,
    pub amount_cents: i64,
    /// Free-text concept/memo ("pago de renta", "retiro semanal", ...).
    pub memo: String,
    pub kind: WithdrawalKind,
}

impl Withdrawal {
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// Input for creating a withdrawal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalDraft {
    pub date: NaiveDate,
    pub amount_cents: i64,
    #[serde(default)]
    pub memo: String,
    pub kind: WithdrawalKind,
}

impl WithdrawalDraft {
    pub fn into_withdrawal(self, id: u64) -> Withdrawal {
        Withdrawal {
            id,
            date: self.date,
            amount_cents: self.amount_cents,
            memo: self.memo,
            kind: self.kind,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_category_vocabulary() {
        assert_eq!(
            serde_json::to_value(Category::Rings).unwrap(),
            serde_json::json!("Anillos")
        );
        let parsed: Category = serde_json::from_str("\"Relojes\"").unwrap();
        assert_eq!(parsed, Category::Watches);
        assert_eq!(Category::Other.to_string(), "Otros");
    }

    #[test]
    fn test_payment_and_kind_vocabulary() {
        assert_eq!(
            serde_json::to_value(PaymentMethod::Cash).unwrap(),
            serde_json::json!("Efectivo")
        );
        assert_eq!(
            serde_json::to_value(WithdrawalKind::PersonalDraw).unwrap(),
            serde_json::json!("retiro")
        );
        assert_eq!(
            serde_json::to_value(WithdrawalKind::ShopExpense).unwrap(),
            serde_json::json!("gasto")
        );
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product {
            id: 1,
            name: "Anillo de plata".to_string(),
            category: Category::Rings,
            price_cents: 45000,
            cost_cents: 20000,
            stock: 10,
            description: String::new(),
            supplier: "Plata MX".to_string(),
            intake_date: date("2024-03-01"),
            image: None,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("priceCents").is_some());
        assert!(value.get("intakeDate").is_some());
        // Absent image is omitted entirely
        assert!(value.get("image").is_none());
    }

    #[test]
    fn test_product_patch_merges_only_some_fields() {
        let mut product = Product {
            id: 7,
            name: "Collar".to_string(),
            category: Category::Necklaces,
            price_cents: 30000,
            cost_cents: 12000,
            stock: 4,
            description: "perlas".to_string(),
            supplier: String::new(),
            intake_date: date("2024-01-15"),
            image: None,
        };

        ProductPatch {
            price_cents: Some(35000),
            stock: Some(6),
            ..ProductPatch::default()
        }
        .apply_to(&mut product);

        assert_eq!(product.price_cents, 35000);
        assert_eq!(product.stock, 6);
        assert_eq!(product.name, "Collar");
        assert_eq!(product.description, "perlas");
    }

    #[test]
    fn test_sale_totals_from_items() {
        let items = vec![
            SaleItem {
                product_name: "A".to_string(),
                quantity: 3,
                unit_price_cents: 1000,
                unit_cost_cents: 400,
            },
            SaleItem {
                product_name: "B".to_string(),
                quantity: 2,
                unit_price_cents: 2500,
                unit_cost_cents: 1000,
            },
        ];

        let totals = sale_totals(&items);
        assert_eq!(totals.total.cents(), 3 * 1000 + 2 * 2500);
        assert_eq!(totals.profit.cents(), 3 * 600 + 2 * 1500);
    }

    #[test]
    fn test_sale_totals_empty() {
        let totals = sale_totals(&[]);
        assert!(totals.total.is_zero());
        assert!(totals.profit.is_zero());
    }

    #[test]
    fn test_sale_patch_keeps_unpatched_fields() {
        let mut sale = Sale {
            id: 1,
            date: date("2024-06-01"),
            client: "Laura".to_string(),
            seller: "Ana".to_string(),
            items: vec![],
            total_cents: 1000,
            profit_cents: 400,
            payment_method: PaymentMethod::Cash,
        };

        SalePatch {
            payment_method: Some(PaymentMethod::Transfer),
            ..SalePatch::default()
        }
        .apply_to(&mut sale);

        assert_eq!(sale.payment_method, PaymentMethod::Transfer);
        assert_eq!(sale.total_cents, 1000);
        assert_eq!(sale.seller, "Ana");
    }
}
