//! # Catalog & Ledger Store
//!
//! Single source of truth for products, sales and withdrawals.
//!
//! ## Mutation Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                  CatalogStore Operations                         │
//! │                                                                  │
//! │  Caller Action            Store Mutation        Side Effect      │
//! │  ─────────────            ──────────────        ───────────      │
//! │                                                                  │
//! │  New product ───────────► add_product() ──────► persist products │
//! │                                                                  │
//! │  Record sale ───────────► add_sale() ─────────► stock -= qty     │
//! │                                                  per line item,  │
//! │                                                  persist both    │
//! │                                                                  │
//! │  Edit sale ─────────────► update_sale() ──────► restore old      │
//! │                                                  stock, re-apply │
//! │                                                  effective items │
//! │                                                                  │
//! │  Remove sale ───────────► delete_sale() ──────► stock += qty     │
//! │                                                  per line item   │
//! │                                                                  │
//! │  Cash out ──────────────► add_withdrawal() ───► persist ledger   │
//! │                                                                  │
//! │  Every mutation rewrites the affected collection(s) in full.     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Trust Boundary
//! The store performs no input validation: callers run
//! `aurum_core::validation` before mutating. Lookups that miss (an absent
//! id, a sale line naming an unknown product) degrade to logged no-ops -
//! the ledger's worst case is silently stale stock, never a failure.

use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, warn};

use aurum_core::reports::{
    self, CategoryShare, LedgerStats, MonthlyPoint, SellerStats,
};
use aurum_core::{
    sale_totals, Money, Product, ProductDraft, ProductPatch, Sale, SaleDraft, SalePatch,
    Withdrawal, WithdrawalDraft,
};

use crate::error::StoreResult;
use crate::storage::{
    load_collection, persist_collection, Storage, PRODUCTS_KEY, SALES_KEY, WITHDRAWALS_KEY,
};

/// Next identity for a collection: `max(existing) + 1`, or 1 when empty.
fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max + 1)
}

/// The catalog & ledger state container.
///
/// Holds the three collections in memory, loaded once from storage and
/// rewritten on every mutation. One logical actor mutates at a time; there
/// is no cross-process coordination.
#[derive(Debug)]
pub struct CatalogStore<S: Storage> {
    storage: S,
    products: Vec<Product>,
    sales: Vec<Sale>,
    withdrawals: Vec<Withdrawal>,
}

impl<S: Storage> CatalogStore<S> {
    /// Loads the three collections from storage.
    ///
    /// A malformed collection is logged and reset to empty; the others
    /// load normally.
    pub fn load(storage: S) -> Self {
        let products: Vec<Product> = load_collection(&storage, PRODUCTS_KEY);
        let sales: Vec<Sale> = load_collection(&storage, SALES_KEY);
        let withdrawals: Vec<Withdrawal> = load_collection(&storage, WITHDRAWALS_KEY);

        debug!(
            products = products.len(),
            sales = sales.len(),
            withdrawals = withdrawals.len(),
            "catalog store loaded"
        );

        CatalogStore {
            storage,
            products,
            sales,
            withdrawals,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn withdrawals(&self) -> &[Withdrawal] {
        &self.withdrawals
    }

    // =========================================================================
    // Product CRUD
    // =========================================================================

    /// Appends a product under the next id and returns it.
    pub fn add_product(&mut self, draft: ProductDraft) -> StoreResult<&Product> {
        let id = next_id(self.products.iter().map(|p| p.id));
        debug!(id, name = %draft.name, "add_product");

        self.products.push(draft.into_product(id));
        self.persist_products()?;
        Ok(&self.products[self.products.len() - 1])
    }

    /// Merges `patch` into the product with `id`. Absent id is a no-op.
    pub fn update_product(&mut self, id: u64, patch: ProductPatch) -> StoreResult<()> {
        match self.products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                debug!(id, "update_product");
                patch.apply_to(product);
                self.persist_products()
            }
            None => {
                debug!(id, "update_product: id absent, no-op");
                Ok(())
            }
        }
    }

    /// Removes the product with `id`. Absent id is a no-op.
    ///
    /// Historical sales are unaffected - they carry their own price/cost
    /// snapshots - but future stock reconciliation for those sales loses
    /// its name-keyed link.
    pub fn delete_product(&mut self, id: u64) -> StoreResult<()> {
        debug!(id, "delete_product");
        self.products.retain(|p| p.id != id);
        self.persist_products()
    }

    // =========================================================================
    // Sale CRUD (with stock side effects)
    // =========================================================================

    /// Records a sale and decrements stock for every line item.
    ///
    /// Total and profit are computed from the line items here, at creation
    /// time, and stored verbatim on the sale. Line items that name an
    /// unknown product are skipped for stock purposes and logged.
    pub fn add_sale(&mut self, draft: SaleDraft) -> StoreResult<&Sale> {
        let id = next_id(self.sales.iter().map(|s| s.id));
        let totals = sale_totals(&draft.items);
        debug!(id, total = %totals.total, items = draft.items.len(), "add_sale");

        for item in &draft.items {
            adjust_stock(&mut self.products, &item.product_name, -item.quantity);
        }

        self.sales.push(Sale {
            id,
            date: draft.date,
            client: draft.client,
            seller: draft.seller,
            items: draft.items,
            total_cents: totals.total.cents(),
            profit_cents: totals.profit.cents(),
            payment_method: draft.payment_method,
        });

        self.persist_products()?;
        self.persist_sales()?;
        Ok(&self.sales[self.sales.len() - 1])
    }

    /// Edits the sale with `id`. Absent id is a no-op.
    ///
    /// Stock is reconciled restore-then-reapply, not as a diff: every
    /// original line item's quantity is added back, then the effective item
    /// set - the patch's items when given, otherwise the unchanged
    /// originals - is decremented again. A patch that touches no items
    /// therefore leaves every product's stock exactly as it was.
    ///
    /// Totals are merged verbatim from the patch; the store trusts the
    /// caller to have run [`aurum_core::sale_totals`] when items changed.
    pub fn update_sale(&mut self, id: u64, patch: SalePatch) -> StoreResult<()> {
        let Some(index) = self.sales.iter().position(|s| s.id == id) else {
            debug!(id, "update_sale: id absent, no-op");
            return Ok(());
        };
        debug!(id, new_items = patch.items.is_some(), "update_sale");

        let original_items = self.sales[index].items.clone();
        for item in &original_items {
            adjust_stock(&mut self.products, &item.product_name, item.quantity);
        }

        let effective_items = patch.items.as_deref().unwrap_or(&original_items);
        for item in effective_items {
            adjust_stock(&mut self.products, &item.product_name, -item.quantity);
        }

        patch.apply_to(&mut self.sales[index]);

        self.persist_products()?;
        self.persist_sales()
    }

    /// Removes the sale with `id`, restoring stock for its line items.
    /// Absent id is a no-op.
    pub fn delete_sale(&mut self, id: u64) -> StoreResult<()> {
        let Some(index) = self.sales.iter().position(|s| s.id == id) else {
            debug!(id, "delete_sale: id absent, no-op");
            return Ok(());
        };
        debug!(id, "delete_sale");

        let sale = self.sales.remove(index);
        for item in &sale.items {
            adjust_stock(&mut self.products, &item.product_name, item.quantity);
        }

        self.persist_products()?;
        self.persist_sales()
    }

    // =========================================================================
    // Withdrawal CRUD
    // =========================================================================

    /// Appends a withdrawal under the next id and returns it.
    ///
    /// Pure ledger append: no side effects on any other collection.
    pub fn add_withdrawal(&mut self, draft: WithdrawalDraft) -> StoreResult<&Withdrawal> {
        let id = next_id(self.withdrawals.iter().map(|w| w.id));
        debug!(id, amount = draft.amount_cents, "add_withdrawal");

        self.withdrawals.push(draft.into_withdrawal(id));
        self.persist_withdrawals()?;
        Ok(&self.withdrawals[self.withdrawals.len() - 1])
    }

    /// Removes the withdrawal with `id`. Absent id is a no-op.
    pub fn delete_withdrawal(&mut self, id: u64) -> StoreResult<()> {
        debug!(id, "delete_withdrawal");
        self.withdrawals.retain(|w| w.id != id);
        self.persist_withdrawals()
    }

    // =========================================================================
    // Derived Reads
    // =========================================================================
    // All pure functions of current state, recomputed on every call. The
    // math lives in aurum_core::reports; the store only supplies the clock.

    /// Headline dashboard totals as of today.
    pub fn stats(&self) -> LedgerStats {
        self.stats_as_of(Local::now().date_naive())
    }

    /// Headline totals as of an explicit date (deterministic variant).
    pub fn stats_as_of(&self, today: NaiveDate) -> LedgerStats {
        reports::ledger_stats(&self.products, &self.sales, &self.withdrawals, today)
    }

    /// Available cash: sum of sale totals minus sum of withdrawals.
    pub fn available_cash(&self) -> Money {
        reports::available_cash(&self.sales, &self.withdrawals)
    }

    /// Jan-Dec sales/profit series for the current year.
    pub fn monthly_series(&self) -> Vec<MonthlyPoint> {
        self.monthly_series_for(Local::now().year())
    }

    /// Jan-Dec series for an explicit year (deterministic variant).
    pub fn monthly_series_for(&self, year: i32) -> Vec<MonthlyPoint> {
        reports::monthly_series(&self.sales, year)
    }

    /// Catalog share per category, as rounded integer percentages.
    pub fn category_distribution(&self) -> Vec<CategoryShare> {
        reports::category_distribution(&self.products)
    }

    /// The five most recent sales by date descending.
    pub fn recent_sales(&self) -> Vec<Sale> {
        reports::recent_sales(&self.sales)
    }

    /// Products at or below the low-stock threshold.
    pub fn low_stock(&self) -> Vec<Product> {
        reports::low_stock(&self.products)
    }

    /// Per-salesperson rollup, sorted by total sales descending.
    pub fn seller_leaderboard(&self) -> Vec<SellerStats> {
        reports::seller_leaderboard(&self.sales)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn persist_products(&self) -> StoreResult<()> {
        persist_collection(&self.storage, PRODUCTS_KEY, &self.products)?;
        Ok(())
    }

    fn persist_sales(&self) -> StoreResult<()> {
        persist_collection(&self.storage, SALES_KEY, &self.sales)?;
        Ok(())
    }

    fn persist_withdrawals(&self) -> StoreResult<()> {
        persist_collection(&self.storage, WITHDRAWALS_KEY, &self.withdrawals)?;
        Ok(())
    }
}

/// Adjusts a product's stock by name. Unknown names are logged and skipped;
/// the sale still records, stock simply isn't reconciled for that line.
fn adjust_stock(products: &mut [Product], name: &str, delta: i64) {
    match products.iter_mut().find(|p| p.name == name) {
        Some(product) => product.stock += delta,
        None => warn!(product = name, delta, "sale line names unknown product, stock untouched"),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
