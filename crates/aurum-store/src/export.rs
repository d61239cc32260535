//! # Spreadsheet Export
//!
//! On-demand snapshot export of the ledger to `.xlsx` workbooks.
//!
//! ## Contract
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  One-way, on-demand snapshot - NOT a sync channel.               │
//! │                                                                  │
//! │  export_products  ──► "Productos" sheet, one row per product     │
//! │  export_sales     ──► "Ventas" sheet, one row per sale           │
//! │  export_sellers   ──► "Reporte" sheet, one row per salesperson   │
//! │  export_monthly   ──► "Reporte" sheet, one row per month         │
//! │                                                                  │
//! │  Monetary cells are written in major units; dates as ISO text.   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Column layouts match what the shop has always read, headers included.

use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use aurum_core::reports::{MonthlyPoint, SellerStats};
use aurum_core::{Money, Product, Sale, UNASSIGNED_SELLER};

use crate::error::StoreResult;

fn write_header(sheet: &mut Worksheet, headers: &[&str]) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    Ok(())
}

fn major(cents: i64) -> f64 {
    Money::from_cents(cents).to_major_units()
}

// =============================================================================
// Products
// =============================================================================

/// Writes the product catalog snapshot ("inventario_productos").
pub fn export_products(products: &[Product], path: &Path) -> StoreResult<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Productos")?;

    write_header(
        sheet,
        &[
            "ID",
            "Nombre",
            "Categoría",
            "Precio",
            "Costo",
            "Ganancia",
            "Stock",
            "Descripción",
            "Proveedor",
            "Fecha Ingreso",
        ],
    )?;

    for (index, product) in products.iter().enumerate() {
        let row = index as u32 + 1;
        sheet.write_number(row, 0, product.id as f64)?;
        sheet.write_string(row, 1, product.name.as_str())?;
        sheet.write_string(row, 2, product.category.label())?;
        sheet.write_number(row, 3, major(product.price_cents))?;
        sheet.write_number(row, 4, major(product.cost_cents))?;
        sheet.write_number(row, 5, product.unit_profit().to_major_units())?;
        sheet.write_number(row, 6, product.stock as f64)?;
        sheet.write_string(row, 7, product.description.as_str())?;
        sheet.write_string(row, 8, product.supplier.as_str())?;
        sheet.write_string(row, 9, product.intake_date.to_string())?;
    }

    workbook.save(path)?;
    Ok(())
}

// =============================================================================
// Sales
// =============================================================================

/// Formats a sale's items the way the report column shows them:
/// `"Anillo (2), Collar (1)"`.
fn items_cell(sale: &Sale) -> String {
    sale.items
        .iter()
        .map(|item| format!("{} ({})", item.product_name, item.quantity))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Writes the sales ledger snapshot ("reporte_ventas").
pub fn export_sales(sales: &[Sale], path: &Path) -> StoreResult<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Ventas")?;

    write_header(
        sheet,
        &[
            "ID",
            "Fecha",
            "Cliente",
            "Vendedor",
            "Productos",
            "Total",
            "Ganancia",
            "Método de Pago",
        ],
    )?;

    for (index, sale) in sales.iter().enumerate() {
        let row = index as u32 + 1;
        let seller = if sale.seller.is_empty() {
            UNASSIGNED_SELLER
        } else {
            sale.seller.as_str()
        };

        sheet.write_number(row, 0, sale.id as f64)?;
        sheet.write_string(row, 1, sale.date.to_string())?;
        sheet.write_string(row, 2, sale.client.as_str())?;
        sheet.write_string(row, 3, seller)?;
        sheet.write_string(row, 4, items_cell(sale))?;
        sheet.write_number(row, 5, major(sale.total_cents))?;
        sheet.write_number(row, 6, major(sale.profit_cents))?;
        sheet.write_string(row, 7, sale.payment_method.label())?;
    }

    workbook.save(path)?;
    Ok(())
}

// =============================================================================
// Seller Leaderboard
// =============================================================================

/// Writes the per-salesperson rollup ("reporte_vendedores").
pub fn export_sellers(stats: &[SellerStats], path: &Path) -> StoreResult<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Reporte")?;

    write_header(
        sheet,
        &[
            "Vendedor",
            "Total Ventas",
            "Total Ganancias",
            "Número de Ventas",
            "Promedio por Venta",
        ],
    )?;

    for (index, seller) in stats.iter().enumerate() {
        let row = index as u32 + 1;
        sheet.write_string(row, 0, seller.name.as_str())?;
        sheet.write_number(row, 1, major(seller.total_sales_cents))?;
        sheet.write_number(row, 2, major(seller.total_profit_cents))?;
        sheet.write_number(row, 3, seller.sale_count as f64)?;
        sheet.write_number(row, 4, major(seller.average_sale_cents()))?;
    }

    workbook.save(path)?;
    Ok(())
}

// =============================================================================
// Monthly Series
// =============================================================================

/// Writes the Jan-Dec series ("reporte_mensual").
pub fn export_monthly(series: &[MonthlyPoint], path: &Path) -> StoreResult<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Reporte")?;

    write_header(sheet, &["Mes", "Ventas", "Ganancias"])?;

    for (index, point) in series.iter().enumerate() {
        let row = index as u32 + 1;
        sheet.write_string(row, 0, point.month)?;
        sheet.write_number(row, 1, major(point.sales_cents))?;
        sheet.write_number(row, 2, major(point.profit_cents))?;
    }

    workbook.save(path)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use aurum_core::reports::{monthly_series, seller_leaderboard};
    use aurum_core::{Category, PaymentMethod, SaleItem};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_product() -> Product {
        Product {
            id: 1,
            name: "Anillo de plata".to_string(),
            category: Category::Rings,
            price_cents: 45000,
            cost_cents: 20000,
            stock: 8,
            description: "plata 925".to_string(),
            supplier: "Plata MX".to_string(),
            intake_date: date("2024-03-01"),
            image: None,
        }
    }

    fn sample_sale(seller: &str) -> Sale {
        Sale {
            id: 1,
            date: date("2024-06-10"),
            client: "Laura".to_string(),
            seller: seller.to_string(),
            items: vec![
                SaleItem {
                    product_name: "Anillo de plata".to_string(),
                    quantity: 2,
                    unit_price_cents: 45000,
                    unit_cost_cents: 20000,
                },
                SaleItem {
                    product_name: "Collar".to_string(),
                    quantity: 1,
                    unit_price_cents: 30000,
                    unit_cost_cents: 12000,
                },
            ],
            total_cents: 120000,
            profit_cents: 68000,
            payment_method: PaymentMethod::Card,
        }
    }

    #[test]
    fn test_items_cell_format() {
        let sale = sample_sale("Ana");
        assert_eq!(items_cell(&sale), "Anillo de plata (2), Collar (1)");
    }

    #[test]
    fn test_export_products_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventario_productos.xlsx");

        export_products(&[sample_product()], &path).unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_export_sales_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reporte_ventas.xlsx");

        export_sales(&[sample_sale("Ana"), sample_sale("")], &path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_export_sellers_and_monthly() {
        let dir = tempfile::tempdir().unwrap();
        let sales = vec![sample_sale("Ana"), sample_sale("")];

        let sellers_path = dir.path().join("reporte_vendedores.xlsx");
        export_sellers(&seller_leaderboard(&sales), &sellers_path).unwrap();
        assert!(sellers_path.exists());

        let monthly_path = dir.path().join("reporte_mensual.xlsx");
        export_monthly(&monthly_series(&sales, 2024), &monthly_path).unwrap();
        assert!(monthly_path.exists());
    }

    #[test]
    fn test_export_empty_collections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vacio.xlsx");
        export_products(&[], &path).unwrap();
        assert!(path.exists());
    }
}
