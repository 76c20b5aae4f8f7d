//! Spreadsheet export adapter.
//!
//! Renders one completed count plus the current catalog snapshot into a
//! downloadable `.xlsx` file, one row per entry. Entries whose product has
//! since left the catalog degrade to fallback labels instead of failing.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;

use invtrack_catalog::ProductCatalog;
use invtrack_counting::InventoryCount;

const SHEET_NAME: &str = "Inventário";

/// Shown when an entry's product code is missing from the catalog.
const MISSING_PRODUCT: &str = "Não encontrado";
const MISSING_UNIT: &str = "-";

const COLUMNS: [&str; 10] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];

const HEADERS: [&str; 10] = [
    "Loja",
    "Código do Material",
    "Produto",
    "Unidade Padrão",
    "Caixas",
    "Pacotes",
    "Unidades Avulsas",
    "Total Consolidado",
    "Data do Inventário",
    "Responsável",
];

const COLUMN_WIDTHS: [f64; 10] = [20.0, 20.0, 30.0, 15.0, 10.0, 10.0, 15.0, 15.0, 15.0, 25.0];

/// File name for an exported count: store with whitespace runs collapsed to
/// underscores, date reduced to its digits.
pub fn export_file_name(store: &str, date: NaiveDate) -> String {
    let store_part = store.split_whitespace().collect::<Vec<_>>().join("_");
    format!("Inventario_{}_{}.xlsx", store_part, date.format("%Y%m%d"))
}

/// Render a count's consolidated total (or any quantity) the way the forms
/// do: exactly 3 decimal places, pt-BR separators.
pub fn format_decimal(value: f64) -> String {
    let rendered = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), "000"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped},{frac_part}")
}

/// Write `count` to `dir` as a spreadsheet and return the file path.
pub fn export_count(
    count: &InventoryCount,
    catalog: &ProductCatalog,
    dir: &Path,
) -> Result<PathBuf> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| anyhow!("new workbook has no default sheet"))?;
    sheet.set_name(SHEET_NAME);

    for (column, header) in COLUMNS.iter().zip(HEADERS) {
        sheet.get_cell_mut(format!("{column}1")).set_value(header);
    }
    for (column, width) in COLUMNS.iter().zip(COLUMN_WIDTHS) {
        sheet.get_column_dimension_mut(column).set_width(width);
    }

    let date_label = count.date().format("%d/%m/%Y").to_string();
    for (index, entry) in count.entries().iter().enumerate() {
        let row = index + 2;
        let product = catalog.resolve(entry.product_code()).ok();
        let name = product.map_or(MISSING_PRODUCT, |p| p.name.as_str());
        let unit = product.map_or(MISSING_UNIT, |p| p.unit.label());

        sheet.get_cell_mut(format!("A{row}")).set_value(count.store());
        sheet
            .get_cell_mut(format!("B{row}"))
            .set_value(entry.product_code());
        sheet.get_cell_mut(format!("C{row}")).set_value(name);
        sheet.get_cell_mut(format!("D{row}")).set_value(unit);
        sheet
            .get_cell_mut(format!("E{row}"))
            .set_value_number(entry.boxes());
        sheet
            .get_cell_mut(format!("F{row}"))
            .set_value_number(entry.packs());
        sheet
            .get_cell_mut(format!("G{row}"))
            .set_value_number(entry.units());
        sheet
            .get_cell_mut(format!("H{row}"))
            .set_value_number(entry.total_consolidated());
        sheet.get_cell_mut(format!("I{row}")).set_value(&date_label);
        sheet
            .get_cell_mut(format!("J{row}"))
            .set_value(count.responsible());
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("create export directory {}", dir.display()))?;
    let path = dir.join(export_file_name(count.store(), count.date()));
    umya_spreadsheet::writer::xlsx::write(&book, &path).context("write spreadsheet failed")?;

    Ok(path)
}
