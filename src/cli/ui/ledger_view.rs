use crate::currency::{format_amount, LocaleConfig};
use crate::ledger::Row;

use super::table_renderer::{Table, TableColumn};

const DESCRIPTION_WIDTH: usize = 32;

/// Projects the working rows into a numbered table, one line per row.
pub fn rows_table(rows: &[Row], locale: &LocaleConfig) -> Table {
    let mut table = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Date"),
        TableColumn::left("Description").max_width(DESCRIPTION_WIDTH),
        TableColumn::left("Category"),
        TableColumn::left("Type"),
        TableColumn::right("Amount"),
        TableColumn::left("Rec."),
        TableColumn::left("Payment"),
    ]);
    for (index, row) in rows.iter().enumerate() {
        table.push_row(vec![
            (index + 1).to_string(),
            row.date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            row.description.clone(),
            row.category
                .map(|category| category.label().to_string())
                .unwrap_or_default(),
            row.kind.label().to_string(),
            row.amount
                .map(|amount| format_amount(locale, amount))
                .unwrap_or_default(),
            if row.recurring { "yes" } else { "" }.to_string(),
            row.payment.clone().unwrap_or_default(),
        ]);
    }
    table
}
