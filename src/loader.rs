//! Normalizes an order export into [`Orders`].
//!
//! The export has no fixed column order. Identity, teacher and payment
//! columns are located by name; every other named column is an item.

use tracing::{debug, warn};

use crate::order::{FIRST_NAME, LAST_NAME, PAYMENT, PAYMENT_METHOD, TEACHER};

/// Column names that never hold item counts
const RESERVED: [&str; 5] = [FIRST_NAME, LAST_NAME, TEACHER, PAYMENT_METHOD, PAYMENT];
use crate::table::{cell, line_number, Columns};
use crate::{Count, MalformedInput, OrderRecord, Orders, Table};

/// Where each part of a record lives in the source table
#[derive(Debug)]
struct Layout {
    first_name: usize,
    last_name: usize,
    teacher: usize,
    payment: Option<usize>,
    /// Pairs of (source column, item index)
    items: Vec<(usize, usize)>,
    item_names: Vec<String>,
}

impl Layout {
    fn discover(columns: &Columns) -> Result<Self, MalformedInput> {
        let first_name = columns.require(FIRST_NAME)?;
        let last_name = columns.require(LAST_NAME)?;
        let teacher = columns.require(TEACHER)?;
        let payment = columns
            .find(PAYMENT_METHOD)
            .or_else(|| columns.find(PAYMENT));

        let mut items = Vec::new();
        let mut item_names: Vec<String> = Vec::new();
        for (column, name) in columns.names().iter().enumerate() {
            // unnamed columns come from trailing delimiters
            if name.is_empty() || RESERVED.contains(name) {
                continue;
            }
            let index = match item_names.iter().position(|item| item == name) {
                Some(index) => index,
                None => {
                    item_names.push(name.to_string());
                    item_names.len() - 1
                }
            };
            items.push((column, index));
        }
        debug!(items = ?item_names, "discovered item columns");

        Ok(Self { first_name, last_name, teacher, payment, items, item_names })
    }
}

/// Turns a source table into normalized orders
///
/// One record is produced per data row, in row order.
pub fn load(table: &Table) -> Result<Orders, MalformedInput> {
    let columns = Columns::new(&table.header);
    let layout = Layout::discover(&columns)?;

    let records = table.rows
        .iter()
        .map(|row| -> Result<OrderRecord, MalformedInput> {
            let line = line_number(row);
            if row.len() > columns.names().len() {
                warn!(line, "ignoring fields beyond the header");
            }

            let mut item_counts = vec![Count::ZERO; layout.item_names.len()];
            for &(column, item) in &layout.items {
                let value = cell(row, column);
                let count = value
                    .parse::<Count>()
                    .map_err(|_| MalformedInput::InvalidCount {
                        line,
                        column: columns.names()[column].to_string(),
                        value: value.to_string(),
                    })?;
                item_counts[item] += count;
            }

            Ok(OrderRecord {
                first_name: cell(row, layout.first_name).to_string(),
                last_name: cell(row, layout.last_name).to_string(),
                teacher: cell(row, layout.teacher).to_string(),
                item_counts,
                payment: layout.payment
                    .map(|column| cell(row, column).to_string())
                    .unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Orders::new(layout.item_names, records))
}
