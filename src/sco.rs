//! Conversion of raw School Cash Online exports.
//!
//! The raw export has one row per purchase. Every purchase lists the items
//! bought in a single `Options` cell, e.g. `Cheese,Juice Box, Pepperoni`.
//! A student may appear in several purchases; they are merged into a single
//! [`OrderRecord`] keyed on the student number.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::table::{cell, line_number, Columns};
use crate::{Count, MalformedInput, OrderRecord, Orders, Table};

pub const STUDENT_NUMBER: &str = "Student Number";
pub const STUDENT_NAME: &str = "Student Name";
pub const HOMEROOM: &str = "HomeroomName";
pub const OPTIONS: &str = "Options";

/// The payment method of every purchase made through the platform
pub const PAYMENT: &str = "Online";

/// Keywords deciding the column order of items
pub const DEFAULT_ITEM_ORDER: [&str; 5] = ["cheese", "pepperoni", "halal", "juice", "yop"];

/// A single purchase row
struct Purchase<'t> {
    line: usize,
    student_number: &'t str,
    student_name: &'t str,
    homeroom: &'t str,
    options: Vec<&'t str>,
}

/// Converts a raw export into one order per student
///
/// Items are ordered by the first word matching one of the `item_order`
/// keywords (case insensitive). Items without a matching word go last.
pub fn convert<S: AsRef<str>>(table: &Table, item_order: &[S]) -> Result<Orders, MalformedInput> {
    let columns = Columns::new(&table.header);
    let student_number = columns.require(STUDENT_NUMBER)?;
    let student_name = columns.require(STUDENT_NAME)?;
    let homeroom = columns.require(HOMEROOM)?;
    let options = columns.require(OPTIONS)?;

    let purchases = table.rows
        .iter()
        .map(|row| Purchase {
            line: line_number(row),
            student_number: cell(row, student_number),
            student_name: cell(row, student_name),
            homeroom: cell(row, homeroom),
            options: cell(row, options)
                .split(',')
                .map(str::trim)
                .filter(|option| !option.is_empty())
                .collect(),
        })
        .collect::<Vec<_>>();

    let mut items = purchases
        .iter()
        .flat_map(|purchase| purchase.options.iter().copied())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();
    items.sort_by_key(|item| rank(item, item_order));
    debug!(?items, "discovered items");
    let positions = items
        .iter()
        .enumerate()
        .map(|(i, item)| (*item, i))
        .collect::<HashMap<_, _>>();

    let mut students: IndexMap<&str, OrderRecord> = IndexMap::new();
    for purchase in &purchases {
        if !students.contains_key(purchase.student_number) {
            let record = new_record(purchase, items.len())?;
            students.insert(purchase.student_number, record);
        }
        if let Some(record) = students.get_mut(purchase.student_number) {
            for option in &purchase.options {
                if let Some(&i) = positions.get(option) {
                    record.item_counts[i] += Count::new(1);
                }
            }
        }
    }

    let items = items.into_iter().map(str::to_string).collect();
    Ok(Orders::new(items, students.into_values().collect()))
}

fn new_record(purchase: &Purchase, width: usize) -> Result<OrderRecord, MalformedInput> {
    let (last_name, first_name) = purchase.student_name
        .split_once(',')
        .ok_or_else(|| MalformedInput::InvalidField {
            line: purchase.line,
            column: STUDENT_NAME,
            value: purchase.student_name.to_string(),
            expected: "`Last, First`",
        })?;
    let (_, teacher) = purchase.homeroom
        .split_once('-')
        .ok_or_else(|| MalformedInput::InvalidField {
            line: purchase.line,
            column: HOMEROOM,
            value: purchase.homeroom.to_string(),
            expected: "`Room - Teacher`",
        })?;

    Ok(OrderRecord {
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
        teacher: teacher.trim().to_string(),
        item_counts: vec![Count::ZERO; width],
        payment: PAYMENT.to_string(),
    })
}

fn rank<S: AsRef<str>>(item: &str, item_order: &[S]) -> usize {
    item.split_whitespace()
        .find_map(|word| {
            item_order
                .iter()
                .position(|keyword| keyword.as_ref().eq_ignore_ascii_case(word))
        })
        .unwrap_or(item_order.len())
}
