use std::io;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::grouper::ReportRow;
use crate::Orders;

/// Writes one row per student order
pub fn write_orders<W: io::Write>(writer: W, orders: &Orders) -> Result<(), csv::Error> {
    let rows = orders.records()
        .iter()
        .map(ReportRow::Order)
        .collect::<Vec<_>>();

    write_rows(writer, orders, &rows)
}

/// Writes a grouped report
///
/// The header is the same as the one of [`write_orders`].
pub fn write_rows<W: io::Write>(
    writer: W,
    orders: &Orders,
    rows: &[ReportRow],
) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    let width = orders.items().len();

    writer.write_record(orders.header())?;
    for row in rows {
        writer.serialize(Line { row, width })?;
    }
    writer.flush()?;

    Ok(())
}

/// A report row padded to the width of the report
struct Line<'a, 'r> {
    row: &'a ReportRow<'r>,
    width: usize,
}

impl Serialize for Line<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        let mut seq = serializer.serialize_seq(Some(self.width + 4))?;

        match self.row {
            ReportRow::Order(record) => {
                seq.serialize_element(&record.first_name)?;
                seq.serialize_element(&record.last_name)?;
                seq.serialize_element(&record.teacher)?;
                for i in 0..self.width {
                    seq.serialize_element(&record.item_counts.get(i).copied().unwrap_or_default())?;
                }
                seq.serialize_element(&record.payment)?;
            }
            ReportRow::Spacer => {
                for _ in 0..self.width + 4 {
                    seq.serialize_element("")?;
                }
            }
            ReportRow::Subtotal(summary) => {
                seq.serialize_element("")?;
                seq.serialize_element("")?;
                seq.serialize_element(&summary.teacher)?;
                for i in 0..self.width {
                    seq.serialize_element(&summary.item_counts.get(i).copied().unwrap_or_default())?;
                }
                seq.serialize_element("")?;
            }
        }

        seq.end()
    }
}
