use crate::Count;

pub const FIRST_NAME: &str = "First Name";
pub const LAST_NAME: &str = "Last Name";
pub const TEACHER: &str = "Teacher";
/// The payment column as it appears in the source export
pub const PAYMENT_METHOD: &str = "Payment Method";
/// The payment column as it appears in generated reports
pub const PAYMENT: &str = "Payment";

/// The order of a single student
///
/// The item counts are positionally aligned with the item names of the
/// [`Orders`] the record belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderRecord {
    pub first_name: String,
    pub last_name: String,
    pub teacher: String,
    pub item_counts: Vec<Count>,
    pub payment: String,
}

/// A normalized set of student orders
///
/// All records share the same, fixed, list of item names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Orders {
    items: Vec<String>,
    records: Vec<OrderRecord>,
}

impl Orders {
    /// Creates a new set of orders
    ///
    /// Every record is padded (or truncated) to the number of items.
    pub fn new(items: Vec<String>, mut records: Vec<OrderRecord>) -> Self {
        for record in &mut records {
            record.item_counts.resize(items.len(), Count::ZERO);
        }

        Self { items, records }
    }

    /// The item names, in column order
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// All records, in input order
    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The header of every generated report
    pub fn header(&self) -> Vec<&str> {
        let mut header = Vec::with_capacity(self.items.len() + 4);
        header.extend([FIRST_NAME, LAST_NAME, TEACHER]);
        header.extend(self.items.iter().map(String::as_str));
        header.push(PAYMENT);
        header
    }
}
