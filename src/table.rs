use std::collections::HashMap;

use csv::StringRecord;

use crate::MalformedInput;

/// A source spreadsheet held in memory
#[derive(Clone, Debug, Default)]
pub struct Table {
    pub header: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl Table {
    /// Reads a whole comma separated table, including its header row
    ///
    /// Rows may be shorter or longer than the header.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let header = reader.headers()?.clone();
        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { header, rows })
    }
}

/// Maps column names to their position in a header row
#[derive(Debug)]
pub struct Columns<'h> {
    names: Vec<&'h str>,
    index: HashMap<&'h str, usize>,
}

impl<'h> Columns<'h> {
    pub fn new(header: &'h StringRecord) -> Self {
        let names = header
            .iter()
            .enumerate()
            .map(|(i, name)| match i {
                // exports may start with a byte order mark
                0 => name.trim_start_matches('\u{feff}').trim(),
                _ => name.trim(),
            })
            .collect::<Vec<_>>();
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            index.entry(*name).or_insert(i);
        }

        Self { names, index }
    }

    /// All column names, in header order
    pub fn names(&self) -> &[&'h str] {
        &self.names
    }

    /// The position of the first column with this name
    pub fn find(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// The position of a column that has to be present
    pub fn require(&self, name: &'static str) -> Result<usize, MalformedInput> {
        self.find(name)
            .ok_or(MalformedInput::MissingColumn { column: name })
    }
}

/// The line a row starts on, counting the header as line 1
///
/// Rows that were not read from a file report line 0.
pub fn line_number(row: &StringRecord) -> usize {
    row.position().map_or(0, |position| position.line() as usize)
}

/// A trimmed cell of a row, blank if the row is too short
pub fn cell(row: &StringRecord, index: usize) -> &str {
    row.get(index).map(str::trim).unwrap_or_default()
}
