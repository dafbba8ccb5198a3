use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};

use crate::files::{self, Staged};
use crate::{grouper, loader, report, sco, GroupOptions, ReportError};

/// The layout of a source file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// One row per student with one column per item
    #[default]
    Orders,
    /// A raw School Cash Online export with one row per purchase
    Sco,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown format `{0}`, expected `orders` or `sco`")]
pub struct UnknownFormat(String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "orders" => Ok(Self::Orders),
            "sco" => Ok(Self::Sco),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orders => f.write_str("orders"),
            Self::Sco => f.write_str("sco"),
        }
    }
}

/// Everything needed to produce a report
#[derive(Clone, Debug, Default)]
pub struct ReportConfig {
    /// The source file
    pub src: PathBuf,
    /// Where to write the grouped report
    pub out: PathBuf,
    pub format: Format,
    /// Where to write the normalized orders, if at all
    pub orders_out: Option<PathBuf>,
    /// Keywords ordering the items of a raw export
    /// Uses [`sco::DEFAULT_ITEM_ORDER`] if empty.
    pub item_order: Vec<String>,
    pub grouping: GroupOptions,
}

/// What a run produced
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub items: usize,
    pub groups: usize,
}

/// Reads the source, groups its orders and writes the report
///
/// All input is validated before any output file is created.
pub fn run(config: &ReportConfig) -> Result<RunSummary, ReportError> {
    let table = files::read_table(&config.src)?;
    info!(src = %config.src.display(), format = %config.format, rows = table.rows.len(), "read source");

    let orders = match config.format {
        Format::Orders => loader::load(&table)?,
        Format::Sco if config.item_order.is_empty() => sco::convert(&table, &sco::DEFAULT_ITEM_ORDER)?,
        Format::Sco => sco::convert(&table, config.item_order.as_slice())?,
    };
    if orders.is_empty() {
        warn!(src = %config.src.display(), "source holds no orders");
    }
    let groups = grouper::group(&orders, &config.grouping);
    let rows = grouper::rows(&groups);

    let staged_orders = config.orders_out
        .as_deref()
        .map(|path| Staged::write(path, |file| report::write_orders(file, &orders)))
        .transpose()?;
    let staged_report = Staged::write(&config.out, |file| report::write_rows(file, &orders, &rows))?;

    staged_report.commit()?;
    if let Some(staged) = staged_orders {
        if let Err(error) = staged.commit() {
            let _ = fs::remove_file(&config.out);
            return Err(error);
        }
    }

    let summary = RunSummary {
        records: orders.len(),
        items: orders.items().len(),
        groups: groups.len(),
    };
    info!(out = %config.out.display(), ?summary, "wrote report");

    Ok(summary)
}
