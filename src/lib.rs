pub use self::{
    count::Count,
    error::{MalformedInput, ReportError},
    grouper::{Group, GroupOptions, GroupSummary, ReportRow},
    order::{OrderRecord, Orders},
    pipeline::{run, Format, ReportConfig, RunSummary, UnknownFormat},
    table::Table,
};

mod count;
mod error;
mod order;
mod pipeline;
mod table;

pub mod files;
pub mod grouper;
pub mod loader;
pub mod report;
pub mod sco;
