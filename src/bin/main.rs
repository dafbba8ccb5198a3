use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use fundraiser_report::{Format, GroupOptions, ReportConfig};

/// Groups fundraiser orders by class and adds the totals of every class
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// The exported orders
    #[clap(short, long)]
    src: std::path::PathBuf,
    /// Where to write the grouped report
    #[clap(short, long)]
    out: std::path::PathBuf,
    /// The layout of the source file, `orders` or `sco`
    #[clap(short, long, default_value_t = Format::Orders)]
    format: Format,
    /// Also write one row per student to this file
    #[clap(long)]
    orders: Option<std::path::PathBuf>,
    /// Teachers whose classes come first, in this order
    #[clap(long, use_value_delimiter = true)]
    teacher_order: Vec<String>,
    /// Keywords ordering the item columns of an `sco` export
    #[clap(long, use_value_delimiter = true)]
    item_order: Vec<String>,
    /// Sort the students of every class by name
    #[clap(long)]
    sort_by_name: bool,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ReportConfig {
        src: args.src,
        out: args.out,
        format: args.format,
        orders_out: args.orders,
        item_order: args.item_order,
        grouping: GroupOptions {
            teacher_order: args.teacher_order,
            sort_by_name: args.sort_by_name,
        },
    };

    fundraiser_report::run(&config)?;

    Ok(())
}
