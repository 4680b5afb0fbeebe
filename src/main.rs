use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};

use promptviz::client::VizClient;
use promptviz::format::format_cell;
use promptviz::render::{derive_view_with, ChartView, VizView};
use promptviz::session::Session;
use promptviz::store::StoreSnapshot;

#[derive(Parser, Debug)]
#[command(name = "promptviz")]
#[command(about = "Describe charts in free text against a visualization service", long_about = None)]
struct Args {
    /// Base URL of the visualization service
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    base_url: String,

    /// Maximum individual pie slices before grouping into "Other"
    #[arg(long, default_value_t = 10)]
    max_slices: usize,

    /// Log more (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let client = VizClient::new(&args.base_url).context("Failed to build service client")?;
    let mut session = Session::new(client);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    eprintln!("Type a prompt, :list, :select <id>, :health, or :quit");
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if input == ":quit" || input == ":q" {
            break;
        }
        if input == ":list" {
            print_list(&session.snapshot());
            continue;
        }
        if input == ":health" {
            match session.health() {
                Ok(()) => println!("service is up"),
                Err(err) => eprintln!("Backend: {err:#}"),
            }
            continue;
        }
        if let Some(id) = input.strip_prefix(":select ") {
            if !session.select(id.trim()) {
                eprintln!("No visualization with id '{}'", id.trim());
            }
            continue;
        }

        match session.submit(input) {
            Ok(snapshot) => {
                if let Some(spec) = snapshot.active() {
                    let view = derive_view_with(spec, args.max_slices);
                    print_view(&view);
                }
            }
            // Transport failures leave the collection untouched; the user
            // can retry the same prompt.
            Err(err) => eprintln!("Backend: {err:#}"),
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_list(snapshot: &StoreSnapshot) {
    if snapshot.specs.is_empty() {
        println!("No visualizations yet.");
        return;
    }
    for spec in &snapshot.specs {
        let marker = if snapshot.active_id.as_deref() == Some(spec.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{marker} {} [{}] {}", spec.id, spec.kind, spec.display_label());
    }
}

fn print_view(view: &VizView) {
    if let Some(title) = &view.title {
        println!("== {title} ==");
    }
    for warning in &view.warnings {
        println!("warning: {warning}");
    }

    match &view.chart {
        Ok(ChartView::Pie(pie)) => {
            for slice in &pie.slices {
                println!(
                    "  {:<24} {:>8} ({:.1}%)  {}",
                    slice.label, slice.display, slice.percent, slice.color
                );
            }
            if pie.overflowed {
                println!("  (smaller categories grouped into Other)");
            }
        }
        Ok(ChartView::Bar(bar)) => {
            println!("  {} by {}", bar.y_column, bar.x_column);
            for point in &bar.bars {
                println!("  {:<24} {:>8}", point.label, point.display);
            }
        }
        Ok(ChartView::Scatter(scatter)) => {
            println!(
                "  {} points of {} vs {}",
                scatter.points.len(),
                scatter.y_column,
                scatter.x_column
            );
        }
        Ok(ChartView::Table(table)) => {
            println!("  {}", table.projection.columns.join(" | "));
            for row in &table.projection.cells {
                println!("  {}", row.join(" | "));
            }
        }
        // Derivation failures are placeholders, not crashes.
        Err(err) => println!("  [{err}]"),
    }

    // Insight values are mostly numeric; short-format them like cells.
    for (name, value) in &view.insights {
        println!("insight: {name} = {}", format_cell(value));
    }
}
