//! SeatPlan CLI
//!
//! Command-line tools for the seating-chart editor core.
//!
//! # Commands
//!
//! - `seed` - Display the deterministic seed layout
//! - `demo` - Run a scripted editing session against an in-memory store
//!
//! The demo wires the synchronization core to the in-memory document store
//! and audit log, plays through a two-operator editing scenario, and prints
//! the resulting summary and audit trail.

use clap::{Parser, Subcommand};
use seatplan_layout::{Group, Layout, LayoutSummary};
use seatplan_store::{
    AuditSink, MemoryAuditLog, MemoryDocumentStore, DEFAULT_RECENT_LIMIT,
};
use seatplan_sync::{operator_from_query, EditorSession, SeatField, SessionConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// SeatPlan command-line tools.
#[derive(Parser)]
#[command(name = "seatplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the deterministic seed layout
    Seed {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Run a scripted editing session against an in-memory store
    Demo {
        /// Operator label, or a URL query string carrying one
        /// (e.g. "operator=Ana")
        #[arg(short, long, default_value = "")]
        operator: String,

        /// Audit records to print at the end
        #[arg(short, long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Seed { format } => run_seed(&format),
        Commands::Demo { operator, limit } => run_demo(&operator, limit),
    }
}

fn run_seed(format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let layout = Layout::initial();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    println!("Seed layout: {} tables", layout.table_count());
    for table in &layout.tables {
        let kind = if table.special { "head" } else { "regular" };
        println!(
            "  table {:>2} ({kind:7}) at ({:>6.1}, {:>6.1}) with {:>2} seats",
            table.id,
            table.x,
            table.y,
            table.seat_count()
        );
    }
    Ok(())
}

fn run_demo(operator_arg: &str, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let operator = if operator_arg.is_empty() {
        operator_from_query("")
    } else if operator_arg.contains('=') {
        operator_from_query(operator_arg)
    } else {
        operator_arg.to_string()
    };

    let store = Arc::new(MemoryDocumentStore::new());
    let audit = Arc::new(MemoryAuditLog::new());

    let mut session = EditorSession::new(
        SessionConfig::new(operator.clone()),
        Arc::clone(&store),
        Arc::clone(&audit),
    );
    session.initialize()?;
    tracing::debug!(%operator, "demo session initialized");
    println!(
        "[{operator}] loaded layout with {} tables",
        session.draft()?.table_count()
    );

    // The operator seats a few guests and reshapes table 1.
    session.update_seat(1, 100, SeatField::Name("Alice".into()))?;
    session.update_seat(1, 100, SeatField::Group(Some(Group::Family)))?;
    session.update_seat(1, 101, SeatField::Name("Bruno".into()))?;
    session.update_seat(1, 101, SeatField::Group(Some(Group::Friends)))?;
    session.adjust_seat_count(1, -4)?;
    session.move_table(1, 40.0, -15.0)?;
    session.flush()?;
    println!("[{operator}] edits persisted, dirty = {}", session.is_dirty());

    // A concurrent operator saves their own edit to the shared document.
    let mut peer = EditorSession::new(
        SessionConfig::new("Remote operator"),
        Arc::clone(&store),
        Arc::clone(&audit),
    );
    peer.initialize()?;
    peer.update_seat(2, 200, SeatField::Name("Carla".into()))?;
    peer.update_seat(2, 200, SeatField::Group(Some(Group::Colleagues)))?;
    peer.save()?;

    // Our session drains its notifications and adopts the peer's version.
    let drained = session.poll_remote()?;
    println!("[{operator}] drained {drained} notifications, dirty = {}", session.is_dirty());

    let summary = LayoutSummary::of(session.draft()?);
    println!();
    println!("Occupied seats: {}", summary.occupied_seats());
    for table in summary.tables.iter().filter(|t| !t.occupants.is_empty()) {
        println!("  table {} ({} seats):", table.table_id, table.seat_count);
        for occupant in &table.occupants {
            let group = occupant
                .group
                .map(|g| g.label())
                .unwrap_or("no group");
            println!("    seat {:>4}  {}  [{}]", occupant.seat_id, occupant.name, group);
        }
    }
    println!("Groups:");
    for count in &summary.groups {
        println!("  {:<12} {}", count.group.label(), count.occupied);
    }

    println!();
    println!("Audit trail (newest first):");
    for record in audit.recent(limit)? {
        println!(
            "  {}  {:<18}  {:<16}  {}",
            record.created_at.format("%H:%M:%S%.3f"),
            record.action,
            record.operator,
            record.details
        );
    }
    Ok(())
}
