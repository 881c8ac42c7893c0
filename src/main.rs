mod commands;
mod render;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crm_core::config::CrmConfig;
use crm_core::screen::QuickAction;
use crm_core::store::FileStore;
use crm_core::view::ViewMode;

#[derive(Parser)]
#[command(name = "crm")]
#[command(about = "Browse and edit the crm calendar, and search synced products")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Day selection and filters shared by the calendar views
#[derive(Args)]
struct ViewArgs {
    /// Day to show, or a day inside the week/month to show (YYYY-MM-DD, default today)
    #[arg(short, long)]
    date: Option<String>,

    /// Only these event types (repeatable), e.g. "delivery"
    #[arg(short = 't', long = "type")]
    types: Vec<String>,

    /// Only these priorities (repeatable): high, medium, low
    #[arg(short, long)]
    priority: Vec<String>,

    /// Only these statuses (repeatable): pending, completed, cancelled
    #[arg(short, long)]
    status: Vec<String>,
}

/// Event fields settable from the command line
#[derive(Args, Default)]
struct EventFields {
    /// Date and time, "YYYY-MM-DD HH:MM" (UTC) or "YYYY-MM-DD" for noon
    #[arg(long)]
    at: Option<String>,

    /// product-development, technical-test, delivery, commercial-visit, post-sale
    #[arg(short = 't', long = "type")]
    event_type: Option<String>,

    /// high, medium, low
    #[arg(short, long)]
    priority: Option<String>,

    /// pending, completed, cancelled
    #[arg(short, long)]
    status: Option<String>,

    /// communication, proposal, negotiation, closing
    #[arg(long)]
    phase: Option<String>,

    /// Client contact
    #[arg(short, long)]
    contact: Option<String>,

    /// Internal person responsible
    #[arg(short, long)]
    responsible: Option<String>,

    #[arg(short, long)]
    notes: Option<String>,

    /// Append a reference code (repeatable)
    #[arg(long = "ref")]
    reference_codes: Vec<String>,

    /// Append a required document (repeatable)
    #[arg(long = "document")]
    required_documents: Vec<String>,

    /// Append a follow-up action (repeatable)
    #[arg(long = "follow-up")]
    follow_up_actions: Vec<String>,

    /// Append an attachment (repeatable)
    #[arg(long = "attach")]
    attachments: Vec<String>,

    /// Turn the reminder on
    #[arg(long)]
    remind: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one day's events
    Day(ViewArgs),
    /// Show the week (Monday to Sunday) around a day
    Week(ViewArgs),
    /// Show the month around a day
    Month(ViewArgs),
    /// Create an event (prompts for anything missing)
    New {
        /// Event title
        title: Option<String>,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Change fields of an existing event
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        fields: EventFields,

        /// Remove the reference code at this position (0-based, repeatable)
        #[arg(long = "remove-ref")]
        remove_refs: Vec<usize>,
    },
    /// Mark an event completed
    Complete { id: String },
    /// Turn on an event's reminder
    Remind { id: String },
    /// Delete an event
    Delete { id: String },
    /// Fetch products through crm-server and search them
    Products {
        /// Match against product name or SKU
        #[arg(short = 'q', long)]
        search: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// e.g. publish, draft
        #[arg(short, long)]
        status: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CrmConfig::load().context("Failed to load crm configuration")?;
    let mut store = FileStore::open(config.data_path());

    match cli.command {
        Commands::Day(args) => commands::view::run(&store, ViewMode::Day, args),
        Commands::Week(args) => commands::view::run(&store, ViewMode::Week, args),
        Commands::Month(args) => commands::view::run(&store, ViewMode::Month, args),
        Commands::New { title, fields } => commands::new::run(&mut store, title, fields),
        Commands::Edit {
            id,
            title,
            fields,
            remove_refs,
        } => commands::edit::run(&mut store, &id, title, fields, remove_refs),
        Commands::Complete { id } => commands::quick::run(&mut store, &id, QuickAction::Complete),
        Commands::Remind { id } => commands::quick::run(&mut store, &id, QuickAction::Remind),
        Commands::Delete { id } => commands::quick::run(&mut store, &id, QuickAction::Delete),
        Commands::Products {
            search,
            category,
            status,
        } => commands::products::run(&config, search, category, status).await,
    }
}
