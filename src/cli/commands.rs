use clap::{Parser, Subcommand};
use crate::board::{DropOutcome, LeadForm, PipelineBoard};
use crate::cli::abbrev::resolve_stage;
use crate::cli::error::user_error;
use crate::cli::output::{
    format_board, format_lead_list_table, format_lead_summary, print_notification,
    stdout_is_terminal,
};
use crate::db::DbConnection;
use crate::models::PipelineStage;
use crate::store::{LeadStore, SqliteLeadStore};
use crate::utils::date::parse_date_expr;
use anyhow::{Context, Result};

#[derive(Parser)]
#[command(name = "leadboard")]
#[command(about = "Lead Board - A command-line sales pipeline tracker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the pipeline board grouped by stage
    Board,
    /// Add a new lead
    Add {
        /// Lead name (e.g., contact or opportunity name)
        #[arg(required = true)]
        name: Vec<String>,
        /// Initial pipeline stage (slug or unique prefix, default: new_lead)
        #[arg(short, long)]
        stage: Option<String>,
        /// Company name
        #[arg(long)]
        company: Option<String>,
        /// Contact email
        #[arg(long)]
        email: Option<String>,
        /// Contact phone
        #[arg(long)]
        phone: Option<String>,
        /// Where the lead came from (referral, website, ...)
        #[arg(long)]
        source: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Last contact date (2026-08-24, today, yesterday)
        #[arg(long)]
        contacted: Option<String>,
    },
    /// Edit an existing lead's fields
    Edit {
        /// Lead ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// Pipeline stage (slug or unique prefix)
        #[arg(short, long)]
        stage: Option<String>,
        /// Company name
        #[arg(long)]
        company: Option<String>,
        /// Contact email
        #[arg(long)]
        email: Option<String>,
        /// Contact phone
        #[arg(long)]
        phone: Option<String>,
        /// Where the lead came from
        #[arg(long)]
        source: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Last contact date (2026-08-24, today, yesterday)
        #[arg(long)]
        contacted: Option<String>,
    },
    /// Move a lead to another pipeline stage
    Move {
        /// Lead ID
        id: String,
        /// Target stage (slug or unique prefix, e.g. "qual")
        stage: String,
    },
    /// List leads
    List {
        /// Only leads in this stage
        #[arg(short, long)]
        stage: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show detailed summary of one lead
    Show {
        /// Lead ID
        id: String,
    },
}

/// CLI entry point: parse arguments, open the store, dispatch
pub fn run() -> Result<()> {
    // No-op outside Windows
    let _ = enable_ansi_support::enable_ansi_support();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init()
        .ok();

    let cli = Cli::parse();
    let conn = DbConnection::connect().context("Failed to open lead database")?;
    let store = SqliteLeadStore::new(conn);
    let use_color = stdout_is_terminal();

    match cli.command {
        Commands::Board => handle_board(&store, use_color),
        Commands::Add {
            name,
            stage,
            company,
            email,
            phone,
            source,
            notes,
            contacted,
        } => handle_add(
            &store, name, stage, company, email, phone, source, notes, contacted,
        ),
        Commands::Edit {
            id,
            name,
            stage,
            company,
            email,
            phone,
            source,
            notes,
            contacted,
        } => handle_edit(
            &store, &id, name, stage, company, email, phone, source, notes, contacted,
        ),
        Commands::Move { id, stage } => handle_move(&store, &id, &stage, use_color),
        Commands::List { stage, json } => handle_list(&store, stage, json, use_color),
        Commands::Show { id } => handle_show(&store, &id),
    }
}

fn parse_stage_arg(input: &str) -> PipelineStage {
    match resolve_stage(input) {
        Ok(stage) => stage,
        Err(message) => user_error(&message),
    }
}

fn parse_id_arg(input: &str) -> i64 {
    match crate::cli::error::validate_lead_id(input) {
        Ok(id) => id,
        Err(message) => user_error(&message),
    }
}

fn load_board(store: &SqliteLeadStore, use_color: bool) -> PipelineBoard {
    let mut board = PipelineBoard::new();
    board.load(store);
    // Load failures are non-fatal; the notification carries the detail
    for notification in board.take_notifications() {
        print_notification(&notification, use_color);
    }
    board
}

fn handle_board(store: &SqliteLeadStore, use_color: bool) -> Result<()> {
    let board = load_board(store, use_color);
    print!("{}", format_board(&board.group_by_stage(), use_color));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_add(
    store: &SqliteLeadStore,
    name: Vec<String>,
    stage: Option<String>,
    company: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    source: Option<String>,
    notes: Option<String>,
    contacted: Option<String>,
) -> Result<()> {
    let name = name.join(" ");
    if name.trim().is_empty() {
        user_error("Lead name cannot be empty");
    }

    let initial_stage = stage
        .as_deref()
        .map(parse_stage_arg)
        .unwrap_or(PipelineStage::NewLead);

    let mut form = LeadForm::create(initial_stage);
    form.lead.name = name;
    form.lead.company = company;
    form.lead.email = email;
    form.lead.phone = phone;
    form.lead.source = source;
    form.lead.notes = notes;
    if let Some(expr) = contacted {
        form.lead.last_contacted_ts = Some(parse_date_expr(&expr)?);
    }

    let stored = form.submit(store)?;

    // Form success contract: reload, never an optimistic insert
    let mut board = PipelineBoard::new();
    board.load(store);
    let in_stage = board
        .group_by_stage()
        .iter()
        .find(|c| c.stage == stored.stage)
        .map(|c| c.leads.len())
        .unwrap_or(0);
    println!(
        "Created lead {} '{}' in {} ({} in stage)",
        stored.id.unwrap_or(0),
        stored.name,
        stored.stage.display_name(),
        in_stage
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_edit(
    store: &SqliteLeadStore,
    id: &str,
    name: Option<String>,
    stage: Option<String>,
    company: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    source: Option<String>,
    notes: Option<String>,
    contacted: Option<String>,
) -> Result<()> {
    let id = parse_id_arg(id);
    let existing = match store.get_lead(id)? {
        Some(lead) => lead,
        None => user_error(&format!("No lead with ID {}", id)),
    };

    let mut form = LeadForm::edit(existing);
    if let Some(name) = name {
        form.lead.name = name;
    }
    if let Some(stage) = stage {
        form.lead.stage = parse_stage_arg(&stage);
    }
    if company.is_some() {
        form.lead.company = company;
    }
    if email.is_some() {
        form.lead.email = email;
    }
    if phone.is_some() {
        form.lead.phone = phone;
    }
    if source.is_some() {
        form.lead.source = source;
    }
    if notes.is_some() {
        form.lead.notes = notes;
    }
    if let Some(expr) = contacted {
        form.lead.last_contacted_ts = Some(parse_date_expr(&expr)?);
    }

    form.submit(store)?;

    let mut board = PipelineBoard::new();
    board.load(store);
    if let Some(lead) = board.find_lead(id) {
        println!(
            "Updated lead {} '{}' ({})",
            id,
            lead.name,
            lead.stage.display_name()
        );
    }
    Ok(())
}

fn handle_move(store: &SqliteLeadStore, id: &str, stage: &str, use_color: bool) -> Result<()> {
    let id = parse_id_arg(id);
    let target = parse_stage_arg(stage);
    let mut board = load_board(store, use_color);

    // Two-phase drop: optimistic apply, store call, then the completion
    // event that either confirms or rolls back
    match board.drop_lead(id, target) {
        DropOutcome::Pending(ticket) => {
            let result =
                store.update_lead_stage(ticket.lead_id, ticket.target, ticket.last_contacted_ts);
            let failed = result.is_err();
            board.resolve_drop(ticket, result);
            for notification in board.take_notifications() {
                print_notification(&notification, use_color);
            }
            if failed {
                std::process::exit(1);
            }
            Ok(())
        }
        DropOutcome::SameStage => {
            println!(
                "Lead {} is already in {}; nothing to do",
                id,
                target.display_name()
            );
            Ok(())
        }
        DropOutcome::NotFound => user_error(&format!("No lead with ID {}", id)),
        DropOutcome::Busy => user_error(&format!("Lead {} already has a move in progress", id)),
    }
}

fn handle_list(
    store: &SqliteLeadStore,
    stage: Option<String>,
    json: bool,
    use_color: bool,
) -> Result<()> {
    let stage_filter = stage.as_deref().map(parse_stage_arg);
    let board = load_board(store, use_color);

    let leads: Vec<_> = board
        .leads()
        .iter()
        .filter(|l| stage_filter.map_or(true, |s| l.stage == s))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&leads)?);
    } else if leads.is_empty() {
        println!("No leads found");
    } else {
        print!("{}", format_lead_list_table(&leads, use_color));
    }
    Ok(())
}

fn handle_show(store: &SqliteLeadStore, id: &str) -> Result<()> {
    let id = parse_id_arg(id);
    match store.get_lead(id)? {
        Some(lead) => {
            print!("{}", format_lead_summary(&lead));
            Ok(())
        }
        None => user_error(&format!("No lead with ID {}", id)),
    }
}
