// Output formatting utilities

use crate::board::{Notification, Severity, StageColumn};
use crate::models::{Lead, PipelineStage};
use crate::utils::date::{format_date, format_relative_time};
use std::io::IsTerminal;

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";

const ANSI_FG_RED: &str = "\x1b[31m";
const ANSI_FG_GREEN: &str = "\x1b[32m";
const ANSI_FG_YELLOW: &str = "\x1b[33m";
const ANSI_FG_BLUE: &str = "\x1b[34m";
const ANSI_FG_MAGENTA: &str = "\x1b[35m";
const ANSI_FG_CYAN: &str = "\x1b[36m";
const ANSI_FG_BRIGHT_BLACK: &str = "\x1b[90m";

/// Fixed color per stage so columns are recognizable at a glance
fn stage_color(stage: PipelineStage) -> &'static str {
    match stage {
        PipelineStage::NewLead => ANSI_FG_CYAN,
        PipelineStage::Contacted => ANSI_FG_BLUE,
        PipelineStage::Qualified => ANSI_FG_MAGENTA,
        PipelineStage::ProposalSent => ANSI_FG_YELLOW,
        PipelineStage::Negotiation => ANSI_FG_YELLOW,
        PipelineStage::Won => ANSI_FG_GREEN,
        PipelineStage::Lost => ANSI_FG_RED,
    }
}

/// Whether stdout is a terminal (colors suppressed when piped)
pub fn stdout_is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Current terminal width, defaulting to 80 columns when undetectable
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max <= 1 {
        "…".to_string()
    } else {
        let cut: String = s.chars().take(max - 1).collect();
        format!("{}…", cut)
    }
}

/// Render the kanban board: one section per stage in funnel order, each
/// lead as a card line with id, label, and last-contact age. Empty stages
/// still render with a zero count.
pub fn format_board(columns: &[StageColumn<'_>], use_color: bool) -> String {
    let width = terminal_width().clamp(40, 120);
    let mut out = String::new();

    for column in columns {
        let header = format!(
            "{} ({})",
            column.stage.display_name(),
            column.leads.len()
        );
        if use_color {
            out.push_str(&format!(
                "{}{}{}{}\n",
                ANSI_BOLD,
                stage_color(column.stage),
                header,
                ANSI_RESET
            ));
        } else {
            out.push_str(&header);
            out.push('\n');
        }

        if column.leads.is_empty() {
            let empty = "  (empty)";
            if use_color {
                out.push_str(&format!("{}{}{}\n", ANSI_FG_BRIGHT_BLACK, empty, ANSI_RESET));
            } else {
                out.push_str(empty);
                out.push('\n');
            }
        }

        for lead in &column.leads {
            let id = lead.id.map(|i| i.to_string()).unwrap_or_else(|| "-".to_string());
            let contacted = lead
                .last_contacted_ts
                .map(format_relative_time)
                .unwrap_or_else(|| "never".to_string());
            let line = format!("  [{}] {}  · {}", id, lead.card_label(), contacted);
            out.push_str(&truncate(&line, width));
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

/// Render leads as a fixed-width table (the `list` command)
pub fn format_lead_list_table(leads: &[&Lead], use_color: bool) -> String {
    let mut out = String::new();

    let header = format!(
        "{:<5} {:<24} {:<18} {:<14} {:<10} {:<10}",
        "ID", "Name", "Company", "Stage", "Contact", "Created"
    );
    if use_color {
        out.push_str(&format!("{}{}{}\n", ANSI_BOLD, header, ANSI_RESET));
    } else {
        out.push_str(&header);
        out.push('\n');
    }

    for lead in leads {
        let id = lead.id.map(|i| i.to_string()).unwrap_or_else(|| "-".to_string());
        let company = lead.company.as_deref().unwrap_or("-");
        let contacted = lead
            .last_contacted_ts
            .map(format_relative_time)
            .unwrap_or_else(|| "never".to_string());
        let stage_name = lead.stage.display_name();

        let row = format!(
            "{:<5} {:<24} {:<18} {:<14} {:<10} {:<10}",
            id,
            truncate(&lead.name, 24),
            truncate(company, 18),
            stage_name,
            contacted,
            format_date(lead.created_ts),
        );
        if use_color {
            out.push_str(&format!(
                "{:<5} {:<24} {:<18} {}{:<14}{} {:<10} {:<10}\n",
                id,
                truncate(&lead.name, 24),
                truncate(company, 18),
                stage_color(lead.stage),
                stage_name,
                ANSI_RESET,
                contacted,
                format_date(lead.created_ts),
            ));
        } else {
            out.push_str(&row);
            out.push('\n');
        }
    }

    out
}

/// Render a detail card for one lead (the `show` command)
pub fn format_lead_summary(lead: &Lead) -> String {
    let mut out = String::new();
    let id = lead.id.map(|i| i.to_string()).unwrap_or_else(|| "-".to_string());

    out.push_str(&format!("Lead {}: {}\n", id, lead.name));
    out.push_str(&format!("  Stage:     {}\n", lead.stage.display_name()));
    if let Some(company) = &lead.company {
        out.push_str(&format!("  Company:   {}\n", company));
    }
    if let Some(email) = &lead.email {
        out.push_str(&format!("  Email:     {}\n", email));
    }
    if let Some(phone) = &lead.phone {
        out.push_str(&format!("  Phone:     {}\n", phone));
    }
    if let Some(source) = &lead.source {
        out.push_str(&format!("  Source:    {}\n", source));
    }
    out.push_str(&format!(
        "  Contacted: {}\n",
        lead.last_contacted_ts
            .map(|ts| format!("{} ({})", format_date(ts), format_relative_time(ts)))
            .unwrap_or_else(|| "never".to_string())
    ));
    out.push_str(&format!("  Created:   {}\n", format_date(lead.created_ts)));
    if let Some(notes) = &lead.notes {
        out.push_str(&format!("  Notes:     {}\n", notes));
    }

    out
}

/// Print a board notification: errors to stderr, the rest to stdout
pub fn print_notification(notification: &Notification, use_color: bool) {
    let color = match notification.severity {
        Severity::Success => ANSI_FG_GREEN,
        Severity::Error => ANSI_FG_RED,
        Severity::Info => ANSI_FG_BRIGHT_BLACK,
    };
    let line = format!("{}: {}", notification.title, notification.description);
    let rendered = if use_color {
        format!("{}{}{}", color, line, ANSI_RESET)
    } else {
        line
    };

    match notification.severity {
        Severity::Error => eprintln!("{}", rendered),
        _ => println!("{}", rendered),
    }
}
