//! Plain-text rendering for terminal hosts.

use std::fmt::Write;

use crate::pagination::PaginationControls;
use crate::screen::{CharacterRow, Screen};

const RULE: &str = "----------------------------------------";

pub fn render_text(screen: &Screen) -> String {
    let mut out = String::new();
    match screen {
        Screen::Loading => out.push_str("Loading characters...\n"),
        Screen::Error { message } => {
            let _ = writeln!(out, "Error: {message}");
            out.push_str("[r] Retry\n");
        }
        Screen::List {
            rows,
            pagination,
            warning,
        } => {
            if let Some(warning) = warning {
                let _ = writeln!(out, "! {warning}");
            }
            if rows.is_empty() {
                out.push_str("No characters on this page.\n");
            }
            for row in rows {
                write_row(&mut out, row);
            }
            out.push_str(RULE);
            out.push('\n');
            out.push_str(&pagination_bar(pagination));
            out.push('\n');
        }
    }
    out
}

fn write_row(out: &mut String, row: &CharacterRow) {
    let _ = writeln!(out, "#{:<4} {}", row.id, row.name);
    let _ = writeln!(out, "      {} - {}", row.status, row.species);
    if !row.image.is_empty() {
        let _ = writeln!(out, "      {}", row.image);
    }
}

/// `< Prev [p]   1 / 2   Next [n] >` with disabled controls blanked out.
pub fn pagination_bar(pagination: &PaginationControls) -> String {
    let prev = if pagination.has_prev {
        "< Prev [p]"
    } else {
        "          "
    };
    let next = if pagination.has_next {
        "Next [n] >"
    } else {
        "          "
    };
    format!("{prev}   {}   {next}", pagination.label())
        .trim_end()
        .to_string()
}
