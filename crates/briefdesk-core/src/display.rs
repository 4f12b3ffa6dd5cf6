//! Plain-text rendering of API records for the terminal.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use comfy_table::Table;

use crate::models::{Briefing, Client, Group, Meeting, Note};

enum Parsed {
    DateTime(NaiveDateTime),
    Date(NaiveDate),
}

/// Accepts RFC 3339, naive ISO datetimes (as the API emits them) and bare dates.
fn parse_timestamp(raw: &str) -> Option<Parsed> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Parsed::DateTime(dt.naive_local()));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Parsed::DateTime(dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(Parsed::DateTime(dt));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(Parsed::Date)
}

/// `YYYY-MM-DD`, or the input unchanged if it is not a recognizable timestamp.
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(Parsed::DateTime(dt)) => dt.format("%Y-%m-%d").to_string(),
        Some(Parsed::Date(d)) => d.format("%Y-%m-%d").to_string(),
        None => raw.to_string(),
    }
}

/// `YYYY-MM-DD HH:MM` (dates without a time stay `YYYY-MM-DD`).
pub fn format_datetime(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(Parsed::DateTime(dt)) => dt.format("%Y-%m-%d %H:%M").to_string(),
        Some(Parsed::Date(d)) => d.format("%Y-%m-%d").to_string(),
        None => raw.to_string(),
    }
}

pub fn notes_table(notes: &[Note]) -> Table {
    let mut table = Table::new();
    table.set_header(["ID", "Client", "Meeting date", "Content"]);
    for note in notes {
        table.add_row([
            note.id.clone(),
            note.client_name.clone(),
            format_date(&note.meeting_date),
            first_line(&note.content, 60),
        ]);
    }
    table
}

pub fn clients_table(clients: &[Client]) -> Table {
    let mut table = Table::new();
    table.set_header(["ID", "Name", "Description"]);
    for client in clients {
        table.add_row([
            client.id.clone(),
            client.name.clone(),
            first_line(&client.description, 60),
        ]);
    }
    table
}

pub fn groups_table(groups: &[Group]) -> Table {
    let mut table = Table::new();
    table.set_header(["ID", "Name", "Description"]);
    for group in groups {
        table.add_row([
            group.id.clone(),
            group.name.clone(),
            group.description.clone().unwrap_or_default(),
        ]);
    }
    table
}

pub fn briefings_table(briefings: &[&Briefing]) -> Table {
    let mut table = Table::new();
    table.set_header(["ID", "Client", "Meeting date", "Generated on"]);
    for briefing in briefings {
        table.add_row([
            briefing.id.clone(),
            briefing.client_name.clone(),
            format_date(&briefing.meeting_date),
            briefing
                .created_at
                .as_deref()
                .map(format_date)
                .unwrap_or_default(),
        ]);
    }
    table
}

pub fn meetings_table(meetings: &[Meeting]) -> Table {
    let mut table = Table::new();
    table.set_header(["Summary", "Starts", "Link"]);
    for meeting in meetings {
        table.add_row([
            meeting.summary.clone(),
            meeting.start_time().map(format_datetime).unwrap_or_default(),
            meeting.html_link.clone().unwrap_or_default(),
        ]);
    }
    table
}

pub fn render_note(note: &Note) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", note.client_name);
    let _ = writeln!(out, "Meeting on {}", format_date(&note.meeting_date));
    let _ = writeln!(out, "ID: {}", note.id);
    out.push('\n');
    out.push_str(note.content.trim_end());
    out.push('\n');
    out
}

pub fn render_client(client: &Client) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", client.name);
    let _ = writeln!(out, "ID: {}", client.id);
    if !client.description.is_empty() {
        let _ = writeln!(out, "\n{}", client.description.trim_end());
    }
    if let Some(notes) = client.meeting_notes.as_deref().filter(|n| !n.trim().is_empty()) {
        let _ = writeln!(out, "\nMeeting notes:\n{}", notes.trim_end());
    }
    out
}

/// Detail view: summary, gaps, research and suggested questions.
pub fn render_briefing(briefing: &Briefing) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", briefing.client_name);
    let _ = writeln!(out, "Meeting on {}", format_date(&briefing.meeting_date));

    let _ = writeln!(out, "\nSummary\n{}", briefing.summary.trim_end());

    out.push_str("\nIdentified Gaps\n");
    push_bullets(&mut out, &briefing.gaps);

    out.push_str("\nExternal Research\n");
    if briefing.external_research.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in &briefing.external_research {
        let _ = writeln!(out, "  - {}", item.title);
        if !item.link.is_empty() {
            let _ = writeln!(out, "    {}", item.link);
        }
        if !item.snippet.is_empty() {
            let _ = writeln!(out, "    {}", item.snippet);
        }
    }

    out.push_str("\nSuggested Talking Points & Questions\n");
    push_bullets(&mut out, &briefing.suggested_questions);
    out
}

fn push_bullets(out: &mut String, items: &[String]) {
    if items.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

/// First line of `text`, cut to `max` characters with an ellipsis.
fn first_line(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() <= max {
        return line.to_string();
    }
    let cut: String = line.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}
