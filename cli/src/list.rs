use symptomlog_core::{BlobStore, SymptomStore};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SYMPTOM_COLUMN_WIDTH: usize = 40;
const NOTE_COLUMN_WIDTH: usize = 30;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Symptom")]
    symptom: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Still")]
    still: &'static str,
    #[tabled(rename = "Note")]
    note: String,
}

pub fn show_log<B: BlobStore>(store: &SymptomStore<B>) {
    if store.log().is_empty() {
        println!("No symptoms logged yet.");
        return;
    }

    let mut rows = Vec::new();
    for (day, entries) in store.days_newest_first() {
        let day_header = format!("{} ({})", day.format("%Y-%m-%d"), day.format("%a"));

        for (i, entry) in entries.iter().enumerate() {
            // Date column only on the first row of the day
            let date_col = if i == 0 { day_header.clone() } else { String::new() };

            rows.push(EntryRow {
                date: date_col,
                index: i + 1,
                symptom: truncate(&entry.symptom, SYMPTOM_COLUMN_WIDTH),
                severity: format!("{}/10", entry.severity),
                still: if entry.still_experiencing { "Yes" } else { "No" },
                note: truncate(&entry.note, NOTE_COLUMN_WIDTH),
            });
        }
    }

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    println!("{}", table);
    println!(
        "{} entries over {} days",
        store.log().entry_count(),
        store.log().day_count()
    );
}

/// Cuts `text` to at most `max` display columns, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
