use std::{io, time::Duration};

use anyhow::Result;
use chrono::{Duration as Days, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph},
};
use symptomlog_core::{
    group_by_symptom, SymptomFilter, SymptomLog, SymptomSeries, TimeSeriesBuilder, TimeSeriesPoint,
};
use tabled::settings::object::Rows;
use tabled::settings::{Color as TableColor, Modify, Style as TableStyle};
use tabled::{Table, Tabled};

use crate::catalog::SYMPTOM_CATALOG;
use crate::list::truncate;

const LINE_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Red,
    Color::Blue,
];
const MAX_SEVERITY: f64 = 10.0;

#[derive(Tabled)]
struct PointRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Symptom")]
    symptom: String,
    #[tabled(rename = "Count")]
    count: u32,
}

pub fn print_table(points: &[TimeSeriesPoint]) {
    if points.is_empty() {
        println!("No data available for the selected criteria.");
        return;
    }

    let rows: Vec<PointRow> = points
        .iter()
        .map(|p| PointRow {
            date: p.date.format("%Y-%m-%d").to_string(),
            symptom: truncate(&p.symptom, 50),
            count: p.count,
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(TableStyle::modern())
        .with(Modify::new(Rows::first()).with(TableColor::FG_CYAN));
    println!("{}", table);
}

pub fn print_json(points: &[TimeSeriesPoint]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(points)?);
    Ok(())
}

pub struct ChartApp<'a> {
    builder: TimeSeriesBuilder<'a>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub filter: SymptomFilter,
    pub series: Vec<SymptomSeries>,
}

impl<'a> ChartApp<'a> {
    pub fn new(log: &'a SymptomLog, start: NaiveDate, end: NaiveDate, filter: SymptomFilter) -> Self {
        let mut app = Self {
            builder: TimeSeriesBuilder::new(log),
            start,
            end,
            filter,
            series: Vec::new(),
        };
        app.refresh();
        app
    }

    fn refresh(&mut self) {
        let points = self.builder.build(self.start, self.end, &self.filter);
        self.series = group_by_symptom(&points);
    }

    /// Moves the whole window by `days`, keeping its length.
    pub fn shift(&mut self, days: i64) {
        let delta = Days::days(days);
        if let (Some(start), Some(end)) = (
            self.start.checked_add_signed(delta),
            self.end.checked_add_signed(delta),
        ) {
            self.start = start;
            self.end = end;
            self.refresh();
        }
    }

    /// Toggles the catalog symptom at `index` (0-based) in the filter.
    pub fn toggle_catalog(&mut self, index: usize) {
        if let Some(label) = SYMPTOM_CATALOG.get(index) {
            self.filter.toggle(label);
            self.refresh();
        }
    }

    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

pub fn run(app: &mut ChartApp) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut ChartApp) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Left | KeyCode::Char('h') => app.shift(-7),
                    KeyCode::Right | KeyCode::Char('l') => app.shift(7),
                    KeyCode::Char('0') => app.toggle_catalog(9),
                    KeyCode::Char(c @ '1'..='9') => app.toggle_catalog(c as usize - '1' as usize),
                    _ => {}
                }
            }
        }
    }
}

fn ui(frame: &mut Frame, app: &ChartApp) {
    let size = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(10),   // Chart
            Constraint::Length(1), // Footer
        ])
        .split(size);

    let header = Line::from(vec![
        Span::styled("SYMPTOM ANALYTICS  ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("{} .. {}", app.start.format("%Y-%m-%d"), app.end.format("%Y-%m-%d"))),
    ]);
    frame.render_widget(Paragraph::new(header), main_layout[0]);

    if app.series.is_empty() {
        frame.render_widget(
            Paragraph::new("No data available for the selected criteria")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded)),
            main_layout[1],
        );
    } else {
        draw_chart(frame, app, main_layout[1]);
    }

    let help = Line::from(vec![
        Span::styled("RANGE: ", Style::default().fg(Color::DarkGray)),
        Span::raw("←/→  "),
        Span::styled("SYMPTOM: ", Style::default().fg(Color::DarkGray)),
        Span::raw("1-9,0  "),
        Span::styled("QUIT: ", Style::default().fg(Color::DarkGray)),
        Span::raw("q"),
    ]);
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), main_layout[2]);
}

fn draw_chart(frame: &mut Frame, app: &ChartApp, area: Rect) {
    // x = days since range start, y = count
    let data: Vec<Vec<(f64, f64)>> = app
        .series
        .iter()
        .map(|s| {
            s.points
                .iter()
                .map(|(date, count)| ((*date - app.start).num_days() as f64, f64::from(*count)))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = app
        .series
        .iter()
        .zip(data.iter())
        .enumerate()
        .map(|(i, (s, points))| {
            Dataset::default()
                .name(truncate(&s.symptom, 30))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(LINE_COLORS[i % LINE_COLORS.len()]))
                .data(points)
        })
        .collect();

    let span = app.span_days().max(1) as f64;
    let mid = app.start + Days::days(app.span_days() / 2);
    let x_labels = vec![
        app.start.format("%m-%d").to_string(),
        mid.format("%m-%d").to_string(),
        app.end.format("%m-%d").to_string(),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Severity by day "),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, span])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Count")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, MAX_SEVERITY])
                .labels(vec!["0".to_string(), "5".to_string(), "10".to_string()]),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use symptomlog_core::SymptomEntry;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_toggle_catalog_rebuilds_series() {
        let mut log = SymptomLog::new();
        log.append(day(2024, 9, 2), SymptomEntry::new(SYMPTOM_CATALOG[6], 4));

        let mut app = ChartApp::new(&log, day(2024, 9, 1), day(2024, 9, 3), SymptomFilter::new());
        assert_eq!(app.series.len(), 1);
        assert_eq!(app.series[0].points, vec![(day(2024, 9, 2), 4)]);

        app.toggle_catalog(5);
        // only the fatigue line is selected now: zero-filled on every empty day
        assert_eq!(app.series.len(), 1);
        assert_eq!(app.series[0].symptom, SYMPTOM_CATALOG[5]);
        assert_eq!(app.series[0].points.len(), 2);

        app.toggle_catalog(5);
        assert!(app.filter.is_empty());
        app.toggle_catalog(42);
        assert!(app.filter.is_empty());
    }

    #[test]
    fn test_shift_keeps_window_length() {
        let log = SymptomLog::new();
        let mut app = ChartApp::new(&log, day(2024, 9, 1), day(2024, 9, 30), SymptomFilter::new());
        app.shift(-7);
        assert_eq!(app.start, day(2024, 8, 25));
        assert_eq!(app.end, day(2024, 9, 23));
        assert_eq!(app.span_days(), 29);
    }
}
