//! Ratatui-based live debt clock.
//!
//! The TUI reads the files written by `dette update`, ticks the extrapolated
//! debt every 100 ms, and charts the debt-to-GDP history.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::cli::ClockArgs;
use crate::domain::{OutputDocument, RealtimeSnapshot, split_period};
use crate::error::AppError;
use crate::report::format_fr;

mod plotters_chart;

use plotters_chart::DebtHistoryChart;

/// Redraw period; fast enough for the euro counter to look continuous.
const TICK: Duration = Duration::from_millis(100);

/// Start the TUI.
pub fn run(args: ClockArgs) -> Result<(), AppError> {
    // Load before touching the terminal so file errors print normally.
    let mut app = App::new(args)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    output_dir: PathBuf,
    population: u64,
    snapshot: RealtimeSnapshot,
    document: Option<OutputDocument>,
    status: String,
}

impl App {
    fn new(args: ClockArgs) -> Result<Self, AppError> {
        let snapshot = crate::io::read_snapshot(&args.output_dir)?;
        // The clock works without the history; the chart just stays empty.
        let document = crate::io::read_document(&args.output_dir).ok();
        Ok(Self {
            output_dir: args.output_dir,
            population: args.population,
            snapshot,
            document,
            status: "Loaded.".to_string(),
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        loop {
            terminal
                .draw(|f| self.draw(f))
                .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;

            if !event::poll(TICK).map_err(|e| AppError::terminal(format!("Event poll error: {e}")))? {
                continue;
            }

            if let Event::Key(key) =
                event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))?
            {
                // Some terminals report releases and repeats too.
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('r') => self.reload(),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn reload(&mut self) {
        match crate::io::read_snapshot(&self.output_dir) {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.document = crate::io::read_document(&self.output_dir).ok();
                self.status = format!("Reloaded ({}).", self.snapshot.period);
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_clock(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_clock(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let now = chrono::Local::now().naive_local();
        let lines = match crate::clock::estimate(&self.snapshot, now, self.population) {
            Ok(est) => vec![
                Line::from(vec![
                    Span::styled("Dette publique", Style::default().fg(Color::Cyan)),
                    Span::raw(format!(" | base {} ({} Md€)", est.period, format_fr(est.billions(), 1))),
                ]),
                Line::from(Span::styled(
                    format!("{} €", format_fr(est.total, 0)),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("per inhabitant: {} €", format_fr(est.per_capita, 0))),
                Line::from(Span::styled(
                    format!(
                        "+{} €/s | +{} €/min | +{} €/h | +{} €/day",
                        format_fr(est.per_second, 0),
                        format_fr(est.per_minute, 0),
                        format_fr(est.per_hour, 0),
                        format_fr(est.per_day, 0),
                    ),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(Span::styled(
                    format!(
                        "growth: {} %/year | debt/GDP: {} %",
                        format_fr(self.snapshot.annual_growth_rate_pct, 2),
                        self.snapshot
                            .debt_to_gdp_pct
                            .map(|v| format_fr(v, 1))
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                    Style::default().fg(Color::Gray),
                )),
            ],
            Err(e) => vec![Line::from(Span::styled(e.to_string(), Style::default().fg(Color::Yellow)))],
        };

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Debt / GDP").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        // The canvas only paints the cells it touches; clear leftovers from
        // the previous frame first.
        frame.render_widget(Clear, inner);

        let Some((ratio, x_bounds, y_bounds)) = self.document.as_ref().and_then(chart_series) else {
            let msg = Paragraph::new("No history in dette_data.json.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let widget = DebtHistoryChart {
            ratio: &ratio,
            x_bounds,
            y_bounds,
            x_label: "year",
            y_label: "% of GDP",
            fmt_x: fmt_axis_year,
            fmt_y: fmt_axis_pct,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled("r reload  q quit", Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Debt-to-GDP points keyed by fractional year, plus padded bounds.
fn chart_series(document: &OutputDocument) -> Option<(Vec<(f64, f64)>, [f64; 2], [f64; 2])> {
    let points: Vec<(f64, f64)> = document
        .data
        .iter()
        .filter_map(|r| {
            let y = r.debt_to_gdp_pct.filter(|v| v.is_finite())?;
            let x = match split_period(&r.period) {
                (Some(year), Some(quarter)) => f64::from(year) + f64::from(quarter - 1) / 4.0,
                (Some(year), None) => f64::from(year),
                _ => return None,
            };
            Some((x, y))
        })
        .collect();

    let (first, last) = (points.first()?, points.last()?);
    // A single period would give an empty x range.
    let mut x_bounds = [first.0, last.0];
    if x_bounds[1] - x_bounds[0] < 1.0 {
        x_bounds = [x_bounds[0] - 0.5, x_bounds[1] + 0.5];
    }

    let y_min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let y_max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let pad = ((y_max - y_min) * 0.1).max(1.0);

    Some((points, x_bounds, [y_min - pad, y_max + pad]))
}

fn fmt_axis_year(v: f64) -> String {
    format!("{:.0}", v.floor())
}

fn fmt_axis_pct(v: f64) -> String {
    format!("{v:.0}")
}
