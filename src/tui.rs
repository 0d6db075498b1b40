//! Terminal charting engine.
//!
//! Mounted charts are stacked top to bottom in the order they were bound.
//! Line charts use the braille `Chart` widget, bar charts the `BarChart`
//! widget. Fill and tension have no terminal rendition.

use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{self, Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, GraphType, Paragraph},
    Frame, Terminal,
};
use std::{io, time::Duration};

use crate::chart::{ChartConfig, ChartKind, Rgba};
use crate::engine::{ChartEngine, ChartHandle, MountedChart, Mounts};
use crate::error::EngineError;
use crate::format::format_number;
use crate::page::Element;

const POLL_INTERVAL_MS: u64 = 250;

pub struct TerminalEngine {
    mounts: Mounts,
    created_at: DateTime<Local>,
}

impl Default for TerminalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalEngine {
    pub fn new() -> Self {
        Self {
            mounts: Mounts::default(),
            created_at: Local::now(),
        }
    }

    pub fn charts(&self) -> &[MountedChart] {
        self.mounts.charts()
    }

    pub fn draw(&self, f: &mut Frame) {
        let charts = self.mounts.charts();

        let mut constraints: Vec<Constraint> = charts
            .iter()
            .map(|_| Constraint::Ratio(1, charts.len() as u32))
            .collect();
        if charts.is_empty() {
            constraints.push(Constraint::Min(3));
        }
        constraints.push(Constraint::Length(1)); // footer

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(f.area());

        if charts.is_empty() {
            let empty = Paragraph::new("  No charts rendered")
                .block(Block::default().borders(Borders::ALL))
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(empty, chunks[0]);
        }

        for (chart, area) in charts.iter().zip(chunks.iter()) {
            match chart.config.kind {
                ChartKind::Line => render_line(f, &chart.config, *area),
                ChartKind::Bar => render_bars(f, &chart.config, *area),
            }
        }

        let footer = Paragraph::new(format!(
            "  Rendered {}  |  q/Esc to quit",
            self.created_at.format("%H:%M:%S")
        ))
        .style(Style::default().fg(Color::DarkGray));
        f.render_widget(footer, chunks[chunks.len() - 1]);
    }

    /// Takes over the terminal and shows the charts until `q` or `Esc`.
    pub fn show(&self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    fn run<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                    {
                        return Ok(());
                    }
                }
            }
        }
    }
}

impl ChartEngine for TerminalEngine {
    fn render(&mut self, config: ChartConfig, surface: &Element) -> Result<ChartHandle, EngineError> {
        self.mounts.mount(config, surface)
    }
}

fn color(rgba: Rgba) -> Color {
    Color::Rgb(rgba.r, rgba.g, rgba.b)
}

fn chart_block(config: &ChartConfig) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL);
    if config.options.plugins.title.display {
        block.title(format!(" {} ", config.title()))
    } else {
        block
    }
}

fn render_empty(f: &mut Frame, config: &ChartConfig, area: Rect) {
    let no_data = Paragraph::new("  No data available")
        .block(chart_block(config))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(no_data, area);
}

/// Y-axis range; padded by 2% of the larger of span and magnitude unless the axis starts at zero.
fn y_bounds(values: &[f64], begin_at_zero: bool) -> [f64; 2] {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let min = finite.clone().fold(f64::INFINITY, f64::min);
    let max = finite.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() {
        return [0.0, 1.0];
    }

    let (lo, hi) = if begin_at_zero {
        (min.min(0.0), max.max(0.0))
    } else {
        let pad = (max - min).abs().max(max.abs()) * 0.02;
        (min - pad, max + pad)
    };
    if lo < hi {
        [lo, hi]
    } else {
        [lo - 1.0, hi + 1.0]
    }
}

fn edge_labels(labels: &[String]) -> Vec<Span<'static>> {
    match labels {
        [] => Vec::new(),
        [only] => vec![Span::raw(only.clone())],
        [first, .., last] => vec![Span::raw(first.clone()), Span::raw(last.clone())],
    }
}

fn render_line(f: &mut Frame, config: &ChartConfig, area: Rect) {
    let Some(series) = config.series().filter(|s| !s.data.is_empty()) else {
        render_empty(f, config, area);
        return;
    };

    let points: Vec<(f64, f64)> = series
        .data
        .iter()
        .enumerate()
        .map(|(i, &p)| (i as f64, p))
        .collect();
    let [min_y, max_y] = y_bounds(&series.data, config.begins_at_zero());
    let max_x = (points.len() - 1).max(1) as f64;

    let datasets = vec![widgets::Dataset::default()
        .name(series.label.clone())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color(series.style.border_color)))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(chart_block(config))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_x])
                .labels(edge_labels(config.labels())),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([min_y, max_y])
                .labels(vec![
                    Span::raw(format!("{:.1}", min_y)),
                    Span::raw(format!("{:.1}", max_y)),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_bars(f: &mut Frame, config: &ChartConfig, area: Rect) {
    let Some(series) = config.series().filter(|s| !s.data.is_empty()) else {
        render_empty(f, config, area);
        return;
    };

    // Bars are at least one cell wide plus a gap; keep the most recent sessions that fit.
    let inner_width = area.width.saturating_sub(2).max(2) as usize;
    let visible = series.data.len().min(inner_width / 2);
    let skip = series.data.len() - visible;
    let bar_width = (inner_width / visible.max(1)).saturating_sub(1).clamp(1, 12) as u16;

    let bars: Vec<Bar> = series
        .data
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(i, &v)| {
            let label = config.labels().get(i).cloned().unwrap_or_default();
            Bar::default()
                .value(v.max(0.0).round() as u64)
                .text_value(format_number(v.round()))
                .label(Line::from(label))
        })
        .collect();

    let fill = color(series.style.background_color);
    let chart = BarChart::default()
        .block(chart_block(config))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(fill))
        .value_style(Style::default().fg(Color::Black).bg(fill).bold());

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_bounds_pad_around_data() {
        let [lo, hi] = y_bounds(&[100.0, 120.0], false);
        assert!((lo - 97.6).abs() < 1e-9);
        assert!((hi - 122.4).abs() < 1e-9);

        let [lo, hi] = y_bounds(&[-10.0, -5.0], false);
        assert!(lo < -10.0 && hi > -5.0);
        assert!((lo + 10.1).abs() < 1e-9);
        assert!((hi + 4.9).abs() < 1e-9);
    }

    #[test]
    fn zero_based_bounds_include_zero() {
        assert_eq!(y_bounds(&[100.0, 200.0], true), [0.0, 200.0]);
    }

    #[test]
    fn degenerate_bounds_are_widened() {
        assert_eq!(y_bounds(&[], false), [0.0, 1.0]);
        assert_eq!(y_bounds(&[f64::NAN], true), [0.0, 1.0]);
        assert_eq!(y_bounds(&[0.0, 0.0], true), [-1.0, 1.0]);
    }

    #[test]
    fn edge_labels_take_first_and_last() {
        let labels: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let spans = edge_labels(&labels);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "a");
        assert_eq!(spans[1].content, "c");
        assert!(edge_labels(&[]).is_empty());
    }
}
