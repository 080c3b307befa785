//! Ratatui-based chart window.
//!
//! Shows the plotted series with the duration/mode title, a cursor for
//! reading individual points, and keys to switch mode or refetch.

use std::io;
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
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tracing::debug;

use crate::app::pipeline::{Loader, RunOutput, run_with_series};
use crate::domain::{PlotConfig, chart_title};
use crate::error::AppError;
use crate::plot::{coordinates, index_bounds, value_bounds};
use crate::report::label_date;

mod plotters_chart;

use plotters_chart::SeriesChart;

/// Open the chart window and block until the user quits.
pub fn run(config: PlotConfig, loader: Loader, run: RunOutput) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::Terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config, loader, run);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::Terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::Terminal(format!("Failed to enter alternate screen: {e}")));
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
    config: PlotConfig,
    loader: Loader,
    run: RunOutput,
    cursor: usize,
    status: String,
}

impl App {
    fn new(config: PlotConfig, loader: Loader, run: RunOutput) -> Self {
        let cursor = run.points.len().saturating_sub(1);
        let status = format!("{} point(s)", run.points.len());
        Self {
            config,
            loader,
            run,
            cursor,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::Terminal(format!("Draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::Terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::Terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the window should close.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let last = self.run.points.len().saturating_sub(1);
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(last),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = last,
            KeyCode::Char('m') => self.toggle_mode(),
            KeyCode::Char('r') => self.refresh(),
            _ => {}
        }
        false
    }

    fn toggle_mode(&mut self) {
        let mut config = self.config.clone();
        config.mode = config.mode.toggled();
        match run_with_series(&config, self.run.series.clone()) {
            Ok(run) => {
                self.status = format!("mode: {}", config.mode.display_name());
                self.config = config;
                self.run = run;
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn refresh(&mut self) {
        debug!("refreshing series");
        let result = self
            .loader
            .load(&self.config)
            .and_then(|series| run_with_series(&self.config, series));
        match result {
            Ok(run) => {
                self.status = format!("Reloaded: {} point(s)", run.points.len());
                self.cursor = self.cursor.min(run.points.len().saturating_sub(1));
                self.run = run;
            }
            Err(err) => self.status = format!("Reload failed: {err}"),
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = chart_title(&self.config.window, self.config.mode);
        let lines: Vec<Line> = title
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Cyan))))
            .collect();

        let p = Paragraph::new(Text::from(lines)).block(
            Block::default()
                .title(format!("milk-stats: {}", self.config.source.display_name()))
                .borders(Borders::ALL),
        );
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title(self.cursor_line()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let points = coordinates(&self.run.points);
        let labels: Vec<String> = self.run.points.iter().map(|p| p.label.clone()).collect();
        let widget = SeriesChart {
            points: &points,
            labels: &labels,
            cursor: Some(self.cursor),
            x_bounds: index_bounds(points.len()),
            y_bounds: value_bounds(&self.run.points),
            y_label: self.config.mode.display_name(),
        };
        frame.render_widget(widget, inner);
    }

    fn cursor_line(&self) -> String {
        match self.run.points.get(self.cursor) {
            Some(p) => {
                let date = label_date(&p.label).unwrap_or_else(|| "-".to_string());
                format!(" {} ({date}): {} ", p.label, p.value)
            }
            None => " no data ".to_string(),
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ move  Home/End jump  m mode  r reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
