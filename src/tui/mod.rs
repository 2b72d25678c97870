//! Ratatui-based terminal dashboard.
//!
//! Layout: a sidebar (navigation, dataset picker) and a content area showing
//! one of three pages: Home, Visualizations (demo chart) and Prediction (form).

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
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::pipeline::{PredictionOutput, run_prediction};
use crate::data::{DemoSeries, demo_series};
use crate::error::{AppError, EXIT_RUNTIME};
use crate::io::upload::{discover_csv_files, pretty_path, validate_csv_path};
use crate::models::Predictor;
use crate::report::{RESULT_NOTE, format_success};

mod form;
mod plotters_chart;

use form::{Field, FieldKind, FormState, parse_number};
use plotters_chart::DemoPlottersChart;

/// Start the TUI.
pub fn run(predictor: Predictor) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize terminal: {e}")))?;

    tracing::info!("dashboard started");
    let mut app = App::new(predictor);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                EXIT_RUNTIME,
                format!("Failed to enter alternate screen: {e}"),
            ));
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Home,
    Visualizations,
    Prediction,
}

impl Page {
    const ALL: [Page; 3] = [Page::Home, Page::Visualizations, Page::Prediction];

    fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Visualizations => "Visualizations",
            Page::Prediction => "Prediction",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Sidebar,
    Content,
}

/// Sidebar row index of the dataset picker (after the page entries).
const UPLOAD_ROW: usize = Page::ALL.len();

/// Form row index of the submit button (after the fields).
const SUBMIT_ROW: usize = Field::ALL.len();

#[derive(Debug, Default)]
struct UploadPicker {
    open: bool,
    candidates: Vec<PathBuf>,
    selected: usize,
    /// Chosen dataset. Recorded for display only.
    chosen: Option<PathBuf>,
}

struct App {
    predictor: Predictor,
    page: Page,
    focus: Focus,
    nav_index: usize,
    form: FormState,
    selected_field: usize,
    /// Text buffer while a number is being typed.
    editing: Option<String>,
    result: Option<Result<PredictionOutput, String>>,
    upload: UploadPicker,
    status: String,
    demo: DemoSeries,
}

impl App {
    fn new(predictor: Predictor) -> Self {
        Self {
            predictor,
            page: Page::Home,
            focus: Focus::Sidebar,
            nav_index: 0,
            form: FormState::default(),
            selected_field: 0,
            editing: None,
            result: None,
            upload: UploadPicker::default(),
            status: "Ready.".to_string(),
            demo: demo_series(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event read error: {e}")))? {
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
        tracing::info!("dashboard closed");
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing.is_some() {
            self.handle_number_edit(code);
            return false;
        }
        if self.upload.open {
            self.handle_picker(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Sidebar => Focus::Content,
                    Focus::Content => Focus::Sidebar,
                };
            }
            KeyCode::Char(c @ '1'..='3') => {
                let idx = (c as u8 - b'1') as usize;
                self.open_page(Page::ALL[idx]);
            }
            _ => match self.focus {
                Focus::Sidebar => self.handle_sidebar(code),
                Focus::Content => self.handle_content(code),
            },
        }
        false
    }

    fn open_page(&mut self, page: Page) {
        self.page = page;
        self.nav_index = Page::ALL.iter().position(|p| *p == page).unwrap_or(0);
        self.focus = Focus::Content;
        self.status = format!("page: {}", page.title());
    }

    fn handle_sidebar(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.nav_index = self.nav_index.saturating_sub(1),
            KeyCode::Down => self.nav_index = (self.nav_index + 1).min(UPLOAD_ROW),
            KeyCode::Enter => {
                if self.nav_index == UPLOAD_ROW {
                    self.open_picker();
                } else {
                    self.open_page(Page::ALL[self.nav_index]);
                }
            }
            _ => {}
        }
    }

    fn handle_content(&mut self, code: KeyCode) {
        if self.page != Page::Prediction {
            return;
        }

        match code {
            KeyCode::Up => self.selected_field = self.selected_field.saturating_sub(1),
            KeyCode::Down => self.selected_field = (self.selected_field + 1).min(SUBMIT_ROW),
            KeyCode::Left => self.adjust_selected(-1),
            KeyCode::Right => self.adjust_selected(1),
            KeyCode::Enter => match self.selected_field() {
                None => self.submit(),
                Some(field) if field.kind() == FieldKind::Select => self.form.adjust(field, 1),
                Some(field) => {
                    self.editing = Some(String::new());
                    self.status = format!(
                        "Editing {} (now {}). Enter to apply, Esc to cancel.",
                        field.label(),
                        self.form.display_value(field)
                    );
                }
            },
            KeyCode::Char('p') => self.submit(),
            KeyCode::Char('r') => {
                self.form = FormState::default();
                self.result = None;
                self.status = "Form reset.".to_string();
            }
            KeyCode::Char('d') => self.write_debug_bundle(),
            _ => {}
        }
    }

    fn selected_field(&self) -> Option<Field> {
        Field::ALL.get(self.selected_field).copied()
    }

    fn adjust_selected(&mut self, delta: i32) {
        if let Some(field) = self.selected_field() {
            self.form.adjust(field, delta);
        }
    }

    fn handle_number_edit(&mut self, code: KeyCode) {
        let Some(buffer) = self.editing.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                let input = buffer.clone();
                self.editing = None;
                let Some(field) = self.selected_field() else {
                    return;
                };
                if input.trim().is_empty() {
                    self.status = "Edit canceled.".to_string();
                    return;
                }
                match parse_number(&input) {
                    Some(v) => {
                        self.form.set_number(field, v);
                        self.status = format!("{}: {v}", field.label());
                    }
                    None => self.status = format!("Not a number: '{}'", input.trim()),
                }
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E') => {
                buffer.push(c);
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        match run_prediction(&self.form.to_raw_form(), &self.predictor) {
            Ok(output) => {
                self.status = format_success(output.value());
                self.result = Some(Ok(output));
            }
            Err(err) => {
                self.status = if err.is_input_error() {
                    "Input rejected; adjust the form and submit again.".to_string()
                } else {
                    "Prediction failed.".to_string()
                };
                self.result = Some(Err(err.to_string()));
            }
        }
    }

    fn write_debug_bundle(&mut self) {
        let Some(Ok(output)) = &self.result else {
            self.status = "Submit a prediction before writing a debug bundle.".to_string();
            return;
        };
        match crate::debug::write_debug_bundle(&output.request, &output.breakdown, self.predictor.artifacts()) {
            Ok(path) => self.status = format!("Wrote debug bundle: {}", path.display()),
            Err(err) => self.status = format!("Debug write failed: {err}"),
        }
    }

    fn open_picker(&mut self) {
        let candidates = discover_csv_files();
        if candidates.is_empty() {
            self.status = "No .csv files found under the current directory.".to_string();
            return;
        }
        self.upload.candidates = candidates;
        self.upload.selected = 0;
        self.upload.open = true;
        self.status = "Choose a dataset. Enter to select, Esc to cancel.".to_string();
    }

    fn handle_picker(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.upload.open = false;
                self.status = "Upload canceled.".to_string();
            }
            KeyCode::Up => self.upload.selected = self.upload.selected.saturating_sub(1),
            KeyCode::Down => {
                let last = self.upload.candidates.len().saturating_sub(1);
                self.upload.selected = (self.upload.selected + 1).min(last);
            }
            KeyCode::Enter => {
                self.upload.open = false;
                let Some(candidate) = self.upload.candidates.get(self.upload.selected) else {
                    return;
                };
                match validate_csv_path(candidate) {
                    Ok(path) => {
                        tracing::info!(path = %path.display(), "dataset selected");
                        self.status = format!("Dataset selected: {}", pretty_path(&path));
                        self.upload.chosen = Some(path);
                    }
                    Err(err) => self.status = err.to_string(),
                }
            }
            _ => {}
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(0)])
            .split(rows[0]);

        self.draw_sidebar(frame, cols[0]);
        match self.page {
            Page::Home => self.draw_home(frame, cols[1]),
            Page::Visualizations => self.draw_visualizations(frame, cols[1]),
            Page::Prediction => self.draw_prediction(frame, cols[1]),
        }
        self.draw_footer(frame, rows[1]);

        if self.upload.open {
            self.draw_picker(frame, cols[1]);
        }
    }

    fn focus_border(&self, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    }

    fn draw_sidebar(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Prediction App")
            .borders(Borders::ALL)
            .border_style(self.focus_border(Focus::Sidebar));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let mut items: Vec<ListItem> = Page::ALL
            .iter()
            .map(|p| {
                let style = if *p == self.page {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(p.title()).style(style)
            })
            .collect();
        items.push(ListItem::new("Upload dataset…"));

        let list = List::new(items)
            .block(Block::default().title("Navigation"))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        let mut state = ListState::default();
        if self.focus == Focus::Sidebar {
            state.select(Some(self.nav_index));
        }
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let chosen = self
            .upload
            .chosen
            .as_deref()
            .map(pretty_path)
            .unwrap_or_else(|| "(none)".to_string());
        let upload = Paragraph::new(vec![
            Line::from(Span::styled("Upload your dataset:", Style::default().fg(Color::Gray))),
            Line::from(chosen),
            Line::from(Span::styled(
                "not used for predictions",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::TOP));
        frame.render_widget(upload, chunks[1]);

        let built = Paragraph::new("Built with ratatui").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(built, chunks[3]);
    }

    fn content_block(&self, title: &'static str) -> Block<'static> {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.focus_border(Focus::Content))
    }

    fn draw_home(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let text = Text::from(vec![
            Line::from(Span::styled(
                "Supply Chain Emissions Prediction",
                bold.fg(Color::Green),
            )),
            Line::from(""),
            Line::from("Welcome to the Greenhouse Gas Emission Prediction dashboard."),
            Line::from(vec![
                Span::raw("This tool estimates "),
                Span::styled("Supply Chain Emission Factors with Margins", bold),
            ]),
            Line::from("using a trained regression model and real-world parameters."),
            Line::from(""),
            Line::from(Span::styled("What you can do:", bold)),
            Line::from("  - Predict emissions for a product or industry (3)"),
            Line::from("  - Visualize data relationships (2)"),
            Line::from("  - Learn how data quality affects emissions"),
        ]);
        let p = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(self.content_block("Home"));
        frame.render_widget(p, area);
    }

    fn draw_visualizations(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = self.content_block("Visualizations & Correlations");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0), Constraint::Length(2)])
            .split(inner);

        let intro = Paragraph::new(vec![
            Line::from("How Supply Chain Emission Factors relate to margins and data quality."),
            Line::from(Span::styled(
                "(Example demo data)",
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        frame.render_widget(intro, chunks[0]);

        let chart_block = Block::default().title("Predicted Emission vs. Margin").borders(Borders::ALL);
        let chart_inner = chart_block.inner(chunks[1]);
        frame.render_widget(chart_block, chunks[1]);
        frame.render_widget(Clear, chart_inner);

        let (chart_rect, insets) = chart_layout(chart_inner);
        let widget = DemoPlottersChart {
            points: &self.demo.points,
            trend: &self.demo.trend,
            x_bounds: self.demo.x_bounds,
            y_bounds: self.demo.y_bounds,
            dq_bounds: self.demo.dq_bounds,
            x_label: "Margin",
            y_label: "PredictedEmission",
        };
        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(
                frame,
                chart_inner,
                chart_rect,
                insets,
                self.demo.x_bounds,
                self.demo.y_bounds,
                ("Margin", "Emission"),
            );
        }

        let legend = Paragraph::new(vec![
            Line::from(format!(
                "colour/size: DQ Reliability ({:.2} red .. {:.2} green) | cyan: trend",
                self.demo.dq_bounds[0], self.demo.dq_bounds[1]
            )),
            Line::from("Use real data to explore deeper insights!"),
        ])
        .style(Style::default().fg(Color::Gray));
        frame.render_widget(legend, chunks[2]);
    }

    fn draw_prediction(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = self.content_block("Predict Supply Chain Emission Factor");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SUBMIT_ROW as u16 + 1),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        let mut items: Vec<ListItem> = Field::ALL
            .iter()
            .enumerate()
            .map(|(idx, &field)| {
                let value = match &self.editing {
                    Some(buffer) if idx == self.selected_field => format!("{buffer}_"),
                    _ => self.form.display_value(field),
                };
                let hint = match field.kind() {
                    FieldKind::Select => "◂▸",
                    FieldKind::Number => "0..",
                    FieldKind::Slider => "0..1",
                };
                ListItem::new(format!("{:<46} {:<34} {hint}", field.label(), value))
            })
            .collect();
        items.push(ListItem::new(Span::styled(
            "[ Predict ]",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));

        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        let mut state = ListState::default();
        if self.focus == Focus::Content {
            state.select(Some(self.selected_field));
        }
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let help = match self.selected_field() {
            Some(field) => field.help(),
            None => "Run the model on the values above (Enter or p).",
        };
        let help = Paragraph::new(Line::from(Span::styled(
            help,
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )))
        .block(Block::default().borders(Borders::TOP));
        frame.render_widget(help, chunks[1]);

        let result = Paragraph::new(self.result_text())
            .wrap(Wrap { trim: false })
            .block(Block::default().title("Result").borders(Borders::TOP));
        frame.render_widget(result, chunks[2]);
    }

    fn result_text(&self) -> Text<'static> {
        match &self.result {
            None => Text::from(Span::styled(
                "No prediction yet.",
                Style::default().fg(Color::DarkGray),
            )),
            Some(Err(message)) => Text::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            )),
            Some(Ok(output)) => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        format_success(output.value()),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "What this means:",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(RESULT_NOTE),
                    Line::from(""),
                    Line::from("Largest contributions:"),
                ];
                for (name, contrib) in top_contributions(output, 3) {
                    lines.push(Line::from(format!("  {contrib:>+10.4}  {name}")));
                }
                Text::from(lines)
            }
        }
    }

    fn draw_picker(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rect = centered_rect(area, 70, 60);
        frame.render_widget(Clear, rect);

        let items: Vec<ListItem> = self
            .upload
            .candidates
            .iter()
            .map(|p| ListItem::new(pretty_path(p)))
            .collect();
        let list = List::new(items)
            .block(Block::default().title("Drag & drop… or pick a .csv").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        let mut state = ListState::default();
        state.select(Some(self.upload.selected));
        frame.render_stateful_widget(list, rect, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match (self.focus, self.page) {
            (Focus::Content, Page::Prediction) => {
                "↑/↓ field  ←/→ adjust  Enter edit/submit  p predict  r reset  d debug  Tab sidebar  q quit"
            }
            _ => "↑/↓ select  Enter open  1/2/3 pages  Tab focus  q quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Features with the largest absolute contribution, biggest first.
fn top_contributions(output: &PredictionOutput, n: usize) -> Vec<(&'static str, f64)> {
    let mut pairs: Vec<(&'static str, f64)> = output
        .breakdown
        .features
        .names()
        .iter()
        .copied()
        .zip(output.breakdown.contributions.iter().copied())
        .collect();
    pairs.sort_by(|a, b| b.1.abs().partial_cmp(&a.1.abs()).unwrap_or(std::cmp::Ordering::Equal));
    pairs.truncate(n);
    pairs
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y.min(100)) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    (x_title, y_title): (&str, &str),
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = format!("{x_val:.2}");
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        let width = label.len() as u16;
        frame.render_widget(Paragraph::new(label).style(style), Rect { x: start, y, width, height: 1 });
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = format!("{y_val:.2}");
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        let width = label.len() as u16;
        frame.render_widget(Paragraph::new(label).style(style), Rect { x: start, y, width, height: 1 });
    }

    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        let x_label = Paragraph::new(x_title.to_string())
            .alignment(Alignment::Center)
            .style(style);
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(y_title.to_string()).style(style.add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::backend::TestBackend;

    use super::*;
    use crate::models::predictor::tests::test_artifacts;

    fn app() -> App {
        App::new(Predictor::new(Arc::new(test_artifacts())).unwrap())
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for &k in keys {
            app.handle_key(k);
        }
    }

    #[test]
    fn number_keys_switch_pages() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3')]);
        assert_eq!(app.page, Page::Prediction);
        assert_eq!(app.focus, Focus::Content);
        press(&mut app, &[KeyCode::Char('2')]);
        assert_eq!(app.page, Page::Visualizations);
    }

    #[test]
    fn sidebar_navigation_opens_selected_page() {
        let mut app = app();
        press(&mut app, &[KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        assert_eq!(app.page, Page::Prediction);
    }

    #[test]
    fn submit_shows_success_message() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3'), KeyCode::Char('p')]);
        let Some(Ok(output)) = &app.result else {
            panic!("expected a prediction, got {:?}", app.result.as_ref().map(|r| r.is_ok()));
        };
        assert_eq!(app.status, format_success(output.value()));
    }

    #[test]
    fn typed_number_is_applied_and_validated_on_submit() {
        let mut app = app();
        // Move to "Margin" (row 4) and type -1.
        press(
            &mut app,
            &[
                KeyCode::Char('3'),
                KeyCode::Down,
                KeyCode::Down,
                KeyCode::Down,
                KeyCode::Down,
                KeyCode::Enter,
            ],
        );
        assert_eq!(app.editing.as_deref(), Some(""));
        press(&mut app, &[KeyCode::Char('-'), KeyCode::Char('1'), KeyCode::Enter]);
        assert_eq!(app.form.margin, -1.0);

        press(&mut app, &[KeyCode::Char('p')]);
        match &app.result {
            Some(Err(message)) => assert!(message.contains("margin"), "{message}"),
            other => panic!("expected validation error, got ok={:?}", other.as_ref().map(|r| r.is_ok())),
        }
    }

    #[test]
    fn typing_replaces_the_current_value() {
        let mut app = app();
        app.form.margin = 0.2;
        let margin_row = Field::ALL.iter().position(|f| *f == Field::Margin).unwrap();
        press(&mut app, &[KeyCode::Char('3')]);
        for _ in 0..margin_row {
            press(&mut app, &[KeyCode::Down]);
        }
        press(
            &mut app,
            &[KeyCode::Enter, KeyCode::Char('1'), KeyCode::Char('.'), KeyCode::Char('5'), KeyCode::Enter],
        );
        assert_eq!(app.form.margin, 1.5);

        // An empty entry keeps the old value.
        press(&mut app, &[KeyCode::Enter, KeyCode::Enter]);
        assert_eq!(app.form.margin, 1.5);
        assert!(app.editing.is_none());
    }

    #[test]
    fn quit_is_ignored_while_typing() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3'), KeyCode::Down, KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        assert!(!app.handle_key(KeyCode::Char('q')));
        press(&mut app, &[KeyCode::Esc]);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn debug_bundle_requires_a_result() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3'), KeyCode::Char('d')]);
        assert!(app.status.starts_with("Submit a prediction"));
    }

    #[test]
    fn home_and_prediction_pages_render() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        press(&mut app, &[KeyCode::Char('3'), KeyCode::Char('p')]);
        terminal.draw(|f| app.draw(f)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Predicted Supply Chain Emission Factor with Margin"));
    }

    #[test]
    fn centered_rect_stays_inside() {
        let outer = Rect::new(10, 5, 100, 40);
        let r = centered_rect(outer, 70, 60);
        assert!(r.x >= outer.x && r.right() <= outer.right());
        assert!(r.y >= outer.y && r.bottom() <= outer.bottom());

        let wide = centered_rect(Rect::new(0, 0, 1000, 40), 70, 60);
        assert_eq!((wide.x, wide.width), (150, 700));
        assert_eq!((wide.y, wide.height), (8, 24));
    }
}
