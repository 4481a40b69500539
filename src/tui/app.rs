//! Application state and event loop

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
    DefaultTerminal, Frame,
};

use crate::calendar::positioner::POPOVER_SIZE;
use crate::calendar::{
    build_grid, place_popover, place_tooltip, CalendarGrid, GridCell, GridSpan,
    InteractionState, OverlayHitArea, PointerEvent,
};
use crate::config::Config;
use crate::services::{CalendarLoader, CalendarQuery, HttpDayRecordStore};
use crate::types::{CalendarKind, Labels, Locale};

use super::layout::{
    placement_to_rect, position_to_point, rect_to_bounds, viewport_size, CalendarLayout,
};
use super::theme::Theme;
use super::widgets::{
    calendar::{grid_area, CalendarView, CALENDAR_HEIGHT},
    help::HelpPopup,
    legend::Legend,
    popover::{Popover, PopoverHit},
    spinner::Spinner,
    tooltip::{Tooltip, TOOLTIP_SIZE},
};

/// Years the calendar can navigate to
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Waiting for the current query, spinner animating
    Loading { spinner_frame: usize },
    /// Grid reflects the current query
    Ready,
}

/// Screen regions
struct Screen {
    header: Rect,
    calendar: Rect,
    legend: Rect,
    status: Rect,
}

impl Screen {
    fn split(area: Rect) -> Self {
        let [header, _, calendar, _, legend, _, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(CALENDAR_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);
        Self {
            header,
            calendar,
            legend,
            status,
        }
    }
}

/// Main application
pub struct App {
    state: AppState,
    should_quit: bool,
    today: NaiveDate,
    query: CalendarQuery,
    grid: CalendarGrid,
    interaction: InteractionState,
    loader: CalendarLoader,
    viewport: Rect,
    theme: Theme,
    locale: Locale,
    show_help: bool,
    status: Option<String>,
}

impl App {
    /// Create the app and start fetching `query`
    pub fn new(
        loader: CalendarLoader,
        query: CalendarQuery,
        today: NaiveDate,
        theme: Theme,
        locale: Locale,
    ) -> Self {
        let mut app = Self {
            state: AppState::Loading { spinner_frame: 0 },
            should_quit: false,
            today,
            query,
            grid: build_grid(&[], query.span),
            interaction: InteractionState::Idle,
            loader,
            viewport: Rect::default(),
            theme,
            locale,
            show_help: false,
            status: None,
        };
        app.change_query(query);
        app
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn query(&self) -> CalendarQuery {
        self.query
    }

    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    /// Last item destination the user picked
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Switch to a new kind/span: reset interaction, show an empty grid, fetch
    fn change_query(&mut self, query: CalendarQuery) {
        tracing::debug!(kind = query.kind.as_str(), span = %query.span.label(), "query changed");
        self.query = query;
        self.interaction = InteractionState::Idle;
        self.grid = build_grid(&[], query.span);
        self.state = AppState::Loading { spinner_frame: 0 };
        self.loader.request(query);
    }

    /// Apply a finished fetch, if one for the current query has arrived
    pub fn poll(&mut self) {
        let Some(outcome) = self.loader.poll() else {
            return;
        };
        if outcome.query != self.query {
            return;
        }
        // Same span, same shape: a hover over the empty grid stays valid
        self.grid = build_grid(&outcome.records, outcome.query.span);
        self.state = AppState::Ready;
    }

    /// Update spinner animation
    pub fn tick(&mut self) {
        if let AppState::Loading { spinner_frame } = self.state {
            self.state = AppState::Loading {
                spinner_frame: Spinner::next_frame(spinner_frame),
            };
        }
    }

    /// Handle keyboard and mouse events
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key.code),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        if self.show_help {
            match code {
                KeyCode::Char('?') | KeyCode::Esc => self.show_help = false,
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Esc => {
                self.interaction = self.interaction.apply(PointerEvent::Close, &self.grid);
            }
            KeyCode::Left => self.shift_year(-1),
            KeyCode::Right => self.shift_year(1),
            KeyCode::Char('p') => self.set_kind(CalendarKind::Post),
            KeyCode::Char('l') => self.set_kind(CalendarKind::Life),
            KeyCode::Char('a') => self.set_kind(CalendarKind::All),
            KeyCode::Char('t') => self.toggle_trailing(),
            _ => {}
        }
    }

    fn shift_year(&mut self, delta: i32) {
        let (year, trailing) = match self.query.span {
            GridSpan::Year(year) => (year, false),
            GridSpan::Trailing { end } => (end.year(), true),
        };
        let next = (year + delta).clamp(MIN_YEAR, MAX_YEAR);
        if next != year || trailing {
            self.change_query(CalendarQuery {
                span: GridSpan::Year(next),
                ..self.query
            });
        }
    }

    fn set_kind(&mut self, kind: CalendarKind) {
        if kind != self.query.kind {
            self.change_query(CalendarQuery { kind, ..self.query });
        }
    }

    fn toggle_trailing(&mut self) {
        let span = match self.query.span {
            GridSpan::Year(_) => GridSpan::Trailing { end: self.today },
            GridSpan::Trailing { .. } => GridSpan::Year(self.today.year()),
        };
        self.change_query(CalendarQuery { span, ..self.query });
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.show_help {
            return;
        }
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => {
                let target = self.calendar_layout().cell_at(position);
                self.interaction = self.interaction.hover_to(target, &self.grid);
            }
            MouseEventKind::Down(MouseButton::Left) => self.press(position),
            _ => {}
        }
    }

    /// Left press: popover contents first, then outside-click, then the grid
    fn press(&mut self, position: Position) {
        if let Some(popover) = self.popover() {
            match popover.hit(position) {
                Some(PopoverHit::Close) => {
                    self.interaction = self.interaction.apply(PointerEvent::Close, &self.grid);
                    return;
                }
                Some(PopoverHit::Item(url)) => {
                    tracing::info!(%url, "opening item");
                    self.status = Some(url);
                    self.interaction = self.interaction.apply(PointerEvent::Close, &self.grid);
                    return;
                }
                Some(PopoverHit::Inside) => return,
                None => {}
            }
            if let Some(area) = self.overlay_hit_area(&popover) {
                let point = position_to_point(position, self.viewport);
                self.interaction = self.interaction.press_outside(point, &area);
            }
        }

        if let Some(pos) = self.calendar_layout().cell_at(position) {
            self.interaction = self.interaction.apply(PointerEvent::Click(pos), &self.grid);
        }
    }

    fn calendar_layout(&self) -> CalendarLayout {
        let screen = Screen::split(self.viewport);
        CalendarLayout::new(grid_area(screen.calendar), self.grid.layout_columns())
    }

    /// Popover for the selected cell, placed against the viewport
    fn popover(&self) -> Option<Popover> {
        let pos = self.interaction.selected()?;
        let cell = self.grid.cell(pos)?;
        let record = cell.record.as_ref()?;
        let trigger = self.calendar_layout().cell_rect(pos)?;

        let placement = place_popover(
            rect_to_bounds(trigger, self.viewport),
            viewport_size(self.viewport),
        );
        let area = placement_to_rect(placement, POPOVER_SIZE, self.viewport);
        Some(Popover::new(
            area,
            cell.date?,
            record,
            self.query.kind,
            self.locale,
            self.theme,
        ))
    }

    fn overlay_hit_area(&self, popover: &Popover) -> Option<OverlayHitArea> {
        let trigger = self
            .calendar_layout()
            .cell_rect(self.interaction.selected()?)?;
        Some(OverlayHitArea {
            overlay: rect_to_bounds(popover.area(), self.viewport),
            trigger: rect_to_bounds(trigger, self.viewport),
        })
    }

    /// Tooltip area and cell for the hovered cell
    fn tooltip(&self) -> Option<(Rect, &GridCell)> {
        let pos = self.interaction.hovered()?;
        let cell = self.grid.cell(pos)?;
        let trigger = self.calendar_layout().cell_rect(pos)?;
        let placement = place_tooltip(
            rect_to_bounds(trigger, self.viewport),
            viewport_size(self.viewport),
        );
        Some((placement_to_rect(placement, TOOLTIP_SIZE, self.viewport), cell))
    }

    /// Draw the application
    pub fn draw(&mut self, frame: &mut Frame) {
        self.viewport = frame.area();
        frame.render_widget(&*self, frame.area());
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let [title, spinner] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(16)]).areas(area);
        let labels = self.locale.labels();
        let line = Line::from(vec![
            Span::styled(
                "contribcal",
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ·  ", Style::default().fg(self.theme.muted())),
            Span::styled(
                kind_label(self.query.kind, labels),
                Style::default().fg(self.theme.text()),
            ),
            Span::styled("  ·  ", Style::default().fg(self.theme.muted())),
            Span::styled(
                self.query.span.label(),
                Style::default().fg(self.theme.date()),
            ),
        ]);
        line.render(title, buf);

        if let AppState::Loading { spinner_frame } = self.state {
            Spinner::new(spinner_frame, labels.loading)
                .style(Style::default().fg(self.theme.accent()))
                .render(spinner, buf);
        }
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let line = match &self.status {
            Some(url) => Line::from(vec![
                Span::styled("→ ", Style::default().fg(self.theme.muted())),
                Span::styled(url.as_str(), Style::default().fg(self.theme.accent())),
            ]),
            None => Line::styled(
                "←/→ year  p/l/a kind  t last 365 days  ? help  q quit",
                Style::default().fg(self.theme.muted()),
            ),
        };
        line.render(area, buf);
    }
}

fn kind_label(kind: CalendarKind, labels: &Labels) -> String {
    match kind {
        CalendarKind::Post => labels.posts.to_string(),
        CalendarKind::Life => labels.life_records.to_string(),
        CalendarKind::All => format!("{} + {}", labels.posts, labels.life_records),
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let screen = Screen::split(area);
        let labels = self.locale.labels();

        self.render_header(screen.header, buf);
        CalendarView::new(
            &self.grid,
            self.calendar_layout(),
            self.query.kind,
            self.theme,
            labels,
        )
        .with_interaction(self.interaction)
        .render(screen.calendar, buf);
        Legend::new(self.query.kind, self.theme, labels).render(screen.legend, buf);
        self.render_status(screen.status, buf);

        // At most one of these exists at a time
        if let Some((tooltip_area, cell)) = self.tooltip() {
            Tooltip::new(cell, self.query.kind, self.theme, labels).render(tooltip_area, buf);
        }
        if let Some(popover) = self.popover() {
            popover.render(popover.area(), buf);
        }

        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }
}

/// Run the TUI application
pub fn run(config: Config, query: CalendarQuery, today: NaiveDate) -> anyhow::Result<()> {
    // Detect before raw mode
    let theme = Theme::detect();
    let store = HttpDayRecordStore::new(&config.api_url, config.request_timeout())?;
    let app = App::new(
        CalendarLoader::new(Arc::new(store)),
        query,
        today,
        theme,
        config.locale,
    );

    let mut terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture)
        .map_err(anyhow::Error::from)
        .and_then(|()| run_app(&mut terminal, app));
    if let Err(e) = execute!(stdout(), DisableMouseCapture) {
        tracing::warn!(error = %e, "failed to disable mouse capture");
    }
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, mut app: App) -> anyhow::Result<()> {
    loop {
        app.poll();
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        // Poll for events with 100ms timeout for spinner animation
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        } else {
            app.tick();
        }
    }

    Ok(())
}
