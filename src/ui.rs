// 🖥️ Terminal Dashboard - login, competitor map, summary tables
//
// All browsing state lives in the library's Dashboard; this module only
// turns key presses into Dashboard calls and draws its projections.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use market_intel::{
    login, spawn_load, CategoryFilter, Dashboard, DashboardConfig, Dataset, LoadTicket,
    MapProjection, MapView, Marker, MarkerOrigin, RankTier, SummaryProjection, User,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap,
    },
    Frame, Terminal,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;
use tracing::debug;

const TICK: Duration = Duration::from_millis(200);

// Continental US, shown until the first fit
const DEFAULT_BOUNDS: (f64, f64, f64, f64) = (24.0, -125.0, 50.0, -66.0);

// ============================================================================
// PAGES & FOCUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Map,
    Summary,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Map => Page::Summary,
            Page::Summary => Page::Map,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Map => "Competitor Map",
            Page::Summary => "Summary",
        }
    }
}

/// Which map-page pane receives ↑/↓ and Enter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapPane {
    Categories,
    Markers,
    Removed,
}

impl MapPane {
    pub fn next(&self) -> Self {
        match self {
            MapPane::Categories => MapPane::Markers,
            MapPane::Markers => MapPane::Removed,
            MapPane::Removed => MapPane::Categories,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            MapPane::Categories => MapPane::Removed,
            MapPane::Markers => MapPane::Categories,
            MapPane::Removed => MapPane::Markers,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub field: LoginField,
    pub error: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        LoginForm {
            email: String::new(),
            password: String::new(),
            field: LoginField::Email,
            error: None,
        }
    }
}

impl LoginForm {
    fn active_mut(&mut self) -> &mut String {
        match self.field {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }
}

/// Search-and-add input; open while `Some` on the App
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    pub query: String,
    pub selected: usize,
}

// ============================================================================
// APP
// ============================================================================

pub struct App {
    pub config: DashboardConfig,
    pub dashboard: Dashboard,
    pub user: Option<User>,
    pub page: Page,
    pub login: LoginForm,
    pub focus: MapPane,
    pub category_state: ListState,
    pub marker_state: TableState,
    pub removed_state: ListState,
    pub summary_state: TableState,
    pub search: Option<SearchBox>,
    pub should_quit: bool,
    loads_tx: Sender<(LoadTicket, Dataset)>,
    loads_rx: Receiver<(LoadTicket, Dataset)>,
}

impl App {
    pub fn new(config: DashboardConfig) -> Self {
        let (loads_tx, loads_rx) = mpsc::channel();
        let mut category_state = ListState::default();
        category_state.select(Some(0));

        Self {
            dashboard: Dashboard::new(config.clone()),
            config,
            user: None,
            page: Page::Map,
            login: LoginForm::default(),
            focus: MapPane::Categories,
            category_state,
            marker_state: TableState::default(),
            removed_state: ListState::default(),
            summary_state: TableState::default(),
            search: None,
            should_quit: false,
            loads_tx,
            loads_rx,
        }
    }

    // ------------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------------

    pub fn submit_login(&mut self) {
        match login(&self.login.email, &self.login.password) {
            Ok(user) => {
                self.user = Some(user);
                self.login = LoginForm::default();
                self.start_session();
            }
            Err(e) => self.login.error = Some(e.to_string()),
        }
    }

    /// Fresh dashboard (empty overlay) plus a background data load
    fn start_session(&mut self) {
        // A new channel keeps results from the previous session out
        let (loads_tx, loads_rx) = mpsc::channel();
        self.loads_tx = loads_tx;
        self.loads_rx = loads_rx;

        self.dashboard = Dashboard::new(self.config.clone());
        self.page = Page::Map;
        self.focus = MapPane::Categories;
        self.search = None;
        self.category_state.select(Some(0));
        self.marker_state.select(None);
        self.removed_state.select(None);
        self.summary_state.select(None);
        self.reload();
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            debug!(user = %user.name, "analyst signed out");
        }
        self.login = LoginForm::default();
        self.search = None;
    }

    pub fn reload(&mut self) {
        let ticket = self.dashboard.begin_load();
        spawn_load(self.config.data_path.clone(), ticket, self.loads_tx.clone());
    }

    /// Apply any finished loads; stale ones are dropped by the dashboard
    pub fn poll_loads(&mut self) {
        while let Ok((ticket, dataset)) = self.loads_rx.try_recv() {
            if self.dashboard.finish_load(ticket, dataset) {
                self.sync_category_cursor();
            }
        }
    }

    // ------------------------------------------------------------------------
    // Category sidebar
    // ------------------------------------------------------------------------

    /// Sidebar entries: every category in priority order, then `all`
    pub fn filter_entries(&self) -> Vec<CategoryFilter> {
        let mut entries: Vec<CategoryFilter> = self
            .dashboard
            .available_filters()
            .into_iter()
            .map(CategoryFilter::Category)
            .collect();
        entries.push(CategoryFilter::All);
        entries
    }

    fn sync_category_cursor(&mut self) {
        let entries = self.filter_entries();
        let active = self.dashboard.active_filter();
        let position = active
            .and_then(|filter| entries.iter().position(|e| *e == filter))
            .unwrap_or(0);
        self.category_state.select(Some(position));
    }

    fn choose_category(&mut self) {
        let entries = self.filter_entries();
        if let Some(filter) = self.category_state.selected().and_then(|i| entries.get(i)) {
            self.dashboard.select_filter(filter.clone());
            self.marker_state.select(None);
        }
    }

    // ------------------------------------------------------------------------
    // Curation
    // ------------------------------------------------------------------------

    /// Rows of the marker table: home first, then every visible school
    fn listed_markers(&mut self) -> Vec<Marker> {
        self.dashboard
            .map_view()
            .map(|view| marker_rows(&view.projection).into_iter().cloned().collect())
            .unwrap_or_default()
    }

    fn removed_names(&self) -> Vec<String> {
        self.dashboard.overlay().removed().map(String::from).collect()
    }

    fn remove_selected_marker(&mut self) {
        let markers = self.listed_markers();
        let Some(marker) = self.marker_state.selected().and_then(|i| markers.get(i)) else {
            return;
        };

        if marker.is_removable() {
            self.dashboard.remove_school(&marker.name);
            let remaining = markers.len().saturating_sub(1);
            clamp_table(&mut self.marker_state, remaining);
        }
    }

    /// Search-and-add is offered only while a single category is shown
    pub fn can_add_schools(&self) -> bool {
        matches!(self.dashboard.active_filter(), Some(CategoryFilter::Category(_)))
    }

    fn restore_selected(&mut self) {
        let names = self.removed_names();
        if let Some(name) = self.removed_state.selected().and_then(|i| names.get(i)) {
            self.dashboard.restore_school(name);
            let remaining = names.len().saturating_sub(1);
            clamp_list(&mut self.removed_state, remaining);
        }
    }

    pub fn suggestions(&self) -> Vec<&'static str> {
        match &self.search {
            Some(search) => self.dashboard.suggestions(&search.query),
            None => Vec::new(),
        }
    }

    fn add_selected_suggestion(&mut self) {
        let suggestions = self.suggestions();
        let chosen = self
            .search
            .as_ref()
            .and_then(|search| suggestions.get(search.selected))
            .copied();

        if let Some(name) = chosen {
            self.dashboard.add_school(name);
            self.search = None;
        }
    }

    // ------------------------------------------------------------------------
    // Key handling
    // ------------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.user.is_none() {
            self.handle_login_key(key);
        } else if self.search.is_some() {
            self.handle_search_key(key);
        } else {
            self.handle_dashboard_key(key);
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => self.login.toggle_field(),
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => {
                self.login.active_mut().pop();
            }
            KeyCode::Char(c) => {
                self.login.active_mut().push(c);
                self.login.error = None;
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let count = self.suggestions().len();
        let Some(search) = self.search.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Esc => self.search = None,
            KeyCode::Enter => self.add_selected_suggestion(),
            KeyCode::Down if count > 0 => search.selected = (search.selected + 1) % count,
            KeyCode::Up if count > 0 => search.selected = (search.selected + count - 1) % count,
            KeyCode::Backspace => {
                search.query.pop();
                search.selected = 0;
            }
            KeyCode::Char(c) => {
                search.query.push(c);
                search.selected = 0;
            }
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.page = self.page.next(),
            KeyCode::Char('o') => self.logout(),
            KeyCode::Char('r') => self.reload(),
            _ if self.dashboard.is_loading() => {}
            _ => match self.page {
                Page::Map => self.handle_map_key(key),
                Page::Summary => self.handle_summary_key(key),
            },
        }
    }

    fn handle_map_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Right | KeyCode::Char('l') => self.focus = self.focus.next(),
            KeyCode::Left | KeyCode::Char('h') => self.focus = self.focus.previous(),
            KeyCode::Char('/') | KeyCode::Char('a') if self.can_add_schools() => {
                self.search = Some(SearchBox::default())
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Enter => match self.focus {
                MapPane::Categories => self.choose_category(),
                MapPane::Markers => {}
                MapPane::Removed => self.restore_selected(),
            },
            KeyCode::Char('d') | KeyCode::Delete if self.focus == MapPane::Markers => {
                self.remove_selected_marker()
            }
            _ => {}
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        let len = summary_row_count(self.dashboard.summary_view().as_ref());
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => step_table(&mut self.summary_state, len, 1),
            KeyCode::Up | KeyCode::Char('k') => step_table(&mut self.summary_state, len, -1),
            KeyCode::Home => self.summary_state.select(Some(0)),
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        match self.focus {
            MapPane::Categories => {
                let len = self.filter_entries().len();
                step_list(&mut self.category_state, len, delta);
            }
            MapPane::Markers => {
                let len = self.listed_markers().len();
                step_table(&mut self.marker_state, len, delta);
            }
            MapPane::Removed => {
                let len = self.dashboard.overlay().removed_count();
                step_list(&mut self.removed_state, len, delta);
            }
        }
    }
}

fn step_index(current: Option<usize>, len: usize, delta: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let i = match current {
        Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
        None => 0,
    };
    Some(i)
}

fn step_list(state: &mut ListState, len: usize, delta: isize) {
    state.select(step_index(state.selected(), len, delta));
}

fn step_table(state: &mut TableState, len: usize, delta: isize) {
    state.select(step_index(state.selected(), len, delta));
}

fn clamp_list(state: &mut ListState, len: usize) {
    state.select(state.selected().filter(|_| len > 0).map(|i| i.min(len - 1)));
}

fn clamp_table(state: &mut TableState, len: usize) {
    state.select(state.selected().filter(|_| len > 0).map(|i| i.min(len - 1)));
}

fn marker_rows(projection: &MapProjection) -> Vec<&Marker> {
    std::iter::once(&projection.home)
        .chain(projection.markers.iter())
        .collect()
}

fn summary_row_count(summary: Option<&SummaryProjection>) -> usize {
    summary
        .map(|s| s.tables.iter().map(|t| t.rows.len() + 1).sum())
        .unwrap_or(0)
}

// ============================================================================
// EVENT LOOP
// ============================================================================

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        app.poll_loads();
        terminal.draw(|f| ui(f, app))?;

        // Poll so finished loads show up without a key press
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn ui(f: &mut Frame, app: &mut App) {
    if app.user.is_none() {
        render_login(f, f.size(), app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.dashboard.is_loading() {
        let loading = Paragraph::new("Loading competitor data...")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(loading, chunks[1]);
    } else {
        match app.page {
            Page::Map => render_map_page(f, chunks[1], app),
            Page::Summary => render_summary_page(f, chunks[1], app),
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn render_login(f: &mut Frame, area: Rect, app: &App) {
    let field_style = |field: LoginField| {
        if app.login.field == field {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Market Intelligence - The University of Tulsa",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Email:    ", field_style(LoginField::Email)),
            Span::raw(app.login.email.clone()),
        ]),
        Line::from(vec![
            Span::styled("  Password: ", field_style(LoginField::Password)),
            Span::raw("*".repeat(app.login.password.chars().count())),
        ]),
        Line::from(""),
    ];

    if let Some(error) = &app.login.error {
        content.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(Color::Red),
        )));
        content.push(Line::from(""));
    }

    content.push(Line::from(Span::styled(
        "  Tab switch field | Enter sign in | Esc quit",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )));

    let form = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Sign In "),
    );

    f.render_widget(form, centered(area, 60, 14));
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in [Page::Map, Page::Summary].iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    if let Some(dataset) = app.dashboard.dataset() {
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            format!("{} competitors in {} categories", dataset.records.len(), dataset.categories.len()),
            Style::default().fg(Color::White),
        ));
    }

    if let Some(user) = &app.user {
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(format!("👤 {}", user.name), Style::default().fg(Color::Green)));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn pane_border(app: &App, pane: MapPane) -> Style {
    if app.focus == pane && app.search.is_none() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

fn render_map_page(f: &mut Frame, area: Rect, app: &mut App) {
    let Some(view) = app.dashboard.map_view() else {
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(32), // Category sidebar
            Constraint::Min(0),     // Map
            Constraint::Length(44), // Markers, removed, search
        ])
        .split(area);

    render_categories(f, columns[0], app);
    render_map(f, columns[1], &view);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(8),
            Constraint::Length(9),
        ])
        .split(columns[2]);

    render_markers(f, right[0], app, &view);
    render_removed(f, right[1], app);
    render_search(f, right[2], app);
}

fn render_categories(f: &mut Frame, area: Rect, app: &mut App) {
    let active = app.dashboard.active_filter();
    let ranking: Vec<(String, Option<f64>)> = app
        .dashboard
        .dataset()
        .map(|d| {
            d.categories
                .ranking
                .iter()
                .map(|r| (r.category.clone(), r.mean_similarity))
                .collect()
        })
        .unwrap_or_default();

    let items: Vec<ListItem> = app
        .filter_entries()
        .into_iter()
        .enumerate()
        .map(|(i, filter)| {
            let marker = if active.as_ref() == Some(&filter) { "● " } else { "  " };
            let label = match &filter {
                CategoryFilter::All => "All Categories".to_string(),
                CategoryFilter::Category(name) => {
                    let mean = ranking
                        .get(i)
                        .and_then(|(_, mean)| *mean)
                        .map(|m| format!(" ({:.2})", m))
                        .unwrap_or_default();
                    format!("{}. {}{}", i + 1, truncate(name, 20), mean)
                }
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Green)),
                Span::raw(label),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(pane_border(app, MapPane::Categories))
                .title(" Categories "),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut app.category_state);
}

fn render_map(f: &mut Frame, area: Rect, view: &MapView) {
    let (south, west, north, east) = match &view.viewport {
        Some(viewport) => (
            viewport.bounds.south,
            viewport.bounds.west,
            viewport.bounds.north,
            viewport.bounds.east,
        ),
        None => DEFAULT_BOUNDS,
    };

    let projection = &view.projection;
    let title = match &projection.description {
        Some(description) => format!(" {} - {} ", projection.filter, truncate(description, 50)),
        None => format!(" {} ", projection.filter),
    };

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .marker(symbols::Marker::Braille)
        .x_bounds([west, east])
        .y_bounds([south, north])
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();

            for marker in &projection.markers {
                ctx.print(
                    marker.longitude,
                    marker.latitude,
                    Span::styled("●", Style::default().fg(hex_color(marker.color))),
                );
            }

            let home = &projection.home;
            ctx.print(
                home.longitude,
                home.latitude,
                Span::styled(
                    "★",
                    Style::default().fg(hex_color(home.color)).add_modifier(Modifier::BOLD),
                ),
            );
        });

    f.render_widget(canvas, area);
}

fn render_markers(f: &mut Frame, area: Rect, app: &mut App, view: &MapView) {
    let header = Row::new(["School", "State"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().bg(Color::DarkGray))
    .height(1);

    let rows = marker_rows(&view.projection).into_iter().map(|marker| {
        let name = match marker.origin {
            MarkerOrigin::Home => format!("★ {}", truncate(&marker.name, 26)),
            MarkerOrigin::Added => format!("+ {}", truncate(&marker.name, 26)),
            MarkerOrigin::Dataset => truncate(&marker.name, 28),
        };
        let mut style = Style::default().fg(hex_color(marker.color));
        if !marker.is_removable() {
            style = style.add_modifier(Modifier::BOLD);
        }
        Row::new(vec![
            Cell::from(name).style(style),
            Cell::from(truncate(&marker.state, 12)),
        ])
    });

    let mut title = format!(" Schools ({}) ", view.projection.school_count());
    if !view.projection.unresolved.is_empty() {
        title = format!(
            " Schools ({}, {} not on map) ",
            view.projection.school_count(),
            view.projection.unresolved.len()
        );
    }

    let table = Table::new(rows, [Constraint::Length(30), Constraint::Length(12)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(pane_border(app, MapPane::Markers))
                .title(title),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.marker_state);
}

fn render_removed(f: &mut Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = app
        .removed_names()
        .into_iter()
        .map(|name| ListItem::new(Span::styled(truncate(&name, 38), Style::default().fg(Color::DarkGray))))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(pane_border(app, MapPane::Removed))
                .title(format!(" Removed ({}) ", app.dashboard.overlay().removed_count())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("↺ ");

    f.render_stateful_widget(list, area, &mut app.removed_state);
}

fn render_search(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if app.search.is_some() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        })
        .title(" Add School ");

    let Some(search) = &app.search else {
        let text = if app.can_add_schools() {
            "Press / to search the college list"
        } else {
            "Select a category to add schools"
        };
        let hint = Paragraph::new(Span::styled(
            text,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
        .block(block);
        f.render_widget(hint, area);
        return;
    };

    let suggestions = app.suggestions();
    let mut lines = vec![Line::from(vec![
        Span::styled("🔍 ", Style::default().fg(Color::Cyan)),
        Span::raw(search.query.clone()),
        Span::styled("▏", Style::default().fg(Color::Yellow)),
    ])];

    if suggestions.is_empty() && !search.query.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            "No matching colleges",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (i, name) in suggestions.iter().enumerate() {
        let style = if i == search.selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("  {}", name), style)));
    }

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn render_summary_page(f: &mut Frame, area: Rect, app: &mut App) {
    let Some(summary) = app.dashboard.summary_view() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let totals = Paragraph::new(Line::from(vec![
        Span::styled("  Categories: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(summary.total_categories.to_string()),
        Span::raw("    "),
        Span::styled("Competitors: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(summary.total_competitors.to_string()),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Competitive Landscape "));
    f.render_widget(totals, chunks[0]);

    let header = Row::new(
        ["Rank", "School", "State", "Type", "Religion", "Similarity", "Accept.", "Niche"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))),
    )
    .style(Style::default().bg(Color::DarkGray))
    .height(1);

    let mut rows = Vec::new();
    for table in &summary.tables {
        let mean = table
            .mean_similarity
            .map(|m| format!("avg {:.2}", m))
            .unwrap_or_default();
        rows.push(
            Row::new(vec![
                Cell::from(format!("#{}", table.priority)),
                Cell::from(truncate(&table.category, 34)),
                Cell::from(mean),
                Cell::from(format!("{} schools", table.rows.len())),
            ])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );

        for row in &table.rows {
            rows.push(Row::new(vec![
                Cell::from(row.rank.clone()).style(Style::default().fg(tier_color(row.rank_tier))),
                Cell::from(truncate(&row.school_name, 34)),
                Cell::from(row.state.clone()),
                Cell::from(row.institution_type.clone()),
                Cell::from(truncate(&row.religion, 16)),
                Cell::from(row.similarity.clone()),
                Cell::from(row.acceptance_rate.clone()),
                Cell::from(row.niche_grade.clone()),
            ]));
        }
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(36),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(18),
            Constraint::Length(11),
            Constraint::Length(8),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Competitors by Priority "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, chunks[1], &mut app.summary_state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let mut status_spans = vec![];
    if app.dashboard.reload_pending() {
        status_spans.push(Span::styled(" ⟳ loading ", Style::default().fg(Color::Cyan)));
        status_spans.push(Span::raw("| "));
    }

    if app.search.is_some() {
        status_spans.extend([
            key("↑/↓"),
            Span::raw(" Choose | "),
            key("Enter"),
            Span::raw(" Add | "),
            key("Esc"),
            Span::raw(" Cancel"),
        ]);
    } else {
        status_spans.extend([key("Tab"), Span::raw(" Page | ")]);
        if app.page == Page::Map {
            status_spans.extend([
                key("←/→"),
                Span::raw(" Pane | "),
                key("Enter"),
                Span::raw(" Select/Restore | "),
                key("d"),
                Span::raw(" Remove | "),
                key("/"),
                Span::raw(" Add | "),
            ]);
        }
        status_spans.extend([
            key("r"),
            Span::raw(" Reload | "),
            key("o"),
            Span::raw(" Logout | "),
            Span::styled("q", Style::default().fg(Color::Red)),
            Span::raw(" Quit"),
        ]);
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn hex_color(hex: &str) -> Color {
    hex.parse().unwrap_or(Color::White)
}

fn tier_color(tier: RankTier) -> Color {
    hex_color(tier.color())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// ============================================================================
// TESTS
// ============================================================================
