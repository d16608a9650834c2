//! Terminal entry point.
//!
//! A thin shell around the library: it parses the command line, installs
//! tracing, puts the terminal in raw mode and translates crossterm input into
//! controller events. All search behavior lives in [`hnsearch::app`]; this
//! file only decides which screen is on top and what to draw.
//!
//! # Screens
//!
//! Screens form a stack. Committing a search pushes a results listing, opening
//! a story pushes its thread, and `Esc` pops. Popping the last screen exits.
//!
//! # Keybindings
//!
//! Search box:
//! - type / `Backspace`: Edit the query
//! - `↑`/`↓`: Move through suggestions or history
//! - `Enter`: Open the highlighted candidate, or search for the typed text
//! - `Esc`: Dismiss suggestions
//! - `Tab`: Toggle focus
//! - mouse: Hover highlights, click opens
//!
//! Listings and threads:
//! - `↑`/`↓` (`j`/`k`): Select or scroll
//! - `PageUp`/`PageDown`: Scroll a page
//! - `Enter`: Open the selected story's comments
//! - `Esc`/`q`: Back
//!
//! Menu (`Ctrl+n`):
//! - `↑`/`↓` (`j`/`k`): Select a destination
//! - `0`-`9`: Jump straight to a destination
//! - `Enter`: Open it
//!
//! Everywhere: `Ctrl+n` opens the menu, `Ctrl+r` opens trending stories,
//! `Ctrl+t` toggles light/dark, `Ctrl+c` quits.

#![allow(clippy::multiple_crate_versions)]

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event as TermEvent, EventStream, KeyCode, KeyEvent,
    KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::{cursor, execute, queue, terminal};
use futures_util::future::BoxFuture;
use futures_util::StreamExt;
use tokio::sync::mpsc;

use hnsearch::ui::components::dropdown_hit_test;
use hnsearch::runtime::NavigationMenu;
use hnsearch::ui::{ListingViewModel, ThreadViewModel};
use hnsearch::{
    ChannelNavigator, Config, Event, FetchError, HnClient, Key, Route, SearchProvider,
    SearchRuntime, StoryHit,
};

#[derive(Debug, Parser)]
#[command(name = "hnsearch", version, about = "Search and browse Hacker News from the terminal")]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/hnsearch/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Built-in theme: hn-dark or hn-light
    #[arg(long, global = true)]
    theme: Option<String>,

    /// Custom TOML theme file
    #[arg(long, global = true)]
    theme_file: Option<PathBuf>,

    /// Quiescence delay before fetching suggestions
    #[arg(long, global = true)]
    debounce_ms: Option<u64>,

    /// Algolia HN API base URL
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Enable trace export with this filter (e.g. "debug")
    #[arg(long, global = true)]
    trace_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Search box with live suggestions (default)
    Interactive,
    /// Front page stories
    Top,
    /// Stories for a category keyword (ask, show, jobs, ...)
    Category { name: String },
    /// Search results for a keyword
    Search { keyword: String },
    /// A story and its comment thread
    Item { id: String },
}

impl Cli {
    fn into_config(self) -> hnsearch::Result<(Config, Command)> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_default()?,
        };

        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(theme_file) = self.theme_file {
            config.theme_file = Some(theme_file);
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
        if let Some(api_base_url) = self.api_base_url {
            config.api_base_url = api_base_url;
        }
        if let Some(trace_level) = self.trace_level {
            config.trace_level = Some(trace_level);
        }

        Ok((config, self.command.unwrap_or(Command::Interactive)))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("hnsearch: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> hnsearch::Result<()> {
    let (config, command) = cli.into_config()?;
    let _tracing = hnsearch::observability::init_tracing(&config);
    tracing::info!(?command, "starting hnsearch");

    let client = Arc::new(HnClient::new(config.api_base_url.clone(), config.request_timeout())?);
    let (navigator, routes) = ChannelNavigator::new();
    let provider: Arc<dyn SearchProvider> = client.clone();
    let runtime = SearchRuntime::new(hnsearch::initialize(&config), provider, Box::new(navigator));

    let mut app = App::new(runtime, client, routes);
    match command {
        Command::Interactive => {
            app.screens.push(Screen::Search);
            app.runtime.dispatch(Event::Focus);
        }
        Command::Top => app.open(Route::FrontPage),
        Command::Category { name } => app.open(Route::Category { name }),
        Command::Search { keyword } => app.open(Route::search(keyword)),
        Command::Item { id } => app.open(Route::Item { id }),
    }

    let _terminal = TerminalGuard::enter()?;
    app.run().await
}

/// Raw mode, alternate screen and mouse capture for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Async data for a screen.
enum Load<T> {
    Pending,
    Ready(T),
    Failed(String),
}

struct Listing {
    id: u64,
    title: String,
    hits: Load<Vec<StoryHit>>,
    selected: usize,
}

impl Listing {
    fn viewmodel(&self) -> ListingViewModel {
        match &self.hits {
            Load::Pending => ListingViewModel::loading(&self.title),
            Load::Failed(reason) => ListingViewModel::failed(&self.title, reason),
            Load::Ready(hits) => ListingViewModel::from_hits(&self.title, hits, Some(self.selected)),
        }
    }
}

struct Thread {
    id: u64,
    item: Load<ThreadViewModel>,
    scroll: usize,
    max_scroll: usize,
}

enum Screen {
    Search,
    Menu(NavigationMenu),
    Listing(Listing),
    Thread(Thread),
}

/// Completion of a listing or item fetch, addressed to the screen that asked.
enum Loaded {
    Listing {
        screen: u64,
        result: Result<Vec<StoryHit>, FetchError>,
    },
    Thread {
        screen: u64,
        result: hnsearch::Result<ThreadViewModel>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct App {
    runtime: SearchRuntime,
    client: Arc<HnClient>,
    routes: mpsc::UnboundedReceiver<Route>,
    loads_tx: mpsc::UnboundedSender<Loaded>,
    loads_rx: mpsc::UnboundedReceiver<Loaded>,
    screens: Vec<Screen>,
    next_screen_id: u64,
}

impl App {
    fn new(runtime: SearchRuntime, client: Arc<HnClient>, routes: mpsc::UnboundedReceiver<Route>) -> Self {
        let (loads_tx, loads_rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            client,
            routes,
            loads_tx,
            loads_rx,
            screens: Vec::new(),
            next_screen_id: 0,
        }
    }

    async fn run(&mut self) -> hnsearch::Result<()> {
        let mut events = EventStream::new();

        loop {
            self.draw()?;

            let flow = tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => self.on_terminal_event(&event),
                    Some(Err(e)) => return Err(e.into()),
                    None => Flow::Quit,
                },
                Some(_) = self.runtime.step() => Flow::Continue,
                Some(route) = self.routes.recv() => {
                    self.open(route);
                    Flow::Continue
                }
                Some(loaded) = self.loads_rx.recv() => {
                    self.apply(loaded);
                    Flow::Continue
                }
            };

            if flow == Flow::Quit || self.screens.is_empty() {
                tracing::info!("exiting");
                return Ok(());
            }
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let (cols, rows) = (usize::from(cols), usize::from(rows));
        let mut out = io::stdout();
        queue!(out, terminal::Clear(terminal::ClearType::All))?;

        let state = self.runtime.state();
        let theme = &state.theme;
        match self.screens.last_mut() {
            None | Some(Screen::Search) => hnsearch::ui::render(state, rows, cols),
            Some(Screen::Menu(menu)) => hnsearch::ui::render_menu(&menu.viewmodel(), theme, rows, cols),
            Some(Screen::Listing(listing)) => {
                hnsearch::ui::render_listing(&listing.viewmodel(), theme, rows, cols);
            }
            Some(Screen::Thread(thread)) => match &thread.item {
                Load::Ready(vm) => {
                    thread.max_scroll = hnsearch::ui::render_thread(vm, thread.scroll, theme, rows, cols);
                    thread.scroll = thread.scroll.min(thread.max_scroll);
                }
                Load::Pending => {
                    hnsearch::ui::render_listing(&ListingViewModel::loading("Item"), theme, rows, cols);
                }
                Load::Failed(reason) => {
                    hnsearch::ui::render_listing(&ListingViewModel::failed("Item", reason), theme, rows, cols);
                }
            },
        }

        out.flush()
    }

    fn on_terminal_event(&mut self, event: &TermEvent) -> Flow {
        match event {
            TermEvent::Key(key) if key.kind != KeyEventKind::Release => self.on_key(key),
            TermEvent::Mouse(mouse) => {
                self.on_mouse(mouse);
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn on_key(&mut self, key: &KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return Flow::Quit,
                KeyCode::Char('t') => {
                    self.runtime.dispatch(Event::ToggleTheme);
                }
                KeyCode::Char('n') if !matches!(self.screens.last(), Some(Screen::Menu(_))) => {
                    self.screens.push(Screen::Menu(NavigationMenu::default()));
                }
                KeyCode::Char('r') => self.open(Route::FrontPage),
                _ => {}
            }
            return Flow::Continue;
        }

        match self.screens.last_mut() {
            None => Flow::Quit,
            Some(Screen::Search) => {
                self.on_search_key(key);
                Flow::Continue
            }
            Some(Screen::Menu(menu)) => {
                match key.code {
                    KeyCode::Down | KeyCode::Char('j') => menu.move_down(),
                    KeyCode::Up | KeyCode::Char('k') => menu.move_up(),
                    KeyCode::Char(c @ '0'..='9') => {
                        menu.select(c as usize - '0' as usize);
                        let route = menu.route();
                        self.open(route);
                    }
                    KeyCode::Enter => {
                        let route = menu.route();
                        self.open(route);
                    }
                    KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => self.back(),
                    _ => {}
                }
                Flow::Continue
            }
            Some(Screen::Listing(listing)) => {
                let count = match &listing.hits {
                    Load::Ready(hits) => hits.len(),
                    _ => 0,
                };
                match key.code {
                    KeyCode::Down | KeyCode::Char('j') if count > 0 => {
                        listing.selected = (listing.selected + 1) % count;
                    }
                    KeyCode::Up | KeyCode::Char('k') if count > 0 => {
                        listing.selected = listing.selected.checked_sub(1).unwrap_or(count - 1);
                    }
                    KeyCode::Enter => {
                        if let Load::Ready(hits) = &listing.hits {
                            if let Some(hit) = hits.get(listing.selected) {
                                let id = hit.object_id.clone();
                                self.open(Route::Item { id });
                            }
                        }
                    }
                    KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => self.back(),
                    _ => {}
                }
                Flow::Continue
            }
            Some(Screen::Thread(thread)) => {
                let page = terminal::size().map_or(10, |(_, rows)| usize::from(rows).saturating_sub(6));
                match key.code {
                    KeyCode::Down | KeyCode::Char('j') => {
                        thread.scroll = (thread.scroll + 1).min(thread.max_scroll);
                    }
                    KeyCode::Up | KeyCode::Char('k') => thread.scroll = thread.scroll.saturating_sub(1),
                    KeyCode::PageDown | KeyCode::Char(' ') => {
                        thread.scroll = (thread.scroll + page).min(thread.max_scroll);
                    }
                    KeyCode::PageUp => thread.scroll = thread.scroll.saturating_sub(page),
                    KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => self.back(),
                    _ => {}
                }
                Flow::Continue
            }
        }
    }

    fn on_search_key(&mut self, key: &KeyEvent) {
        let event = match key.code {
            KeyCode::Char(c) => {
                if !self.runtime.state().is_focused {
                    self.runtime.dispatch(Event::Focus);
                }
                Event::Char(c)
            }
            KeyCode::Backspace => Event::Backspace,
            KeyCode::Tab => {
                if self.runtime.state().is_focused {
                    Event::Blur
                } else {
                    Event::Focus
                }
            }
            KeyCode::Down => Event::Key(Key::ArrowDown),
            KeyCode::Up => Event::Key(Key::ArrowUp),
            KeyCode::Esc => Event::Key(Key::Escape),
            KeyCode::Enter => Event::Key(Key::Enter),
            _ => Event::Key(Key::Other),
        };

        let transition = self.runtime.dispatch(event);

        // Unclaimed Enter submits the typed text, like a native form.
        if key.code == KeyCode::Enter && !transition.default_prevented {
            let query = self.runtime.state().query.trim().to_string();
            if !query.is_empty() {
                self.runtime.dispatch(Event::Commit(query));
            }
        }
    }

    fn on_mouse(&mut self, mouse: &MouseEvent) {
        if !matches!(self.screens.last(), Some(Screen::Search)) {
            return;
        }
        let Ok((cols, rows)) = terminal::size() else {
            return;
        };
        let vm = self
            .runtime
            .state()
            .compute_viewmodel(usize::from(rows), usize::from(cols));
        let Some(index) = dropdown_hit_test(
            &vm.dropdown,
            usize::from(mouse.row) + 1,
            usize::from(mouse.column) + 1,
            usize::from(cols),
        ) else {
            return;
        };

        match mouse.kind {
            MouseEventKind::Moved => {
                self.runtime.dispatch(Event::Hover(index));
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.runtime.dispatch(Event::Activate(index));
            }
            _ => {}
        }
    }

    fn back(&mut self) {
        self.screens.pop();
    }

    fn open(&mut self, route: Route) {
        let span = tracing::info_span!("open_route", route = %route);
        let _guard = span.enter();

        let client = Arc::clone(&self.client);
        match route {
            Route::Item { id } => self.open_thread(id),
            Route::FrontPage => {
                self.open_listing("Top Stories".to_string(), Box::pin(async move { client.front_page().await }));
            }
            Route::Category { name } => {
                let title = format!("Category: {name}");
                self.open_listing(title, Box::pin(async move { client.category(&name).await }));
            }
            Route::Search { keyword } => {
                let title = format!("Search: {keyword}");
                self.open_listing(title, Box::pin(async move { client.search_stories(&keyword).await }));
            }
        }
    }

    fn open_listing(&mut self, title: String, fetch: BoxFuture<'static, Result<Vec<StoryHit>, FetchError>>) {
        let screen = self.next_id();
        let tx = self.loads_tx.clone();
        tokio::spawn(async move {
            let result = fetch.await;
            let _ = tx.send(Loaded::Listing { screen, result });
        });

        self.screens.push(Screen::Listing(Listing {
            id: screen,
            title,
            hits: Load::Pending,
            selected: 0,
        }));
    }

    fn open_thread(&mut self, item_id: String) {
        let screen = self.next_id();
        let tx = self.loads_tx.clone();
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            let result = client
                .item(&item_id)
                .await
                .map(|item| ThreadViewModel::from_item(&item));
            let _ = tx.send(Loaded::Thread { screen, result });
        });

        self.screens.push(Screen::Thread(Thread {
            id: screen,
            item: Load::Pending,
            scroll: 0,
            max_scroll: 0,
        }));
    }

    /// Results for screens that were already closed are dropped.
    fn apply(&mut self, loaded: Loaded) {
        match loaded {
            Loaded::Listing { screen, result } => {
                let Some(listing) = self.screens.iter_mut().find_map(|s| match s {
                    Screen::Listing(l) if l.id == screen => Some(l),
                    _ => None,
                }) else {
                    return;
                };
                listing.hits = match result {
                    Ok(hits) => Load::Ready(hits),
                    Err(e) => {
                        tracing::warn!(error = %e, title = %listing.title, "listing fetch failed");
                        Load::Failed(e.to_string())
                    }
                };
            }
            Loaded::Thread { screen, result } => {
                let Some(thread) = self.screens.iter_mut().find_map(|s| match s {
                    Screen::Thread(t) if t.id == screen => Some(t),
                    _ => None,
                }) else {
                    return;
                };
                thread.item = match result {
                    Ok(vm) => Load::Ready(vm),
                    Err(e) => {
                        tracing::warn!(error = %e, "item fetch failed");
                        Load::Failed(e.to_string())
                    }
                };
            }
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_screen_id += 1;
        self.next_screen_id
    }
}
