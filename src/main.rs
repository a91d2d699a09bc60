//! Pokedex explorer - paginated PokeAPI catalog browser

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pokedex_explorer::action::Action;
use pokedex_explorer::api;
use pokedex_explorer::audio;
use pokedex_explorer::components::{
    CatalogView, CatalogViewProps, Component, DetailView, DetailViewProps, PageJumpModal,
    PageJumpProps,
};
use pokedex_explorer::config::{Config, DEFAULT_BASE_URL};
use pokedex_explorer::effect::Effect;
use pokedex_explorer::logging;
use pokedex_explorer::reducer::reducer;
use pokedex_explorer::sprite;
use pokedex_explorer::state::{AppState, Screen};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

const TICK_MS: u64 = 120;

/// Browse the PokeAPI catalog page by page
#[derive(Parser, Debug)]
#[command(name = "pokedex-explorer")]
#[command(about = "Paginated PokeAPI catalog browser")]
struct Args {
    /// API base URL
    #[arg(long, env = "POKEAPI_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Page to open on start (1-based)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Open the detail screen for this identifier on start
    #[arg(long)]
    id: Option<String>,

    /// Write logs to this file (filter with POKEDEX_LOG or RUST_LOG)
    #[arg(long, env = "POKEDEX_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PokedexComponentId {
    List,
    Search,
    PageJump,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PokedexContext {
    List,
    Search,
    PageJump,
    Detail,
}

impl EventRoutingState<PokedexComponentId, PokedexContext> for AppState {
    fn focused(&self) -> Option<PokedexComponentId> {
        if self.screen == Screen::Detail {
            return Some(PokedexComponentId::Detail);
        }
        if self.page_jump.active {
            Some(PokedexComponentId::PageJump)
        } else if self.search.active {
            Some(PokedexComponentId::Search)
        } else {
            Some(PokedexComponentId::List)
        }
    }

    fn modal(&self) -> Option<PokedexComponentId> {
        if self.screen == Screen::Detail {
            None
        } else if self.page_jump.active {
            Some(PokedexComponentId::PageJump)
        } else if self.search.active {
            Some(PokedexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: PokedexComponentId) -> PokedexContext {
        match id {
            PokedexComponentId::List => PokedexContext::List,
            PokedexComponentId::Search => PokedexContext::Search,
            PokedexComponentId::PageJump => PokedexContext::PageJump,
            PokedexComponentId::Detail => PokedexContext::Detail,
        }
    }

    fn default_context(&self) -> PokedexContext {
        PokedexContext::List
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        base_url,
        page,
        id,
        log_file,
        debug: debug_args,
    } = Args::parse();

    let config = Config::new(&base_url, page, id, log_file);
    logging::init_logging(config.log_file.as_deref())?;
    tracing::info!(base_url = %config.base_url, page = config.initial_page, "starting");

    let debug = DebugSession::new(debug_args);

    let initial = AppState::new(&config);
    let state = debug
        .load_state_or_else_async(move || async move { Ok::<AppState, io::Error>(initial) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    tracing::info!("exiting");
    Ok(())
}

struct PokedexUi {
    catalog: CatalogView,
    page_jump: PageJumpModal,
    detail: DetailView,
}

impl PokedexUi {
    fn new() -> Self {
        Self {
            catalog: CatalogView::new(),
            page_jump: PageJumpModal::new(),
            detail: DetailView,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokedexComponentId>,
    ) {
        match state.screen {
            Screen::List => {
                event_ctx.component_areas.remove(&PokedexComponentId::Detail);
                let props = CatalogViewProps {
                    state,
                    is_focused: render_ctx.is_focused()
                        && !state.search.active
                        && !state.page_jump.active,
                };
                self.catalog.render(frame, area, props);
                let areas = self.catalog.areas();
                event_ctx.set_component_area(PokedexComponentId::List, areas.list);
                event_ctx.set_component_area(PokedexComponentId::Search, areas.search);

                self.page_jump.set_open(state.page_jump.active);
                if state.page_jump.active {
                    event_ctx.set_component_area(
                        PokedexComponentId::PageJump,
                        PageJumpModal::area(area),
                    );
                    let props = PageJumpProps {
                        input: &state.page_jump.input,
                        total_pages: state.catalog.total_pages(),
                        is_focused: render_ctx.is_focused(),
                    };
                    self.page_jump.render(frame, area, props);
                } else {
                    event_ctx
                        .component_areas
                        .remove(&PokedexComponentId::PageJump);
                }
            }
            Screen::Detail => {
                event_ctx.component_areas.remove(&PokedexComponentId::List);
                event_ctx.component_areas.remove(&PokedexComponentId::Search);
                event_ctx
                    .component_areas
                    .remove(&PokedexComponentId::PageJump);
                event_ctx.set_component_area(PokedexComponentId::Detail, area);
                let props = DetailViewProps {
                    state,
                    is_focused: render_ctx.is_focused(),
                };
                self.detail.render(frame, area, props);
            }
        }
    }

    fn handle_list_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = CatalogViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .catalog
            .handle_event(event, props)
            .into_iter()
            .collect();
        handler_response(actions)
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = self.catalog.handle_search_event(event, state);
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_page_jump_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.page_jump.set_open(state.page_jump.active);
        let props = PageJumpProps {
            input: &state.page_jump.input,
            total_pages: state.catalog.total_pages(),
            is_focused: true,
        };
        let actions: Vec<_> = self
            .page_jump
            .handle_event(event, props)
            .into_iter()
            .collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DetailViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.detail.handle_event(event, props).into_iter().collect();
        handler_response(actions)
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokedexUi::new()));
    let mut bus: EventBus<AppState, Action, PokedexComponentId, PokedexContext> = EventBus::new();
    let keybindings: Keybindings<PokedexContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(PokedexComponentId::List, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(PokedexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_page_jump = Rc::clone(&ui);
    bus.register(PokedexComponentId::PageJump, move |event, state| {
        ui_page_jump
            .borrow_mut()
            .handle_page_jump_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(PokedexComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key)
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            HandlerResponse::action(Action::Quit)
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(TICK_MS), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning keyed tasks; a new task replaces the
/// in-flight one with the same key.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadCatalogPage { page, url } => {
            ctx.tasks().spawn(TaskKey::new("catalog_page"), async move {
                match api::fetch_catalog_page(&url).await {
                    Ok(data) => Action::CatalogDidLoad { page, data },
                    Err(error) => {
                        tracing::warn!(page, %error, "catalog page failed");
                        Action::CatalogDidError {
                            page,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
        Effect::LoadEntry { id, url } => {
            ctx.tasks().spawn(TaskKey::new("entry_detail"), async move {
                match api::fetch_entry(&url).await {
                    Ok(entry) => Action::DetailDidLoad { id, entry },
                    Err(error) => {
                        tracing::warn!(%id, %error, "entry detail failed");
                        Action::DetailDidError {
                            id,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
        Effect::LoadSprite { url } => {
            ctx.tasks().spawn(TaskKey::new("sprite"), async move {
                let result = match api::fetch_bytes(&url).await {
                    Ok(bytes) => sprite::decode_sprite(&bytes),
                    Err(error) => Err(error.to_string()),
                };
                match result {
                    Ok(sprite) => Action::SpriteDidLoad { url, sprite },
                    Err(error) => {
                        tracing::warn!(%url, %error, "sprite failed");
                        Action::SpriteDidError { url, error }
                    }
                }
            });
        }
        Effect::PlayCry { url } => {
            ctx.tasks().spawn(TaskKey::new("cry"), async move {
                let bytes = match api::fetch_bytes(&url).await {
                    Ok(bytes) => bytes,
                    Err(error) => {
                        tracing::warn!(%url, %error, "cry download failed");
                        return Action::CryDidError(error.to_string());
                    }
                };
                match tokio::task::spawn_blocking(move || audio::play_cry(bytes)).await {
                    Ok(Ok(())) => Action::CryDidFinish,
                    Ok(Err(error)) => {
                        tracing::warn!(%error, "cry playback failed");
                        Action::CryDidError(error.to_string())
                    }
                    Err(error) => Action::CryDidError(error.to_string()),
                }
            });
        }
    }
}
