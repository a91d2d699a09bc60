//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::catalog::{self, PageNav};
use crate::effect::Effect;
use crate::state::{AppState, DetailState, Screen};

const DEFAULT_SPRITE_KEY: &str = "front_default";

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            let mut effects = vec![load_page(state)];
            if let Some(effect) = load_detail(state) {
                effects.push(effect);
            }
            DispatchResult::changed_with_many(effects)
        }

        // ===== Catalog =====
        Action::CatalogFetch => DispatchResult::changed_with(load_page(state)),

        Action::CatalogDidLoad { page, data } => {
            if page != state.catalog.page {
                return DispatchResult::unchanged();
            }
            state.catalog.entries = data.results;
            state.catalog.total_count = data.count;
            state.catalog.loading = false;
            state.catalog.selected = 0;
            state.message = None;
            state.rebuild_filtered();
            let last = state.catalog.total_pages();
            if last > 0 && state.catalog.page > last {
                // Requested page is past the end; fall back to the last one
                state.catalog.page = last;
                return DispatchResult::changed_with(load_page(state));
            }
            DispatchResult::changed()
        }

        Action::CatalogDidError { page, error } => {
            if page != state.catalog.page {
                return DispatchResult::unchanged();
            }
            state.catalog.entries.clear();
            state.catalog.total_count = 0;
            state.catalog.loading = false;
            state.catalog.selected = 0;
            if state.screen == Screen::List {
                state.message = Some(format!("Failed to load page {page}: {error}"));
            }
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::CatalogSelect(index) => {
            if state.catalog.set_selected(index) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Pagination =====
        Action::PageFirst => go_to_page(state, PageNav::First),
        Action::PagePrev => go_to_page(state, PageNav::Prev),
        Action::PageNext => go_to_page(state, PageNav::Next),
        Action::PageLast => go_to_page(state, PageNav::Last),

        Action::PageJumpOpen => {
            if state.page_jump.active {
                return DispatchResult::unchanged();
            }
            state.page_jump.active = true;
            state.page_jump.input.clear();
            DispatchResult::changed()
        }

        Action::PageJumpClose => {
            if !state.page_jump.active {
                return DispatchResult::unchanged();
            }
            state.page_jump.active = false;
            state.page_jump.input.clear();
            state.message = None;
            DispatchResult::changed()
        }

        Action::PageJumpInput(input) => {
            if !state.page_jump.active {
                return DispatchResult::unchanged();
            }
            state.page_jump.input = input.chars().filter(char::is_ascii_digit).collect();
            DispatchResult::changed()
        }

        Action::PageJumpSubmit(input) => {
            let total = state.catalog.total_pages();
            match input.trim().parse::<u32>() {
                Ok(page) if (1..=total).contains(&page) => {
                    state.page_jump.active = false;
                    state.page_jump.input.clear();
                    state.message = None;
                    let result = go_to_page(state, PageNav::Jump(page));
                    if result.changed {
                        result
                    } else {
                        DispatchResult::changed()
                    }
                }
                _ => {
                    state.message = Some(if total == 0 {
                        "No pages loaded".to_string()
                    } else {
                        format!("Page must be between 1 and {total}")
                    });
                    DispatchResult::changed()
                }
            }
        }

        // ===== Search =====
        Action::SearchStart => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            if query == state.search.query {
                return DispatchResult::unchanged();
            }
            state.search.query = query;
            state.catalog.selected = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchSubmit(query) => {
            state.search.active = false;
            if query != state.search.query {
                state.search.query = query;
                state.catalog.selected = 0;
                state.rebuild_filtered();
            }
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        // ===== Detail =====
        Action::DetailOpen(id) => {
            let id = id.trim().to_string();
            if id.is_empty() {
                return DispatchResult::unchanged();
            }
            state.screen = Screen::Detail;
            state.search.active = false;
            state.detail = DetailState::loading(id);
            match load_detail(state) {
                Some(effect) => DispatchResult::changed_with(effect),
                None => DispatchResult::changed(),
            }
        }

        Action::DetailClose => {
            if state.screen == Screen::List {
                return DispatchResult::unchanged();
            }
            state.screen = Screen::List;
            state.detail = DetailState::default();
            state.message = None;
            DispatchResult::changed()
        }

        Action::DetailFetch => {
            let Some(id) = state.detail.id.clone() else {
                return DispatchResult::unchanged();
            };
            state.detail = DetailState::loading(id);
            match load_detail(state) {
                Some(effect) => DispatchResult::changed_with(effect),
                None => DispatchResult::changed(),
            }
        }

        Action::DetailDidLoad { id, entry } => {
            if state.detail.id.as_deref() != Some(id.as_str()) {
                return DispatchResult::unchanged();
            }
            state.detail.sprite_index = entry.sprite_position(DEFAULT_SPRITE_KEY).unwrap_or(0);
            state.detail.moves_scroll = 0;
            state.detail.entry = DataResource::Loaded(entry);
            match load_sprite(state) {
                Some(effect) => DispatchResult::changed_with(effect),
                None => DispatchResult::changed(),
            }
        }

        Action::DetailDidError { id, error } => {
            if state.detail.id.as_deref() != Some(id.as_str()) {
                return DispatchResult::unchanged();
            }
            state.message = Some(format!("Failed to load {id}: {error}"));
            state.detail.entry = DataResource::Failed(error);
            DispatchResult::changed()
        }

        // ===== Sprites =====
        Action::SpriteNext => cycle_sprite(state, 1),
        Action::SpritePrev => cycle_sprite(state, -1),

        Action::SpriteDidLoad { url, sprite } => {
            if state.detail.sprite_url.as_deref() != Some(url.as_str()) {
                return DispatchResult::unchanged();
            }
            state.detail.sprite = DataResource::Loaded(sprite);
            DispatchResult::changed()
        }

        Action::SpriteDidError { url, error } => {
            if state.detail.sprite_url.as_deref() != Some(url.as_str()) {
                return DispatchResult::unchanged();
            }
            state.detail.sprite = DataResource::Failed(error);
            DispatchResult::changed()
        }

        // ===== Moves =====
        Action::MovesScroll(delta) => {
            let Some(entry) = state.detail.entry.data() else {
                return DispatchResult::unchanged();
            };
            let max = entry.level_up_moves().len().saturating_sub(1) as i32;
            let next = (i32::from(state.detail.moves_scroll) + i32::from(delta)).clamp(0, max);
            let next = next as u16;
            if next == state.detail.moves_scroll {
                return DispatchResult::unchanged();
            }
            state.detail.moves_scroll = next;
            DispatchResult::changed()
        }

        // ===== Cry =====
        Action::CryPlay => {
            if state.detail.cry_playing {
                return DispatchResult::unchanged();
            }
            let Some(entry) = state.detail.entry.data() else {
                return DispatchResult::unchanged();
            };
            match entry.cry_url.clone() {
                Some(url) => {
                    state.detail.cry_playing = true;
                    DispatchResult::changed_with(Effect::PlayCry { url })
                }
                None => {
                    state.message = Some("No cry available".to_string());
                    DispatchResult::changed()
                }
            }
        }

        Action::CryDidFinish => {
            if !state.detail.cry_playing {
                return DispatchResult::unchanged();
            }
            state.detail.cry_playing = false;
            DispatchResult::changed()
        }

        Action::CryDidError(error) => {
            state.detail.cry_playing = false;
            state.message = Some(format!("Cry error: {error}"));
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.is_loading() || state.detail.cry_playing {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn load_page(state: &mut AppState) -> Effect {
    state.catalog.loading = true;
    let page = state.catalog.page;
    Effect::LoadCatalogPage {
        page,
        url: catalog::page_url(&state.api_base, page),
    }
}

fn load_detail(state: &mut AppState) -> Option<Effect> {
    let id = state.detail.id.clone()?;
    state.detail.entry = DataResource::Loading;
    Some(Effect::LoadEntry {
        url: catalog::entry_url(&state.api_base, &id),
        id,
    })
}

fn load_sprite(state: &mut AppState) -> Option<Effect> {
    match state.detail.current_sprite().map(|variant| variant.url.clone()) {
        Some(url) => {
            state.detail.sprite_url = Some(url.clone());
            state.detail.sprite = DataResource::Loading;
            Some(Effect::LoadSprite { url })
        }
        None => {
            state.detail.sprite_url = None;
            state.detail.sprite = DataResource::Empty;
            None
        }
    }
}

fn go_to_page(state: &mut AppState, nav: PageNav) -> DispatchResult<Effect> {
    let Some(target) = catalog::navigate(state.catalog.page, state.catalog.total_pages(), nav)
    else {
        return DispatchResult::unchanged();
    };
    state.catalog.page = target;
    state.catalog.selected = 0;
    DispatchResult::changed_with(load_page(state))
}

fn cycle_sprite(state: &mut AppState, delta: isize) -> DispatchResult<Effect> {
    let count = state
        .detail
        .entry
        .data()
        .map_or(0, |entry| entry.sprites.len());
    if count <= 1 {
        return DispatchResult::unchanged();
    }
    let index = state.detail.sprite_index as isize + delta;
    state.detail.sprite_index = index.rem_euclid(count as isize) as usize;
    match load_sprite(state) {
        Some(effect) => DispatchResult::changed_with(effect),
        None => DispatchResult::changed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sprite::SpriteData;
    use crate::state::{CatalogEntry, CatalogPage, EntryDetail, SpriteVariant, StatValue};
    use pretty_assertions::assert_eq;

    fn entries(names: &[&str]) -> Vec<CatalogEntry> {
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| CatalogEntry {
                name: name.to_string(),
                url: format!("https://pokeapi.co/api/v2/pokemon/{}/", idx + 1),
            })
            .collect()
    }

    fn loaded(names: &[&str], count: u64) -> AppState {
        let mut state = AppState::default();
        reducer(
            &mut state,
            Action::CatalogDidLoad {
                page: 1,
                data: CatalogPage {
                    results: entries(names),
                    count,
                },
            },
        );
        state
    }

    fn detail(id: u32) -> EntryDetail {
        EntryDetail {
            id,
            name: "pikachu".into(),
            height: 4,
            weight: 60,
            base_experience: Some(112),
            order: 35,
            is_default: true,
            species: Some("pikachu".into()),
            types: vec!["electric".into()],
            stats: vec![StatValue {
                name: "hp".into(),
                base_stat: 35,
                effort: 0,
            }],
            abilities: Vec::new(),
            sprites: vec![
                SpriteVariant {
                    key: "back_default".into(),
                    url: "https://img/back.png".into(),
                },
                SpriteVariant {
                    key: "front_default".into(),
                    url: "https://img/front.png".into(),
                },
            ],
            moves: Vec::new(),
            held_items: Vec::new(),
            past_types: Vec::new(),
            past_abilities: Vec::new(),
            cry_url: Some("https://cry/25.ogg".into()),
        }
    }

    #[test]
    fn test_init_loads_first_page() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::Init);

        assert!(result.changed);
        assert!(state.catalog.loading);
        assert_eq!(
            result.effects,
            vec![Effect::LoadCatalogPage {
                page: 1,
                url: "https://pokeapi.co/api/v2/pokemon/?limit=50&offset=0".into(),
            }]
        );
    }

    #[test]
    fn test_init_with_id_also_loads_detail() {
        let config = Config::new("http://localhost:8000/api/v2", 3, Some("25".into()), None);
        let mut state = AppState::new(&config);
        let result = reducer(&mut state, Action::Init);

        assert_eq!(result.effects.len(), 2);
        assert_eq!(
            result.effects[1],
            Effect::LoadEntry {
                id: "25".into(),
                url: "http://localhost:8000/api/v2/pokemon/25".into(),
            }
        );
        assert!(matches!(
            &result.effects[0],
            Effect::LoadCatalogPage { page: 3, url } if url.ends_with("offset=100")
        ));
    }

    #[test]
    fn test_catalog_load_replaces_results() {
        let mut state = loaded(&["bulbasaur", "ivysaur"], 1302);
        assert_eq!(state.catalog.total_pages(), 27);
        assert_eq!(state.catalog.filtered, vec![0, 1]);

        reducer(
            &mut state,
            Action::CatalogDidLoad {
                page: 1,
                data: CatalogPage {
                    results: entries(&["venusaur"]),
                    count: 1302,
                },
            },
        );
        assert_eq!(state.catalog.entries.len(), 1);
        assert_eq!(state.catalog.entries[0].name, "venusaur");
    }

    #[test]
    fn test_catalog_error_resets_results() {
        let mut state = loaded(&["bulbasaur"], 1302);
        state.catalog.loading = true;

        let result = reducer(
            &mut state,
            Action::CatalogDidError {
                page: 1,
                error: "HTTP 500".into(),
            },
        );

        assert!(result.changed);
        assert!(state.catalog.entries.is_empty());
        assert!(state.catalog.filtered.is_empty());
        assert_eq!(state.catalog.total_count, 0);
        assert_eq!(state.catalog.total_pages(), 0);
        assert!(!state.catalog.loading);
        assert!(state.message.as_deref().unwrap().contains("HTTP 500"));
    }

    #[test]
    fn test_stale_page_results_are_ignored() {
        let mut state = loaded(&["bulbasaur"], 1302);
        reducer(&mut state, Action::PageNext);
        assert_eq!(state.catalog.page, 2);

        let result = reducer(
            &mut state,
            Action::CatalogDidLoad {
                page: 1,
                data: CatalogPage {
                    results: entries(&["stale"]),
                    count: 1302,
                },
            },
        );
        assert!(!result.changed);
        assert_eq!(state.catalog.entries[0].name, "bulbasaur");

        let result = reducer(
            &mut state,
            Action::CatalogDidError {
                page: 1,
                error: "late".into(),
            },
        );
        assert!(!result.changed);
        assert!(state.message.is_none());
    }

    #[test]
    fn test_page_navigation_emits_fetch() {
        let mut state = loaded(&["bulbasaur"], 1302);

        let result = reducer(&mut state, Action::PageLast);
        assert_eq!(state.catalog.page, 27);
        assert!(matches!(
            &result.effects[0],
            Effect::LoadCatalogPage { page: 27, url } if url.ends_with("offset=1300")
        ));

        let result = reducer(&mut state, Action::PageNext);
        assert!(!result.changed);
        assert!(result.effects.is_empty());

        let result = reducer(&mut state, Action::PagePrev);
        assert_eq!(state.catalog.page, 26);
        assert_eq!(result.effects.len(), 1);
    }

    #[test]
    fn test_navigation_without_results_is_noop() {
        let mut state = AppState::default();
        for action in [
            Action::PageFirst,
            Action::PagePrev,
            Action::PageNext,
            Action::PageLast,
        ] {
            let result = reducer(&mut state, action);
            assert!(!result.changed);
            assert!(result.effects.is_empty());
        }
        assert_eq!(state.catalog.page, 1);
    }

    #[test]
    fn test_page_jump_accepts_only_valid_pages() {
        let mut state = loaded(&["bulbasaur"], 1302);
        reducer(&mut state, Action::PageJumpOpen);
        assert!(state.page_jump.active);

        let result = reducer(&mut state, Action::PageJumpSubmit("99".into()));
        assert!(result.effects.is_empty());
        assert!(state.page_jump.active);
        assert_eq!(
            state.message.as_deref(),
            Some("Page must be between 1 and 27")
        );

        let result = reducer(&mut state, Action::PageJumpSubmit("abc".into()));
        assert!(result.effects.is_empty());
        assert_eq!(state.catalog.page, 1);

        let result = reducer(&mut state, Action::PageJumpSubmit(" 12 ".into()));
        assert!(!state.page_jump.active);
        assert_eq!(state.catalog.page, 12);
        assert!(state.message.is_none());
        assert_eq!(result.effects.len(), 1);
    }

    #[test]
    fn test_page_jump_to_current_page_just_closes() {
        let mut state = loaded(&["bulbasaur"], 1302);
        reducer(&mut state, Action::PageJumpOpen);
        let result = reducer(&mut state, Action::PageJumpSubmit("1".into()));
        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert!(!state.page_jump.active);
    }

    #[test]
    fn test_page_jump_input_keeps_digits() {
        let mut state = AppState::default();
        reducer(&mut state, Action::PageJumpOpen);
        reducer(&mut state, Action::PageJumpInput("1a2".into()));
        assert_eq!(state.page_jump.input, "12");
    }

    #[test]
    fn test_search_filters_held_page() {
        let mut state = loaded(&["pikachu", "raichu", "sandshrew"], 3);
        reducer(&mut state, Action::SearchStart);
        reducer(&mut state, Action::SearchQueryChange("CHU".into()));
        assert_eq!(state.catalog.filtered, vec![0, 1]);

        reducer(&mut state, Action::SearchQueryChange(String::new()));
        assert_eq!(state.catalog.filtered, vec![0, 1, 2]);
    }

    #[test]
    fn test_search_survives_page_change() {
        let mut state = loaded(&["pikachu"], 120);
        reducer(&mut state, Action::SearchSubmit("saur".into()));
        reducer(&mut state, Action::PageNext);
        reducer(
            &mut state,
            Action::CatalogDidLoad {
                page: 2,
                data: CatalogPage {
                    results: entries(&["bulbasaur", "charmander", "ivysaur"]),
                    count: 120,
                },
            },
        );
        assert_eq!(state.search.query, "saur");
        assert_eq!(state.catalog.filtered, vec![0, 2]);
    }

    #[test]
    fn test_search_cancel_restores_page() {
        let mut state = loaded(&["pikachu", "raichu"], 2);
        reducer(&mut state, Action::SearchStart);
        reducer(&mut state, Action::SearchQueryChange("zzz".into()));
        assert!(state.catalog.filtered.is_empty());

        reducer(&mut state, Action::SearchCancel);
        assert!(!state.search.active);
        assert_eq!(state.catalog.filtered, vec![0, 1]);
        assert!(!reducer(&mut state, Action::SearchCancel).changed);
    }

    #[test]
    fn test_detail_open_emits_single_fetch() {
        let mut state = loaded(&["pikachu"], 1);
        let result = reducer(&mut state, Action::DetailOpen("25".into()));

        assert_eq!(state.screen, Screen::Detail);
        assert!(state.detail.entry.is_loading());
        assert_eq!(
            result.effects,
            vec![Effect::LoadEntry {
                id: "25".into(),
                url: "https://pokeapi.co/api/v2/pokemon/25".into(),
            }]
        );
    }

    #[test]
    fn test_detail_load_selects_front_sprite() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DetailOpen("25".into()));
        let result = reducer(
            &mut state,
            Action::DetailDidLoad {
                id: "25".into(),
                entry: detail(25),
            },
        );

        assert!(state.detail.entry.is_loaded());
        assert_eq!(state.detail.sprite_index, 1);
        assert!(state.detail.sprite.is_loading());
        assert_eq!(
            result.effects,
            vec![Effect::LoadSprite {
                url: "https://img/front.png".into()
            }]
        );
    }

    #[test]
    fn test_stale_detail_results_are_ignored() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DetailOpen("25".into()));
        reducer(&mut state, Action::DetailOpen("26".into()));

        let result = reducer(
            &mut state,
            Action::DetailDidLoad {
                id: "25".into(),
                entry: detail(25),
            },
        );
        assert!(!result.changed);
        assert!(state.detail.entry.is_loading());

        reducer(
            &mut state,
            Action::DetailDidError {
                id: "26".into(),
                error: "HTTP 404".into(),
            },
        );
        assert_eq!(state.detail.entry.error(), Some("HTTP 404"));
    }

    #[test]
    fn test_start_page_past_end_falls_back_to_last() {
        let config = Config::new("http://localhost:8000/api/v2", 40, None, None);
        let mut state = AppState::new(&config);
        reducer(&mut state, Action::Init);

        let result = reducer(
            &mut state,
            Action::CatalogDidLoad {
                page: 40,
                data: CatalogPage {
                    results: Vec::new(),
                    count: 1302,
                },
            },
        );

        assert_eq!(state.catalog.page, 27);
        assert!(state.catalog.loading);
        assert_eq!(
            result.effects,
            vec![Effect::LoadCatalogPage {
                page: 27,
                url: "http://localhost:8000/api/v2/pokemon/?limit=50&offset=1300".into(),
            }]
        );

        reducer(
            &mut state,
            Action::CatalogDidLoad {
                page: 27,
                data: CatalogPage {
                    results: entries(&["terapagos"]),
                    count: 1302,
                },
            },
        );
        let result = reducer(&mut state, Action::PagePrev);
        assert_eq!(state.catalog.page, 26);
        assert_eq!(result.effects.len(), 1);
    }

    #[test]
    fn test_page_jump_close_clears_message() {
        let mut state = loaded(&["pikachu"], 1302);
        reducer(&mut state, Action::PageJumpOpen);
        reducer(&mut state, Action::PageJumpSubmit("99".into()));
        assert_eq!(
            state.message.as_deref(),
            Some("Page must be between 1 and 27")
        );

        reducer(&mut state, Action::PageJumpClose);
        assert!(state.message.is_none());
    }

    #[test]
    fn test_messages_stay_on_their_screen() {
        let config = Config::new("http://localhost:8000/api/v2", 1, Some("25".into()), None);
        let mut state = AppState::new(&config);
        reducer(&mut state, Action::Init);

        // List failure while the detail screen is up
        reducer(
            &mut state,
            Action::CatalogDidError {
                page: 1,
                error: "timeout".into(),
            },
        );
        assert!(state.message.is_none());
        assert_eq!(state.catalog.total_count, 0);

        reducer(
            &mut state,
            Action::DetailDidError {
                id: "25".into(),
                error: "HTTP 500".into(),
            },
        );
        assert!(state.message.is_some());

        reducer(&mut state, Action::DetailClose);
        assert!(state.message.is_none());
    }

    #[test]
    fn test_detail_close_keeps_list() {
        let mut state = loaded(&["pikachu", "raichu"], 2);
        reducer(&mut state, Action::SearchSubmit("rai".into()));
        reducer(&mut state, Action::DetailOpen("26".into()));
        reducer(&mut state, Action::DetailClose);

        assert_eq!(state.screen, Screen::List);
        assert_eq!(state.catalog.entries.len(), 2);
        assert_eq!(state.search.query, "rai");
        assert!(state.detail.id.is_none());
    }

    #[test]
    fn test_sprite_cycle_and_stale_sprite() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DetailOpen("25".into()));
        reducer(
            &mut state,
            Action::DetailDidLoad {
                id: "25".into(),
                entry: detail(25),
            },
        );

        let result = reducer(&mut state, Action::SpriteNext);
        assert_eq!(state.detail.sprite_index, 0);
        assert_eq!(
            result.effects,
            vec![Effect::LoadSprite {
                url: "https://img/back.png".into()
            }]
        );

        let sprite = SpriteData {
            width: 1,
            height: 1,
            pixels: vec![255, 0, 0, 255],
        };
        let result = reducer(
            &mut state,
            Action::SpriteDidLoad {
                url: "https://img/front.png".into(),
                sprite: sprite.clone(),
            },
        );
        assert!(!result.changed);

        reducer(
            &mut state,
            Action::SpriteDidLoad {
                url: "https://img/back.png".into(),
                sprite,
            },
        );
        assert!(state.detail.sprite.is_loaded());
    }

    #[test]
    fn test_cry_flag_clears_on_completion_only() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DetailOpen("25".into()));
        reducer(
            &mut state,
            Action::DetailDidLoad {
                id: "25".into(),
                entry: detail(25),
            },
        );

        let result = reducer(&mut state, Action::CryPlay);
        assert!(state.detail.cry_playing);
        assert_eq!(
            result.effects,
            vec![Effect::PlayCry {
                url: "https://cry/25.ogg".into()
            }]
        );

        assert!(!reducer(&mut state, Action::CryPlay).changed);
        for _ in 0..50 {
            reducer(&mut state, Action::Tick);
        }
        assert!(state.detail.cry_playing);

        reducer(&mut state, Action::CryDidFinish);
        assert!(!state.detail.cry_playing);

        reducer(&mut state, Action::CryPlay);
        reducer(&mut state, Action::CryDidError("no output device".into()));
        assert!(!state.detail.cry_playing);
        assert_eq!(state.message.as_deref(), Some("Cry error: no output device"));
    }

    #[test]
    fn test_cry_without_url_sets_message() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DetailOpen("25".into()));
        let mut entry = detail(25);
        entry.cry_url = None;
        reducer(
            &mut state,
            Action::DetailDidLoad {
                id: "25".into(),
                entry,
            },
        );

        let result = reducer(&mut state, Action::CryPlay);
        assert!(result.effects.is_empty());
        assert!(!state.detail.cry_playing);
        assert_eq!(state.message.as_deref(), Some("No cry available"));
    }

    #[test]
    fn test_tick_only_while_busy() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);

        state.catalog.loading = true;
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick, 1);
    }
}
