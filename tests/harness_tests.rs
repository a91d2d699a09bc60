//! End-to-end flows with EffectStoreTestHarness: dispatch, drain effects,
//! complete the async side, render.

use pokedex_explorer::{
    action::Action,
    api,
    components::{CatalogView, CatalogViewProps, Component, DetailView, DetailViewProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, CatalogEntry, CatalogPage, Screen},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use tui_dispatch::testing::*;
use tui_dispatch::EventKind;

fn first_page() -> CatalogPage {
    CatalogPage {
        results: ["bulbasaur", "ivysaur", "venusaur"]
            .iter()
            .enumerate()
            .map(|(idx, name)| CatalogEntry {
                name: name.to_string(),
                url: format!("https://pokeapi.co/api/v2/pokemon/{}/", idx + 1),
            })
            .collect(),
        count: 1302,
    }
}

fn ivysaur_json() -> Vec<u8> {
    json!({
        "id": 2,
        "name": "ivysaur",
        "height": 10,
        "weight": 130,
        "base_experience": 142,
        "order": 2,
        "is_default": true,
        "species": { "name": "ivysaur", "url": "" },
        "types": [
            { "slot": 1, "type": { "name": "grass", "url": "" } },
            { "slot": 2, "type": { "name": "poison", "url": "" } }
        ],
        "stats": [
            { "base_stat": 60, "effort": 0, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 62, "effort": 0, "stat": { "name": "attack", "url": "" } },
            { "base_stat": 80, "effort": 1, "stat": { "name": "special-attack", "url": "" } }
        ],
        "abilities": [
            { "ability": { "name": "overgrow", "url": "" }, "is_hidden": false, "slot": 1 }
        ],
        "sprites": {
            "front_default": "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/2.png"
        },
        "moves": [],
        "cries": { "latest": "https://raw.githubusercontent.com/PokeAPI/cries/main/cries/pokemon/latest/2.ogg" }
    })
    .to_string()
    .into_bytes()
}

#[test]
fn test_list_load_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.catalog.loading);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::LoadCatalogPage { page: 1, .. }));

    harness.complete_action(Action::CatalogDidLoad {
        page: 1,
        data: first_page(),
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 1);

    harness.assert_state(|s| !s.catalog.loading);
    harness.assert_state(|s| s.catalog.total_pages() == 27);
    harness.assert_state(|s| s.catalog.filtered.len() == 3);
}

#[test]
fn test_out_of_order_pages_keep_latest() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::CatalogDidLoad {
        page: 1,
        data: first_page(),
    });

    harness.dispatch_collect(Action::PageNext);
    harness.dispatch_collect(Action::PageNext);
    harness.assert_state(|s| s.catalog.page == 3);
    let effects = harness.drain_effects();
    effects.effects_count(2);

    // Page 3 resolves first, then the slower page 2 request
    harness.complete_action(Action::CatalogDidLoad {
        page: 3,
        data: CatalogPage {
            results: vec![CatalogEntry {
                name: "pidgey".into(),
                url: "https://pokeapi.co/api/v2/pokemon/16/".into(),
            }],
            count: 1302,
        },
    });
    harness.complete_action(Action::CatalogDidLoad {
        page: 2,
        data: first_page(),
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 2);
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.catalog.entries[0].name == "pidgey");
}

#[test]
fn test_open_detail_from_list() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::CatalogDidLoad {
        page: 1,
        data: first_page(),
    });
    harness.dispatch_collect(Action::CatalogSelect(1));

    // Same list as the harness holds, selection on the second entry
    let mut view_state = AppState::default();
    reducer(
        &mut view_state,
        Action::CatalogDidLoad {
            page: 1,
            data: first_page(),
        },
    );
    reducer(&mut view_state, Action::CatalogSelect(1));

    let mut list = CatalogView::new();
    let enter = EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    let actions: Vec<_> = list
        .handle_event(
            &enter,
            CatalogViewProps {
                state: &view_state,
                is_focused: true,
            },
        )
        .into_iter()
        .collect();
    actions.assert_first(Action::DetailOpen("2".into()));

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.screen == Screen::Detail);
    harness.assert_state(|s| s.detail.entry.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::LoadEntry { id, url } if id == "2" && url.ends_with("/pokemon/2"))
    });

    let url = "https://pokeapi.co/api/v2/pokemon/2";
    let entry = api::decode_entry_detail(url, &ivysaur_json()).expect("fixture decodes");
    harness.complete_action(Action::DetailDidLoad {
        id: "2".into(),
        entry,
    });
    harness.process_emitted();
    harness.assert_state(|s| s.detail.entry.is_loaded());
    harness.assert_state(|s| s.detail.sprite.is_loading());

    let mut detail = DetailView;
    let output = harness.render_plain(100, 30, |frame, area, state| {
        detail.render(
            frame,
            area,
            DetailViewProps {
                state,
                is_focused: true,
            },
        );
    });
    assert!(output.contains("#002 Ivysaur"), "{output}");
    assert!(output.contains(" 80 "), "{output}");
    assert!(output.contains("1 m"), "{output}");
    assert!(output.contains("13 kg"), "{output}");
}

#[test]
fn test_detail_error_renders_failure() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::DetailOpen("99999".into()));
    harness.complete_action(Action::DetailDidError {
        id: "99999".into(),
        error: "https://pokeapi.co/api/v2/pokemon/99999 returned HTTP 404".into(),
    });
    harness.process_emitted();
    harness.assert_state(|s| s.detail.entry.is_failed());

    let mut detail = DetailView;
    let output = harness.render_plain(80, 20, |frame, area, state| {
        detail.render(
            frame,
            area,
            DetailViewProps {
                state,
                is_focused: true,
            },
        );
    });
    assert!(output.contains("Failed to load Pokemon data"), "{output}");
}

#[test]
fn test_cry_lifecycle() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::DetailOpen("2".into()));
    let entry = api::decode_entry_detail("fixture", &ivysaur_json()).expect("fixture decodes");
    harness.dispatch_collect(Action::DetailDidLoad {
        id: "2".into(),
        entry,
    });
    harness.drain_effects();

    harness.dispatch_collect(Action::CryPlay);
    harness.assert_state(|s| s.detail.cry_playing);
    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::PlayCry { url } if url.ends_with("2.ogg")));

    harness.complete_action(Action::CryDidFinish);
    harness.process_emitted();
    harness.assert_state(|s| !s.detail.cry_playing);
}

#[test]
fn test_list_render_after_failure() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);
    harness.complete_action(Action::CatalogDidError {
        page: 1,
        error: "request to https://pokeapi.co/api/v2/pokemon/ failed".into(),
    });
    harness.process_emitted();

    let mut list = CatalogView::new();
    let output = harness.render_plain(100, 24, |frame, area, state| {
        list.render(
            frame,
            area,
            CatalogViewProps {
                state,
                is_focused: true,
            },
        );
    });
    assert!(output.contains("Total: 0"), "{output}");
    assert!(output.contains("No Pokemon found."), "{output}");
    assert!(!output.contains("Showing"), "{output}");
}
