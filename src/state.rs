use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{DebugSection, DebugState, ron_string};

use crate::catalog;
use crate::config::Config;
use crate::sprite::SpriteData;

/// One `{name, url}` item of the collection endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
}

impl CatalogEntry {
    /// Identifier parsed from the resource URL.
    pub fn id(&self) -> String {
        catalog::entry_id_from_url(&self.url)
    }
}

/// Raw collection response; replaced wholesale on every page fetch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub results: Vec<CatalogEntry>,
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryDetail {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub base_experience: Option<u32>,
    pub order: i32,
    pub is_default: bool,
    pub species: Option<String>,
    pub types: Vec<String>,
    pub stats: Vec<StatValue>,
    pub abilities: Vec<AbilitySlot>,
    pub sprites: Vec<SpriteVariant>,
    pub moves: Vec<MoveEntry>,
    pub held_items: Vec<HeldItem>,
    pub past_types: Vec<PastTypes>,
    pub past_abilities: Vec<PastAbilities>,
    pub cry_url: Option<String>,
}

impl EntryDetail {
    /// Moves whose first version-group entry is learned by level-up.
    pub fn level_up_moves(&self) -> Vec<&MoveEntry> {
        self.moves
            .iter()
            .filter(|entry| entry.learn_method.as_deref() == Some("level-up"))
            .collect()
    }

    pub fn sprite_position(&self, key: &str) -> Option<usize> {
        self.sprites.iter().position(|variant| variant.key == key)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    pub name: String,
    pub base_stat: u16,
    pub effort: u16,
}

/// Ability slot; `name` is `None` for an empty historical slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub name: Option<String>,
    pub is_hidden: bool,
    pub slot: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteVariant {
    pub key: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveEntry {
    pub name: String,
    pub learn_method: Option<String>,
    pub level_learned_at: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeldItem {
    pub name: String,
    pub versions: Vec<ItemRarity>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemRarity {
    pub version: String,
    pub rarity: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PastTypes {
    pub generation: String,
    pub types: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PastAbilities {
    pub generation: String,
    pub abilities: Vec<AbilitySlot>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    List,
    Detail,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageJumpState {
    pub active: bool,
    pub input: String,
}

/// List screen state: the held page and its filtered view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogState {
    /// Requested page (1-based). Results for any other page are stale.
    pub page: u32,
    pub entries: Vec<CatalogEntry>,
    pub total_count: u64,
    pub loading: bool,
    pub filtered: Vec<usize>,
    pub selected: usize,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            page: 1,
            entries: Vec::new(),
            total_count: 0,
            loading: false,
            filtered: Vec::new(),
            selected: 0,
        }
    }
}

impl CatalogState {
    pub fn total_pages(&self) -> u32 {
        catalog::total_pages(self.total_count)
    }

    pub fn visible(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.filtered.iter().filter_map(|idx| self.entries.get(*idx))
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.filtered
            .get(self.selected)
            .and_then(|idx| self.entries.get(*idx))
    }

    pub fn set_selected(&mut self, index: usize) -> bool {
        if self.filtered.is_empty() {
            self.selected = 0;
            return false;
        }
        let bounded = index.min(self.filtered.len() - 1);
        if bounded != self.selected {
            self.selected = bounded;
            return true;
        }
        false
    }

    pub fn rebuild_filtered(&mut self, query: &str) {
        self.filtered = catalog::filter_indices(&self.entries, query);
        if self.selected >= self.filtered.len() {
            self.selected = 0;
        }
    }
}

/// Detail screen state: `Empty → Loading → Loaded/Failed`, restarted
/// whenever the identifier changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetailState {
    pub id: Option<String>,
    pub entry: DataResource<EntryDetail>,
    pub sprite_index: usize,
    pub sprite_url: Option<String>,
    pub sprite: DataResource<SpriteData>,
    pub moves_scroll: u16,
    pub cry_playing: bool,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            id: None,
            entry: DataResource::Empty,
            sprite_index: 0,
            sprite_url: None,
            sprite: DataResource::Empty,
            moves_scroll: 0,
            cry_playing: false,
        }
    }
}

impl DetailState {
    pub fn loading(id: String) -> Self {
        Self {
            id: Some(id),
            entry: DataResource::Loading,
            ..Self::default()
        }
    }

    pub fn current_sprite(&self) -> Option<&SpriteVariant> {
        self.entry.data()?.sprites.get(self.sprite_index)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    /// API base URL, always ending with `/`.
    pub api_base: String,
    pub screen: Screen,
    pub catalog: CatalogState,
    pub search: SearchState,
    pub page_jump: PageJumpState,
    pub detail: DetailState,
    pub message: Option<String>,
    pub terminal_size: (u16, u16),
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let (screen, detail) = match config.initial_id.clone() {
            Some(id) => (Screen::Detail, DetailState::loading(id)),
            None => (Screen::List, DetailState::default()),
        };
        Self {
            api_base: config.base_url.clone(),
            screen,
            catalog: CatalogState {
                page: config.initial_page.max(1),
                ..CatalogState::default()
            },
            search: SearchState::default(),
            page_jump: PageJumpState::default(),
            detail,
            message: None,
            terminal_size: (80, 24),
            tick: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        match self.screen {
            Screen::List => self.catalog.loading,
            Screen::Detail => self.detail.entry.is_loading() || self.detail.sprite.is_loading(),
        }
    }

    pub fn rebuild_filtered(&mut self) {
        self.catalog.rebuild_filtered(&self.search.query);
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("page", ron_string(&self.catalog.page))
                .entry("total_pages", ron_string(&self.catalog.total_pages()))
                .entry("count", ron_string(&self.catalog.total_count))
                .entry("held", ron_string(&self.catalog.entries.len()))
                .entry("filtered", ron_string(&self.catalog.filtered.len()))
                .entry("selected", ron_string(&self.catalog.selected))
                .entry("loading", ron_string(&self.catalog.loading)),
            DebugSection::new("Filters")
                .entry("search", ron_string(&self.search.query))
                .entry("search_active", ron_string(&self.search.active))
                .entry("page_jump", ron_string(&self.page_jump.input))
                .entry("page_jump_active", ron_string(&self.page_jump.active)),
            DebugSection::new("Detail")
                .entry("screen", ron_string(&self.screen))
                .entry("id", ron_string(&self.detail.id))
                .entry("loading", ron_string(&self.detail.entry.is_loading()))
                .entry("failed", ron_string(&self.detail.entry.error()))
                .entry("sprite", ron_string(&self.detail.sprite_url))
                .entry("cry_playing", ron_string(&self.detail.cry_playing)),
            DebugSection::new("Status")
                .entry("api_base", ron_string(&self.api_base))
                .entry("message", ron_string(&self.message)),
        ]
    }
}
