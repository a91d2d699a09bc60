//! Actions for the catalog list, the detail screen and the app shell.

use serde::{Deserialize, Serialize};

use crate::sprite::SpriteData;
use crate::state::{CatalogPage, EntryDetail};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    // ===== Catalog category =====
    /// Re-issue the request for the current page
    CatalogFetch,
    /// Result for `page`; ignored unless it is still the requested page
    CatalogDidLoad { page: u32, data: CatalogPage },
    CatalogDidError { page: u32, error: String },
    CatalogSelect(usize),

    // ===== Page category =====
    PageFirst,
    PagePrev,
    PageNext,
    PageLast,
    PageJumpOpen,
    PageJumpClose,
    PageJumpInput(String),
    PageJumpSubmit(String),

    // ===== Search category =====
    SearchStart,
    SearchQueryChange(String),
    SearchSubmit(String),
    SearchCancel,

    // ===== Detail category =====
    /// Open the detail screen for an identifier
    DetailOpen(String),
    DetailClose,
    DetailFetch,
    DetailDidLoad { id: String, entry: EntryDetail },
    DetailDidError { id: String, error: String },

    // ===== Sprite category =====
    SpriteNext,
    SpritePrev,
    SpriteDidLoad { url: String, sprite: SpriteData },
    SpriteDidError { url: String, error: String },

    // ===== Moves category =====
    MovesScroll(i16),

    // ===== Cry category =====
    CryPlay,
    CryDidFinish,
    CryDidError(String),

    // ===== Ui category =====
    UiTerminalResize(u16, u16),

    /// Force a re-render (cursor movement in text inputs)
    Render,
    Tick,
    Quit,
}
