//! Side effects declared by the reducer. URLs are resolved against the
//! configured API base before the effect leaves the reducer.

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadCatalogPage { page: u32, url: String },
    LoadEntry { id: String, url: String },
    LoadSprite { url: String },
    PlayCry { url: String },
}
