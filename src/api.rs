//! PokeAPI client: one request per call, no retries and no cache.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::state::{
    AbilitySlot, CatalogPage, EntryDetail, HeldItem, ItemRarity, MoveEntry, PastAbilities,
    PastTypes, SpriteVariant, StatValue,
};

const OFFICIAL_ARTWORK_KEY: &str = "official_artwork";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    base_experience: Option<u32>,
    #[serde(default)]
    order: i32,
    #[serde(default)]
    is_default: bool,
    species: Option<NamedResource>,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    #[serde(default)]
    abilities: Vec<PokemonAbilitySlot>,
    #[serde(default)]
    sprites: serde_json::Value,
    #[serde(default)]
    moves: Vec<PokemonMoveSlot>,
    #[serde(default)]
    held_items: Vec<HeldItemSlot>,
    #[serde(default)]
    past_types: Vec<PastTypeSlot>,
    #[serde(default)]
    past_abilities: Vec<PastAbilitySlot>,
    cries: Option<PokemonCries>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    #[serde(default)]
    effort: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: Option<NamedResource>,
    #[serde(default)]
    is_hidden: bool,
    #[serde(default)]
    slot: u8,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonMoveSlot {
    #[serde(rename = "move")]
    move_info: NamedResource,
    #[serde(default)]
    version_group_details: Vec<VersionGroupDetail>,
}

#[derive(Clone, Debug, Deserialize)]
struct VersionGroupDetail {
    #[serde(default)]
    level_learned_at: u16,
    move_learn_method: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct HeldItemSlot {
    item: NamedResource,
    #[serde(default)]
    version_details: Vec<HeldItemVersion>,
}

#[derive(Clone, Debug, Deserialize)]
struct HeldItemVersion {
    rarity: u16,
    version: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PastTypeSlot {
    generation: NamedResource,
    types: Vec<PokemonTypeSlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct PastAbilitySlot {
    generation: NamedResource,
    abilities: Vec<PokemonAbilitySlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonCries {
    latest: Option<String>,
}

/// `GET <base>/pokemon/?limit=&offset=`
pub async fn fetch_catalog_page(url: &str) -> Result<CatalogPage, ApiError> {
    let bytes = fetch_bytes(url).await?;
    let page = decode_catalog_page(url, &bytes)?;
    tracing::debug!(url, held = page.results.len(), count = page.count, "catalog page loaded");
    Ok(page)
}

/// `GET <base>/pokemon/<id>`
pub async fn fetch_entry(url: &str) -> Result<EntryDetail, ApiError> {
    let bytes = fetch_bytes(url).await?;
    decode_entry_detail(url, &bytes)
}

pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, ApiError> {
    tracing::debug!(url, "GET");
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })?;
    Ok(bytes.to_vec())
}

pub fn decode_catalog_page(url: &str, bytes: &[u8]) -> Result<CatalogPage, ApiError> {
    serde_json::from_slice(bytes).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

pub fn decode_entry_detail(url: &str, bytes: &[u8]) -> Result<EntryDetail, ApiError> {
    let response: PokemonResponse =
        serde_json::from_slice(bytes).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })?;
    Ok(entry_from_response(response))
}

fn entry_from_response(response: PokemonResponse) -> EntryDetail {
    let sprites = sprite_variants(&response.sprites);
    EntryDetail {
        id: response.id,
        name: response.name,
        height: response.height,
        weight: response.weight,
        base_experience: response.base_experience,
        order: response.order,
        is_default: response.is_default,
        species: response.species.map(|species| species.name),
        types: type_names(response.types),
        stats: response
            .stats
            .into_iter()
            .map(|slot| StatValue {
                name: slot.stat.name,
                base_stat: slot.base_stat,
                effort: slot.effort,
            })
            .collect(),
        abilities: ability_slots(response.abilities),
        sprites,
        moves: response
            .moves
            .into_iter()
            .map(|slot| {
                let first = slot.version_group_details.into_iter().next();
                MoveEntry {
                    name: slot.move_info.name,
                    level_learned_at: first.as_ref().map_or(0, |d| d.level_learned_at),
                    learn_method: first.map(|d| d.move_learn_method.name),
                }
            })
            .collect(),
        held_items: response
            .held_items
            .into_iter()
            .map(|slot| HeldItem {
                name: slot.item.name,
                versions: slot
                    .version_details
                    .into_iter()
                    .map(|detail| ItemRarity {
                        version: detail.version.name,
                        rarity: detail.rarity,
                    })
                    .collect(),
            })
            .collect(),
        past_types: response
            .past_types
            .into_iter()
            .map(|past| PastTypes {
                generation: past.generation.name,
                types: type_names(past.types),
            })
            .collect(),
        past_abilities: response
            .past_abilities
            .into_iter()
            .map(|past| PastAbilities {
                generation: past.generation.name,
                abilities: ability_slots(past.abilities),
            })
            .collect(),
        cry_url: response.cries.and_then(|cries| cries.latest),
    }
}

fn type_names(slots: Vec<PokemonTypeSlot>) -> Vec<String> {
    slots.into_iter().map(|slot| slot.type_info.name).collect()
}

fn ability_slots(slots: Vec<PokemonAbilitySlot>) -> Vec<AbilitySlot> {
    slots
        .into_iter()
        .map(|slot| AbilitySlot {
            name: slot.ability.map(|ability| ability.name),
            is_hidden: slot.is_hidden,
            slot: slot.slot,
        })
        .collect()
}

/// Top-level string sprites that point at a pokemon image, then the
/// official artwork when present.
fn sprite_variants(sprites: &serde_json::Value) -> Vec<SpriteVariant> {
    let mut variants: Vec<SpriteVariant> = sprites
        .as_object()
        .map(|map| {
            map.iter()
                .filter_map(|(key, value)| {
                    let url = value.as_str()?;
                    url.contains("pokemon").then(|| SpriteVariant {
                        key: key.clone(),
                        url: url.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    if let Some(url) = pointer_string(sprites, "/other/official-artwork/front_default") {
        variants.push(SpriteVariant {
            key: OFFICIAL_ARTWORK_KEY.to_string(),
            url,
        });
    }
    variants
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
