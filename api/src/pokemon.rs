use anyhow::Result;
use serde::Deserialize;

use crate::ParseError;

/// Full detail record for a single species.
///
/// Fields pass through from the upstream API as-is. Unknown fields are
/// ignored and nullable fields stay optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pokemon {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

/// Sprite URLs. Only the default front sprite is consumed.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
}

/// An ability slot as listed on a detail record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AbilitySlot {
    pub ability: AbilityRef,
}

/// Named reference to an ability resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AbilityRef {
    pub name: String,
}

/// Build the detail endpoint URL: `{base}/pokemon/{name}`.
///
/// Names are lowercased here so lookups stay case-insensitive no matter
/// where the name came from.
pub fn pokemon_url(base: &str, name: &str) -> String {
    format!(
        "{}/pokemon/{}",
        base.trim_end_matches('/'),
        name.to_lowercase()
    )
}

/// Parse a detail record from a JSON response body
pub fn parse_pokemon(json: &str) -> Result<Pokemon> {
    if json.trim().is_empty() {
        return Err(ParseError::EmptyBody.into());
    }

    serde_json::from_str(json).map_err(|e| ParseError::InvalidJson(e.to_string()).into())
}
