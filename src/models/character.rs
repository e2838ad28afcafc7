//! Character model
//!
//! Every field is optional because the API is free to omit any of them.

use serde::{Deserialize, Serialize};

/// Placeholder shown for any missing character attribute
pub const UNKNOWN: &str = "Unknown";

/// A character appearing in one or more episodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Avatar image URL
    #[serde(rename = "image", default)]
    pub image_url: Option<String>,
    /// Character name
    #[serde(default)]
    pub name: Option<String>,
    /// Gender (Female, Male, Genderless, unknown)
    #[serde(default)]
    pub gender: Option<String>,
    /// Status (Alive, Dead, unknown)
    #[serde(default)]
    pub status: Option<String>,
    /// Species
    #[serde(default)]
    pub species: Option<String>,
    /// Subtype or subspecies
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Place of origin
    #[serde(default)]
    pub origin: Option<Location>,
    /// Last known location
    #[serde(default)]
    pub location: Option<Location>,
}

/// Named location reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Location name
    #[serde(default)]
    pub name: Option<String>,
}

/// One labelled row of character details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterDetail {
    /// Row label
    pub title: &'static str,
    /// Value, or [`UNKNOWN`]
    pub value: String,
}

impl Character {
    /// Name for display
    pub fn display_name(&self) -> &str {
        or_unknown(self.name.as_deref())
    }

    /// Detail rows in display order
    pub fn details(&self) -> Vec<CharacterDetail> {
        let origin = self.origin.as_ref().and_then(|l| l.name.as_deref());
        let location = self.location.as_ref().and_then(|l| l.name.as_deref());

        [
            ("Gender", self.gender.as_deref()),
            ("Status", self.status.as_deref()),
            ("Species", self.species.as_deref()),
            ("Origin", origin),
            ("Type", self.kind.as_deref()),
            ("Location", location),
        ]
        .into_iter()
        .map(|(title, value)| CharacterDetail {
            title,
            value: or_unknown(value).to_string(),
        })
        .collect()
    }
}

// The API sends "" for an unset type, which reads the same as a missing field.
fn or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_character() {
        let json = r#"{
            "id": 1,
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": { "name": "Earth (C-137)", "url": "" },
            "location": { "name": "Citadel of Ricks", "url": "" },
            "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg"
        }"#;

        let character: Character = serde_json::from_str(json).unwrap();
        assert_eq!(character.display_name(), "Rick Sanchez");
        assert_eq!(
            character.image_url.as_deref(),
            Some("https://rickandmortyapi.com/api/character/avatar/1.jpeg")
        );

        let details = character.details();
        let titles: Vec<_> = details.iter().map(|d| d.title).collect();
        assert_eq!(
            titles,
            ["Gender", "Status", "Species", "Origin", "Type", "Location"]
        );
        assert_eq!(details[3].value, "Earth (C-137)");
        assert_eq!(details[4].value, UNKNOWN);
        assert_eq!(details[5].value, "Citadel of Ricks");
    }

    #[test]
    fn test_empty_object_renders_unknown() {
        let character: Character = serde_json::from_str("{}").unwrap();
        assert_eq!(character.display_name(), UNKNOWN);
        assert!(character.image_url.is_none());
        assert!(character.details().iter().all(|d| d.value == UNKNOWN));
    }

    #[test]
    fn test_blank_values_render_unknown() {
        let character: Character =
            serde_json::from_str(r#"{ "name": "  ", "type": "", "species": "Alien" }"#).unwrap();
        assert_eq!(character.display_name(), UNKNOWN);

        let details = character.details();
        assert_eq!(details[2].value, "Alien");
        assert_eq!(details[4].title, "Type");
        assert_eq!(details[4].value, UNKNOWN);
    }

    #[test]
    fn test_location_without_name() {
        let character: Character =
            serde_json::from_str(r#"{ "origin": {}, "location": { "name": null } }"#).unwrap();
        let details = character.details();
        assert_eq!(details[3].value, UNKNOWN);
        assert_eq!(details[5].value, UNKNOWN);
    }
}
