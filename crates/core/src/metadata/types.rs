//! Types for metadata provider responses.

use serde::{Deserialize, Deserializer, Serialize};

/// A movie as returned by the metadata provider.
///
/// Field names follow the provider's JSON keys. Fields the provider leaves
/// out or sends as `null` decode as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieRecord {
    /// Movie title.
    #[serde(rename = "Title", default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Release year (may be a range for series, e.g. "2008-2013").
    #[serde(rename = "Year", default, deserialize_with = "null_as_empty")]
    pub year: String,
    /// Director name(s), comma separated.
    #[serde(rename = "Director", default, deserialize_with = "null_as_empty")]
    pub director: String,
    /// IMDb identifier. Only present when the provider actually resolved
    /// the title, so it doubles as a "fields were populated" marker.
    #[serde(rename = "imdbID", default, deserialize_with = "null_as_empty")]
    pub imdb_id: String,
}

impl MovieRecord {
    /// A record carrying nothing but the looked-up title.
    pub fn title_only(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Whether the provider filled in the record beyond the title.
    pub fn is_populated(&self) -> bool {
        !self.imdb_id.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_provider_record() {
        let json = r#"{
            "Title": "Inception",
            "Year": "2010",
            "Rated": "PG-13",
            "Director": "Christopher Nolan",
            "imdbID": "tt1375666",
            "Response": "True"
        }"#;
        let record: MovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, "Inception");
        assert_eq!(record.year, "2010");
        assert_eq!(record.director, "Christopher Nolan");
        assert_eq!(record.imdb_id, "tt1375666");
        assert!(record.is_populated());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let record: MovieRecord = serde_json::from_str(r#"{"Title": "Heat"}"#).unwrap();
        assert_eq!(record.title, "Heat");
        assert!(record.year.is_empty());
        assert!(record.director.is_empty());
        assert!(!record.is_populated());
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let json = r#"{"Title": "Heat", "Year": "1995", "Director": null, "imdbID": null}"#;
        let record: MovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, "Heat");
        assert_eq!(record.year, "1995");
        assert!(record.director.is_empty());
        assert!(!record.is_populated());
    }

    #[test]
    fn test_serializes_with_provider_keys() {
        let record = MovieRecord {
            title: "Alien".to_string(),
            year: "1979".to_string(),
            director: "Ridley Scott".to_string(),
            imdb_id: "tt0078748".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Title"], "Alien");
        assert_eq!(value["Year"], "1979");
        assert_eq!(value["Director"], "Ridley Scott");
        assert_eq!(value["imdbID"], "tt0078748");
    }

    #[test]
    fn test_title_only() {
        let record = MovieRecord::title_only("Brazil");
        assert_eq!(record.title, "Brazil");
        assert!(record.year.is_empty());
        assert!(!record.is_populated());
    }
}
