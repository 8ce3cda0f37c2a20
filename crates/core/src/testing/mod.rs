//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use cinefetch_core::testing::{fixtures, MockMetadataClient};
//!
//! let client = MockMetadataClient::new();
//! client.add_movie(fixtures::movie("Heat", "1995", "Michael Mann")).await;
//! client.set_delay(Duration::from_millis(20)).await;
//! ```

mod mock_metadata_client;

pub use mock_metadata_client::{MockMetadataClient, ScriptedLookup};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::metadata::{MovieRecord, NOT_FOUND_SENTINEL};

    /// Create a fully populated movie record.
    pub fn movie(title: &str, year: &str, director: &str) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            year: year.to_string(),
            director: director.to_string(),
            imdb_id: imdb_id(title),
        }
    }

    /// A stable fake IMDb id derived from the title.
    pub fn imdb_id(title: &str) -> String {
        let n = title
            .bytes()
            .fold(7u32, |acc, b| acc.wrapping_mul(31) ^ u32::from(b));
        format!("tt{:07}", n % 10_000_000)
    }

    /// Provider JSON body for a found movie.
    pub fn omdb_body(record: &MovieRecord) -> String {
        serde_json::json!({
            "Title": record.title,
            "Year": record.year,
            "Rated": "R",
            "Director": record.director,
            "imdbID": record.imdb_id,
            "Type": "movie",
            "Response": "True",
        })
        .to_string()
    }

    /// Provider JSON body for an unknown title.
    pub fn not_found_body() -> String {
        serde_json::json!({
            "Response": "False",
            "Error": NOT_FOUND_SENTINEL,
        })
        .to_string()
    }

    /// Numbered titles, e.g. `"Movie 001"`.
    pub fn titles(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("Movie {:03}", i)).collect()
    }
}
