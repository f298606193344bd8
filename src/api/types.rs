use serde::{Deserialize, Serialize};

/// Movie identifier as exposed by the API (`movieId`)
pub type MovieId = i64;

/// Login request body
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Login response body
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub token: Option<String>,
}

/// Result of the database health check
#[derive(Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub movie_count: Option<u64>,
}

/// Movie as returned by the public listing
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub movie_id: Option<MovieId>,
    #[serde(default)]
    pub title: String,
}

/// Movie body for create and update requests
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoviePayload {
    pub title: String,
    pub description: String,
    pub release_year: u16,
    pub genre: String,
    pub duration: u32,
    pub language: String,
    pub director: String,
    pub cast: String,
    pub rating: String,
    pub is_active: bool,
}

impl MoviePayload {
    /// Synthetic movie for the create step. The timestamp keeps titles unique.
    pub fn test_movie(title_prefix: &str, timestamp: i64) -> Self {
        Self {
            title: format!("{} {}", title_prefix, timestamp),
            description: "This is a test movie created by the persistence test script."
                .to_string(),
            release_year: 2024,
            genre: "Test".to_string(),
            duration: 120,
            language: "English".to_string(),
            director: "Test Director".to_string(),
            cast: "Test Actor 1, Test Actor 2".to_string(),
            rating: "PG-13".to_string(),
            is_active: true,
        }
    }

    /// Revised fields for the update step
    pub fn updated_movie(title_prefix: &str, timestamp: i64) -> Self {
        Self {
            title: format!("Updated {} {}", title_prefix, timestamp),
            description: "This movie has been updated by the persistence test script."
                .to_string(),
            release_year: 2024,
            genre: "Updated Test".to_string(),
            duration: 135,
            language: "English".to_string(),
            director: "Updated Test Director".to_string(),
            cast: "Updated Test Actor 1, Updated Test Actor 2".to_string(),
            rating: "R".to_string(),
            is_active: true,
        }
    }
}

/// Extract `movieId` from a create response body, if the server returned one.
///
/// Accepts numbers and numeric strings. Anything else yields `None`.
pub fn movie_id_from_body(body: &serde_json::Value) -> Option<MovieId> {
    match body.get("movieId")? {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
