//! Individual CRUD verification steps.
//!
//! Each step takes the API client and the session context explicitly, logs its
//! outcome, and returns a `Result` for the run loop to record.

use super::context::SessionContext;
use crate::api::{ApiClient, ApiError, HealthStatus, Movie, MovieId, MoviePayload};
use crate::utils::config::VerifyConfig;
use thiserror::Error;

/// Why a step did not pass
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Neither the create response nor the lookup produced an id
    #[error("no test movie found")]
    NoTestMovie,

    /// The listing scan for a test movie could not be read
    #[error("test movie lookup failed: {0}")]
    LookupFailed(ApiError),

    #[error("deleted movie {0} is still listed")]
    StillPresent(MovieId),
}

impl StepError {
    /// Missing preconditions are recorded as skipped rather than failed
    pub fn is_skip(&self) -> bool {
        matches!(self, StepError::NoTestMovie | StepError::LookupFailed(_))
    }
}

/// Database health check
pub async fn check_health(client: &ApiClient) -> Result<HealthStatus, StepError> {
    log::info!("Testing database health...");
    match client.database_health().await {
        Ok(health) => {
            match health.movie_count {
                Some(count) => log::info!(
                    "✅ Database health: {} - {} movies found",
                    health.status,
                    count
                ),
                None => log::info!("✅ Database health: {}", health.status),
            }
            Ok(health)
        }
        Err(e) => {
            log::error!("❌ Database health check failed: {}", e);
            Err(e.into())
        }
    }
}

/// Log in as admin and keep the token in the context
pub async fn authenticate(
    client: &ApiClient,
    config: &VerifyConfig,
    ctx: &mut SessionContext,
) -> Result<(), StepError> {
    log::info!("Authenticating as admin...");
    match client
        .login(&config.admin_email, &config.admin_password)
        .await
    {
        Ok(token) => {
            ctx.set_token(token);
            log::info!("✅ Admin authentication successful");
            Ok(())
        }
        Err(e) => {
            log::error!("❌ Admin authentication failed: {}", e);
            Err(e.into())
        }
    }
}

/// Public movie listing (no authentication)
pub async fn read_movies(client: &ApiClient) -> Result<Vec<Movie>, StepError> {
    log::info!("Testing READ operation - fetching movies...");
    match client.list_movies().await {
        Ok(movies) => {
            log::info!(
                "✅ READ operation successful: {} movies retrieved",
                movies.len()
            );
            if let Some(first) = movies.first() {
                log::info!(
                    "Sample movie: {} (ID: {})",
                    first.title,
                    first
                        .movie_id
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "?".to_string())
                );
            }
            Ok(movies)
        }
        Err(e) => {
            log::error!("❌ READ operation failed: {}", e);
            Err(e.into())
        }
    }
}

/// Create the synthetic movie; remembers its id when the response carries one
pub async fn create_movie(
    client: &ApiClient,
    config: &VerifyConfig,
    ctx: &mut SessionContext,
) -> Result<(), StepError> {
    log::info!("Testing CREATE operation - adding new movie...");
    let movie = MoviePayload::test_movie(&config.test_title_prefix, chrono::Utc::now().timestamp());

    match client.create_movie(ctx.token(), &movie).await {
        Ok(id) => {
            log::info!("✅ CREATE operation successful");
            if let Some(id) = id {
                log::info!("Created movie '{}' with ID: {}", movie.title, id);
                ctx.remember_movie(id);
            }
            Ok(())
        }
        Err(e) => {
            log::error!("❌ CREATE operation failed: {}", e);
            Err(e.into())
        }
    }
}

/// First movie whose title starts with `prefix`. Later matches are ignored.
pub fn find_test_movie(movies: &[Movie], prefix: &str) -> Option<MovieId> {
    movies
        .iter()
        .filter(|m| m.title.starts_with(prefix))
        .find_map(|m| m.movie_id)
}

/// Return the remembered id, falling back to a listing scan
pub async fn resolve_test_movie(
    client: &ApiClient,
    config: &VerifyConfig,
    ctx: &mut SessionContext,
) -> Result<MovieId, StepError> {
    if let Some(id) = ctx.movie_id() {
        return Ok(id);
    }

    let movies = match read_movies(client).await {
        Ok(movies) => movies,
        Err(StepError::Api(e)) => return Err(StepError::LookupFailed(e)),
        Err(e) => return Err(e),
    };
    match find_test_movie(&movies, &config.test_title_prefix) {
        Some(id) => {
            log::info!("Found test movie with ID: {}", id);
            ctx.remember_movie(id);
            Ok(id)
        }
        None => Err(StepError::NoTestMovie),
    }
}

pub async fn update_movie(
    client: &ApiClient,
    config: &VerifyConfig,
    ctx: &mut SessionContext,
) -> Result<(), StepError> {
    let id = match resolve_test_movie(client, config, ctx).await {
        Ok(id) => id,
        Err(e) => {
            log::error!("❌ Cannot test UPDATE: {}", e);
            return Err(e);
        }
    };

    log::info!("Testing UPDATE operation - modifying movie ID {}...", id);
    let movie =
        MoviePayload::updated_movie(&config.test_title_prefix, chrono::Utc::now().timestamp());

    match client.update_movie(ctx.token(), id, &movie).await {
        Ok(()) => {
            log::info!("✅ UPDATE operation successful");
            Ok(())
        }
        Err(e) => {
            log::error!("❌ UPDATE operation failed: {}", e);
            Err(e.into())
        }
    }
}

pub async fn delete_movie(
    client: &ApiClient,
    config: &VerifyConfig,
    ctx: &mut SessionContext,
) -> Result<(), StepError> {
    let id = match resolve_test_movie(client, config, ctx).await {
        Ok(id) => id,
        Err(e) => {
            log::error!("❌ Cannot test DELETE: {}", e);
            return Err(e);
        }
    };

    log::info!("Testing DELETE operation - removing movie ID {}...", id);
    match client.delete_movie(ctx.token(), id).await {
        Ok(()) => {
            ctx.mark_deleted();
            log::info!("✅ DELETE operation successful");
            Ok(())
        }
        Err(e) => {
            log::error!("❌ DELETE operation failed: {}", e);
            Err(e.into())
        }
    }
}

/// Re-read the listing; a deleted movie must no longer appear in it
pub async fn verify_persistence(
    client: &ApiClient,
    ctx: &SessionContext,
) -> Result<(), StepError> {
    log::info!("Verifying data persistence...");

    let movies = match read_movies(client).await {
        Ok(movies) => movies,
        Err(e) => {
            log::error!("❌ Data persistence failed - cannot read movies after operations");
            return Err(e);
        }
    };

    if let Some(deleted) = ctx.deleted_movie_id() {
        if movies.iter().any(|m| m.movie_id == Some(deleted)) {
            log::error!(
                "❌ Data persistence failed - deleted movie {} is still listed",
                deleted
            );
            return Err(StepError::StillPresent(deleted));
        }
        log::info!("✅ Data persistence verified - movie {} is gone", deleted);
    } else {
        log::info!("✅ Data persistence verified - movies are still accessible");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId, title: &str) -> Movie {
        Movie {
            movie_id: Some(id),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_find_test_movie_first_match_wins() {
        let movies = vec![
            movie(1, "Inception"),
            movie(7, "Test Movie 1700000000"),
            movie(9, "Test Movie 1700000005"),
        ];
        assert_eq!(find_test_movie(&movies, "Test Movie"), Some(7));
    }

    #[test]
    fn test_find_test_movie_skips_entries_without_id() {
        let movies = vec![
            Movie {
                movie_id: None,
                title: "Test Movie 1".to_string(),
            },
            movie(3, "Test Movie 2"),
        ];
        assert_eq!(find_test_movie(&movies, "Test Movie"), Some(3));
    }

    #[test]
    fn test_find_test_movie_none() {
        let movies = vec![movie(1, "Updated Test Movie 5"), movie(2, "The Matrix")];
        assert_eq!(find_test_movie(&movies, "Test Movie"), None);
        assert_eq!(find_test_movie(&[], "Test Movie"), None);
    }

    #[test]
    fn test_no_test_movie_is_skip() {
        assert!(StepError::NoTestMovie.is_skip());
        assert!(!StepError::StillPresent(3).is_skip());
    }

    #[tokio::test]
    async fn test_failed_lookup_read_is_skip() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/public/movies"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let config = VerifyConfig {
            base_url: format!("{}/api", server.uri()),
            ..VerifyConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        let mut ctx = SessionContext::default();

        let err = resolve_test_movie(&client, &config, &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, StepError::LookupFailed(_)));
        assert!(err.is_skip());
        assert!(err.to_string().contains("500"));
    }
}
