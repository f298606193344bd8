//! FlixMate REST API client
//!
//! Thin wrapper over `reqwest` covering the endpoints the CRUD verification
//! touches. The cookie store persists across calls; the bearer token is passed
//! per request by the caller.

use super::types::{
    movie_id_from_body, HealthStatus, LoginRequest, LoginResponse, Movie, MovieId, MoviePayload,
};
use super::ApiError;
use crate::utils::config::VerifyConfig;
use reqwest::{Method, RequestBuilder, Response};
use std::time::Duration;

/// HTTP client bound to one API root
pub struct ApiClient {
    /// Base URL including the `/api` prefix (e.g., "http://localhost:8080/api")
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &VerifyConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            base_url: config.api_root().to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let req = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    /// `GET /health/database`; requires 200 and a `status` field
    pub async fn database_health(&self) -> Result<HealthStatus, ApiError> {
        let resp = self.request(Method::GET, "/health/database", None).send().await?;
        let body = expect_status(resp, &[200]).await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;

        let status = match value.get("status") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => {
                return Err(ApiError::Rejected(
                    "health response has no status field".to_string(),
                ))
            }
        };

        Ok(HealthStatus {
            status,
            movie_count: value.get("movieCount").and_then(|c| c.as_u64()),
        })
    }

    /// `POST /auth/login`; returns the bearer token
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let resp = self
            .request(Method::POST, "/auth/login", None)
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let body = expect_status(resp, &[200]).await?;
        let login: LoginResponse = serde_json::from_str(&body)?;

        match (login.success, login.token) {
            (true, Some(token)) if !token.is_empty() => Ok(token),
            (true, _) => Err(ApiError::Rejected("login response has no token".to_string())),
            (false, _) => Err(ApiError::Rejected("login was not successful".to_string())),
        }
    }

    /// `GET /public/movies` (no authentication)
    pub async fn list_movies(&self) -> Result<Vec<Movie>, ApiError> {
        let resp = self.request(Method::GET, "/public/movies", None).send().await?;
        let body = expect_status(resp, &[200]).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// `POST /admin/movies`; returns the new id when the response carries one
    pub async fn create_movie(
        &self,
        token: Option<&str>,
        movie: &MoviePayload,
    ) -> Result<Option<MovieId>, ApiError> {
        let resp = self
            .request(Method::POST, "/admin/movies", token)
            .json(movie)
            .send()
            .await?;
        let body = expect_status(resp, &[200, 201]).await?;

        // A non-JSON body is still a successful create, just without an id
        Ok(serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .as_ref()
            .and_then(movie_id_from_body))
    }

    /// `PUT /admin/movies/{id}`
    pub async fn update_movie(
        &self,
        token: Option<&str>,
        id: MovieId,
        movie: &MoviePayload,
    ) -> Result<(), ApiError> {
        let resp = self
            .request(Method::PUT, &format!("/admin/movies/{}", id), token)
            .json(movie)
            .send()
            .await?;
        expect_status(resp, &[200]).await?;
        Ok(())
    }

    /// `DELETE /admin/movies/{id}`
    pub async fn delete_movie(&self, token: Option<&str>, id: MovieId) -> Result<(), ApiError> {
        let resp = self
            .request(Method::DELETE, &format!("/admin/movies/{}", id), token)
            .send()
            .await?;
        expect_status(resp, &[200]).await?;
        Ok(())
    }
}

/// Read the body, failing with the status and body when the status is not accepted
async fn expect_status(resp: Response, accepted: &[u16]) -> Result<String, ApiError> {
    let status = resp.status().as_u16();
    let body = resp.text().await?;
    if accepted.contains(&status) {
        Ok(body)
    } else {
        Err(ApiError::UnexpectedStatus { status, body })
    }
}
