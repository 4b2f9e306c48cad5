use std::collections::HashMap;

use crate::logger;
use crate::models::{
    Card, CardFilter, LoginResponse, Paginated, SignupRequest, SignupResponse, Subject, Subtopic,
    Topic,
};
use serde::de::DeserializeOwned;

pub mod error;

pub use error::ApiError;
use error::error_message;

pub const DEFAULT_BASE_URL: &str = "https://api.class-fi.com/";

/// Client for the Class-Fi REST backend.
///
/// Holds the bearer token (sourced from the session store by the caller)
/// and an in-memory cache of GET responses keyed by path + query. There is
/// no retry or backoff; a failed request is surfaced once and the user can
/// try again.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    cache: HashMap<String, serde_json::Value>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different origin. Used by tests to talk to a
    /// local mock server.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            cache: HashMap::new(),
        }
    }

    /// Swap the bearer token. Cached responses belong to the previous
    /// identity, so the cache is dropped whenever the token changes.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
        self.cache.clear();
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = format!("{}/organization/users/login/", self.base_url);
        let body = serde_json::json!({ "email": email, "password": password });
        let resp = self.http.post(&url).json(&body).send().await?;
        let resp = check_response(resp).await?;
        Ok(resp.json().await?)
    }

    pub async fn signup(&self, payload: &SignupRequest) -> Result<SignupResponse, ApiError> {
        let url = format!("{}/organization/users/signup/", self.base_url);
        let resp = self.http.post(&url).json(payload).send().await?;
        let resp = check_response(resp).await?;
        Ok(resp.json().await?)
    }

    pub async fn get_subjects(&mut self) -> Result<Paginated<Subject>, ApiError> {
        self.get_cached("education/subjects/").await
    }

    pub async fn get_topics(&mut self, subject_id: u64) -> Result<Vec<Topic>, ApiError> {
        self.get_cached(&format!("education/topics/?subject_id={}", subject_id))
            .await
    }

    pub async fn get_subtopics(&mut self, topic_id: u64) -> Result<Vec<Subtopic>, ApiError> {
        self.get_cached(&format!("education/subtopics/?topic_id={}", topic_id))
            .await
    }

    pub async fn get_cards(&mut self, filter: CardFilter) -> Result<Paginated<Card>, ApiError> {
        let mut query = Vec::new();
        if let Some(id) = filter.subject_id {
            query.push(format!("subject_id={}", id));
        }
        if let Some(id) = filter.topic_id {
            query.push(format!("topic_id={}", id));
        }
        if let Some(id) = filter.subtopic_id {
            query.push(format!("subtopic_id={}", id));
        }
        query.push("isOnline=true".to_string());
        self.get_cached(&format!("education/cards/?{}", query.join("&")))
            .await
    }

    /// GET `path_and_query`, serving from the cache when the same request
    /// was already answered under the current token.
    async fn get_cached<T: DeserializeOwned>(&mut self, path_and_query: &str) -> Result<T, ApiError> {
        if let Some(cached) = self.cache.get(path_and_query) {
            return Ok(serde_json::from_value(cached.clone())?);
        }

        let url = format!("{}/{}", self.base_url, path_and_query);
        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = check_response(request.send().await?).await?;
        let value: serde_json::Value = resp.json().await?;
        let parsed = serde_json::from_value(value.clone())?;
        self.cache.insert(path_and_query.to_string(), value);
        Ok(parsed)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Map non-success responses to [`ApiError::Api`] with the server-provided
/// message extracted from the body.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        logger::log(&format!("API error {}: {}", status.as_u16(), body));
        return Err(ApiError::Api {
            status: status.as_u16(),
            message: error_message(status.as_u16(), &body),
        });
    }
    Ok(resp)
}
