use crate::api::models::{AuthorIndex, Poem, PoemsResponse, StatusEnvelope, TitleIndex};
use crate::core::actions::PoetrySource;
use crate::core::query::{RequestPath, author_list_path, title_list_path};
use crate::error::ApiError;
use crate::utils::error_helpers::*;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://poetrydb.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("poetrydb-cli/", env!("CARGO_PKG_VERSION"));

/// Single-shot PoetryDB client: one GET per call, no retry, no cache.
#[derive(Debug, Clone)]
pub struct PoetryClient {
    client: Client,
    pub base_url: String,
    timeout_secs: u64,
}

impl PoetryClient {
    // Create client with default settings
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: String, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| convert_request_error(e, "client_init", timeout_secs))?;

        Ok(PoetryClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn build_request(&self, method: Method, path: &RequestPath) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// GET `path` and decode the body as JSON.
    pub async fn get_json<T>(&self, path: &RequestPath) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let endpoint = path.as_str();
        tracing::debug!(base_url = %self.base_url, endpoint, "GET");

        let response = self
            .build_request(Method::GET, path)
            .send()
            .await
            .map_err(|e| convert_request_error(e, endpoint, self.timeout_secs))?;

        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| convert_request_error(e, endpoint, self.timeout_secs))?;
            serde_json::from_str::<T>(&body).map_err(|e| convert_json_error(e, endpoint))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            match status.as_u16() {
                408 | 504 => Err(convert_timeout_error(endpoint, self.timeout_secs)),
                _ => Err(ApiError::Http {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    message: error_text,
                }),
            }
        }
    }

    /// Poems for a search or random path.
    /// A not-found envelope means no matches, whatever HTTP status carried it.
    pub async fn poems(&self, path: &RequestPath) -> Result<Vec<Poem>, ApiError> {
        let response = match self.get_json::<PoemsResponse>(path).await {
            Ok(response) => response,
            Err(ApiError::Http { message, .. })
                if StatusEnvelope::from_body(&message).is_some_and(|e| e.is_not_found()) =>
            {
                tracing::debug!(endpoint = path.as_str(), "no poems matched");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        match response {
            PoemsResponse::Poems(poems) => {
                tracing::debug!(endpoint = path.as_str(), count = poems.len(), "decoded poems");
                Ok(poems)
            }
            PoemsResponse::Status(envelope) if envelope.is_not_found() => {
                tracing::debug!(endpoint = path.as_str(), "no poems matched");
                Ok(Vec::new())
            }
            PoemsResponse::Status(envelope) => Err(ApiError::Http {
                status: envelope.status,
                endpoint: path.to_string(),
                message: envelope.reason,
            }),
        }
    }

    pub async fn authors(&self) -> Result<Vec<String>, ApiError> {
        let index: AuthorIndex = self.get_json(&author_list_path()).await?;
        Ok(index.authors)
    }

    pub async fn titles(&self) -> Result<Vec<String>, ApiError> {
        let index: TitleIndex = self.get_json(&title_list_path()).await?;
        Ok(index.titles)
    }
}

#[async_trait]
impl PoetrySource for PoetryClient {
    async fn fetch_poems(&self, path: &RequestPath) -> Result<Vec<Poem>, ApiError> {
        self.poems(path).await
    }

    async fn fetch_authors(&self) -> Result<Vec<String>, ApiError> {
        self.authors().await
    }

    async fn fetch_titles(&self) -> Result<Vec<String>, ApiError> {
        self.titles().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::{SearchCriteria, SearchField, random_path, search_path};

    #[test]
    fn test_client_creation() {
        let client = PoetryClient::new(DEFAULT_BASE_URL.to_string());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().timeout_secs(), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_build_search_request() {
        let client =
            PoetryClient::new("http://example.test".to_string()).expect("client creation failed");
        let criteria = SearchCriteria::new()
            .with(SearchField::Author, "poe")
            .with(SearchField::Title, "raven");
        let path = search_path(&criteria).expect("valid criteria");

        let built_request = client
            .build_request(Method::GET, &path)
            .build()
            .expect("Failed to build request");

        assert_eq!(
            built_request.url().as_str(),
            "http://example.test/author,title/poe;raven"
        );
        assert_eq!(built_request.method(), Method::GET);
    }

    #[test]
    fn test_build_random_request() {
        let client =
            PoetryClient::new("http://example.test".to_string()).expect("client creation failed");
        let path = random_path(Some(2)).expect("valid count");
        let built_request = client
            .build_request(Method::GET, &path)
            .build()
            .expect("Failed to build request");
        assert_eq!(built_request.url().as_str(), "http://example.test/random/2");
    }

    #[test]
    fn test_base_url_trailing_slash_removed() {
        let client =
            PoetryClient::new("http://example.test/".to_string()).expect("client creation failed");
        assert_eq!(client.base_url, "http://example.test");
    }
}
