//! Async client for the Paperless-ngx REST API.
//!
//! [`ApiClient`] is the shared transport: base URL resolution, authentication and
//! status handling. The resource clients (correspondents, tags, documents, tasks)
//! are built on top of it and are usually obtained through [`PaperlessClient`].

pub mod client;
pub mod correspondents;
pub mod documents;
pub mod error;
pub mod import;
pub mod pagination;
pub mod routes;
pub mod tags;
pub mod tasks;

use bytes::Bytes;
use paperless_core::models::DocumentContent;
use paperless_core::{Auth, PaperlessConfig};
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use client::PaperlessClient;
pub use correspondents::CorrespondentClient;
pub use documents::DocumentClient;
pub use error::{PaperlessError, Result};
pub use import::{await_import, TaskPolling};
pub use pagination::paginate;
pub use tags::TagClient;
pub use tasks::{TaskClient, TaskLookup};

pub use tokio_util::sync::CancellationToken;

/// HTTP transport for the Paperless API with configurable auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    auth: Auth,
}

impl ApiClient {
    pub fn new(config: &PaperlessConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| PaperlessError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        Ok(Self {
            client,
            base_url,
            auth: config.auth.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a relative API path (optionally carrying a query) against the base URL.
    pub fn build_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| PaperlessError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// Path and query of a `next`/`previous` link, so the page is fetched from the
    /// configured host even if the server reports another one.
    pub fn relative_path(&self, link: &str) -> Result<String> {
        let url = Url::options()
            .base_url(Some(&self.base_url))
            .parse(link)
            .map_err(|e| PaperlessError::InvalidUrl(format!("{}: {}", link, e)))?;

        Ok(match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        })
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Auth::Token(token) => request.header("Authorization", format!("Token {}", token)),
            Auth::Basic { username, password } => request.basic_auth(username, Some(password)),
        }
    }

    /// Send with auth applied and turn any non-success status into [`PaperlessError::Api`].
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.apply_auth(request).send().await?;
        ensure_success(response).await
    }

    /// GET request. Deserializes the JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path)?;
        let response = self.send(self.client.get(url)).await?;
        decode_json(response).await
    }

    /// GET a single entity. A 404 yields `None`.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = self.build_url(path)?;
        let response = self.apply_auth(self.client.get(url)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = ensure_success(response).await?;
        decode_json(response).await.map(Some)
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.build_url(path)?;
        let response = self.send(self.client.post(url).json(body)).await?;
        decode_json(response).await
    }

    /// PATCH JSON body and deserialize response.
    pub async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.build_url(path)?;
        let response = self.send(self.client.patch(url).json(body)).await?;
        decode_json(response).await
    }

    /// POST multipart form. The raw response is returned since callers need its headers.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Response> {
        let url = self.build_url(path)?;
        self.send(self.client.post(url).multipart(form)).await
    }

    /// DELETE request. Returns Ok(()) on success.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.build_url(path)?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    /// GET a file body along with its content type and file name.
    pub async fn get_bytes(&self, path: &str) -> Result<DocumentContent> {
        let url = self.build_url(path)?;
        let response = self.send(self.client.get(url)).await?;

        let content_type = header_str(response.headers(), CONTENT_TYPE);
        let file_name = header_str(response.headers(), CONTENT_DISPOSITION)
            .and_then(|value| disposition_file_name(&value));
        let content: Bytes = response.bytes().await?;

        Ok(DocumentContent {
            content,
            content_type,
            file_name,
        })
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(PaperlessError::Api {
        status: status.as_u16(),
        body,
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

fn header_str(headers: &HeaderMap, name: reqwest::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// File name from a `Content-Disposition` value. `filename*` wins over `filename`.
fn disposition_file_name(value: &str) -> Option<String> {
    let mut plain = None;
    for param in value.split(';').map(str::trim) {
        if let Some(encoded) = param.strip_prefix("filename*=") {
            let encoded = encoded.rsplit("''").next().unwrap_or(encoded);
            if let Ok(decoded) = urlencoding::decode(encoded) {
                return Some(decoded.into_owned());
            }
        } else if let Some(name) = param.strip_prefix("filename=") {
            plain = Some(name.trim_matches('"').to_string());
        }
    }
    plain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&PaperlessConfig::new(
            base_url,
            Auth::Token("secret".to_string()),
        ))
        .unwrap()
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let api = client("https://example.com/paperless");
        assert_eq!(
            api.build_url("api/tags/?page_size=5").unwrap().as_str(),
            "https://example.com/paperless/api/tags/?page_size=5"
        );
    }

    #[test]
    fn test_relative_path_drops_host() {
        let api = client("https://example.com/paperless/");
        assert_eq!(
            api.relative_path("http://internal:8000/paperless/api/tags/?page=2")
                .unwrap(),
            "/paperless/api/tags/?page=2"
        );
        assert_eq!(
            api.relative_path("/api/tags/").unwrap(),
            "/api/tags/"
        );
    }

    #[test]
    fn test_disposition_file_name() {
        assert_eq!(
            disposition_file_name("attachment; filename=\"invoice.pdf\"").as_deref(),
            Some("invoice.pdf")
        );
        assert_eq!(
            disposition_file_name(
                "inline; filename=\"Rechnung.pdf\"; filename*=utf-8''Rechnung%20M%C3%A4rz.pdf"
            )
            .as_deref(),
            Some("Rechnung März.pdf")
        );
        assert_eq!(disposition_file_name("inline"), None);
    }
}
