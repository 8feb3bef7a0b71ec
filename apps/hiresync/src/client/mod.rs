//! Resource client, the single point of network I/O for every screen.
//!
//! RULE: screens and the API layer never build `reqwest` requests themselves.
//! Authentication, content negotiation, body decoding and failure
//! classification all happen here.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::ClientError;
use crate::fetch::fetch_first_ok;

pub mod body;
pub mod credentials;

pub use body::ResponseBody;
pub use credentials::{CredentialProvider, NoCredentials, StaticToken, StorageTokenProvider};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Payload of an outgoing request.
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    None,
    Json(Value),
    /// Sent without an explicit `Content-Type`; reqwest supplies the boundary.
    Multipart(Form),
}

#[derive(Debug)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: RequestBody::None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn json(method: Method, body: Value) -> Self {
        Self {
            method,
            body: RequestBody::Json(body),
            ..Self::default()
        }
    }

    pub fn multipart(method: Method, form: Form) -> Self {
        Self {
            method,
            body: RequestBody::Multipart(form),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Thin accessor over the REST backend.
#[derive(Clone)]
pub struct ResourceClient {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl ResourceClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, credentials, None)
    }

    /// `timeout: None` leaves requests unbounded.
    pub fn with_timeout(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(base_url));
        }
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::transport(&base_url, e))?;
        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URLs pass through; relative paths are joined onto the base URL.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issues one request and returns the classified body.
    /// Any non-2xx status becomes `ClientError::Http`.
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseBody, ClientError> {
        let url = self.url_for(path);
        let request_id = Uuid::new_v4();
        let RequestOptions {
            method,
            mut headers,
            body: payload,
        } = options;
        if matches!(payload, RequestBody::Multipart(_)) {
            // The boundary header from reqwest must be the only one.
            headers.remove(CONTENT_TYPE);
        }

        debug!("{method} {url} (request {request_id})");

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(REQUEST_ID_HEADER, request_id.to_string());

        let has_content_type = headers.contains_key(CONTENT_TYPE);
        builder = builder.headers(headers);

        builder = match payload {
            RequestBody::Multipart(form) => builder.multipart(form),
            other => {
                if !has_content_type {
                    builder = builder.header(CONTENT_TYPE, "application/json");
                }
                match other {
                    RequestBody::Json(value) => builder.body(value.to_string()),
                    _ => builder,
                }
            }
        };

        if let Some(token) = self.credentials.bearer_token() {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::transport(&url, e))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(ResponseBody::Empty);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let raw = response
            .text()
            .await
            .map_err(|e| ClientError::transport(&url, e))?;
        let decoded = ResponseBody::decode(&content_type, raw.clone());

        if !status.is_success() {
            let message = body::failure_message(status.as_u16(), &url, &raw, &decoded);
            warn!("{method} {url} failed with {status}: {message}");
            return Err(ClientError::Http {
                status: status.as_u16(),
                url,
                message,
            });
        }

        Ok(decoded)
    }

    /// Like [`request`](Self::request) but deserializes the JSON body.
    /// An empty body deserializes from `null`, so `()` and `Option<T>` accept it.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        let url = self.url_for(path);
        let value = match self.request(path, options).await? {
            ResponseBody::Json(value) => value,
            ResponseBody::Empty => Value::Null,
            ResponseBody::Text(text) => {
                return Err(ClientError::UnexpectedBody {
                    url,
                    snippet: body::snippet(&text),
                })
            }
        };
        serde_json::from_value(value).map_err(|source| ClientError::Decode { url, source })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request_json(path, RequestOptions::get()).await
    }

    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let value = to_json(path, body)?;
        self.request_json(path, RequestOptions::json(Method::PUT, value))
            .await
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let value = to_json(path, body)?;
        self.request_json(path, RequestOptions::json(Method::POST, value))
            .await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ClientError> {
        self.request_json(path, RequestOptions::multipart(Method::POST, form))
            .await
    }

    /// GETs each path in order and returns the first success; see [`fetch_first_ok`].
    pub async fn get_first_ok<T: DeserializeOwned>(&self, paths: &[&str]) -> Result<T, ClientError> {
        let paths: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
        fetch_first_ok(
            paths
                .into_iter()
                .map(|path| move || async move { self.get_json::<T>(&path).await }),
        )
        .await
    }
}

fn to_json<B: Serialize + ?Sized>(path: &str, body: &B) -> Result<Value, ClientError> {
    serde_json::to_value(body).map_err(|source| ClientError::Decode {
        url: path.to_string(),
        source,
    })
}
