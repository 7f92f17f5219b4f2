//! Hosted backend REST client
//!
//! Thin wrapper over the backend's PostgREST-style table API and its auth
//! endpoint. Rows come back as raw JSON; `rows` turns them into entities.

use futures::future::try_join_all;
use reqwest::{header, Client, Response};
use serde::Deserialize;
use serde_json::Value;
use urlencoding::encode;

use crate::error::BackendError;

/// A filter in PostgREST syntax, e.g. `("recipient_id", "eq.abc")`
pub type Filter = (String, String);

/// Build an `eq.` filter
pub fn eq(column: &str, value: &str) -> Filter {
    (column.to_string(), format!("eq.{}", value))
}

/// Build an `in.(...)` filter. Values are double-quoted so ids containing
/// commas or parentheses survive.
pub fn in_list<'a>(column: &str, values: impl IntoIterator<Item = &'a str>) -> Filter {
    let quoted: Vec<String> = values
        .into_iter()
        .map(|v| format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    (column.to_string(), format!("in.({})", quoted.join(",")))
}

/// User record returned by the auth endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
}

pub struct BackendClient {
    http: Client,
    base_url: String,
    anon_key: String,
    read_key: String,
}

impl BackendClient {
    pub fn new(base_url: String, anon_key: String, read_key: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            read_key,
        }
    }

    fn rest_url(&self, table: &str, params: &[Filter]) -> String {
        let query: Vec<String> = params
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect();

        if query.is_empty() {
            format!("{}/rest/v1/{}", self.base_url, encode(table))
        } else {
            format!(
                "{}/rest/v1/{}?{}",
                self.base_url,
                encode(table),
                query.join("&")
            )
        }
    }

    fn table_request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.read_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.read_key))
    }

    async fn check(&self, response: Response) -> Result<Response, BackendError> {
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else if status.as_u16() == 401 {
            Err(BackendError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(BackendError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(BackendError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn rows(&self, response: Response) -> Result<Vec<Value>, BackendError> {
        let response = self.check(response).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| BackendError::Deserialization(e.to_string()))?;

        match body {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => Err(BackendError::Deserialization(format!(
                "expected a JSON array of rows, got {}",
                type_name(&other)
            ))),
        }
    }

    /// `GET /rest/v1/{table}` with the given select, filters and modifiers
    pub async fn select(&self, table: &str, params: &[Filter]) -> Result<Vec<Value>, BackendError> {
        let url = self.rest_url(table, params);
        tracing::trace!(%url, "Backend select");

        let resp = self
            .table_request(reqwest::Method::GET, url)
            .send()
            .await?;

        self.rows(resp).await
    }

    /// Exact row count for the filters, read from the `Content-Range` header
    pub async fn count(&self, table: &str, filters: &[Filter]) -> Result<i64, BackendError> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend_from_slice(filters);
        let url = self.rest_url(table, &params);

        let resp = self
            .table_request(reqwest::Method::HEAD, url)
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let resp = self.check(resp).await?;

        resp.headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| {
                BackendError::Deserialization("missing or malformed Content-Range".to_string())
            })
    }

    /// Exact count of rows whose `column` equals each value, in input order.
    /// One HEAD per value, issued concurrently.
    pub async fn count_each<'a>(
        &self,
        table: &str,
        column: &str,
        values: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<i64>, BackendError> {
        try_join_all(values.into_iter().map(|value| {
            let filters = [eq(column, value)];
            async move { self.count(table, &filters).await }
        }))
        .await
    }

    /// `PATCH /rest/v1/{table}`, returning the updated rows
    pub async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        changes: &Value,
    ) -> Result<Vec<Value>, BackendError> {
        let url = self.rest_url(table, filters);

        let resp = self
            .table_request(reqwest::Method::PATCH, url)
            .header("Prefer", "return=representation")
            .json(changes)
            .send()
            .await?;

        self.rows(resp).await
    }

    /// Look up the user an access token belongs to.
    /// Invalid or expired tokens give `Ok(None)`.
    pub async fn auth_user(&self, access_token: &str) -> Result<Option<AuthUser>, BackendError> {
        let resp = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
            .send()
            .await?;

        if matches!(resp.status().as_u16(), 401 | 403) {
            return Ok(None);
        }

        let resp = self.check(resp).await?;
        let user = resp
            .json()
            .await
            .map_err(|e| BackendError::Deserialization(e.to_string()))?;
        Ok(Some(user))
    }
}

/// Total from a `Content-Range` value such as `0-24/3573` or `*/0`
pub fn parse_content_range_total(value: &str) -> Option<i64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
