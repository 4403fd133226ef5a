//! Client for the remote WHOIS directory API.
//!
//! Every call is a single attempt: no retries and no backoff. A timeout is
//! only applied when one is configured.

use std::time::Duration;

use axum::body::Bytes;
use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::{Envelope, Person, Squad};

/// Which slice of the person collection to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonQuery {
    /// Everyone, sorted by name on the remote side
    SortedByName,
    /// Only members of one squad
    Squad(i64),
}

impl PersonQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            PersonQuery::SortedByName => vec![("sort", "name".to_string())],
            PersonQuery::Squad(squad_id) => {
                vec![("filter[squad_id][_eq]", squad_id.to_string())]
            }
        }
    }
}

/// HTTP client bound to one WHOIS API base URL.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    http: Client,
    base_url: String,
}

impl WhoisClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GET /person with either the name sort or a squad filter.
    pub async fn list_persons(&self, query: PersonQuery) -> Result<Vec<Person>, AppError> {
        let url = self.url("person");
        let request = self.http.get(&url).query(&query.params());
        let envelope: Envelope<Vec<Person>> = self.fetch_json(Method::GET, &url, request).await?;
        Ok(envelope.data)
    }

    /// GET /person/:id
    pub async fn get_person(&self, id: i64) -> Result<Person, AppError> {
        let url = self.url(&format!("person/{}", id));
        let request = self.http.get(&url);
        let envelope: Envelope<Person> = self.fetch_json(Method::GET, &url, request).await?;
        Ok(envelope.data)
    }

    /// GET /squad
    pub async fn list_squads(&self) -> Result<Vec<Squad>, AppError> {
        let url = self.url("squad");
        let request = self.http.get(&url);
        let envelope: Envelope<Vec<Squad>> = self.fetch_json(Method::GET, &url, request).await?;
        Ok(envelope.data)
    }

    /// PATCH /person/:id replacing only the `custom` field.
    ///
    /// Returns whatever the API answered; an empty body is reported as `null`.
    pub async fn patch_person_custom(&self, id: i64, custom: &str) -> Result<Value, AppError> {
        let url = self.url(&format!("person/{}", id));
        let body = serde_json::to_vec(&json!({ "custom": custom }))?;
        let request = self
            .http
            .patch(&url)
            .header(header::CONTENT_TYPE, "application/json; charset=UTF-8")
            .body(body);

        let bytes = self.send(Method::PATCH, &url, request).await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        request: RequestBuilder,
    ) -> Result<T, AppError> {
        let bytes = self.send(method, url, request).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        request: RequestBuilder,
    ) -> Result<Bytes, AppError> {
        tracing::debug!("WHOIS {} {}", method, url);

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("WHOIS {} {} returned 404", method, url)));
        }
        if !status.is_success() {
            tracing::error!("WHOIS {} {} returned {}", method, url, status);
            return Err(AppError::Upstream(format!(
                "WHOIS {} {} returned {}",
                method, url, status
            )));
        }

        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params() {
        assert_eq!(
            PersonQuery::SortedByName.params(),
            vec![("sort", "name".to_string())]
        );
        assert_eq!(
            PersonQuery::Squad(7).params(),
            vec![("filter[squad_id][_eq]", "7".to_string())]
        );
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = WhoisClient::new("http://localhost:9000/items/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000/items");
        assert_eq!(client.url("squad"), "http://localhost:9000/items/squad");
    }
}
