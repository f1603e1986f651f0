//! Transport seam for the remote `users` collection.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::domain::{FormDraft, UserId, UserRecord};
use tracing::debug;
use url::Url;

use crate::{config::Settings, error::TransportError};

/// The four calls the console makes against the users collection.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserRecord>, TransportError>;
    /// `Ok(None)` means the server accepted the draft but did not echo the record back.
    async fn create_user(&self, draft: &FormDraft)
        -> Result<Option<UserRecord>, TransportError>;
    async fn update_user(
        &self,
        id: UserId,
        draft: &FormDraft,
    ) -> Result<Option<UserRecord>, TransportError>;
    async fn delete_user(&self, id: UserId) -> Result<(), TransportError>;
}

/// Stand-in used when no endpoint could be configured; every call fails.
pub struct MissingUserDirectory {
    reason: String,
}

impl MissingUserDirectory {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable(&self) -> TransportError {
        TransportError::Unavailable(self.reason.clone())
    }
}

#[async_trait]
impl UserDirectory for MissingUserDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, TransportError> {
        Err(self.unavailable())
    }

    async fn create_user(
        &self,
        _draft: &FormDraft,
    ) -> Result<Option<UserRecord>, TransportError> {
        Err(self.unavailable())
    }

    async fn update_user(
        &self,
        _id: UserId,
        _draft: &FormDraft,
    ) -> Result<Option<UserRecord>, TransportError> {
        Err(self.unavailable())
    }

    async fn delete_user(&self, _id: UserId) -> Result<(), TransportError> {
        Err(self.unavailable())
    }
}

/// Resolves `<base>/users`, dropping any trailing slashes, query or fragment on the base.
pub fn users_endpoint(base_url: &str) -> Result<Url, TransportError> {
    let raw = base_url.trim();
    let invalid = |reason: String| TransportError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    if raw.is_empty() {
        return Err(invalid("url cannot be empty".into()));
    }
    let mut url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "unsupported scheme '{}', expected http or https",
            url.scheme()
        )));
    }

    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/users"));
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

pub struct HttpUserDirectory {
    http: Client,
    users_url: String,
}

impl HttpUserDirectory {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let users_url = users_endpoint(base_url)?.to_string();

        let mut builder = Client::builder().user_agent(format!(
            "user-console/{}",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(TransportError::ClientBuild)?;

        Ok(Self { http, users_url })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, TransportError> {
        Self::new(&settings.api_url, settings.request_timeout())
    }

    pub fn users_url(&self) -> &str {
        &self.users_url
    }

    fn user_url(&self, id: UserId) -> String {
        format!("{}/{}", self.users_url, id)
    }

    async fn send(
        &self,
        method: &'static str,
        url: &str,
        request: RequestBuilder,
    ) -> Result<Response, TransportError> {
        debug!(method, url = %url, "sending user directory request");

        let response = request
            .send()
            .await
            .map_err(|source| TransportError::Request {
                method,
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(TransportError::Status {
            method,
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(
        method: &'static str,
        url: &str,
        response: Response,
    ) -> Result<T, TransportError> {
        response
            .json::<T>()
            .await
            .map_err(|source| TransportError::Decode {
                method,
                url: url.to_string(),
                source,
            })
    }

    /// Mutations already succeeded once the status is 2xx; an empty or foreign body
    /// only loses the echoed record.
    async fn decode_echo(
        method: &'static str,
        url: &str,
        response: Response,
    ) -> Option<UserRecord> {
        match response.json::<UserRecord>().await {
            Ok(record) => Some(record),
            Err(err) => {
                debug!(method, url = %url, error = %err, "response carried no user record");
                None
            }
        }
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, TransportError> {
        let url = &self.users_url;
        let response = self.send("GET", url, self.http.get(url)).await?;
        Self::decode("GET", url, response).await
    }

    async fn create_user(
        &self,
        draft: &FormDraft,
    ) -> Result<Option<UserRecord>, TransportError> {
        let url = &self.users_url;
        let response = self
            .send("POST", url, self.http.post(url).json(draft))
            .await?;
        Ok(Self::decode_echo("POST", url, response).await)
    }

    async fn update_user(
        &self,
        id: UserId,
        draft: &FormDraft,
    ) -> Result<Option<UserRecord>, TransportError> {
        let url = self.user_url(id);
        let response = self
            .send("PUT", &url, self.http.put(&url).json(draft))
            .await?;
        Ok(Self::decode_echo("PUT", &url, response).await)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), TransportError> {
        let url = self.user_url(id);
        self.send("DELETE", &url, self.http.delete(&url)).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/directory_tests.rs"]
mod tests;
