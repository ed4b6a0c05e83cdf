//! [`UserGateway`] over HTTP with `reqwest`.
//!
//! | Operation | Request | Status mapping |
//! |-----------|---------|----------------|
//! | list | `GET {url}` | non-2xx → `Transport` |
//! | create | `POST {url}` + draft JSON | non-2xx → `Transport` |
//! | update | `PUT {url}/{id}` + draft JSON | 404 → `NotFound`, other non-2xx → `Transport` |
//! | delete | `DELETE {url}/{id}` | 404 → `NotFound`, other non-2xx → `Transport` |
//!
//! A `null` list body counts as an empty collection.

use reqwest::{Client, Response, StatusCode, Url};
use store::{DraftForm, SyncError, UserGateway, UserId, UserRecord};
use tracing::debug;

use crate::config::ApiConfig;

/// Gateway to the remote user collection.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    collection_url: String,
}

impl HttpGateway {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            collection_url: config.collection_url(),
        }
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    /// URL of one record. The id is pushed as a single percent-encoded path
    /// segment, so `/`, `?` and `#` inside it stay part of the id.
    fn record_url(&self, id: &UserId) -> Result<Url, SyncError> {
        let mut url = Url::parse(&self.collection_url).map_err(SyncError::transport)?;
        url.path_segments_mut()
            .map_err(|()| SyncError::transport("collection URL cannot hold a path"))?
            .push(id.as_str());
        Ok(url)
    }
}

/// Map a response status onto the error taxonomy. `target` is the id the
/// request addressed, which enables the 404 → `NotFound` mapping.
async fn check(response: Response, target: Option<&UserId>) -> Result<Response, SyncError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, target) {
        return Err(SyncError::NotFound(id.clone()));
    }
    let text = response.text().await.unwrap_or_default();
    Err(SyncError::Transport(format!("status {status}: {text}")))
}

impl UserGateway for HttpGateway {
    async fn list(&self) -> Result<Vec<UserRecord>, SyncError> {
        debug!(url = %self.collection_url, "GET users");
        let response = self
            .client
            .get(&self.collection_url)
            .send()
            .await
            .map_err(SyncError::transport)?;
        let records: Option<Vec<UserRecord>> = check(response, None)
            .await?
            .json()
            .await
            .map_err(|e| SyncError::Transport(format!("invalid response: {e}")))?;
        Ok(records.unwrap_or_default())
    }

    async fn create(&self, draft: &DraftForm) -> Result<UserRecord, SyncError> {
        debug!(url = %self.collection_url, "POST user");
        let response = self
            .client
            .post(&self.collection_url)
            .json(draft)
            .send()
            .await
            .map_err(SyncError::transport)?;
        check(response, None)
            .await?
            .json()
            .await
            .map_err(|e| SyncError::Transport(format!("invalid response: {e}")))
    }

    async fn update(&self, id: &UserId, draft: &DraftForm) -> Result<UserRecord, SyncError> {
        let url = self.record_url(id)?;
        debug!(%url, "PUT user");
        let response = self
            .client
            .put(url)
            .json(draft)
            .send()
            .await
            .map_err(SyncError::transport)?;
        check(response, Some(id))
            .await?
            .json()
            .await
            .map_err(|e| SyncError::Transport(format!("invalid response: {e}")))
    }

    async fn delete(&self, id: &UserId) -> Result<(), SyncError> {
        let url = self.record_url(id)?;
        debug!(%url, "DELETE user");
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(SyncError::transport)?;
        check(response, Some(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_url_escapes_reserved_characters() {
        let gateway = HttpGateway::new(&ApiConfig::new("localhost", 8080, "/api"));

        assert_eq!(
            gateway.record_url(&UserId::from(3)).unwrap().as_str(),
            "http://localhost:8080/api/users/3"
        );
        assert_eq!(
            gateway.record_url(&UserId::from("a/b")).unwrap().as_str(),
            "http://localhost:8080/api/users/a%2Fb"
        );
        assert_eq!(
            gateway.record_url(&UserId::from("x?y#z")).unwrap().as_str(),
            "http://localhost:8080/api/users/x%3Fy%23z"
        );
    }
}
