//! Remote table backend for the hosted database's REST interface
//!
//! Tables are reached through a PostgREST-style endpoint:
//! `GET {base_url}/rest/v1/{table}?select=...`, authenticated with the
//! project's API key sent both as `apikey` and as a bearer token.

use crate::config::RemoteConfig;
use crate::core::entity::Entity;
use crate::core::error::{CatalogError, CatalogResult};
use crate::core::service::{CatalogSource, KeyValueStore};
use crate::entities::ArtisanRow;
use crate::entities::artisan::Artisan;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// A backend row type that maps into a catalog entity
pub trait RemoteRow: DeserializeOwned + Send + 'static {
    type Entity: Entity;

    /// Table queried for the collection
    const TABLE: &'static str;

    /// PostgREST `select` expression, including embedded joins
    const SELECT: &'static str;

    /// Column ordering, e.g. `created_at.desc`
    const ORDER: Option<&'static str> = None;

    /// Convert the row; `None` drops rows that are not entities of this type
    fn into_entity(self) -> Option<Self::Entity>;
}

impl RemoteRow for ArtisanRow {
    type Entity = Artisan;

    const TABLE: &'static str = "users";
    const SELECT: &'static str = "id,name,email,avatar_url,created_at,updated_at,\
        artisan_profiles(bio,location,years_experience,crafts,accepts_custom_orders,\
        featured,rating,reviews_count,products_count)";
    const ORDER: Option<&'static str> = Some("created_at.desc");

    fn into_entity(self) -> Option<Artisan> {
        self.into_artisan()
    }
}

/// Shared HTTP client configured for one project
#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build a client from configuration, reading the key from the environment
    pub fn from_config(config: &RemoteConfig) -> CatalogResult<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            CatalogError::config(format!("environment variable {} is not set", config.api_key_env))
        })?;
        Ok(Self::new(config.base_url.clone(), api_key))
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

/// Catalog source fetching rows of `R` and mapping them into entities
pub struct RemoteTableSource<R> {
    client: RemoteClient,
    _row: PhantomData<fn() -> R>,
}

impl<R: RemoteRow> RemoteTableSource<R> {
    pub fn new(client: RemoteClient) -> Self {
        Self {
            client,
            _row: PhantomData,
        }
    }
}

#[async_trait]
impl<R: RemoteRow> CatalogSource<R::Entity> for RemoteTableSource<R> {
    async fn list(&self) -> CatalogResult<Vec<R::Entity>> {
        let source = <R::Entity as Entity>::resource_name();
        let mut query = vec![("select", R::SELECT)];
        if let Some(order) = R::ORDER {
            query.push(("order", order));
        }

        let response = self
            .client
            .request(reqwest::Method::GET, R::TABLE)
            .query(&query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CatalogError::fetch_failed(source, e))?;

        let rows: Vec<R> = response
            .json()
            .await
            .map_err(|e| CatalogError::fetch_failed(source, e))?;

        let total = rows.len();
        let items: Vec<_> = rows.into_iter().filter_map(R::into_entity).collect();
        tracing::debug!(source, rows = total, items = items.len(), "remote catalog fetched");
        Ok(items)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct KeyValueRow {
    key: String,
    value: Value,
}

/// Key-value store persisted in a two-column remote table (`key`, `value`)
#[derive(Clone)]
pub struct RemoteTableStore {
    client: RemoteClient,
    table: String,
}

impl RemoteTableStore {
    pub fn new(client: RemoteClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl KeyValueStore for RemoteTableStore {
    async fn get(&self, key: &str) -> CatalogResult<Option<Value>> {
        let filter = format!("eq.{}", key);
        let rows: Vec<KeyValueRow> = self
            .client
            .request(reqwest::Method::GET, &self.table)
            .query(&[("select", "key,value"), ("key", filter.as_str())])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(CatalogError::storage)?
            .json()
            .await
            .map_err(CatalogError::storage)?;

        Ok(rows.into_iter().next().map(|row| row.value))
    }

    async fn set(&self, key: &str, value: Value) -> CatalogResult<()> {
        let row = KeyValueRow {
            key: key.to_string(),
            value,
        };
        self.client
            .request(reqwest::Method::POST, &self.table)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[row])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(CatalogError::storage)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> CatalogResult<()> {
        self.client
            .request(reqwest::Method::DELETE, &self.table)
            .query(&[("key", format!("eq.{}", key))])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(CatalogError::storage)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let client = RemoteClient::new("https://project.example.co/", "anon");
        assert_eq!(
            client.table_url("users"),
            "https://project.example.co/rest/v1/users"
        );
    }

    #[test]
    fn test_missing_key_env_is_config_error() {
        let config = RemoteConfig {
            base_url: "https://project.example.co".into(),
            api_key_env: "CATALOG_TEST_UNSET_REMOTE_KEY".into(),
            store_table: "kv_store".into(),
        };
        let err = RemoteClient::from_config(&config).err().unwrap();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_fetch_failure() {
        let client = RemoteClient::new("http://127.0.0.1:9", "anon");
        let source: RemoteTableSource<ArtisanRow> = RemoteTableSource::new(client);
        let err = source.list().await.unwrap_err();
        assert!(err.is_retryable());
    }
}
