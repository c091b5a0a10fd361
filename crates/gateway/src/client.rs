//! HTTP client for the hosted backend: row CRUD, singleton upsert, and
//! object storage uploads. The camelCase/snake_case field mapping crosses
//! here and nowhere else.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, header::CONTENT_TYPE};
use serde_json::{Value, json};
use tokio::sync::watch;
use url::Url;
use utils::casing::{keys_to_camel, keys_to_snake};
use uuid::Uuid;

use crate::{
    auth::Session,
    error::{GatewayError, map_reqwest_error},
    models::{RecordKind, SINGLETON_ID},
    store::{FileStore, RecordGateway, StoredFile},
};

pub struct GatewayClient {
    pub(crate) http: Client,
    pub(crate) base_url: Url,
    pub(crate) anon_key: String,
    pub(crate) bucket: String,
    pub(crate) session: watch::Sender<Option<Session>>,
}

impl GatewayClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(
        base_url: &str,
        anon_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| GatewayError::Config(e.to_string()))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("sekolah-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let (session, _) = watch::channel(None);

        Ok(Self {
            http,
            base_url,
            anon_key: anon_key.into(),
            bucket: bucket.into(),
            session,
        })
    }

    pub(crate) fn join(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path)
            .map_err(|e| GatewayError::Config(e.to_string()))
    }

    fn rest_url(&self, kind: RecordKind) -> Result<Url, GatewayError> {
        self.join(&format!("rest/v1/{}", kind.table()))
    }

    /// Public URL of an uploaded object; no network round-trip involved.
    pub fn public_object_url(&self, object_key: &str) -> Result<String, GatewayError> {
        Ok(self
            .join(&format!(
                "storage/v1/object/public/{}/{}",
                self.bucket, object_key
            ))?
            .to_string())
    }

    pub(crate) fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let bearer = self
            .session
            .borrow()
            .as_ref()
            .map(|s| s.access_token.clone())
            .unwrap_or_else(|| self.anon_key.clone());
        req.header("apikey", &self.anon_key).bearer_auth(bearer)
    }

    async fn expect_rows(res: Response) -> Result<Vec<Value>, GatewayError> {
        match res.status() {
            s if s.is_success() => res
                .json::<Vec<Value>>()
                .await
                .map_err(|e| GatewayError::Serde(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(GatewayError::NotAuthenticated)
            }
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(GatewayError::Http { status, body })
            }
        }
    }

    fn single_row(rows: Vec<Value>) -> Result<Value, GatewayError> {
        rows.into_iter()
            .next()
            .map(keys_to_camel)
            .ok_or(GatewayError::NotFound)
    }
}

#[async_trait]
impl RecordGateway for GatewayClient {
    async fn list(&self, kind: RecordKind) -> Result<Vec<Value>, GatewayError> {
        let mut req = self
            .authed(self.http.get(self.rest_url(kind)?))
            .query(&[("select", "*")]);
        if !kind.is_singleton() {
            req = req.query(&[("order", "created_at.desc")]);
        }
        let rows = Self::expect_rows(req.send().await.map_err(map_reqwest_error)?).await?;
        Ok(rows.into_iter().map(keys_to_camel).collect())
    }

    async fn get(&self, kind: RecordKind, id: &str) -> Result<Option<Value>, GatewayError> {
        let req = self
            .authed(self.http.get(self.rest_url(kind)?))
            .query(&[("select", "*"), ("id", &format!("eq.{id}"))]);
        let rows = Self::expect_rows(req.send().await.map_err(map_reqwest_error)?).await?;
        Ok(rows.into_iter().next().map(keys_to_camel))
    }

    async fn create(&self, kind: RecordKind, fields: Value) -> Result<Value, GatewayError> {
        let req = self
            .authed(self.http.post(self.rest_url(kind)?))
            .header("Prefer", "return=representation")
            .json(&keys_to_snake(fields));
        let rows = Self::expect_rows(req.send().await.map_err(map_reqwest_error)?).await?;
        Self::single_row(rows)
    }

    async fn update(
        &self,
        kind: RecordKind,
        id: &str,
        fields: Value,
    ) -> Result<Value, GatewayError> {
        let req = self
            .authed(self.http.patch(self.rest_url(kind)?))
            .query(&[("id", &format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&keys_to_snake(fields));
        let rows = Self::expect_rows(req.send().await.map_err(map_reqwest_error)?).await?;
        Self::single_row(rows)
    }

    async fn delete(&self, kind: RecordKind, id: &str) -> Result<(), GatewayError> {
        let req = self
            .authed(self.http.delete(self.rest_url(kind)?))
            .query(&[("id", &format!("eq.{id}"))]);
        let res = req.send().await.map_err(map_reqwest_error)?;
        match res.status() {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(GatewayError::NotAuthenticated)
            }
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(GatewayError::Http { status, body })
            }
        }
    }

    async fn upsert_singleton(
        &self,
        kind: RecordKind,
        fields: Value,
    ) -> Result<Value, GatewayError> {
        let mut fields = fields;
        if let Value::Object(map) = &mut fields {
            map.insert("id".to_string(), json!(SINGLETON_ID));
        }
        match self.get(kind, SINGLETON_ID).await? {
            Some(_) => self.update(kind, SINGLETON_ID, fields).await,
            None => self.create(kind, fields).await,
        }
    }
}

#[async_trait]
impl FileStore for GatewayClient {
    async fn upload_file(&self, file: &StoredFile) -> Result<String, GatewayError> {
        let object_key = format!("{}-{}", Uuid::new_v4(), sanitize_name(&file.name));
        let url = self.join(&format!("storage/v1/object/{}/{}", self.bucket, object_key))?;

        tracing::debug!(
            object_key = %object_key,
            content_type = %file.content_type,
            size = file.bytes.len(),
            "uploading file to storage"
        );

        let res = self
            .authed(self.http.post(url))
            .header(CONTENT_TYPE, &file.content_type)
            .body(file.bytes.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        match res.status() {
            s if s.is_success() => self.public_object_url(&object_key),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(GatewayError::NotAuthenticated)
            }
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(GatewayError::Http { status, body })
            }
        }
    }
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
