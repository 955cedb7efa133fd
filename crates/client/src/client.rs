//! Typed HTTP client for the `/api/v1` surface.
//!
//! [`InventoryApi`] and [`UploadTransport`] are the seams the view-models and
//! the uploader are written against; [`InventoryClient`] implements both over
//! reqwest.

use std::time::Duration;

use async_trait::async_trait;
use homeinv_core::house::{House, HouseInput};
use homeinv_core::item::{ImageUrlInput, Item, ItemInput, ItemWithRoom};
use homeinv_core::room::{Room, RoomInput};
use homeinv_core::search::SearchHit;
use homeinv_core::types::DbId;
use homeinv_core::upload::{UploadUrlRequest, UploadUrlResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::decode::{decode_data_list, decode_list};
use crate::error::ClientError;
use crate::session::Session;

/// Data operations used by the view-models.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn list_houses(&self, session: &Session) -> Result<Vec<House>, ClientError>;
    async fn create_house(&self, session: &Session, input: &HouseInput) -> Result<House, ClientError>;
    async fn update_house(
        &self,
        session: &Session,
        id: DbId,
        input: &HouseInput,
    ) -> Result<House, ClientError>;
    async fn delete_house(&self, session: &Session, id: DbId) -> Result<(), ClientError>;

    async fn list_rooms(&self, session: &Session, house_id: DbId) -> Result<Vec<Room>, ClientError>;
    async fn create_room(
        &self,
        session: &Session,
        house_id: DbId,
        input: &RoomInput,
    ) -> Result<Room, ClientError>;
    async fn update_room(
        &self,
        session: &Session,
        house_id: DbId,
        id: DbId,
        input: &RoomInput,
    ) -> Result<Room, ClientError>;
    async fn delete_room(&self, session: &Session, house_id: DbId, id: DbId) -> Result<(), ClientError>;

    async fn list_items(
        &self,
        session: &Session,
        house_id: DbId,
    ) -> Result<Vec<ItemWithRoom>, ClientError>;
    async fn create_item(
        &self,
        session: &Session,
        house_id: DbId,
        input: &ItemInput,
    ) -> Result<Item, ClientError>;
    async fn update_item(
        &self,
        session: &Session,
        house_id: DbId,
        id: DbId,
        input: &ItemInput,
    ) -> Result<Item, ClientError>;
    async fn delete_item(&self, session: &Session, house_id: DbId, id: DbId) -> Result<(), ClientError>;
    async fn add_item_image(
        &self,
        session: &Session,
        house_id: DbId,
        id: DbId,
        url: &str,
    ) -> Result<Item, ClientError>;
    async fn remove_item_image(
        &self,
        session: &Session,
        house_id: DbId,
        id: DbId,
        url: &str,
    ) -> Result<Item, ClientError>;

    /// Search the caller's items. `term` must already be non-blank.
    async fn search(&self, session: &Session, term: &str) -> Result<Vec<SearchHit>, ClientError>;
}

/// The three network steps of a photo upload.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// `POST /upload/bucket`.
    async fn ensure_bucket(&self, session: &Session) -> Result<(), ClientError>;
    /// `POST /upload`, returning the presigned PUT URL.
    async fn presign(&self, session: &Session, request: &UploadUrlRequest) -> Result<String, ClientError>;
    /// PUT the raw bytes straight to the object store.
    async fn put_object(
        &self,
        presigned_url: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ClientError>;
}

/// reqwest-backed implementation of [`InventoryApi`] and [`UploadTransport`].
pub struct InventoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl InventoryClient {
    /// Create a new client with the given base URL and timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create from an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, session: &Session) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .bearer_auth(&session.access_token)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, session: &Session) -> Result<T, ClientError> {
        let resp = self.request(Method::GET, path, session).send().await?;
        parse_response(resp).await
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        session: &Session,
        body: &B,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let resp = self.request(method, path, session).json(body).send().await?;
        parse_response(resp).await
    }

    async fn delete(&self, path: &str, session: &Session) -> Result<(), ClientError> {
        let resp = self.request(Method::DELETE, path, session).send().await?;
        expect_success(resp).await
    }
}

#[async_trait]
impl InventoryApi for InventoryClient {
    // ── Houses ────────────────────────────────────────────────────────────

    async fn list_houses(&self, session: &Session) -> Result<Vec<House>, ClientError> {
        decode_list(self.get_json("/houses", session).await?)
    }

    async fn create_house(&self, session: &Session, input: &HouseInput) -> Result<House, ClientError> {
        self.send_json(Method::POST, "/houses", session, input).await
    }

    async fn update_house(
        &self,
        session: &Session,
        id: DbId,
        input: &HouseInput,
    ) -> Result<House, ClientError> {
        self.send_json(Method::PUT, &format!("/houses/{id}"), session, input)
            .await
    }

    async fn delete_house(&self, session: &Session, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("/houses/{id}"), session).await
    }

    // ── Rooms ─────────────────────────────────────────────────────────────

    async fn list_rooms(&self, session: &Session, house_id: DbId) -> Result<Vec<Room>, ClientError> {
        decode_list(
            self.get_json(&format!("/houses/{house_id}/rooms"), session)
                .await?,
        )
    }

    async fn create_room(
        &self,
        session: &Session,
        house_id: DbId,
        input: &RoomInput,
    ) -> Result<Room, ClientError> {
        self.send_json(Method::POST, &format!("/houses/{house_id}/rooms"), session, input)
            .await
    }

    async fn update_room(
        &self,
        session: &Session,
        house_id: DbId,
        id: DbId,
        input: &RoomInput,
    ) -> Result<Room, ClientError> {
        self.send_json(
            Method::PUT,
            &format!("/houses/{house_id}/rooms/{id}"),
            session,
            input,
        )
        .await
    }

    async fn delete_room(&self, session: &Session, house_id: DbId, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("/houses/{house_id}/rooms/{id}"), session)
            .await
    }

    // ── Items ─────────────────────────────────────────────────────────────

    async fn list_items(
        &self,
        session: &Session,
        house_id: DbId,
    ) -> Result<Vec<ItemWithRoom>, ClientError> {
        decode_list(
            self.get_json(&format!("/houses/{house_id}/items"), session)
                .await?,
        )
    }

    async fn create_item(
        &self,
        session: &Session,
        house_id: DbId,
        input: &ItemInput,
    ) -> Result<Item, ClientError> {
        self.send_json(Method::POST, &format!("/houses/{house_id}/items"), session, input)
            .await
    }

    async fn update_item(
        &self,
        session: &Session,
        house_id: DbId,
        id: DbId,
        input: &ItemInput,
    ) -> Result<Item, ClientError> {
        self.send_json(
            Method::PUT,
            &format!("/houses/{house_id}/items/{id}"),
            session,
            input,
        )
        .await
    }

    async fn delete_item(&self, session: &Session, house_id: DbId, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("/houses/{house_id}/items/{id}"), session)
            .await
    }

    async fn add_item_image(
        &self,
        session: &Session,
        house_id: DbId,
        id: DbId,
        url: &str,
    ) -> Result<Item, ClientError> {
        let body = ImageUrlInput { url: url.to_string() };
        self.send_json(
            Method::POST,
            &format!("/houses/{house_id}/items/{id}/images"),
            session,
            &body,
        )
        .await
    }

    async fn remove_item_image(
        &self,
        session: &Session,
        house_id: DbId,
        id: DbId,
        url: &str,
    ) -> Result<Item, ClientError> {
        let body = ImageUrlInput { url: url.to_string() };
        self.send_json(
            Method::DELETE,
            &format!("/houses/{house_id}/items/{id}/images"),
            session,
            &body,
        )
        .await
    }

    // ── Search ────────────────────────────────────────────────────────────

    async fn search(&self, session: &Session, term: &str) -> Result<Vec<SearchHit>, ClientError> {
        let resp = self
            .request(Method::GET, "/search", session)
            .query(&[("q", term)])
            .send()
            .await?;
        decode_data_list(parse_response(resp).await?)
    }
}

#[async_trait]
impl UploadTransport for InventoryClient {
    async fn ensure_bucket(&self, session: &Session) -> Result<(), ClientError> {
        let resp = self
            .request(Method::POST, "/upload/bucket", session)
            .send()
            .await?;
        expect_success(resp).await
    }

    async fn presign(&self, session: &Session, request: &UploadUrlRequest) -> Result<String, ClientError> {
        let resp: UploadUrlResponse = self
            .send_json(Method::POST, "/upload", session, request)
            .await?;
        Ok(resp.presigned_url)
    }

    async fn put_object(
        &self,
        presigned_url: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ClientError> {
        // No bearer token: the signature in the URL is the authorization.
        let resp = self
            .client
            .put(presigned_url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        expect_success(resp).await
    }
}

/// Turn a non-success response into [`ClientError::Api`], preferring the
/// service's `{ "error": ... }` message over the raw body.
async fn api_error(resp: reqwest::Response) -> ClientError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(body);
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    if !resp.status().is_success() {
        return Err(api_error(resp).await);
    }
    resp.json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

async fn expect_success(resp: reqwest::Response) -> Result<(), ClientError> {
    if resp.status().is_success() {
        Ok(())
    } else {
        Err(api_error(resp).await)
    }
}
