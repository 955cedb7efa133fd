//! In-memory fakes for the view-model and uploader tests.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use homeinv_core::house::{House, HouseInput};
use homeinv_core::item::{Item, ItemInput, ItemWithRoom};
use homeinv_core::room::{Room, RoomInput};
use homeinv_core::search::SearchHit;
use homeinv_core::types::DbId;
use homeinv_core::upload::UploadUrlRequest;
use serde_json::json;
use uuid::Uuid;

use crate::client::{InventoryApi, UploadTransport};
use crate::decode::decode_list;
use crate::error::ClientError;
use crate::session::Session;

pub fn session() -> Session {
    Session {
        access_token: "test-token".into(),
        user_id: Uuid::nil(),
    }
}

pub fn house(id: DbId, name: &str) -> House {
    let now = Utc::now();
    House {
        id,
        name: name.into(),
        address: None,
        description: None,
        user_id: Uuid::nil(),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn item_row(id: DbId, name: &str, room_id: Option<DbId>) -> ItemWithRoom {
    let now = Utc::now();
    ItemWithRoom {
        item: Item {
            id,
            property_id: 1,
            room_id,
            name: name.into(),
            description: None,
            category: None,
            brand: None,
            model_number: None,
            serial_number: None,
            purchase_date: None,
            purchase_price: None,
            current_value: None,
            condition: None,
            notes: None,
            image_urls: Vec::new(),
            is_active: true,
            created_by: None,
            created_at: now,
            updated_at: now,
        },
        room_name: room_id.map(|id| format!("Room {id}")),
    }
}

/// Fake data service. With `fail` set, every list answers with a payload that
/// is not an array and every write fails.
#[derive(Default)]
pub struct FakeApi {
    pub fail: bool,
    pub houses: Mutex<Vec<House>>,
    pub items: Mutex<Vec<ItemWithRoom>>,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
    pub searches: AtomicUsize,
    pub last_search: Mutex<Option<String>>,
    next_id: AtomicI64,
}

impl FakeApi {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_houses(houses: Vec<House>) -> Self {
        Self {
            houses: Mutex::new(houses),
            ..Self::default()
        }
    }

    pub fn with_items(items: Vec<ItemWithRoom>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Self::default()
        }
    }

    fn read<T: serde::de::DeserializeOwned>(&self, rows: serde_json::Value) -> Result<Vec<T>, ClientError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return decode_list(json!({ "error": "boom" }));
        }
        decode_list(rows)
    }

    fn write(&self) -> Result<DbId, ClientError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ClientError::Api {
                status: 500,
                message: "An internal error occurred".into(),
            });
        }
        Ok(100 + self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl InventoryApi for FakeApi {
    async fn list_houses(&self, _session: &Session) -> Result<Vec<House>, ClientError> {
        let rows = json!(*self.houses.lock().unwrap());
        self.read(rows)
    }

    async fn create_house(&self, _session: &Session, input: &HouseInput) -> Result<House, ClientError> {
        let id = self.write()?;
        let created = House {
            address: input.address.clone(),
            description: input.description.clone(),
            ..house(id, &input.name)
        };
        self.houses.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_house(&self, _session: &Session, id: DbId, input: &HouseInput) -> Result<House, ClientError> {
        self.write()?;
        let mut houses = self.houses.lock().unwrap();
        let existing = houses
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(ClientError::Api { status: 404, message: "House not found".into() })?;
        existing.name = input.name.clone();
        existing.address = input.address.clone();
        existing.description = input.description.clone();
        Ok(existing.clone())
    }

    async fn delete_house(&self, _session: &Session, id: DbId) -> Result<(), ClientError> {
        self.write()?;
        self.houses.lock().unwrap().retain(|h| h.id != id);
        Ok(())
    }

    async fn list_rooms(&self, _session: &Session, _house_id: DbId) -> Result<Vec<Room>, ClientError> {
        self.read(json!([]))
    }

    async fn create_room(&self, _session: &Session, house_id: DbId, input: &RoomInput) -> Result<Room, ClientError> {
        let id = self.write()?;
        let now = Utc::now();
        Ok(Room {
            id,
            property_id: house_id,
            name: input.name.clone(),
            description: input.description.clone(),
            floor: input.floor.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_room(
        &self,
        session: &Session,
        house_id: DbId,
        _id: DbId,
        input: &RoomInput,
    ) -> Result<Room, ClientError> {
        self.create_room(session, house_id, input).await
    }

    async fn delete_room(&self, _session: &Session, _house_id: DbId, _id: DbId) -> Result<(), ClientError> {
        self.write().map(|_| ())
    }

    async fn list_items(&self, _session: &Session, _house_id: DbId) -> Result<Vec<ItemWithRoom>, ClientError> {
        let rows = json!(*self.items.lock().unwrap());
        self.read(rows)
    }

    async fn create_item(&self, _session: &Session, _house_id: DbId, input: &ItemInput) -> Result<Item, ClientError> {
        let id = self.write()?;
        let row = item_row(id, &input.name, input.room_id);
        self.items.lock().unwrap().push(row.clone());
        Ok(row.item)
    }

    async fn update_item(
        &self,
        session: &Session,
        house_id: DbId,
        _id: DbId,
        input: &ItemInput,
    ) -> Result<Item, ClientError> {
        self.create_item(session, house_id, input).await
    }

    async fn delete_item(&self, _session: &Session, _house_id: DbId, id: DbId) -> Result<(), ClientError> {
        self.write()?;
        self.items.lock().unwrap().retain(|row| row.item.id != id);
        Ok(())
    }

    async fn add_item_image(&self, _session: &Session, _house_id: DbId, id: DbId, url: &str) -> Result<Item, ClientError> {
        self.write()?;
        let mut items = self.items.lock().unwrap();
        let row = items
            .iter_mut()
            .find(|row| row.item.id == id)
            .ok_or(ClientError::Api { status: 404, message: "Item not found".into() })?;
        row.item.image_urls.push(url.to_string());
        Ok(row.item.clone())
    }

    async fn remove_item_image(&self, _session: &Session, _house_id: DbId, id: DbId, url: &str) -> Result<Item, ClientError> {
        self.write()?;
        let mut items = self.items.lock().unwrap();
        let row = items
            .iter_mut()
            .find(|row| row.item.id == id)
            .ok_or(ClientError::Api { status: 404, message: "Item not found".into() })?;
        row.item.image_urls.retain(|u| u != url);
        Ok(row.item.clone())
    }

    async fn search(&self, _session: &Session, term: &str) -> Result<Vec<SearchHit>, ClientError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        *self.last_search.lock().unwrap() = Some(term.to_string());
        Ok(Vec::new())
    }
}

/// Fake upload transport that records each step it is asked to perform.
#[derive(Default)]
pub struct FakeTransport {
    /// Step name (`"bucket"`, `"presign"`, `"put"`) that should fail.
    pub fail_at: Option<&'static str>,
    /// Step name that never completes.
    pub hang_at: Option<&'static str>,
    pub steps: Mutex<Vec<String>>,
    pub presigned_keys: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn failing_at(step: &'static str) -> Self {
        Self {
            fail_at: Some(step),
            ..Self::default()
        }
    }

    pub fn hanging_at(step: &'static str) -> Self {
        Self {
            hang_at: Some(step),
            ..Self::default()
        }
    }

    pub fn step_count(&self) -> usize {
        self.steps.lock().unwrap().len()
    }

    async fn step(&self, name: &'static str) -> Result<(), ClientError> {
        self.steps.lock().unwrap().push(name.to_string());
        if self.hang_at == Some(name) {
            std::future::pending::<()>().await;
        }
        if self.fail_at == Some(name) {
            return Err(ClientError::Api {
                status: 500,
                message: format!("{name} failed"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UploadTransport for FakeTransport {
    async fn ensure_bucket(&self, _session: &Session) -> Result<(), ClientError> {
        self.step("bucket").await
    }

    async fn presign(&self, _session: &Session, request: &UploadUrlRequest) -> Result<String, ClientError> {
        self.step("presign").await?;
        self.presigned_keys.lock().unwrap().push(request.file_name.clone());
        Ok(format!("http://minio.test:9000/home-inventory/{}?sig=1", request.file_name))
    }

    async fn put_object(&self, _presigned_url: &str, _content_type: &str, _bytes: Vec<u8>) -> Result<(), ClientError> {
        self.step("put").await
    }
}
