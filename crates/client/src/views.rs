//! Headless view-models for the house, room and item lists and search.
//!
//! Each view owns its list, its draft form and an inline error message. Data
//! failures never panic and are never retried: a failed load leaves an empty
//! list plus the message, a failed write leaves the list untouched.

use homeinv_core::house::{next_selection, reconcile_selection, House, HouseDraft};
use homeinv_core::item::{filter_items, ItemDraft, ItemWithRoom};
use homeinv_core::room::{Room, RoomDraft, ROOM_DELETE_WARNING};
use homeinv_core::search::{normalize_query, SearchHit};
use homeinv_core::types::DbId;

use crate::client::InventoryApi;
use crate::error::ClientError;
use crate::session::Session;

/// Log a failed action and keep its message for display.
fn record(slot: &mut Option<String>, action: &'static str, err: ClientError) -> ClientError {
    tracing::warn!(action, error = %err, "Inventory request failed");
    *slot = Some(err.to_string());
    err
}

/// The loaded house, or a recorded "Select a house first" error.
fn require_house(
    house_id: Option<DbId>,
    slot: &mut Option<String>,
    action: &'static str,
) -> Result<DbId, ClientError> {
    house_id.ok_or_else(|| record(slot, action, ClientError::Validation("Select a house first".into())))
}

// ---------------------------------------------------------------------------
// Houses
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct HouseList {
    pub houses: Vec<House>,
    pub selected: Option<DbId>,
    pub draft: HouseDraft,
    /// Id of the house being edited; `None` means the form creates.
    pub editing: Option<DbId>,
    pub error: Option<String>,
}

impl HouseList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the signed-in user's houses. Selects the first one when nothing
    /// (or a vanished house) was selected.
    pub async fn load<A: InventoryApi + ?Sized>(&mut self, api: &A, session: &Session) {
        match api.list_houses(session).await {
            Ok(houses) => {
                self.houses = houses;
                self.error = None;
            }
            Err(err) => {
                record(&mut self.error, "list_houses", err);
                self.houses.clear();
            }
        }
        self.selected = reconcile_selection(self.selected, &self.houses);
    }

    pub fn select(&mut self, id: DbId) {
        self.selected = Some(id);
    }

    pub fn selected_house(&self) -> Option<&House> {
        let id = self.selected?;
        self.houses.iter().find(|h| h.id == id)
    }

    pub fn start_edit(&mut self, house: &House) {
        self.editing = Some(house.id);
        self.draft = HouseDraft::from_house(house);
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.draft.clear();
    }

    /// Create or overwrite from the draft, then refresh the list.
    ///
    /// An invalid draft sends no request.
    pub async fn submit<A: InventoryApi + ?Sized>(
        &mut self,
        api: &A,
        session: &Session,
    ) -> Result<(), ClientError> {
        let input = self
            .draft
            .to_input()
            .map_err(|e| record(&mut self.error, "validate_house", e.into()))?;

        let saved = match self.editing {
            Some(id) => api.update_house(session, id, &input).await,
            None => api.create_house(session, &input).await,
        }
        .map_err(|e| record(&mut self.error, "save_house", e))?;

        tracing::info!(house_id = saved.id, "House saved");
        if self.selected.is_none() {
            self.selected = Some(saved.id);
        }
        self.cancel_edit();
        self.load(api, session).await;
        Ok(())
    }

    /// Delete a house. If it was selected, the selection falls back to the
    /// first remaining house, or none.
    pub async fn delete<A: InventoryApi + ?Sized>(
        &mut self,
        api: &A,
        session: &Session,
        id: DbId,
    ) -> Result<(), ClientError> {
        api.delete_house(session, id)
            .await
            .map_err(|e| record(&mut self.error, "delete_house", e))?;

        self.houses.retain(|h| h.id != id);
        self.selected = next_selection(self.selected, id, &self.houses);
        if self.editing == Some(id) {
            self.cancel_edit();
        }
        self.error = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RoomList {
    pub house_id: Option<DbId>,
    pub rooms: Vec<Room>,
    pub draft: RoomDraft,
    pub editing: Option<DbId>,
    pub error: Option<String>,
}

impl RoomList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text to confirm before calling [`RoomList::delete`].
    pub fn delete_warning(&self) -> &'static str {
        ROOM_DELETE_WARNING
    }

    pub async fn load<A: InventoryApi + ?Sized>(&mut self, api: &A, session: &Session, house_id: DbId) {
        if self.house_id != Some(house_id) {
            self.cancel_edit();
        }
        self.house_id = Some(house_id);
        match api.list_rooms(session, house_id).await {
            Ok(rooms) => {
                self.rooms = rooms;
                self.error = None;
            }
            Err(err) => {
                record(&mut self.error, "list_rooms", err);
                self.rooms.clear();
            }
        }
    }

    pub fn start_edit(&mut self, room: &Room) {
        self.editing = Some(room.id);
        self.draft = RoomDraft::from_room(room);
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.draft.clear();
    }

    pub async fn submit<A: InventoryApi + ?Sized>(
        &mut self,
        api: &A,
        session: &Session,
    ) -> Result<(), ClientError> {
        let house_id = require_house(self.house_id, &mut self.error, "save_room")?;
        let input = self
            .draft
            .to_input()
            .map_err(|e| record(&mut self.error, "validate_room", e.into()))?;

        match self.editing {
            Some(id) => api.update_room(session, house_id, id, &input).await,
            None => api.create_room(session, house_id, &input).await,
        }
        .map_err(|e| record(&mut self.error, "save_room", e))?;

        self.cancel_edit();
        self.load(api, session, house_id).await;
        Ok(())
    }

    /// Delete a room. Its items stay in the house without a room.
    pub async fn delete<A: InventoryApi + ?Sized>(
        &mut self,
        api: &A,
        session: &Session,
        id: DbId,
    ) -> Result<(), ClientError> {
        let house_id = require_house(self.house_id, &mut self.error, "delete_room")?;
        api.delete_room(session, house_id, id)
            .await
            .map_err(|e| record(&mut self.error, "delete_room", e))?;
        self.rooms.retain(|r| r.id != id);
        if self.editing == Some(id) {
            self.cancel_edit();
        }
        self.error = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ItemList {
    pub house_id: Option<DbId>,
    pub items: Vec<ItemWithRoom>,
    /// Current filter text, applied by [`ItemList::visible`].
    pub filter: String,
    pub draft: ItemDraft,
    pub editing: Option<DbId>,
    pub error: Option<String>,
}

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<A: InventoryApi + ?Sized>(&mut self, api: &A, session: &Session, house_id: DbId) {
        if self.house_id != Some(house_id) {
            self.cancel_edit();
        }
        self.house_id = Some(house_id);
        match api.list_items(session, house_id).await {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(err) => {
                record(&mut self.error, "list_items", err);
                self.items.clear();
            }
        }
    }

    pub fn set_filter(&mut self, term: &str) {
        self.filter = term.to_string();
    }

    /// Items matching the filter, without re-querying.
    pub fn visible(&self) -> Vec<&ItemWithRoom> {
        filter_items(&self.items, &self.filter)
    }

    pub fn start_edit(&mut self, row: &ItemWithRoom) {
        self.editing = Some(row.item.id);
        self.draft = ItemDraft::from_item(&row.item);
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.draft.clear();
    }

    pub async fn submit<A: InventoryApi + ?Sized>(
        &mut self,
        api: &A,
        session: &Session,
    ) -> Result<(), ClientError> {
        let house_id = require_house(self.house_id, &mut self.error, "save_item")?;
        let input = self
            .draft
            .to_input()
            .map_err(|e| record(&mut self.error, "validate_item", e.into()))?;

        let saved = match self.editing {
            Some(id) => api.update_item(session, house_id, id, &input).await,
            None => api.create_item(session, house_id, &input).await,
        }
        .map_err(|e| record(&mut self.error, "save_item", e))?;

        tracing::info!(house_id, item_id = saved.id, "Item saved");
        self.cancel_edit();
        self.load(api, session, house_id).await;
        Ok(())
    }

    pub async fn delete<A: InventoryApi + ?Sized>(
        &mut self,
        api: &A,
        session: &Session,
        id: DbId,
    ) -> Result<(), ClientError> {
        let house_id = require_house(self.house_id, &mut self.error, "delete_item")?;
        api.delete_item(session, house_id, id)
            .await
            .map_err(|e| record(&mut self.error, "delete_item", e))?;
        self.items.retain(|row| row.item.id != id);
        if self.editing == Some(id) {
            self.cancel_edit();
        }
        self.error = None;
        Ok(())
    }

    /// Persist an uploaded photo URL on an item and update the row in place.
    pub async fn attach_photo<A: InventoryApi + ?Sized>(
        &mut self,
        api: &A,
        session: &Session,
        item_id: DbId,
        url: &str,
    ) -> Result<(), ClientError> {
        let house_id = require_house(self.house_id, &mut self.error, "attach_photo")?;
        let updated = api
            .add_item_image(session, house_id, item_id, url)
            .await
            .map_err(|e| record(&mut self.error, "attach_photo", e))?;
        if let Some(row) = self.items.iter_mut().find(|row| row.item.id == item_id) {
            row.item = updated;
        }
        Ok(())
    }

    /// Reflect a room deletion locally: its items lose their room link.
    pub fn forget_room(&mut self, room_id: DbId) {
        for row in self.items.iter_mut().filter(|row| row.item.room_id == Some(room_id)) {
            row.item.room_id = None;
            row.room_name = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchView {
    pub query: String,
    pub results: Vec<SearchHit>,
    pub error: Option<String>,
    /// Whether the current results come from a request (vs. a blank query).
    pub searched: bool,
}

impl SearchView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a search. A blank or whitespace-only query clears the results and
    /// sends nothing.
    pub async fn search<A: InventoryApi + ?Sized>(&mut self, api: &A, session: &Session, raw: &str) {
        self.query = raw.to_string();
        let Some(term) = normalize_query(raw) else {
            self.results.clear();
            self.error = None;
            self.searched = false;
            return;
        };

        match api.search(session, term).await {
            Ok(hits) => {
                self.results = hits;
                self.error = None;
            }
            Err(err) => {
                record(&mut self.error, "search", err);
                self.results.clear();
            }
        }
        self.searched = true;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use assert_matches::assert_matches;

    use super::*;
    use crate::testing::{house, item_row, session, FakeApi};

    // -- Houses --

    #[tokio::test]
    async fn load_selects_first_house() {
        let api = FakeApi::with_houses(vec![house(1, "Apartment"), house(2, "Villa")]);
        let mut view = HouseList::new();
        view.load(&api, &session()).await;
        assert_eq!(view.houses.len(), 2);
        assert_eq!(view.selected, Some(1));
        assert_eq!(view.selected_house().unwrap().name, "Apartment");
    }

    #[tokio::test]
    async fn failed_load_is_empty_with_message() {
        let api = FakeApi::failing();
        let mut view = HouseList::new();
        view.houses.push(house(9, "Stale"));
        view.load(&api, &session()).await;
        assert!(view.houses.is_empty());
        assert_eq!(view.selected, None);
        assert!(view.error.is_some());
    }

    #[tokio::test]
    async fn deleting_selected_house_falls_back_to_first_remaining() {
        let api = FakeApi::with_houses(vec![house(1, "A"), house(2, "B"), house(3, "C")]);
        let mut view = HouseList::new();
        view.load(&api, &session()).await;
        view.select(2);

        view.delete(&api, &session(), 2).await.unwrap();
        assert_eq!(view.selected, Some(1));
        assert!(view.houses.iter().all(|h| h.id != 2));

        view.delete(&api, &session(), 1).await.unwrap();
        assert_eq!(view.selected, Some(3));
        view.delete(&api, &session(), 3).await.unwrap();
        assert_eq!(view.selected, None);
    }

    #[tokio::test]
    async fn deleting_other_house_keeps_selection() {
        let api = FakeApi::with_houses(vec![house(1, "A"), house(2, "B")]);
        let mut view = HouseList::new();
        view.load(&api, &session()).await;
        view.select(2);
        view.delete(&api, &session(), 1).await.unwrap();
        assert_eq!(view.selected, Some(2));
    }

    #[tokio::test]
    async fn invalid_draft_sends_nothing() {
        let api = FakeApi::default();
        let mut view = HouseList::new();
        view.draft.name = "   ".into();
        let result = view.submit(&api, &session()).await;
        assert_matches!(result, Err(ClientError::Validation(_)));
        assert!(view.error.is_some());
        assert_eq!(api.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn submit_creates_then_reloads() {
        let api = FakeApi::default();
        let mut view = HouseList::new();
        view.draft.name = "Cabin".into();
        view.submit(&api, &session()).await.unwrap();
        assert_eq!(api.writes.load(Ordering::SeqCst), 1);
        assert_eq!(view.houses.len(), 1);
        assert_eq!(view.houses[0].name, "Cabin");
        assert_eq!(view.selected, Some(view.houses[0].id));
        assert_eq!(view.draft, HouseDraft::default());
    }

    // -- Rooms --

    #[tokio::test]
    async fn room_delete_without_house_is_rejected() {
        let api = FakeApi::default();
        let mut view = RoomList::new();
        let result = view.delete(&api, &session(), 3).await;
        assert_matches!(result, Err(ClientError::Validation(msg)) if msg == "Select a house first");
        assert!(view.error.is_some());
        assert_eq!(api.writes.load(Ordering::SeqCst), 0);
    }

    // -- Items --

    #[tokio::test]
    async fn item_writes_without_house_are_rejected() {
        let api = FakeApi::with_items(vec![item_row(1, "Desk", None)]);
        let mut view = ItemList::new();

        let deleted = view.delete(&api, &session(), 1).await;
        assert_matches!(deleted, Err(ClientError::Validation(_)));

        view.error = None;
        let attached = view
            .attach_photo(&api, &session(), 1, "http://minio.test:9000/home-inventory/items/1/a.png")
            .await;
        assert_matches!(attached, Err(ClientError::Validation(_)));
        assert_eq!(view.error.as_deref(), Some("Select a house first"));

        assert_eq!(api.writes.load(Ordering::SeqCst), 0);
        assert_eq!(api.items.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn malformed_item_payload_renders_empty() {
        let api = FakeApi::failing();
        let mut view = ItemList::new();
        view.items.push(item_row(1, "Stale", None));
        view.load(&api, &session(), 1).await;
        assert!(view.items.is_empty());
        assert!(view.visible().is_empty());
        assert!(view.error.is_some());
    }

    #[tokio::test]
    async fn filter_is_recomputed_without_requests() {
        let api = FakeApi::with_items(vec![
            item_row(1, "Power Drill", None),
            item_row(2, "Sofa", None),
            item_row(3, "drill bits", None),
        ]);
        let mut view = ItemList::new();
        view.load(&api, &session(), 1).await;
        let reads = api.reads.load(Ordering::SeqCst);

        view.set_filter("  DRILL ");
        let names: Vec<&str> = view.visible().iter().map(|r| r.item.name.as_str()).collect();
        assert_eq!(names, vec!["Power Drill", "drill bits"]);

        view.set_filter("");
        assert_eq!(view.visible().len(), 3);
        assert_eq!(api.reads.load(Ordering::SeqCst), reads);
    }

    #[tokio::test]
    async fn bad_price_blocks_submit() {
        let api = FakeApi::default();
        let mut view = ItemList::new();
        view.house_id = Some(1);
        view.draft.name = "Lamp".into();
        view.draft.purchase_price = "twelve".into();
        assert_matches!(view.submit(&api, &session()).await, Err(ClientError::Validation(_)));
        assert_eq!(api.writes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn forgetting_room_clears_links() {
        let mut view = ItemList::new();
        view.items = vec![item_row(1, "Desk", Some(5)), item_row(2, "Rug", Some(6))];
        view.forget_room(5);
        assert_eq!(view.items[0].item.room_id, None);
        assert_eq!(view.items[0].room_name, None);
        assert_eq!(view.items[1].item.room_id, Some(6));
    }

    // -- Search --

    #[tokio::test]
    async fn blank_search_sends_no_request() {
        let api = FakeApi::default();
        let mut view = SearchView::new();
        view.search(&api, &session(), "   ").await;
        assert!(view.results.is_empty());
        assert!(!view.searched);
        assert_eq!(api.searches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn search_passes_trimmed_term() {
        let api = FakeApi::default();
        let mut view = SearchView::new();
        view.search(&api, &session(), "  drill ").await;
        assert!(view.searched);
        assert_eq!(api.searches.load(Ordering::SeqCst), 1);
        assert_eq!(api.last_search.lock().unwrap().as_deref(), Some("drill"));
    }
}
