use reqwest::Method;

use meditrack_core::{Room, RoomDraft, RoomId};

use super::item_path;
use crate::error::ApiResult;
use crate::request::ApiClient;

pub const ROOMS: &str = "rooms/";

impl ApiClient {
    pub async fn list_rooms(&self, token: Option<&str>) -> ApiResult<Vec<Room>> {
        self.get(ROOMS, token).await
    }

    pub async fn get_room(&self, id: RoomId, token: Option<&str>) -> ApiResult<Room> {
        self.get(&item_path(ROOMS, id), token).await
    }

    pub async fn create_room(&self, draft: &RoomDraft, token: Option<&str>) -> ApiResult<Room> {
        draft.validate()?;
        self.send_json(Method::POST, ROOMS, draft, token).await
    }

    pub async fn update_room(
        &self,
        id: RoomId,
        draft: &RoomDraft,
        token: Option<&str>,
    ) -> ApiResult<Room> {
        draft.validate()?;
        self.send_json(Method::PUT, &item_path(ROOMS, id), draft, token)
            .await
    }
}
