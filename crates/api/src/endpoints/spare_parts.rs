use reqwest::Method;

use meditrack_core::{SparePartDraft, SparePartId, SparePartRequest, SparePartUpdate};

use super::item_path;
use crate::error::ApiResult;
use crate::request::ApiClient;

pub const SPARE_PARTS: &str = "spareparts/";

impl ApiClient {
    pub async fn list_spare_parts(&self, token: Option<&str>) -> ApiResult<Vec<SparePartRequest>> {
        self.get(SPARE_PARTS, token).await
    }

    pub async fn get_spare_part(
        &self,
        id: SparePartId,
        token: Option<&str>,
    ) -> ApiResult<SparePartRequest> {
        self.get(&item_path(SPARE_PARTS, id), token).await
    }

    pub async fn create_spare_part(
        &self,
        draft: &SparePartDraft,
        token: Option<&str>,
    ) -> ApiResult<SparePartRequest> {
        draft.validate()?;
        self.send_json(Method::POST, SPARE_PARTS, draft, token).await
    }

    pub async fn update_spare_part(
        &self,
        id: SparePartId,
        update: &SparePartUpdate,
        token: Option<&str>,
    ) -> ApiResult<SparePartRequest> {
        self.send_json(Method::PATCH, &item_path(SPARE_PARTS, id), update, token)
            .await
    }

    pub async fn approve_spare_part(
        &self,
        id: SparePartId,
        token: Option<&str>,
    ) -> ApiResult<SparePartRequest> {
        self.update_spare_part(id, &SparePartUpdate::approve(), token)
            .await
    }

    pub async fn reject_spare_part(
        &self,
        id: SparePartId,
        token: Option<&str>,
    ) -> ApiResult<SparePartRequest> {
        self.update_spare_part(id, &SparePartUpdate::reject(), token)
            .await
    }

    pub async fn delete_spare_part(&self, id: SparePartId, token: Option<&str>) -> ApiResult<()> {
        self.delete(&item_path(SPARE_PARTS, id), token).await
    }
}
