use reqwest::Method;

use meditrack_core::{Hospital, HospitalDraft, HospitalId};

use super::item_path;
use crate::error::ApiResult;
use crate::request::ApiClient;

pub const HOSPITALS: &str = "hospitals/";

impl ApiClient {
    pub async fn list_hospitals(&self, token: Option<&str>) -> ApiResult<Vec<Hospital>> {
        self.get(HOSPITALS, token).await
    }

    pub async fn get_hospital(&self, id: HospitalId, token: Option<&str>) -> ApiResult<Hospital> {
        self.get(&item_path(HOSPITALS, id), token).await
    }

    pub async fn create_hospital(
        &self,
        draft: &HospitalDraft,
        token: Option<&str>,
    ) -> ApiResult<Hospital> {
        draft.validate()?;
        self.send_json(Method::POST, HOSPITALS, draft, token).await
    }

    pub async fn update_hospital(
        &self,
        id: HospitalId,
        draft: &HospitalDraft,
        token: Option<&str>,
    ) -> ApiResult<Hospital> {
        draft.validate()?;
        self.send_json(Method::PUT, &item_path(HOSPITALS, id), draft, token)
            .await
    }
}
