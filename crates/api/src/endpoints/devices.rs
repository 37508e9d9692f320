//! Devices and the staff lists used to assign them.

use reqwest::Method;
use tracing::debug;

use meditrack_auth::{DeviceScope, Role};
use meditrack_core::{Device, DeviceDraft, DeviceId, StaffMember};

use super::item_path;
use crate::error::ApiResult;
use crate::request::ApiClient;

pub const DEVICES: &str = "devices/";
pub const ASSIGNED_DEVICES: &str = "devices/assigned/";
pub const ENGINEERS: &str = "users/?type=engineer";
pub const NURSES: &str = "users/?type=nurse";

impl ApiClient {
    pub async fn list_devices(&self, token: Option<&str>) -> ApiResult<Vec<Device>> {
        self.get(DEVICES, token).await
    }

    /// Devices assigned to the calling engineer.
    pub async fn list_assigned_devices(&self, token: Option<&str>) -> ApiResult<Vec<Device>> {
        self.get(ASSIGNED_DEVICES, token).await
    }

    /// The device list `role` is entitled to see.
    pub async fn devices_for(&self, role: &Role, token: Option<&str>) -> ApiResult<Vec<Device>> {
        match role.device_scope() {
            DeviceScope::All => self.list_devices(token).await,
            DeviceScope::Assigned => self.list_assigned_devices(token).await,
            DeviceScope::None => {
                debug!(%role, "role has no device list");
                Ok(Vec::new())
            }
        }
    }

    pub async fn get_device(&self, id: DeviceId, token: Option<&str>) -> ApiResult<Device> {
        self.get(&item_path(DEVICES, id), token).await
    }

    pub async fn create_device(
        &self,
        draft: &DeviceDraft,
        token: Option<&str>,
    ) -> ApiResult<Device> {
        draft.validate()?;
        self.send_json(Method::POST, DEVICES, draft, token).await
    }

    pub async fn update_device(
        &self,
        id: DeviceId,
        draft: &DeviceDraft,
        token: Option<&str>,
    ) -> ApiResult<Device> {
        draft.validate()?;
        self.send_json(Method::PUT, &item_path(DEVICES, id), draft, token)
            .await
    }

    pub async fn list_engineers(&self, token: Option<&str>) -> ApiResult<Vec<StaffMember>> {
        self.get(ENGINEERS, token).await
    }

    pub async fn list_nurses(&self, token: Option<&str>) -> ApiResult<Vec<StaffMember>> {
        self.get(NURSES, token).await
    }
}
