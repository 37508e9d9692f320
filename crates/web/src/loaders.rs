//! Page data loading.
//!
//! Pages that need several API calls load them here; failures carry the
//! step that failed as context. Requests pass no explicit token, so the
//! client's stored-token fallback applies.

use anyhow::{Context, Result};

use meditrack_api::{ApiClient, ApiError};
use meditrack_auth::Role;
use meditrack_core::{
    AdminOverview, Device, DeviceId, EngineerDashboard, Hospital, HospitalId, NurseDashboard,
    Room, RoomId, SparePartId, SparePartRequest, StaffMember, WorkOrder, WorkOrderId,
};

/// Figures shown on a role's dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardData {
    Admin(AdminOverview),
    Engineer(EngineerDashboard),
    Nurse(NurseDashboard),
}

pub async fn dashboard(client: &ApiClient, role: &Role) -> Result<DashboardData> {
    let data = match role {
        Role::Admin => DashboardData::Admin(
            client
                .admin_overview(None)
                .await
                .context("loading admin overview")?,
        ),
        Role::Engineer => DashboardData::Engineer(
            client
                .engineer_dashboard(None)
                .await
                .context("loading engineer dashboard")?,
        ),
        Role::Nurse => DashboardData::Nurse(
            client
                .nurse_dashboard(None)
                .await
                .context("loading nurse dashboard")?,
        ),
        Role::Other(name) => anyhow::bail!("no dashboard for role '{name}'"),
    };
    Ok(data)
}

pub async fn hospitals(client: &ApiClient) -> Result<Vec<Hospital>> {
    client.list_hospitals(None).await.context("loading hospitals")
}

pub async fn hospital(client: &ApiClient, id: HospitalId) -> Result<Hospital> {
    client
        .get_hospital(id, None)
        .await
        .with_context(|| format!("loading hospital {id}"))
}

pub async fn rooms(client: &ApiClient) -> Result<Vec<Room>> {
    client.list_rooms(None).await.context("loading rooms")
}

/// Options and current values for the room form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomFormData {
    pub hospitals: Vec<Hospital>,
    pub room: Option<Room>,
}

pub async fn room_form(client: &ApiClient, id: Option<RoomId>) -> Result<RoomFormData> {
    let hospitals = hospitals(client).await?;
    let room = match id {
        Some(id) => Some(
            client
                .get_room(id, None)
                .await
                .with_context(|| format!("loading room {id}"))?,
        ),
        None => None,
    };
    Ok(RoomFormData { hospitals, room })
}

pub async fn devices(client: &ApiClient, role: &Role) -> Result<Vec<Device>> {
    client
        .devices_for(role, None)
        .await
        .context("loading devices")
}

/// Options and current values for the device form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFormData {
    pub rooms: Vec<Room>,
    pub engineers: Vec<StaffMember>,
    pub nurses: Vec<StaffMember>,
    pub device: Option<Device>,
}

pub async fn device_form(client: &ApiClient, id: Option<DeviceId>) -> Result<DeviceFormData> {
    let rooms = rooms(client).await?;
    let engineers = client
        .list_engineers(None)
        .await
        .context("loading engineers")?;
    let nurses = client.list_nurses(None).await.context("loading nurses")?;
    let device = match id {
        Some(id) => Some(
            client
                .get_device(id, None)
                .await
                .with_context(|| format!("loading device {id}"))?,
        ),
        None => None,
    };

    Ok(DeviceFormData {
        rooms,
        engineers,
        nurses,
        device,
    })
}

pub async fn work_orders(client: &ApiClient, role: &Role) -> Result<Vec<WorkOrder>> {
    client
        .work_orders_for(role, None)
        .await
        .context("loading work orders")
}

pub async fn work_order(client: &ApiClient, id: WorkOrderId) -> Result<WorkOrder> {
    client
        .get_work_order(id, None)
        .await
        .with_context(|| format!("loading work order {id}"))
}

pub async fn spare_parts(client: &ApiClient) -> Result<Vec<SparePartRequest>> {
    client
        .list_spare_parts(None)
        .await
        .context("loading spare-part requests")
}

pub async fn spare_part(client: &ApiClient, id: SparePartId) -> Result<SparePartRequest> {
    client
        .get_spare_part(id, None)
        .await
        .with_context(|| format!("loading spare-part request {id}"))
}

/// True when the failure was the server rejecting our token.
pub fn session_expired(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<ApiError>())
        .any(ApiError::is_unauthorized)
}

/// Message shown to the user: the API's own message, without our context.
pub fn user_message(err: &anyhow::Error) -> String {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ApiError>())
        .map(ToString::to_string)
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(status: u16, message: &str) -> anyhow::Error {
        anyhow::Error::new(ApiError::Status {
            status,
            message: message.to_string(),
        })
        .context("loading work orders")
    }

    #[test]
    fn detects_expired_sessions_through_context() {
        assert!(session_expired(&rejected(401, "Token is invalid or expired")));
        assert!(!session_expired(&rejected(500, "boom")));
        assert!(!session_expired(&anyhow::anyhow!("no dashboard")));
    }

    #[test]
    fn user_message_prefers_api_message() {
        assert_eq!(user_message(&rejected(404, "Not found.")), "Not found.");
        assert_eq!(
            user_message(&anyhow::anyhow!("no dashboard for role 'x'")),
            "no dashboard for role 'x'"
        );
    }
}
