use tracing::debug;

use meditrack_auth::WorkOrderScope;
use meditrack_core::{AdminOverview, EngineerDashboard, NurseDashboard};

use crate::error::ApiResult;
use crate::request::ApiClient;

pub const ENGINEER_DASHBOARD: &str = "dashboard/engineer/";
pub const NURSE_DASHBOARD: &str = "dashboard/nurse/";

impl ApiClient {
    pub async fn engineer_dashboard(&self, token: Option<&str>) -> ApiResult<EngineerDashboard> {
        self.get(ENGINEER_DASHBOARD, token).await
    }

    pub async fn nurse_dashboard(&self, token: Option<&str>) -> ApiResult<NurseDashboard> {
        self.get(NURSE_DASHBOARD, token).await
    }

    /// There is no admin dashboard endpoint; the figures are list lengths.
    pub async fn admin_overview(&self, token: Option<&str>) -> ApiResult<AdminOverview> {
        let devices = self.list_devices(token).await?.len();
        let work_orders = self
            .list_work_orders(WorkOrderScope::All, token)
            .await?
            .len();
        let spare_parts = self.list_spare_parts(token).await?.len();
        debug!(devices, work_orders, spare_parts, "admin overview loaded");

        Ok(AdminOverview {
            devices,
            work_orders,
            spare_parts,
        })
    }
}
