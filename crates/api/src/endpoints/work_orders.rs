use reqwest::Method;

use meditrack_auth::{Role, WorkOrderScope};
use meditrack_core::{WorkOrder, WorkOrderDraft, WorkOrderId, WorkOrderUpdate};

use super::{OneOrList, item_path};
use crate::error::{ApiError, ApiResult};
use crate::request::ApiClient;

pub const WORK_ORDERS: &str = "workorders/";
pub const ASSIGNED_WORK_ORDERS: &str = "workorders/assigned/";

/// Collection path serving `scope`.
pub fn work_orders_path(scope: WorkOrderScope) -> &'static str {
    match scope {
        WorkOrderScope::All => WORK_ORDERS,
        WorkOrderScope::Assigned => ASSIGNED_WORK_ORDERS,
    }
}

impl ApiClient {
    pub async fn list_work_orders(
        &self,
        scope: WorkOrderScope,
        token: Option<&str>,
    ) -> ApiResult<Vec<WorkOrder>> {
        self.get(work_orders_path(scope), token).await
    }

    /// Engineers get their assigned orders, everyone else the full list.
    pub async fn work_orders_for(
        &self,
        role: &Role,
        token: Option<&str>,
    ) -> ApiResult<Vec<WorkOrder>> {
        self.list_work_orders(role.work_order_scope(), token).await
    }

    pub async fn get_work_order(
        &self,
        id: WorkOrderId,
        token: Option<&str>,
    ) -> ApiResult<WorkOrder> {
        self.get::<OneOrList<WorkOrder>>(&item_path(WORK_ORDERS, id), token)
            .await?
            .into_first()
            .ok_or_else(|| ApiError::Decode(format!("work order {id}: empty response list")))
    }

    pub async fn create_work_order(
        &self,
        draft: &WorkOrderDraft,
        token: Option<&str>,
    ) -> ApiResult<WorkOrder> {
        draft.validate()?;
        self.send_json(Method::POST, WORK_ORDERS, draft, token).await
    }

    pub async fn update_work_order(
        &self,
        id: WorkOrderId,
        update: &WorkOrderUpdate,
        token: Option<&str>,
    ) -> ApiResult<WorkOrder> {
        self.send_json(Method::PATCH, &item_path(WORK_ORDERS, id), update, token)
            .await
    }

    pub async fn close_work_order(
        &self,
        id: WorkOrderId,
        token: Option<&str>,
    ) -> ApiResult<WorkOrder> {
        self.update_work_order(id, &WorkOrderUpdate::close(), token)
            .await
    }

    pub async fn delete_work_order(&self, id: WorkOrderId, token: Option<&str>) -> ApiResult<()> {
        self.delete(&item_path(WORK_ORDERS, id), token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engineers_read_the_assigned_collection() {
        assert_eq!(
            work_orders_path(Role::Engineer.work_order_scope()),
            "workorders/assigned/"
        );
        assert_eq!(work_orders_path(Role::Nurse.work_order_scope()), "workorders/");
        assert_eq!(work_orders_path(Role::Admin.work_order_scope()), "workorders/");
    }
}
