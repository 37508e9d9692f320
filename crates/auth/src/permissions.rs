//! Role capabilities: which actions a role may take on which records.
//!
//! Route access is in [`crate::routes`]; this covers the finer, per-record
//! decisions views make (show a button or not, pick which list to fetch).

use meditrack_core::{SparePartRequest, WorkOrder};

use crate::roles::Role;

/// An action gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    CreateWorkOrder,
    CloseWorkOrder,
    CreateSparePartRequest,
    ReviewSparePartRequest,
    /// Create and edit hospitals, rooms and devices.
    ManageFacilities,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::CreateWorkOrder => "workorders.create",
            Capability::CloseWorkOrder => "workorders.close",
            Capability::CreateSparePartRequest => "spareparts.create",
            Capability::ReviewSparePartRequest => "spareparts.review",
            Capability::ManageFacilities => "facilities.write",
        }
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which device list a role sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceScope {
    All,
    Assigned,
    None,
}

/// Which work-order list a role sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkOrderScope {
    All,
    Assigned,
}

impl Role {
    pub fn can(&self, capability: Capability) -> bool {
        matches!(
            (self, capability),
            (Role::Nurse, Capability::CreateWorkOrder)
                | (Role::Engineer, Capability::CloseWorkOrder)
                | (Role::Engineer, Capability::CreateSparePartRequest)
                | (Role::Admin, Capability::ReviewSparePartRequest)
                | (Role::Admin, Capability::ManageFacilities)
        )
    }

    /// Engineers close work orders that are not closed yet.
    pub fn can_close(&self, order: &WorkOrder) -> bool {
        self.can(Capability::CloseWorkOrder) && !order.is_closed()
    }

    /// Admins approve or reject requests that are still pending.
    pub fn can_review(&self, request: &SparePartRequest) -> bool {
        self.can(Capability::ReviewSparePartRequest) && request.is_pending()
    }

    pub fn device_scope(&self) -> DeviceScope {
        match self {
            Role::Admin | Role::Nurse => DeviceScope::All,
            Role::Engineer => DeviceScope::Assigned,
            Role::Other(_) => DeviceScope::None,
        }
    }

    pub fn work_order_scope(&self) -> WorkOrderScope {
        match self {
            Role::Engineer => WorkOrderScope::Assigned,
            _ => WorkOrderScope::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work_order(status: &str) -> WorkOrder {
        serde_json::from_value(serde_json::json!({
            "id": 1, "work_number": "WO-1", "device": 1, "status": status
        }))
        .unwrap()
    }

    fn request(status: &str) -> SparePartRequest {
        serde_json::from_value(serde_json::json!({
            "id": 1, "device": 1, "quantity": 1, "status": status
        }))
        .unwrap()
    }

    #[test]
    fn only_engineers_close_open_orders() {
        assert!(Role::Engineer.can_close(&work_order("in_progress")));
        assert!(!Role::Engineer.can_close(&work_order("closed")));
        assert!(!Role::Admin.can_close(&work_order("open")));
        assert!(!Role::Nurse.can_close(&work_order("open")));
    }

    #[test]
    fn only_admins_review_pending_requests() {
        assert!(Role::Admin.can_review(&request("pending")));
        assert!(!Role::Admin.can_review(&request("approved")));
        assert!(!Role::Engineer.can_review(&request("pending")));
    }

    #[test]
    fn creation_rights() {
        assert!(Role::Nurse.can(Capability::CreateWorkOrder));
        assert!(!Role::Engineer.can(Capability::CreateWorkOrder));
        assert!(Role::Engineer.can(Capability::CreateSparePartRequest));
        assert!(!Role::Other("x".into()).can(Capability::ManageFacilities));
    }

    #[test]
    fn list_scopes() {
        assert_eq!(Role::Nurse.device_scope(), DeviceScope::All);
        assert_eq!(Role::Engineer.device_scope(), DeviceScope::Assigned);
        assert_eq!(Role::from("guest").device_scope(), DeviceScope::None);
        assert_eq!(Role::Engineer.work_order_scope(), WorkOrderScope::Assigned);
        assert_eq!(Role::Nurse.work_order_scope(), WorkOrderScope::All);
    }
}
