//! Role-dependent view models shared by the pages.

use meditrack_auth::{AppRoute, Capability, Role, Session};
use meditrack_core::{
    Device, DeviceStatus, SparePartRequest, SparePartStatus, UserId, WorkOrder, WorkOrderStatus,
    work_order::{closed_reported_by, open_reported_by},
};

/// A labelled link to another view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: AppRoute,
}

impl NavLink {
    const fn new(label: &'static str, route: AppRoute) -> Self {
        Self { label, route }
    }

    pub fn href(&self) -> String {
        self.route.path()
    }
}

/// Navigation bar entries.
pub fn nav_links(role: Option<&Role>) -> Vec<NavLink> {
    let mut links = vec![
        NavLink::new("Dashboard", AppRoute::Dashboard),
        NavLink::new("Devices", AppRoute::Devices),
    ];
    match role {
        Some(Role::Admin) => links.extend([
            NavLink::new("Work Orders", AppRoute::WorkOrders),
            NavLink::new("Spare Parts", AppRoute::SpareParts),
            NavLink::new("Hospitals", AppRoute::Hospitals),
            NavLink::new("Rooms", AppRoute::Rooms),
        ]),
        Some(Role::Engineer) => links.extend([
            NavLink::new("Work Orders", AppRoute::WorkOrders),
            NavLink::new("Spare Parts", AppRoute::SpareParts),
        ]),
        Some(Role::Nurse) => links.push(NavLink::new("Work Orders", AppRoute::WorkOrders)),
        Some(Role::Other(_)) | None => {}
    }
    links
}

/// Shortcuts on a role's dashboard.
pub fn quick_links(role: &Role) -> Vec<NavLink> {
    match role {
        Role::Admin => vec![
            NavLink::new("Manage Devices", AppRoute::Devices),
            NavLink::new("Work Orders", AppRoute::WorkOrders),
            NavLink::new("Spare Part Requests", AppRoute::SpareParts),
            NavLink::new("Hospitals", AppRoute::Hospitals),
        ],
        Role::Engineer => vec![
            NavLink::new("Assigned Devices", AppRoute::Devices),
            NavLink::new("My Work Orders", AppRoute::WorkOrders),
            NavLink::new("Open Work Orders", AppRoute::EngineerOpenWorkOrders),
            NavLink::new("Request Parts", AppRoute::NewSparePart),
        ],
        Role::Nurse => vec![
            NavLink::new("Report a Fault", AppRoute::NewWorkOrder),
            NavLink::new("My Open Work Orders", AppRoute::NurseOpenWorkOrders),
            NavLink::new("My Closed Work Orders", AppRoute::NurseClosedWorkOrders),
        ],
        Role::Other(_) => Vec::new(),
    }
}

/// "Create" button on an index page, when the role may use it.
pub fn create_action(role: &Role, index: AppRoute) -> Option<NavLink> {
    let (capability, link) = match index {
        AppRoute::WorkOrders => (
            Capability::CreateWorkOrder,
            NavLink::new("New Work Order", AppRoute::NewWorkOrder),
        ),
        AppRoute::SpareParts => (
            Capability::CreateSparePartRequest,
            NavLink::new("New Request", AppRoute::NewSparePart),
        ),
        AppRoute::Hospitals => (
            Capability::ManageFacilities,
            NavLink::new("Add Hospital", AppRoute::NewHospital),
        ),
        AppRoute::Rooms => (
            Capability::ManageFacilities,
            NavLink::new("Add Room", AppRoute::NewRoom),
        ),
        AppRoute::Devices => (
            Capability::ManageFacilities,
            NavLink::new("Add Device", AppRoute::NewDevice),
        ),
        _ => return None,
    };
    role.can(capability).then_some(link)
}

/// Which list of the nurse's own reports to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFilter {
    Open,
    Closed,
}

/// Work orders raised by the signed-in nurse, filtered by `filter`.
pub fn own_reports(orders: &[WorkOrder], session: &Session, filter: ReportFilter) -> Vec<WorkOrder> {
    let username = session.username();
    match filter {
        ReportFilter::Open => open_reported_by(orders, username).cloned().collect(),
        ReportFilter::Closed => closed_reported_by(orders, username).cloned().collect(),
    }
}

/// Work orders that still need an engineer.
pub fn open_orders(orders: &[WorkOrder]) -> Vec<WorkOrder> {
    orders.iter().filter(|o| o.is_open()).cloned().collect()
}

/// CSS class for a status badge.
pub fn work_order_badge(status: WorkOrderStatus) -> &'static str {
    match status {
        WorkOrderStatus::Open => "badge badge-open",
        WorkOrderStatus::InProgress => "badge badge-progress",
        WorkOrderStatus::Closed => "badge badge-closed",
    }
}

pub fn spare_part_badge(status: SparePartStatus) -> &'static str {
    match status {
        SparePartStatus::Pending => "badge badge-pending",
        SparePartStatus::Approved => "badge badge-approved",
        SparePartStatus::Rejected => "badge badge-rejected",
    }
}

pub fn device_badge(status: DeviceStatus) -> &'static str {
    match status {
        DeviceStatus::Active => "badge badge-active",
        DeviceStatus::Inactive => "badge badge-inactive",
        DeviceStatus::Maintenance => "badge badge-maintenance",
        DeviceStatus::Decommissioned => "badge badge-decommissioned",
    }
}

/// Value/label pairs for a device `<select>`.
pub fn device_options(devices: &[Device]) -> Vec<(String, String)> {
    devices
        .iter()
        .map(|d| (d.id.to_string(), d.label()))
        .collect()
}

/// Whether `session` may open the detail view of `order`.
///
/// Nurses see the orders they reported, engineers the ones assigned to
/// them; the error is the message to show instead.
pub fn work_order_access(session: &Session, order: &WorkOrder) -> Result<(), &'static str> {
    let me = session.user_id().parse::<UserId>().ok();
    match session.role() {
        Role::Nurse if me.is_none() || order.created_by_id != me => {
            Err("You do not have permission to view this work order.")
        }
        Role::Engineer if me.is_none() || order.assigned_to_id != me => {
            Err("You are not assigned to this work order.")
        }
        _ => Ok(()),
    }
}

/// Actions offered on a work order's detail view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkOrderActions {
    pub close: bool,
}

impl WorkOrderActions {
    pub fn for_role(role: &Role, order: &WorkOrder) -> Self {
        Self {
            close: role.can_close(order),
        }
    }
}

/// Actions offered on a spare-part request's detail view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SparePartActions {
    pub approve: bool,
    pub reject: bool,
}

impl SparePartActions {
    pub fn for_role(role: &Role, request: &SparePartRequest) -> Self {
        let review = role.can_review(request);
        Self {
            approve: review,
            reject: review,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meditrack_auth::LoginResponse;

    fn order(id: i64, by: &str, status: &str) -> WorkOrder {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "work_number": format!("WO-{id}"),
            "device": 1,
            "status": status,
            "created_by_display": by
        }))
        .unwrap()
    }

    fn nurse(name: &str) -> Session {
        signed_in(name, Role::Nurse, "3")
    }

    fn signed_in(name: &str, role: Role, user_id: &str) -> Session {
        Session::try_from(LoginResponse {
            username: name.into(),
            user_type: role,
            user_id: user_id.into(),
            access: "a".into(),
            refresh: "r".into(),
        })
        .unwrap()
    }

    #[test]
    fn only_admins_see_facility_links() {
        let admin: Vec<_> = nav_links(Some(&Role::Admin)).iter().map(|l| l.label).collect();
        assert!(admin.contains(&"Hospitals"));

        let nurse: Vec<_> = nav_links(Some(&Role::Nurse)).iter().map(|l| l.label).collect();
        assert_eq!(nurse, vec!["Dashboard", "Devices", "Work Orders"]);

        assert_eq!(nav_links(None).len(), 2);
    }

    #[test]
    fn quick_links_stay_inside_the_role() {
        for role in Role::KNOWN {
            for link in quick_links(&role) {
                let allowed = link.route.allowed_roles().unwrap();
                assert!(allowed.contains(&role), "{role} cannot open {}", link.href());
            }
        }
        assert!(quick_links(&Role::Other("x".into())).is_empty());
    }

    #[test]
    fn create_buttons_follow_capabilities() {
        assert!(create_action(&Role::Nurse, AppRoute::WorkOrders).is_some());
        assert!(create_action(&Role::Engineer, AppRoute::WorkOrders).is_none());
        assert!(create_action(&Role::Engineer, AppRoute::SpareParts).is_some());
        assert!(create_action(&Role::Admin, AppRoute::SpareParts).is_none());
        assert_eq!(
            create_action(&Role::Admin, AppRoute::Rooms).map(|l| l.route),
            Some(AppRoute::NewRoom)
        );
        assert!(create_action(&Role::Admin, AppRoute::Login).is_none());
    }

    #[test]
    fn nurse_sees_only_own_reports() {
        let orders = vec![
            order(1, "nina", "open"),
            order(2, "nina", "closed"),
            order(3, "olga", "open"),
            order(4, "nina", "in_progress"),
        ];
        let session = nurse("nina");

        let open: Vec<_> = own_reports(&orders, &session, ReportFilter::Open)
            .into_iter()
            .map(|o| o.id.get())
            .collect();
        assert_eq!(open, vec![1, 4]);

        let closed: Vec<_> = own_reports(&orders, &session, ReportFilter::Closed)
            .into_iter()
            .map(|o| o.id.get())
            .collect();
        assert_eq!(closed, vec![2]);

        assert_eq!(open_orders(&orders).len(), 3);
    }

    #[test]
    fn close_action_only_for_engineers_on_unclosed_orders() {
        let open = order(1, "nina", "open");
        let closed = order(2, "nina", "closed");
        assert!(WorkOrderActions::for_role(&Role::Engineer, &open).close);
        assert!(!WorkOrderActions::for_role(&Role::Engineer, &closed).close);
        assert!(!WorkOrderActions::for_role(&Role::Nurse, &open).close);
    }

    #[test]
    fn detail_view_is_limited_to_reporter_or_assignee() {
        let mut order = order(1, "nina", "open");
        order.created_by_id = Some(UserId::new(3));
        order.assigned_to_id = Some(UserId::new(8));

        assert!(work_order_access(&nurse("nina"), &order).is_ok());
        assert!(work_order_access(&signed_in("olga", Role::Nurse, "4"), &order).is_err());
        assert!(work_order_access(&signed_in("eve", Role::Engineer, "8"), &order).is_ok());
        assert_eq!(
            work_order_access(&signed_in("sam", Role::Engineer, "9"), &order),
            Err("You are not assigned to this work order.")
        );
        assert!(work_order_access(&signed_in("root", Role::Admin, "1"), &order).is_ok());
    }
}
