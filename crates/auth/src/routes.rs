//! Client-side route table.

use meditrack_core::{DeviceId, HospitalId, RoomId, SparePartId, WorkOrderId};

use crate::roles::Role;

const ADMIN: &[Role] = &[Role::Admin];
const ENGINEER: &[Role] = &[Role::Engineer];
const NURSE: &[Role] = &[Role::Nurse];
const ADMIN_ENGINEER: &[Role] = &[Role::Admin, Role::Engineer];
const STAFF: &[Role] = &[Role::Admin, Role::Engineer, Role::Nurse];

/// Every view of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Home,
    Login,
    Signup,
    Unauthorized,

    /// Generic entry point, resolved per role by the role router.
    Dashboard,
    AdminDashboard,
    EngineerDashboard,
    NurseDashboard,

    Hospitals,
    NewHospital,
    EditHospital(HospitalId),

    Rooms,
    NewRoom,
    EditRoom(RoomId),

    Devices,
    NewDevice,
    EditDevice(DeviceId),

    WorkOrders,
    NewWorkOrder,
    WorkOrderDetail(WorkOrderId),
    EngineerOpenWorkOrders,
    NurseOpenWorkOrders,
    NurseClosedWorkOrders,

    SpareParts,
    NewSparePart,
    SparePartDetail(SparePartId),
}

impl AppRoute {
    /// Parse a location path. Query string and fragment are ignored, as is a
    /// trailing slash. Literal segments (`new`, `open`) win over ids.
    pub fn parse(path: &str) -> Option<Self> {
        let segments = segments(path);

        let route = match segments.as_slice() {
            [] => AppRoute::Home,
            ["login"] => AppRoute::Login,
            ["signup"] => AppRoute::Signup,
            ["unauthorized"] => AppRoute::Unauthorized,

            ["dashboard"] => AppRoute::Dashboard,
            ["dashboard", "admin"] => AppRoute::AdminDashboard,
            ["dashboard", "engineer"] => AppRoute::EngineerDashboard,
            ["dashboard", "nurse"] => AppRoute::NurseDashboard,

            ["hospitals"] => AppRoute::Hospitals,
            ["hospitals", "new"] => AppRoute::NewHospital,
            ["hospitals", id] => AppRoute::EditHospital(id.parse().ok()?),

            ["rooms"] => AppRoute::Rooms,
            ["rooms", "new"] => AppRoute::NewRoom,
            ["rooms", id] => AppRoute::EditRoom(id.parse().ok()?),

            ["devices"] => AppRoute::Devices,
            ["devices", "new"] => AppRoute::NewDevice,
            ["devices", id] => AppRoute::EditDevice(id.parse().ok()?),

            ["workorders"] => AppRoute::WorkOrders,
            ["workorders", "new"] => AppRoute::NewWorkOrder,
            ["workorders", "open"] => AppRoute::EngineerOpenWorkOrders,
            ["workorders", "nurse", "open"] => AppRoute::NurseOpenWorkOrders,
            ["workorders", "nurse", "closed"] => AppRoute::NurseClosedWorkOrders,
            ["workorders", id] => AppRoute::WorkOrderDetail(id.parse().ok()?),

            ["spareparts"] => AppRoute::SpareParts,
            ["spareparts", "new"] => AppRoute::NewSparePart,
            ["spareparts", id] => AppRoute::SparePartDetail(id.parse().ok()?),

            _ => return None,
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            AppRoute::Home => "/".to_string(),
            AppRoute::Login => "/login".to_string(),
            AppRoute::Signup => "/signup".to_string(),
            AppRoute::Unauthorized => "/unauthorized".to_string(),
            AppRoute::Dashboard => "/dashboard".to_string(),
            AppRoute::AdminDashboard => "/dashboard/admin".to_string(),
            AppRoute::EngineerDashboard => "/dashboard/engineer".to_string(),
            AppRoute::NurseDashboard => "/dashboard/nurse".to_string(),
            AppRoute::Hospitals => "/hospitals".to_string(),
            AppRoute::NewHospital => "/hospitals/new".to_string(),
            AppRoute::EditHospital(id) => format!("/hospitals/{id}"),
            AppRoute::Rooms => "/rooms".to_string(),
            AppRoute::NewRoom => "/rooms/new".to_string(),
            AppRoute::EditRoom(id) => format!("/rooms/{id}"),
            AppRoute::Devices => "/devices".to_string(),
            AppRoute::NewDevice => "/devices/new".to_string(),
            AppRoute::EditDevice(id) => format!("/devices/{id}"),
            AppRoute::WorkOrders => "/workorders".to_string(),
            AppRoute::NewWorkOrder => "/workorders/new".to_string(),
            AppRoute::WorkOrderDetail(id) => format!("/workorders/{id}"),
            AppRoute::EngineerOpenWorkOrders => "/workorders/open".to_string(),
            AppRoute::NurseOpenWorkOrders => "/workorders/nurse/open".to_string(),
            AppRoute::NurseClosedWorkOrders => "/workorders/nurse/closed".to_string(),
            AppRoute::SpareParts => "/spareparts".to_string(),
            AppRoute::NewSparePart => "/spareparts/new".to_string(),
            AppRoute::SparePartDetail(id) => format!("/spareparts/{id}"),
        }
    }

    /// Roles admitted to the route; `None` for public routes.
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        let roles = match self {
            AppRoute::Home | AppRoute::Login | AppRoute::Signup | AppRoute::Unauthorized => {
                return None;
            }

            AppRoute::Dashboard => STAFF,
            AppRoute::AdminDashboard => ADMIN,
            AppRoute::EngineerDashboard => ENGINEER,
            AppRoute::NurseDashboard => NURSE,

            AppRoute::Hospitals | AppRoute::NewHospital | AppRoute::EditHospital(_) => ADMIN,
            AppRoute::Rooms | AppRoute::NewRoom | AppRoute::EditRoom(_) => ADMIN,

            AppRoute::Devices => STAFF,
            AppRoute::NewDevice | AppRoute::EditDevice(_) => ADMIN,

            AppRoute::WorkOrders | AppRoute::WorkOrderDetail(_) => STAFF,
            AppRoute::NewWorkOrder => NURSE,
            AppRoute::EngineerOpenWorkOrders => ENGINEER,
            AppRoute::NurseOpenWorkOrders | AppRoute::NurseClosedWorkOrders => NURSE,

            AppRoute::SpareParts | AppRoute::SparePartDetail(_) => ADMIN_ENGINEER,
            AppRoute::NewSparePart => ENGINEER,
        };
        Some(roles)
    }

    /// Roles guarding the section a path sits in, for paths that no route
    /// matches (`/hospitals/abc`, `/rooms/1/edit`).
    ///
    /// Item views are the strictest part of a section, so their roles apply.
    /// `None` for paths outside every protected section.
    pub fn section_roles(path: &str) -> Option<&'static [Role]> {
        let roles = match segments(path).first().copied()? {
            "dashboard" => STAFF,
            "hospitals" | "rooms" | "devices" => ADMIN,
            "workorders" => STAFF,
            "spareparts" => ADMIN_ENGINEER,
            _ => return None,
        };
        Some(roles)
    }

    pub fn is_public(&self) -> bool {
        self.allowed_roles().is_none()
    }

    /// Routes that render without the navigation bar.
    pub fn is_bare(&self) -> bool {
        matches!(self, AppRoute::Home | AppRoute::Login | AppRoute::Signup)
    }

    /// Role-specific dashboard, for the three known roles.
    pub fn dashboard_of(role: &Role) -> Option<Self> {
        match role {
            Role::Admin => Some(AppRoute::AdminDashboard),
            Role::Engineer => Some(AppRoute::EngineerDashboard),
            Role::Nurse => Some(AppRoute::NurseDashboard),
            Role::Other(_) => None,
        }
    }
}

/// Path segments, ignoring query string, fragment and empty segments.
fn segments(path: &str) -> Vec<&str> {
    path.split(['?', '#'])
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}

impl core::fmt::Display for AppRoute {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_segments_win_over_ids() {
        assert_eq!(AppRoute::parse("/workorders/open"), Some(AppRoute::EngineerOpenWorkOrders));
        assert_eq!(AppRoute::parse("/workorders/new"), Some(AppRoute::NewWorkOrder));
        assert_eq!(
            AppRoute::parse("/workorders/7"),
            Some(AppRoute::WorkOrderDetail(WorkOrderId::new(7)))
        );
    }

    #[test]
    fn tolerates_trailing_slash_and_query() {
        assert_eq!(AppRoute::parse("/dashboard/"), Some(AppRoute::Dashboard));
        assert_eq!(AppRoute::parse("/devices?page=2"), Some(AppRoute::Devices));
        assert_eq!(AppRoute::parse(""), Some(AppRoute::Home));
    }

    #[test]
    fn unknown_paths_do_not_match() {
        assert_eq!(AppRoute::parse("/admin"), None);
        assert_eq!(AppRoute::parse("/devices/abc"), None);
        assert_eq!(AppRoute::parse("/rooms/1/edit"), None);
    }

    #[test]
    fn malformed_item_paths_keep_their_section_roles() {
        assert_eq!(AppRoute::section_roles("/hospitals/abc"), Some(ADMIN));
        assert_eq!(AppRoute::section_roles("/rooms/1/edit"), Some(ADMIN));
        assert_eq!(AppRoute::section_roles("/devices/x?tab=1"), Some(ADMIN));
        assert_eq!(AppRoute::section_roles("/workorders/abc"), Some(STAFF));
        assert_eq!(AppRoute::section_roles("/spareparts/zz"), Some(ADMIN_ENGINEER));
        assert_eq!(AppRoute::section_roles("/dashboard/other"), Some(STAFF));
        assert_eq!(AppRoute::section_roles("/admin"), None);
        assert_eq!(AppRoute::section_roles("/"), None);
    }

    #[test]
    fn path_and_parse_agree() {
        let routes = [
            AppRoute::Home,
            AppRoute::Unauthorized,
            AppRoute::NurseDashboard,
            AppRoute::EditHospital(HospitalId::new(2)),
            AppRoute::EditRoom(RoomId::new(3)),
            AppRoute::EditDevice(DeviceId::new(4)),
            AppRoute::NurseClosedWorkOrders,
            AppRoute::SparePartDetail(SparePartId::new(5)),
        ];
        for route in routes {
            assert_eq!(AppRoute::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn role_table_matches_application_router() {
        assert_eq!(AppRoute::Hospitals.allowed_roles(), Some(ADMIN));
        assert_eq!(AppRoute::NewWorkOrder.allowed_roles(), Some(NURSE));
        assert_eq!(AppRoute::NewSparePart.allowed_roles(), Some(ENGINEER));
        assert_eq!(AppRoute::SpareParts.allowed_roles(), Some(ADMIN_ENGINEER));
        assert!(AppRoute::Login.is_public());
        assert!(!AppRoute::Devices.is_public());
    }
}
