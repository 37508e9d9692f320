//! Form state as edited in the browser.
//!
//! Inputs and selects hand back strings; each form turns its raw fields into
//! the typed draft the API expects, or the first validation failure.

use std::str::FromStr;

use chrono::NaiveDate;

use meditrack_api::{Credentials, SignupRequest};
use meditrack_auth::Role;
use meditrack_core::{
    Device, DeviceDraft, DeviceStatus, DomainError, DomainResult, Hospital, HospitalDraft, Room,
    RoomDraft, SparePartDraft, UserId, WorkOrderDraft, WorkType,
};

/// Conversion from raw form fields to a request body.
pub trait Form {
    type Draft;

    fn draft(&self) -> DomainResult<Self::Draft>;
}

/// Text shown next to the form for a failed conversion.
pub fn error_message(err: &DomainError) -> String {
    match err {
        DomainError::Validation(msg) | DomainError::InvariantViolation(msg) => msg.clone(),
        DomainError::InvalidId(_) => "please choose a valid option".to_string(),
        DomainError::NotFound => "not found".to_string(),
    }
}

/// An empty `<select>` means "none chosen".
fn optional_id<T>(raw: &str) -> DomainResult<Option<T>>
where
    T: FromStr<Err = DomainError>,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some)
}

fn optional_date(raw: &str, field: &str) -> DomainResult<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| DomainError::validation(format!("{field} must be a date (YYYY-MM-DD)")))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl Form for LoginForm {
    type Draft = Credentials;

    fn draft(&self) -> DomainResult<Credentials> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(DomainError::validation("username and password are required"));
        }
        Ok(Credentials::new(self.username.trim(), self.password.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            role: Role::Nurse.as_str().to_string(),
        }
    }
}

impl Form for SignupForm {
    type Draft = SignupRequest;

    fn draft(&self) -> DomainResult<SignupRequest> {
        let request = SignupRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: Role::from(self.role.as_str()),
        };
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HospitalForm {
    pub name: String,
}

impl From<&Hospital> for HospitalForm {
    fn from(h: &Hospital) -> Self {
        Self {
            name: h.name.clone(),
        }
    }
}

impl Form for HospitalForm {
    type Draft = HospitalDraft;

    fn draft(&self) -> DomainResult<HospitalDraft> {
        let draft = HospitalDraft {
            name: self.name.trim().to_string(),
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomForm {
    pub room_number: String,
    pub hospital: String,
}

impl From<&Room> for RoomForm {
    fn from(r: &Room) -> Self {
        Self {
            room_number: r.room_number.clone(),
            hospital: r.hospital.to_string(),
        }
    }
}

impl Form for RoomForm {
    type Draft = RoomDraft;

    fn draft(&self) -> DomainResult<RoomDraft> {
        let draft = RoomDraft {
            room_number: self.room_number.trim().to_string(),
            hospital: optional_id(&self.hospital)?,
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceForm {
    pub asset_number: String,
    pub serial_number: String,
    pub equipment_name: String,
    pub model: String,
    pub manufacturer: String,
    pub status: String,
    pub room: String,
    pub assigned_engineer: String,
    pub assigned_nurses: Vec<String>,
    pub last_inventory_date: String,
}

impl Default for DeviceForm {
    fn default() -> Self {
        Self {
            asset_number: String::new(),
            serial_number: String::new(),
            equipment_name: String::new(),
            model: String::new(),
            manufacturer: String::new(),
            status: DeviceStatus::default().as_str().to_string(),
            room: String::new(),
            assigned_engineer: String::new(),
            assigned_nurses: Vec::new(),
            last_inventory_date: String::new(),
        }
    }
}

impl From<&Device> for DeviceForm {
    fn from(d: &Device) -> Self {
        Self {
            asset_number: d.asset_number.clone(),
            serial_number: d.serial_number.clone(),
            equipment_name: d.equipment_name.clone(),
            model: d.model.clone(),
            manufacturer: d.manufacturer.clone(),
            status: d.status.as_str().to_string(),
            room: d.room.map(|r| r.to_string()).unwrap_or_default(),
            assigned_engineer: d
                .assigned_engineer
                .map(|u| u.to_string())
                .unwrap_or_default(),
            assigned_nurses: d.assigned_nurses.iter().map(|u| u.to_string()).collect(),
            last_inventory_date: d
                .last_inventory_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

impl DeviceForm {
    /// Toggle a nurse in the multi-select.
    pub fn toggle_nurse(&mut self, id: &str) {
        if let Some(pos) = self.assigned_nurses.iter().position(|n| n == id) {
            self.assigned_nurses.remove(pos);
        } else {
            self.assigned_nurses.push(id.to_string());
        }
    }
}

impl Form for DeviceForm {
    type Draft = DeviceDraft;

    fn draft(&self) -> DomainResult<DeviceDraft> {
        let status = DeviceStatus::parse(&self.status).ok_or_else(|| {
            DomainError::validation(format!("unknown device status '{}'", self.status))
        })?;
        let assigned_nurses = self
            .assigned_nurses
            .iter()
            .map(|raw| raw.trim().parse::<UserId>())
            .collect::<DomainResult<Vec<_>>>()?;

        let draft = DeviceDraft {
            asset_number: self.asset_number.trim().to_string(),
            serial_number: self.serial_number.trim().to_string(),
            equipment_name: self.equipment_name.trim().to_string(),
            model: self.model.trim().to_string(),
            manufacturer: self.manufacturer.trim().to_string(),
            status,
            room: optional_id(&self.room)?,
            assigned_engineer: optional_id(&self.assigned_engineer)?,
            assigned_nurses,
            last_inventory_date: optional_date(&self.last_inventory_date, "last inventory date")?,
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkOrderForm {
    pub device: String,
    pub description: String,
    pub work_type: String,
}

impl Default for WorkOrderForm {
    fn default() -> Self {
        Self {
            device: String::new(),
            description: String::new(),
            work_type: WorkType::default().as_str().to_string(),
        }
    }
}

impl Form for WorkOrderForm {
    type Draft = WorkOrderDraft;

    fn draft(&self) -> DomainResult<WorkOrderDraft> {
        let work_type = WorkType::parse(&self.work_type).ok_or_else(|| {
            DomainError::validation(format!("unknown work type '{}'", self.work_type))
        })?;
        let draft = WorkOrderDraft {
            device: optional_id(&self.device)?,
            description: self.description.trim().to_string(),
            work_type,
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparePartForm {
    pub device: String,
    pub description: String,
    pub quantity: String,
}

impl Default for SparePartForm {
    fn default() -> Self {
        Self {
            device: String::new(),
            description: String::new(),
            quantity: "1".to_string(),
        }
    }
}

impl Form for SparePartForm {
    type Draft = SparePartDraft;

    fn draft(&self) -> DomainResult<SparePartDraft> {
        let quantity = self
            .quantity
            .trim()
            .parse::<u32>()
            .map_err(|_| DomainError::validation("quantity must be a whole number"))?;
        let draft = SparePartDraft {
            device: optional_id(&self.device)?,
            description: self.description.trim().to_string(),
            quantity,
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meditrack_core::{DeviceId, HospitalId, RoomId};
    use proptest::prelude::*;

    #[test]
    fn error_message_drops_the_error_kind() {
        let err = HospitalForm::default().draft().unwrap_err();
        assert_eq!(error_message(&err), "name is required");
    }

    #[test]
    fn login_requires_both_fields() {
        let mut form = LoginForm::default();
        assert!(form.draft().is_err());

        form.username = "  nina ".into();
        form.password = "pw".into();
        let creds = form.draft().unwrap();
        assert_eq!(creds.username, "nina");
    }

    #[test]
    fn signup_maps_role_string() {
        let form = SignupForm {
            username: "olga".into(),
            email: "olga@ward.example".into(),
            password: "pw".into(),
            role: "engineer".into(),
        };
        assert_eq!(form.draft().unwrap().role, Role::Engineer);

        let bad = SignupForm {
            role: "janitor".into(),
            ..form
        };
        assert!(bad.draft().is_err());
    }

    #[test]
    fn room_form_needs_a_hospital() {
        let mut form = RoomForm {
            room_number: "B12".into(),
            hospital: String::new(),
        };
        assert_eq!(
            form.draft(),
            Err(DomainError::validation("hospital is required"))
        );

        form.hospital = "4".into();
        assert_eq!(form.draft().unwrap().hospital, Some(HospitalId::new(4)));

        form.hospital = "four".into();
        assert!(matches!(form.draft(), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn device_form_parses_selects_and_date() {
        let form = DeviceForm {
            asset_number: "A-1".into(),
            serial_number: "SN-1".into(),
            equipment_name: "Ventilator".into(),
            status: "maintenance".into(),
            room: "2".into(),
            assigned_engineer: String::new(),
            assigned_nurses: vec!["5".into(), "6".into()],
            last_inventory_date: "2024-03-01".into(),
            ..DeviceForm::default()
        };
        let draft = form.draft().unwrap();
        assert_eq!(draft.status, DeviceStatus::Maintenance);
        assert_eq!(draft.room, Some(RoomId::new(2)));
        assert_eq!(draft.assigned_engineer, None);
        assert_eq!(draft.assigned_nurses, vec![UserId::new(5), UserId::new(6)]);
        assert_eq!(
            draft.last_inventory_date,
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );

        let bad_date = DeviceForm {
            last_inventory_date: "01/03/2024".into(),
            ..form
        };
        assert!(bad_date.draft().is_err());
    }

    #[test]
    fn device_form_round_trips_an_existing_device() {
        let device: Device = serde_json::from_str(
            r#"{"id": 9, "asset_number": "A-9", "serial_number": "S-9",
                "equipment_name": "Monitor", "status": "inactive", "room": 3,
                "assigned_nurses": [1, 2], "last_inventory_date": "2023-12-31"}"#,
        )
        .unwrap();
        let draft = DeviceForm::from(&device).draft().unwrap();
        assert_eq!(draft, DeviceDraft::from(&device));
    }

    #[test]
    fn toggling_a_nurse_twice_removes_it() {
        let mut form = DeviceForm::default();
        form.toggle_nurse("3");
        form.toggle_nurse("4");
        form.toggle_nurse("3");
        assert_eq!(form.assigned_nurses, vec!["4".to_string()]);
    }

    #[test]
    fn work_order_form_defaults_to_corrective() {
        let form = WorkOrderForm {
            device: "7".into(),
            description: "Leaking".into(),
            ..WorkOrderForm::default()
        };
        let draft = form.draft().unwrap();
        assert_eq!(draft.work_type, WorkType::Corrective);
        assert_eq!(draft.device, Some(DeviceId::new(7)));

        assert!(WorkOrderForm::default().draft().is_err());
    }

    #[test]
    fn spare_part_quantity_must_be_positive() {
        let mut form = SparePartForm {
            device: "7".into(),
            description: "Filter".into(),
            quantity: "0".into(),
        };
        assert!(form.draft().is_err());

        form.quantity = "-2".into();
        assert!(form.draft().is_err());

        form.quantity = " 3 ".into();
        assert_eq!(form.draft().unwrap().quantity, 3);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: toggling the same nurse twice leaves the selection as it was.
        #[test]
        fn double_toggle_is_identity(
            picked in proptest::collection::vec(1u32..50, 0..6),
            nurse in 1u32..50
        ) {
            let mut form = DeviceForm::default();
            for id in &picked {
                if !form.assigned_nurses.contains(&id.to_string()) {
                    form.toggle_nurse(&id.to_string());
                }
            }
            let before = form.assigned_nurses.clone();

            form.toggle_nurse(&nurse.to_string());
            form.toggle_nurse(&nurse.to_string());
            let mut after = form.assigned_nurses.clone();
            let mut expected = before;
            after.sort();
            expected.sort();
            prop_assert_eq!(after, expected);
        }

        /// Property: any positive whole quantity is accepted as typed.
        #[test]
        fn positive_quantities_parse(quantity in 1u32..10_000) {
            let form = SparePartForm {
                device: "1".into(),
                description: "Filter".into(),
                quantity: format!(" {quantity} "),
            };
            prop_assert_eq!(form.draft().unwrap().quantity, quantity);
        }

        /// Property: a non-numeric quantity never produces a draft.
        #[test]
        fn non_numeric_quantity_is_rejected(quantity in "[a-zA-Z ]{1,8}") {
            let form = SparePartForm {
                device: "1".into(),
                description: "Filter".into(),
                quantity,
            };
            prop_assert!(form.draft().is_err());
        }
    }
}
