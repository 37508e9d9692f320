//! Hospitals: the top of the location hierarchy.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainResult, require};
use crate::id::HospitalId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
}

impl Entity for Hospital {
    type Id = HospitalId;

    fn id(&self) -> HospitalId {
        self.id
    }
}

/// Body of a create/update request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalDraft {
    pub name: String,
}

impl HospitalDraft {
    pub fn validate(&self) -> DomainResult<()> {
        require(&self.name, "name")
    }
}

impl From<&Hospital> for HospitalDraft {
    fn from(h: &Hospital) -> Self {
        Self {
            name: h.name.clone(),
        }
    }
}
