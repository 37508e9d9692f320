use serde::{Deserialize, Serialize};

/// Role of an authenticated staff member.
///
/// The API sends roles as lowercase strings (`user_type`). Anything outside
/// the three known roles is kept verbatim in `Other` so it can be rejected
/// by routing instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Engineer,
    Nurse,
    Other(String),
}

impl Role {
    pub const KNOWN: [Role; 3] = [Role::Admin, Role::Engineer, Role::Nurse];

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Engineer => "engineer",
            Role::Nurse => "nurse",
            Role::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Other(_))
    }

    pub fn label(&self) -> &str {
        match self {
            Role::Admin => "Admin",
            Role::Engineer => "Engineer",
            Role::Nurse => "Nurse",
            Role::Other(s) => s,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => Role::Admin,
            "engineer" => Role::Engineer,
            "nurse" => Role::Nurse,
            _ => Role::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        match value {
            Role::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_round_trip_through_wire_string() {
        for role in Role::KNOWN {
            let json = serde_json::to_string(&role).unwrap();
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn unknown_role_is_preserved() {
        let role: Role = serde_json::from_str("\"janitor\"").unwrap();
        assert_eq!(role, Role::Other("janitor".into()));
        assert!(!role.is_known());
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"janitor\"");
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(Role::from("Admin"), Role::Other("Admin".into()));
    }
}
