//! Lenient deserializers for fields whose JSON shape differs between API
//! versions.

use serde::{Deserialize, Deserializer};

/// Accept either a JSON string or a JSON integer and keep it as a string.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        UInt(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::UInt(n) => n.to_string(),
    })
}

/// Accept `null`, a list of strings, or one comma-separated string.
pub fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Raw::One(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Raw::Many(v)) => v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "string_or_seq")]
        names: Vec<String>,
    }

    #[test]
    fn numeric_id_becomes_string() {
        let p: Probe = serde_json::from_str(r#"{"id": 17}"#).unwrap();
        assert_eq!(p.id, "17");
        assert!(p.names.is_empty());
    }

    #[test]
    fn single_name_becomes_list() {
        let p: Probe = serde_json::from_str(r#"{"id": "a", "names": "nurse1"}"#).unwrap();
        assert_eq!(p.names, vec!["nurse1".to_string()]);

        let p: Probe = serde_json::from_str(r#"{"id": "a", "names": null}"#).unwrap();
        assert!(p.names.is_empty());

        let p: Probe = serde_json::from_str(r#"{"id": "a", "names": ["x", "y"]}"#).unwrap();
        assert_eq!(p.names.len(), 2);
    }

    #[test]
    fn comma_separated_names_are_split() {
        let p: Probe = serde_json::from_str(r#"{"id": "a", "names": "nina, olga"}"#).unwrap();
        assert_eq!(p.names, vec!["nina".to_string(), "olga".to_string()]);

        let p: Probe = serde_json::from_str(r#"{"id": "a", "names": " , "}"#).unwrap();
        assert!(p.names.is_empty());
    }
}
