//! One typed method on [`ApiClient`](crate::ApiClient) per REST operation.

pub mod auth;
pub mod dashboard;
pub mod devices;
pub mod hospitals;
pub mod rooms;
pub mod spare_parts;
pub mod work_orders;

use serde::Deserialize;

/// `"<collection><id>/"` for collection paths ending in `/`.
pub(crate) fn item_path(collection: &str, id: impl std::fmt::Display) -> String {
    format!("{collection}{id}/")
}

/// Item responses that some server versions wrap in a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrList<T> {
    One(T),
    List(Vec<T>),
}

impl<T> OneOrList<T> {
    /// The item itself, or the first element of the list.
    pub(crate) fn into_first(self) -> Option<T> {
        match self {
            OneOrList::One(item) => Some(item),
            OneOrList::List(items) => items.into_iter().next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_path_appends_id_and_slash() {
        assert_eq!(item_path("hospitals/", 7), "hospitals/7/");
    }

    #[test]
    fn wrapped_item_is_unwrapped() {
        let one: OneOrList<u32> = serde_json::from_str("7").unwrap();
        assert_eq!(one.into_first(), Some(7));

        let list: OneOrList<u32> = serde_json::from_str("[7, 8]").unwrap();
        assert_eq!(list.into_first(), Some(7));

        let empty: OneOrList<u32> = serde_json::from_str("[]").unwrap();
        assert_eq!(empty.into_first(), None);
    }
}
