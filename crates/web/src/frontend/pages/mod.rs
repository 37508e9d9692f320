//! Route views.

pub mod auth;
pub mod dashboards;
pub mod devices;
pub mod hospitals;
pub mod misc;
pub mod rooms;
pub mod spare_parts;
pub mod work_orders;

use std::str::FromStr;

use leptos::*;
use leptos_router::*;

/// The `:id` route parameter, if present and well-formed.
pub(crate) fn use_id_param<T>() -> Memo<Option<T>>
where
    T: FromStr + Clone + PartialEq + 'static,
{
    let params = use_params_map();
    create_memo(move |_| params.with(|p| p.get("id").and_then(|raw| raw.parse().ok())))
}

/// Two-way binding helpers for text inputs bound to a field of a form signal.
pub(crate) fn field<F: 'static>(
    form: RwSignal<F>,
    get: impl Fn(&F) -> String + Copy + 'static,
    set: impl Fn(&mut F, String) + Copy + 'static,
) -> (
    impl Fn() -> String + Copy + 'static,
    impl Fn(ev::Event) + Copy + 'static,
) {
    (
        move || form.with(get),
        move |ev: ev::Event| {
            let value = event_target_value(&ev);
            form.update(|f| set(f, value));
        },
    )
}
