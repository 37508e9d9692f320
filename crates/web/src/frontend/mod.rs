//! Leptos frontend.

pub mod app;
pub mod components;
pub mod context;
pub mod pages;

use wasm_bindgen::prelude::*;

/// WASM entry point, run when the module loads.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    meditrack_observability::init();

    leptos::mount_to_body(app::App);
}
