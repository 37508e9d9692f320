//! `meditrack-web`
//!
//! Browser client for MediTrack. Form handling, role-dependent view models
//! and page loading are plain Rust and tested natively; the Leptos frontend
//! and the `localStorage` backend only build for `wasm32`.

pub mod forms;
pub mod loaders;
pub mod token;
pub mod views;

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use forms::Form;
pub use token::StoredToken;
