//! This crate contains all shared UI for the workspace: the session
//! context, API access from components, and every page view. Platform
//! crates provide routing and map [`Destination`]s onto their routes.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

mod access;
pub use access::Access;

mod auth;
pub use auth::{remembered_email, sign_in, sign_out, sign_up, use_auth, AuthProvider, AuthState};

pub mod browser;

mod client;
pub use client::{make_session_store, provide_app_context, use_api, use_config, Api};

pub mod hooks;
pub use hooks::{use_api_resource, FetchState};

mod nav;
pub use nav::{provide_navigation, use_navigate, Destination};
