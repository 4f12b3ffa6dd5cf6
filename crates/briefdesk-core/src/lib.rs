//! Core briefdesk library (config, token storage, API client, resources).

pub mod api;
pub mod auth;
pub mod config;
pub mod display;
pub mod logging;
pub mod models;
pub mod resources;
