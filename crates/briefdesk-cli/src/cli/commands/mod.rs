//! CLI command handlers.

pub mod auth;
pub mod briefings;
pub mod calendar;
pub mod clients;
pub mod config;
pub mod groups;
pub mod health;
pub mod notes;
