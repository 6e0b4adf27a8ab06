pub mod auth;
pub mod config;
pub mod error;
pub mod intake;
pub mod routes;
pub mod state;
pub mod store;
pub mod templates;
pub mod view;
