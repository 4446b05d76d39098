pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod form;
pub mod models;
pub mod reconcile;
pub mod report;
pub mod router;
pub mod state;
pub mod view;
