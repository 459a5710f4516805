//! navpanel: client state layer for a personal start page.
//!
//! Holds the dashboard's websites, groups, search engines and display settings,
//! keeps them in sync with a REST backend and derives the grouped view. The
//! library exposes every module to the binaries and the integration tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod store;
pub mod types;
