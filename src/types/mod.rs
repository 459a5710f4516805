// Nav panel shared type definitions
// Each submodule defines types used across the store, the API client and the RPC surface.

pub mod errors;
pub mod group;
pub mod notification;
pub mod search_engine;
pub mod settings;
pub mod transfer;
pub mod website;
