// navpanel services
// Backend access (HTTP or in-memory), response decoding, icon uploads, the grouped
// view, search dispatch and backup files.

pub mod api_client;
pub mod backup;
pub mod envelope;
pub mod icon_upload;
pub mod memory_backend;
pub mod reconcile;
pub mod search;
