//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, a JSON state file on native)
//! - HTTP fetch of the comment and user datasets

pub mod http;
pub mod storage;
