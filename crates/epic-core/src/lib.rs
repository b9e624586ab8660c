//! Incremental mirror of the NASA EPIC natural-color imagery archive.

pub mod config;
pub mod logging;

pub mod catalog;
pub mod index;
pub mod inventory;
pub mod layout;
pub mod record;
pub mod storage;
pub mod sync;
