//! Storage contracts and the persisted file library.

pub mod kv;
pub mod records;
