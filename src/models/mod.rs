pub mod config;
pub mod storage_slot;
