pub mod kv;
pub mod storage;
pub mod store;
