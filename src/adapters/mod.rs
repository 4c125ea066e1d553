//! Adapters: concrete implementations of the ports plus the HTTP
//! transport.

pub mod ai;
pub mod http;
pub mod storage;
