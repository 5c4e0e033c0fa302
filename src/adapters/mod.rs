//! Adapters - concrete implementations of the ports.

pub mod access;
pub mod ai;
pub mod export;
pub mod http;
pub mod persistence;
pub mod storage;
