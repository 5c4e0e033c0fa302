//! Idébanken - Internal Employee Suggestion Intake
//!
//! This crate implements AI-assisted refinement of employee suggestions
//! and the admin review workflow that consumes them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
