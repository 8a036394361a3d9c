//! Data models for extracted certificates and configuration.

pub mod certificate;
pub mod config;
