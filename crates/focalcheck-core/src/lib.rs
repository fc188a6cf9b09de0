//! # focalcheck-core
//!
//! Safe Rust ports of the single library functions ("focal methods") that
//! focalcheck suites exercise.
//!
//! Every collaborator a focal method calls is a trait parameter. Suites pass
//! a test double implementing the trait instead of linking against the real
//! library or poking process-wide globals.

pub mod lcms;
pub mod pcap;
pub mod png;
pub mod sqlite;
pub mod unity;
pub mod zip;
