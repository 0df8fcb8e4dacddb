//! Open Journey Planner (OJP 2.0) client.
//!
//! Decodes OJP XML responses into typed trips and places regardless of the
//! namespace prefixes a server uses, and pages through trip searches
//! without ever returning the same trip twice.

pub mod cache;
pub mod domain;
pub mod ojp;
pub mod pagination;
pub mod xml;
