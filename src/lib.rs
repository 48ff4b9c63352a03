//! Reads a message's STEGA signature headers and turns them into a trust
//! verdict.
//!
//! The core is two pure functions: [`parse_headers`] unfolds a raw header
//! block into a [`HeaderMap`], and [`classify_signature`] maps that map to a
//! [`VerdictResult`]. Everything else (sources, export, history, the terminal
//! panel) is the caller side.

pub mod config;
pub mod domain;
pub mod mail;
pub mod store;
pub mod terminal;

pub use domain::headers::HeaderMap;
pub use domain::verdict::{VerdictResult, VerdictStatus};
pub use mail::header_parser::parse_headers;
pub use mail::signature::classify_signature;
