//! URL handling module for Linktrail
//!
//! This module provides href resolution into canonical URLs, host
//! extraction, wildcard matching, and the allowed-domain filter.

mod domain;
mod filter;
mod matcher;
mod resolve;

// Re-export main functions
pub use domain::extract_host;
pub use filter::DomainFilter;
pub use matcher::matches_wildcard;
pub use resolve::resolve_href;
