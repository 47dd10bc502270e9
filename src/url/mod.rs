//! URL handling module for Blog-Harvest
//!
//! This module resolves hrefs found on pages into followable URLs and computes
//! the request fingerprints used by the scheduler's duplicate filter.

mod fingerprint;
mod resolve;

pub use fingerprint::request_fingerprint;
pub use resolve::resolve_link;
