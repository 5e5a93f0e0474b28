//! geoprep-core: Data model, prompts, persistence and dashboard analytics.
//!
//! This crate holds everything the HPSC Geo-Prep tutor needs apart from the
//! concrete model providers and the command-line surface.

pub mod analytics;
pub mod auth;
pub mod error;
pub mod evaluation;
pub mod gateway;
pub mod lab;
pub mod model;
pub mod prompts;
pub mod session;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod testing;
