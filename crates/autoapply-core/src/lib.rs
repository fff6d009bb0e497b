//! Shared foundation for the AutoApply workspace.
//!
//! Defines the domain types exchanged between the scraper, the resume
//! pipeline and the HTTP layer, plus configuration loading and the
//! workspace-wide error types.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, Credentials, LlmConfig, ScraperConfig, ServerConfig};
pub use error::{ConfigError, ConfigResult, CoreError};
pub use types::{JobListing, JobSearchCriteria, ResumeSection, TailoredResume, UNKNOWN_FIELD};
