//! Resume pipeline: PDF text extraction, LLM-driven tailoring against a job
//! description, and document rendering.
//!
//! Each stage sits behind a trait so the HTTP layer holds collaborators as
//! trait objects and tests substitute deterministic fakes. The stages are
//! independent; they share only the domain types from `autoapply-core`.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod optimizer;
pub mod pdf;
pub mod prompts;
pub mod render;

pub use error::{ResumeError, Result};
pub use optimizer::{OpenAiOptimizer, ResumeOptimizer};
pub use pdf::{PdfExtractor, PdfTextExtractor};
pub use render::{ChromiumPdfRenderer, DocumentRenderer};
