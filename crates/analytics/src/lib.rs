//! # Analytics Crate
//!
//! The numeric core of the scale-decay service: it tests whether a return
//! metric (MOIC or IRR) declines with the logarithm of investment size.
//!
//! ## Architecture
//!
//! - **Stateless Calculation:** `RegressionEngine` takes the request records and
//!   the metric selector and produces a `ScaleDecayReport`. Nothing is cached
//!   between calls, so identical input always yields identical output.
//!
//! ## Public API
//!
//! - `Dataset`: the filtered `(ln(size), metric)` pairs fed to the fit.
//! - `RegressionEngine` / `OlsFit`: the ordinary-least-squares fit and its raw statistics.
//! - `ScaleDecayReport`: the rounded, serializable result with its interpretation.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

pub mod dataset;
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use dataset::{has_required_fields, Dataset};
pub use engine::{OlsFit, RegressionEngine};
pub use error::AnalyticsError;
pub use report::ScaleDecayReport;
