//! # Workflows Module
//!
//! The public, user-facing layer of the library. It ties the `engine` and
//! `core` together to execute complete analysis procedures:
//!
//! - [`score`] - The configurable scoring pipeline. One run takes a screen's
//!   replicate signals through normalization, replicate combination, scoring,
//!   and hit identification, with every stage selected by name from
//!   declarative configuration.
//! - [`bench`] - The benchmark runner. Applies every workflow of a scoring
//!   set to a screen, rates each resulting hit call against ground truth, and
//!   produces the performance records written to the metrics output.

pub mod bench;
pub mod score;
