//! # Platescore Core Library
//!
//! A library for statistical scoring and hit identification in arrayed
//! (plate-based) high-throughput screening data.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear separation of concerns,
//! making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains the stateless plate-data model (`Well`, `Plate`,
//!   `Plateset`, `PlatesetInfo`, keyed signal collections, `Provenance`), shared statistics
//!   helpers, and tabular I/O utilities.
//!
//! - **[`engine`]: The Logic Core.** This layer holds the statistical operators (per-well
//!   `Transformer`s and cross-replicate `Combiner`s), the name-based `AlgorithmRegistry`,
//!   hit-threshold parsing, hit-call performance analysis, and the blocking boundary to an
//!   external statistical interpreter.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing layer. It ties the
//!   `engine` and `core` together to execute complete analysis procedures: the configurable
//!   scoring pipeline that turns raw replicate signals into hit calls, and the benchmark runner
//!   that rates a set of such pipelines against ground truth.

pub mod core;
pub mod engine;
pub mod workflows;
