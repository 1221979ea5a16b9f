//! # Engine Module
//!
//! This module implements the statistical machinery of the library: the
//! operators that turn raw per-well measurements into normalized scores and
//! hit calls, and the framework pieces that let pipelines be assembled from
//! declarative configuration.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the scoring process:
//!
//! - **Per-well operators** ([`transformers`]) - The two-phase
//!   `Transformer` protocol (scoped setup, per-well apply) and its concrete
//!   implementations (log2, z-score, median division, hit identification,
//!   interpreter-backed B-score)
//! - **Cross-replicate reducers** ([`combiners`]) - The per-coordinate
//!   `Combiner` protocol that respects ignore masks, with AND/OR/median
//!   implementations
//! - **Dynamic resolution** ([`registry`]) - The name-to-factory
//!   `AlgorithmRegistry` that lets pipeline stages be selected by string
//! - **Threshold parsing** ([`threshold`]) - `"<operator> <value>"`
//!   expressions compiled into hit predicates
//! - **Hit-call analysis** ([`analysis`]) - Confusion counts, rates, and
//!   ratings against ground truth
//! - **Interpreter boundary** ([`interpreter`]) - Blocking file-based IPC
//!   with an external statistical interpreter
//! - **Configuration** ([`config`]) - The workflow and scoring-set records
//! - **Progress Monitoring** ([`progress`]) - Stage-level progress callbacks
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod analysis;
pub mod combiners;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod progress;
pub mod registry;
pub mod threshold;
pub mod transformers;
