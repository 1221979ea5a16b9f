//! # Core Module
//!
//! This module provides the fundamental building blocks for representing and
//! manipulating arrayed screening data, serving as the stateless foundation of
//! the library.
//!
//! ## Overview
//!
//! High-throughput screens produce measurements arranged as stacks of
//! rectangular microtiter plates. The core module defines the containers for
//! those measurements, the lineage records that travel with them, and the
//! shared utilities the statistical layers are built on.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the data model:
//!
//! - **Plate Representation** ([`models`]) - Wells, plates, platesets, named
//!   signal collections, provenance, and reagent annotations
//! - **Statistics** ([`utils`]) - Mean, standard deviation, and median helpers
//!   shared by the scoring algorithms
//! - **Tabular I/O** ([`io`]) - Tab-delimited performance-metrics output and
//!   the dataset exchange format for the external interpreter

pub mod io;
pub mod models;
pub mod utils;
