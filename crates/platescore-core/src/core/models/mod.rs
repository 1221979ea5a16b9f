//! # Core Models Module
//!
//! This module contains the fundamental data structures used to represent
//! plate-based screening data, providing the foundation for every statistical
//! operation in the library.
//!
//! ## Overview
//!
//! The models module defines the containers for arrayed measurements and the
//! metadata that travels with them. These models are designed to:
//!
//! - **Represent plate geometry** - A screen is a stack of identically-sized
//!   rectangular plates, addressed by (plate, row, column)
//! - **Track lineage** - Every derived dataset records the inputs and action
//!   that produced it
//! - **Mix element types safely** - Name-keyed collections can hold signals of
//!   different element types behind a type-erased view with a checked downcast
//! - **Enforce dimensional consistency** - Collections reject members whose
//!   dimensions disagree
//!
//! ## Key Components
//!
//! - [`well`] - A single measurement at one plate position
//! - [`plate`] - One rectangular row x column grid of wells
//! - [`plateset`] - An ordered stack of plates sharing dimensions
//! - [`info`] - `PlatesetInfo`: a named, provenance-tracked plateset plus its
//!   per-well ignore mask, and the type-erased `AnyPlatesetInfo` view
//! - [`keyed`] - Dimension-validated, name-keyed signal collections
//! - [`provenance`] - Immutable lineage records
//! - [`reagent`] - What occupies each well (sample, control, ...)
//! - [`screen`] - `ScreenData`: one screen's signals and reagent annotations

pub mod info;
pub mod keyed;
pub mod plate;
pub mod plateset;
pub mod provenance;
pub mod reagent;
pub mod screen;
pub mod well;

use std::fmt;

use thiserror::Error;

/// Errors arising from construction or combination of plate-data containers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A container was offered a member whose plate/row/column counts disagree
    /// with the members already present.
    #[error("plateset '{name}' has dimensions {actual}, but the collection holds {expected}")]
    DimensionMismatch {
        name: String,
        expected: Dimensions,
        actual: Dimensions,
    },

    /// A type-erased plateset was downcast to the wrong element type.
    #[error("plateset '{name}' holds values of type {actual}, not {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A keyed collection already contains a member with this name.
    #[error("a plateset named '{0}' is already present in the collection")]
    DuplicateName(String),

    /// Nested plate data passed to a constructor was not rectangular.
    #[error("plateset data is ragged: {0}")]
    RaggedData(String),
}

/// The shape shared by every plate-data container: how many plates, and how
/// many rows and columns on each plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Number of plates in the set.
    pub plates: usize,
    /// Number of rows on each plate.
    pub rows: usize,
    /// Number of columns on each plate.
    pub columns: usize,
}

impl Dimensions {
    /// Creates a new `Dimensions` from plate, row, and column counts.
    pub fn new(plates: usize, rows: usize, columns: usize) -> Self {
        Self {
            plates,
            rows,
            columns,
        }
    }

    /// Total number of wells across all plates.
    pub fn well_count(&self) -> usize {
        self.plates * self.rows * self.columns
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.plates, self.rows, self.columns)
    }
}

/// Marker for types that may be stored in a well.
///
/// Blanket-implemented for every `Clone + Send + Sync + 'static` type; it only
/// exists to keep the bounds on the containers and operators in one place.
pub trait PlateValue: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> PlateValue for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_display_is_compact() {
        let dims = Dimensions::new(3, 8, 12);
        assert_eq!(dims.to_string(), "3x8x12");
    }

    #[test]
    fn dimensions_well_count_multiplies_axes() {
        assert_eq!(Dimensions::new(2, 8, 12).well_count(), 192);
        assert_eq!(Dimensions::new(0, 8, 12).well_count(), 0);
    }

    #[test]
    fn model_error_messages_name_the_offender() {
        let err = ModelError::DimensionMismatch {
            name: "rep_1".to_string(),
            expected: Dimensions::new(1, 2, 2),
            actual: Dimensions::new(1, 3, 2),
        };
        let text = err.to_string();
        assert!(text.contains("rep_1"));
        assert!(text.contains("1x3x2"));
        assert!(text.contains("1x2x2"));
    }
}
