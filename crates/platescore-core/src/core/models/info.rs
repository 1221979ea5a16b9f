use std::any::Any;
use std::sync::Arc;

use super::plateset::Plateset;
use super::provenance::Provenance;
use super::well::Well;
use super::{Dimensions, ModelError, PlateValue};

/// A named, lineage-tracked plateset plus its per-well exclusion mask.
///
/// `PlatesetInfo` is the unit of "one signal": one plateset of values of type
/// `T`, and a structurally parallel plateset of booleans marking wells whose
/// data should be excluded from analysis (outliers, contaminated wells, ...).
/// The two platesets always share identical dimensions.
///
/// The name is used as the key when the signal is added to a keyed collection
/// and must be unique within any collection holding it. The provenance is set
/// once at construction and never mutated: every pipeline stage derives
/// brand-new `PlatesetInfo` values rather than modifying its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatesetInfo<T> {
    name: String,
    provenance: Provenance,
    values: Plateset<T>,
    ignore_mask: Plateset<bool>,
}

impl<T: Clone + Default> PlatesetInfo<T> {
    /// Creates an empty `PlatesetInfo` of the given dimensions, with every
    /// value defaulted and no well ignored.
    pub fn new(name: impl Into<String>, provenance: Provenance, dimensions: Dimensions) -> Self {
        Self {
            name: name.into(),
            provenance,
            values: Plateset::new(dimensions),
            ignore_mask: Plateset::new(dimensions),
        }
    }
}

impl<T> PlatesetInfo<T> {
    /// Wraps an existing plateset of values with an all-clear ignore mask.
    pub fn from_plateset(
        name: impl Into<String>,
        provenance: Provenance,
        values: Plateset<T>,
    ) -> Self {
        let ignore_mask = Plateset::new(values.dimensions());
        Self {
            name: name.into(),
            provenance,
            values,
            ignore_mask,
        }
    }

    /// Wraps a plateset of values together with an explicit ignore mask.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DimensionMismatch`] if the mask's dimensions
    /// differ from the values'.
    pub fn with_mask(
        name: impl Into<String>,
        provenance: Provenance,
        values: Plateset<T>,
        ignore_mask: Plateset<bool>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        if ignore_mask.dimensions() != values.dimensions() {
            return Err(ModelError::DimensionMismatch {
                name,
                expected: values.dimensions(),
                actual: ignore_mask.dimensions(),
            });
        }
        Ok(Self {
            name,
            provenance,
            values,
            ignore_mask,
        })
    }

    /// The name of this signal, used as its key in keyed collections.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lineage record describing how this signal was produced.
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// The shared plate/row/column dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.values.dimensions()
    }

    /// The plateset of values.
    pub fn plateset(&self) -> &Plateset<T> {
        &self.values
    }

    /// The parallel plateset marking wells to exclude from analysis.
    pub fn ignore_mask(&self) -> &Plateset<bool> {
        &self.ignore_mask
    }

    /// The value at the given coordinate.
    ///
    /// The value is returned even if the coordinate is ignore-masked.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn value(&self, plate: usize, row: usize, column: usize) -> &T {
        self.values.well(plate, row, column).value()
    }

    /// Replaces the value at the given coordinate.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn set_value(&mut self, plate: usize, row: usize, column: usize, value: T) {
        self.values.set_well(plate, row, column, Well::new(value));
    }

    /// Whether the value at the given coordinate should be excluded from
    /// analysis.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn is_ignored(&self, plate: usize, row: usize, column: usize) -> bool {
        *self.ignore_mask.well(plate, row, column).value()
    }

    /// Marks or clears the ignore flag at the given coordinate.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn set_ignored(&mut self, plate: usize, row: usize, column: usize, ignored: bool) {
        self.ignore_mask
            .set_well(plate, row, column, Well::new(ignored));
    }
}

/// The type-erased view of a [`PlatesetInfo`].
///
/// Keyed signal collections may mix platesets of different element types
/// (raw doubles next to derived booleans). This trait exposes the
/// type-independent surface - name, provenance, dimensions, ignore flags -
/// while [`downcast`](AnyPlatesetInfo::downcast) recovers the strongly typed
/// plateset at the point of use.
pub trait AnyPlatesetInfo: Send + Sync {
    /// The name of this signal.
    fn name(&self) -> &str;

    /// The lineage record describing how this signal was produced.
    fn provenance(&self) -> &Provenance;

    /// The shared plate/row/column dimensions.
    fn dimensions(&self) -> Dimensions;

    /// Whether the value at the given coordinate should be excluded from
    /// analysis.
    fn is_ignored(&self, plate: usize, row: usize, column: usize) -> bool;

    /// The name of the element type held by this plateset, for diagnostics.
    fn element_type_name(&self) -> &'static str;

    /// This plateset as `Any`, for checked downcasts.
    fn as_any(&self) -> &dyn Any;

    /// This plateset as a shared `Any`, for checked `Arc` downcasts.
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: PlateValue> AnyPlatesetInfo for PlatesetInfo<T> {
    fn name(&self) -> &str {
        self.name()
    }

    fn provenance(&self) -> &Provenance {
        self.provenance()
    }

    fn dimensions(&self) -> Dimensions {
        self.dimensions()
    }

    fn is_ignored(&self, plate: usize, row: usize, column: usize) -> bool {
        self.is_ignored(plate, row, column)
    }

    fn element_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl dyn AnyPlatesetInfo {
    /// Downcasts this type-erased view to a `PlatesetInfo<T>`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TypeMismatch`] if the stored element type is not
    /// `T`.
    pub fn downcast<T: PlateValue>(&self) -> Result<&PlatesetInfo<T>, ModelError> {
        self.as_any()
            .downcast_ref::<PlatesetInfo<T>>()
            .ok_or_else(|| ModelError::TypeMismatch {
                name: self.name().to_string(),
                expected: std::any::type_name::<T>(),
                actual: self.element_type_name(),
            })
    }
}

/// Downcasts a shared type-erased plateset to a shared `PlatesetInfo<T>`
/// without copying the underlying data.
///
/// # Errors
///
/// Returns [`ModelError::TypeMismatch`] if the stored element type is not `T`.
pub fn downcast_arc<T: PlateValue>(
    info: Arc<dyn AnyPlatesetInfo>,
) -> Result<Arc<PlatesetInfo<T>>, ModelError> {
    let name = info.name().to_string();
    let actual = info.element_type_name();
    info.into_any_arc()
        .downcast::<PlatesetInfo<T>>()
        .map_err(|_| ModelError::TypeMismatch {
            name,
            expected: std::any::type_name::<T>(),
            actual,
        })
}
