use super::plate::Plate;
use super::well::Well;
use super::{Dimensions, ModelError};

/// An ordered stack of plates sharing identical row and column dimensions.
///
/// A plateset is the three-dimensional unit of screening data: `plates`
/// identically-sized [`Plate`]s addressed by (plate, row, column). The shared
/// dimensions are an invariant checked at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Plateset<T> {
    dimensions: Dimensions,
    plates: Vec<Plate<T>>,
}

impl<T: Clone + Default> Plateset<T> {
    /// Creates a plateset of the given dimensions with every well holding the
    /// default value of `T`.
    pub fn new(dimensions: Dimensions) -> Self {
        let plates = (0..dimensions.plates)
            .map(|_| Plate::new(dimensions.rows, dimensions.columns))
            .collect();
        Self { dimensions, plates }
    }
}

impl<T> Plateset<T> {
    /// Builds a plateset from nested plate/row/column data.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::RaggedData`] if any plate or row disagrees with
    /// the dimensions of the first.
    pub fn from_nested(data: Vec<Vec<Vec<T>>>) -> Result<Self, ModelError> {
        let mut plates = Vec::with_capacity(data.len());
        let mut dimensions: Option<Dimensions> = None;
        for (index, rows) in data.into_iter().enumerate() {
            let plate = Plate::from_rows(rows)?;
            match dimensions {
                None => {
                    dimensions = Some(Dimensions::new(0, plate.rows(), plate.columns()));
                }
                Some(dims) if dims.rows != plate.rows() || dims.columns != plate.columns() => {
                    return Err(ModelError::RaggedData(format!(
                        "plate {} is {}x{}, expected {}x{}",
                        index,
                        plate.rows(),
                        plate.columns(),
                        dims.rows,
                        dims.columns
                    )));
                }
                Some(_) => {}
            }
            plates.push(plate);
        }
        let mut dimensions = dimensions.unwrap_or(Dimensions::new(0, 0, 0));
        dimensions.plates = plates.len();
        Ok(Self { dimensions, plates })
    }

    /// The shared plate/row/column dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The plate at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn plate(&self, plate_index: usize) -> &Plate<T> {
        &self.plates[plate_index]
    }

    /// The well at the given plate, row, and column.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn well(&self, plate: usize, row: usize, column: usize) -> &Well<T> {
        self.plates[plate].well(row, column)
    }

    /// Replaces the well at the given plate, row, and column.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn set_well(&mut self, plate: usize, row: usize, column: usize, well: Well<T>) {
        self.plates[plate].set_well(row, column, well);
    }

    /// Iterates over all plates in order.
    pub fn plates(&self) -> impl Iterator<Item = &Plate<T>> {
        self.plates.iter()
    }

    /// Iterates over all well values, plate by plate and row by row.
    ///
    /// Plate data is read across rows, not down columns, so a plate holding
    /// `[[0, 1, 2], [3, 4, 5]]` is visited as `0 1 2 3 4 5`.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.plates.iter().flat_map(Plate::values)
    }

    /// Iterates over every (plate, row, column) coordinate in visit order.
    pub fn coordinates(&self) -> impl Iterator<Item = (usize, usize, usize)> {
        let Dimensions {
            plates,
            rows,
            columns,
        } = self.dimensions;
        (0..plates).flat_map(move |p| {
            (0..rows).flat_map(move |r| (0..columns).map(move |c| (p, r, c)))
        })
    }
}
