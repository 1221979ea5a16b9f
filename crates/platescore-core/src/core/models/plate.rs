use super::ModelError;
use super::well::Well;

/// One rectangular grid of wells.
///
/// A plate is a fixed `rows x columns` arrangement of [`Well`]s, stored in
/// row-major order. Plates are owned by a [`Plateset`](super::plateset::Plateset)
/// and are never shared between platesets.
#[derive(Debug, Clone, PartialEq)]
pub struct Plate<T> {
    rows: usize,
    columns: usize,
    wells: Vec<Well<T>>,
}

impl<T: Clone + Default> Plate<T> {
    /// Creates a plate of the given dimensions with every well holding the
    /// default value of `T`.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            wells: vec![Well::default(); rows * columns],
        }
    }
}

impl<T> Plate<T> {
    /// Builds a plate from nested row data.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::RaggedData`] if the rows do not all have the same
    /// number of columns.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ModelError> {
        let num_rows = rows.len();
        let num_columns = rows.first().map_or(0, Vec::len);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != num_columns {
                return Err(ModelError::RaggedData(format!(
                    "row {} has {} columns, expected {}",
                    index,
                    row.len(),
                    num_columns
                )));
            }
        }
        let wells = rows
            .into_iter()
            .flat_map(|row| row.into_iter().map(Well::new))
            .collect();
        Ok(Self {
            rows: num_rows,
            columns: num_columns,
            wells,
        })
    }

    /// Number of rows on this plate.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns on this plate.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The well at the given row and column.
    ///
    /// The well is returned regardless of any ignore flag the owning
    /// [`PlatesetInfo`](super::info::PlatesetInfo) may hold for its position.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn well(&self, row: usize, column: usize) -> &Well<T> {
        &self.wells[self.offset(row, column)]
    }

    /// Replaces the well at the given row and column.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn set_well(&mut self, row: usize, column: usize, well: Well<T>) {
        let offset = self.offset(row, column);
        self.wells[offset] = well;
    }

    /// Iterates over all wells in row-major order.
    pub fn wells(&self) -> impl Iterator<Item = &Well<T>> {
        self.wells.iter()
    }

    /// Iterates over all well values in row-major order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.wells.iter().map(Well::value)
    }

    fn offset(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.rows && column < self.columns,
            "well ({row}, {column}) out of bounds for a {}x{} plate",
            self.rows,
            self.columns
        );
        row * self.columns + column
    }
}
