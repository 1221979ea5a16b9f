use std::sync::Arc;

use super::info::PlatesetInfo;
use super::keyed::SignalCollection;
use super::reagent::Reagent;
use super::{Dimensions, ModelError};

/// Standard name of the reagents plateset within a screen.
pub const REAGENTS_SIGNAL_NAME: &str = "reagents";

/// Reserved name prefix marking signals that hold noisy replicate
/// measurements, the inputs a scoring workflow runs over.
pub const NOISY_REPLICATE_PREFIX: &str = "noisy_rep_";

/// One screen's worth of arrayed data: its dimensions, the reagent layout,
/// and a name-keyed collection of signals.
///
/// The signals may be raw measurements, derived data, or both; every signal
/// and the reagent plateset share the screen's dimensions. Raw signals are
/// created once by the data-loading side and treated as read-only; workflow
/// stages only ever add new named entries.
#[derive(Debug, Clone)]
pub struct ScreenData {
    name: String,
    dimensions: Dimensions,
    reagents: Option<Arc<PlatesetInfo<Reagent>>>,
    signals: SignalCollection,
}

impl ScreenData {
    /// Creates an empty screen of the given dimensions.
    pub fn new(name: impl Into<String>, dimensions: Dimensions) -> Self {
        Self {
            name: name.into(),
            dimensions,
            reagents: None,
            signals: SignalCollection::new(),
        }
    }

    /// The name of this screen.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The plate/row/column dimensions shared by every signal.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The reagent layout, if one has been attached.
    pub fn reagents(&self) -> Option<&Arc<PlatesetInfo<Reagent>>> {
        self.reagents.as_ref()
    }

    /// Attaches the reagent layout for this screen.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DimensionMismatch`] if the layout's dimensions
    /// differ from the screen's.
    pub fn set_reagents(&mut self, reagents: Arc<PlatesetInfo<Reagent>>) -> Result<(), ModelError> {
        if reagents.dimensions() != self.dimensions {
            return Err(ModelError::DimensionMismatch {
                name: reagents.name().to_string(),
                expected: self.dimensions,
                actual: reagents.dimensions(),
            });
        }
        self.reagents = Some(reagents);
        Ok(())
    }

    /// The screen's signal collection.
    pub fn signals(&self) -> &SignalCollection {
        &self.signals
    }

    /// Mutable access to the screen's signal collection, for merging in
    /// workflow results.
    pub fn signals_mut(&mut self) -> &mut SignalCollection {
        &mut self.signals
    }

    /// Names of the signals holding noisy replicate measurements, in
    /// insertion order.
    pub fn replicate_signal_names(&self) -> Vec<String> {
        self.signals
            .names()
            .filter(|name| name.starts_with(NOISY_REPLICATE_PREFIX))
            .map(str::to_string)
            .collect()
    }
}
