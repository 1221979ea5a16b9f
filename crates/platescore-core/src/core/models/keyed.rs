use std::sync::Arc;

use indexmap::IndexMap;

use super::info::{AnyPlatesetInfo, PlatesetInfo, downcast_arc};
use super::{Dimensions, ModelError, PlateValue};

fn check_member(
    dimensions: &mut Option<Dimensions>,
    contains: bool,
    name: &str,
    actual: Dimensions,
) -> Result<(), ModelError> {
    if contains {
        return Err(ModelError::DuplicateName(name.to_string()));
    }
    match *dimensions {
        None => {
            *dimensions = Some(actual);
            Ok(())
        }
        Some(expected) if expected != actual => Err(ModelError::DimensionMismatch {
            name: name.to_string(),
            expected,
            actual,
        }),
        Some(_) => Ok(()),
    }
}

/// A name-keyed collection of platesets of mixed element types.
///
/// Every member must share identical plate/row/column dimensions; the first
/// member added fixes the dimensions of the collection. Members are stored
/// behind the type-erased [`AnyPlatesetInfo`] view so raw doubles, derived
/// scores, and boolean hit calls can live side by side; callers recover the
/// typed plateset with [`get_typed`](SignalCollection::get_typed).
#[derive(Clone, Default)]
pub struct SignalCollection {
    infos: IndexMap<String, Arc<dyn AnyPlatesetInfo>>,
    dimensions: Option<Dimensions>,
}

impl SignalCollection {
    /// Creates an empty collection; the first member added fixes its
    /// dimensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of signals in the collection.
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    /// Whether the collection holds no signals.
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// The dimensions shared by every member, or `None` while empty.
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    /// Whether a signal with the given name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.infos.contains_key(name)
    }

    /// The signal names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.infos.keys().map(String::as_str)
    }

    /// The type-erased signal with the given name, if present.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn AnyPlatesetInfo>> {
        self.infos.get(name)
    }

    /// The signal with the given name, downcast to element type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TypeMismatch`] if the signal holds a different
    /// element type. Returns `Ok(None)` if no signal has the given name.
    pub fn get_typed<T: PlateValue>(
        &self,
        name: &str,
    ) -> Result<Option<Arc<PlatesetInfo<T>>>, ModelError> {
        match self.infos.get(name) {
            None => Ok(None),
            Some(info) => downcast_arc::<T>(Arc::clone(info)).map(Some),
        }
    }

    /// Iterates over the signals in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn AnyPlatesetInfo>> {
        self.infos.values()
    }

    /// Adds a type-erased signal, keyed by its name.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateName`] if a signal with the same name is
    /// already present, or [`ModelError::DimensionMismatch`] if its dimensions
    /// disagree with the collection's.
    pub fn insert(&mut self, info: Arc<dyn AnyPlatesetInfo>) -> Result<(), ModelError> {
        check_member(
            &mut self.dimensions,
            self.infos.contains_key(info.name()),
            info.name(),
            info.dimensions(),
        )?;
        self.infos.insert(info.name().to_string(), info);
        Ok(())
    }

    /// Adds a typed signal, keyed by its name.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`insert`](SignalCollection::insert).
    pub fn insert_info<T: PlateValue>(
        &mut self,
        info: Arc<PlatesetInfo<T>>,
    ) -> Result<(), ModelError> {
        self.insert(info)
    }

    /// Adds every member of a typed collection.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`insert`](SignalCollection::insert); members
    /// added before the failing one remain in the collection.
    pub fn extend_typed<T: PlateValue>(
        &mut self,
        infos: &KeyedPlatesetInfos<T>,
    ) -> Result<(), ModelError> {
        for info in infos.values() {
            self.insert(Arc::clone(info) as Arc<dyn AnyPlatesetInfo>)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for SignalCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalCollection")
            .field("dimensions", &self.dimensions)
            .field("names", &self.infos.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A name-keyed collection of platesets sharing one element type.
///
/// The homogeneous counterpart of [`SignalCollection`]: the transformers and
/// combiners operate on these, where the element type is known statically.
/// The same dimensional invariant applies.
#[derive(Debug, Clone)]
pub struct KeyedPlatesetInfos<T> {
    infos: IndexMap<String, Arc<PlatesetInfo<T>>>,
    dimensions: Option<Dimensions>,
}

impl<T> Default for KeyedPlatesetInfos<T> {
    fn default() -> Self {
        Self {
            infos: IndexMap::new(),
            dimensions: None,
        }
    }
}

impl<T: PlateValue> KeyedPlatesetInfos<T> {
    /// Creates an empty collection; the first member added fixes its
    /// dimensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from the given members.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`insert`](KeyedPlatesetInfos::insert).
    pub fn from_infos(
        infos: impl IntoIterator<Item = Arc<PlatesetInfo<T>>>,
    ) -> Result<Self, ModelError> {
        let mut collection = Self::new();
        for info in infos {
            collection.insert(info)?;
        }
        Ok(collection)
    }

    /// Number of signals in the collection.
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    /// Whether the collection holds no signals.
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// The dimensions shared by every member, or `None` while empty.
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    /// The signal names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.infos.keys().map(String::as_str)
    }

    /// The signal with the given name, if present.
    pub fn get(&self, name: &str) -> Option<&Arc<PlatesetInfo<T>>> {
        self.infos.get(name)
    }

    /// Iterates over the signals in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Arc<PlatesetInfo<T>>> {
        self.infos.values()
    }

    /// Iterates over (name, signal) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<PlatesetInfo<T>>)> {
        self.infos.iter().map(|(name, info)| (name.as_str(), info))
    }

    /// The only member of the collection, if it holds exactly one.
    pub fn single(&self) -> Option<&Arc<PlatesetInfo<T>>> {
        if self.infos.len() == 1 {
            self.infos.values().next()
        } else {
            None
        }
    }

    /// Adds a signal, keyed by its name.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateName`] if a signal with the same name is
    /// already present, or [`ModelError::DimensionMismatch`] if its dimensions
    /// disagree with the collection's.
    pub fn insert(&mut self, info: Arc<PlatesetInfo<T>>) -> Result<(), ModelError> {
        check_member(
            &mut self.dimensions,
            self.infos.contains_key(info.name()),
            info.name(),
            info.dimensions(),
        )?;
        self.infos.insert(info.name().to_string(), info);
        Ok(())
    }
}
