use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::combiners::{self, Combiner};
use super::combiners::logical::{AndCombiner, OrCombiner};
use super::combiners::median::MedianCombiner;
use super::error::EngineError;
use super::transformers::log2::Log2;
use super::transformers::median_divider::{PlateMedianDivider, SampleMedianDivider};
use super::transformers::zscore::{ZScorePerExperiment, ZScorePerPlate};
use super::transformers::{self, Transformer};
use crate::core::models::PlateValue;
use crate::core::models::info::PlatesetInfo;
use crate::core::models::keyed::KeyedPlatesetInfos;

/// A type-erased double-to-double transformer, the form in which pipeline
/// stages consume transformers resolved by name.
///
/// Blanket-implemented for every [`Transformer`] over doubles; whole-dataset
/// operators that cannot be expressed per-well (e.g. the interpreter-backed
/// B-score) implement it directly.
pub trait DynTransformer: Send + Sync {
    /// The descriptor used in generated output names and provenance actions.
    fn descriptor(&self) -> String;

    /// Transforms every signal of the collection, as
    /// [`transformers::transform`] does.
    fn transform(
        &self,
        inputs: &KeyedPlatesetInfos<f64>,
    ) -> Result<KeyedPlatesetInfos<f64>, EngineError>;
}

impl<T> DynTransformer for T
where
    T: Transformer<Input = f64, Output = f64> + Send + Sync,
{
    fn descriptor(&self) -> String {
        Transformer::descriptor(self)
    }

    fn transform(
        &self,
        inputs: &KeyedPlatesetInfos<f64>,
    ) -> Result<KeyedPlatesetInfos<f64>, EngineError> {
        transformers::transform(self, inputs).map_err(EngineError::from)
    }
}

/// A type-erased combiner over element type `T`, the form in which pipeline
/// stages consume combiners resolved by name.
pub trait DynCombiner<T: PlateValue>: Send + Sync {
    /// The descriptor used in generated output names and provenance actions.
    fn descriptor(&self) -> String;

    /// Collapses the collection into a single signal, as
    /// [`combiners::combine`] does.
    fn combine(&self, inputs: &KeyedPlatesetInfos<T>)
    -> Result<Arc<PlatesetInfo<T>>, EngineError>;
}

impl<C, T> DynCombiner<T> for C
where
    T: PlateValue + Default,
    C: Combiner<Input = T, Output = T> + Send + Sync,
{
    fn descriptor(&self) -> String {
        Combiner::descriptor(self)
    }

    fn combine(
        &self,
        inputs: &KeyedPlatesetInfos<T>,
    ) -> Result<Arc<PlatesetInfo<T>>, EngineError> {
        combiners::combine_shared(self, inputs)
    }
}

impl fmt::Debug for dyn DynTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DynTransformer")
            .field(&self.descriptor())
            .finish()
    }
}

impl<T: PlateValue> fmt::Debug for dyn DynCombiner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DynCombiner")
            .field(&self.descriptor())
            .finish()
    }
}

/// Whether a registered algorithm is a per-well transformer or a
/// cross-replicate combiner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    Transformer,
    Combiner,
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmKind::Transformer => write!(f, "transformer"),
            AlgorithmKind::Combiner => write!(f, "combiner"),
        }
    }
}

/// The element type a registered algorithm operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalType {
    Double,
    Boolean,
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalType::Double => write!(f, "double"),
            SignalType::Boolean => write!(f, "boolean"),
        }
    }
}

type TransformerFactory = Arc<dyn Fn() -> Box<dyn DynTransformer> + Send + Sync>;
type DoubleCombinerFactory = Arc<dyn Fn() -> Box<dyn DynCombiner<f64>> + Send + Sync>;
type BooleanCombinerFactory = Arc<dyn Fn() -> Box<dyn DynCombiner<bool>> + Send + Sync>;

#[derive(Clone)]
enum AlgorithmFactory {
    DoubleTransformer(TransformerFactory),
    DoubleCombiner(DoubleCombinerFactory),
    BooleanCombiner(BooleanCombinerFactory),
}

impl AlgorithmFactory {
    fn kind(&self) -> AlgorithmKind {
        match self {
            AlgorithmFactory::DoubleTransformer(_) => AlgorithmKind::Transformer,
            AlgorithmFactory::DoubleCombiner(_) | AlgorithmFactory::BooleanCombiner(_) => {
                AlgorithmKind::Combiner
            }
        }
    }

    fn signal_type(&self) -> SignalType {
        match self {
            AlgorithmFactory::DoubleTransformer(_) | AlgorithmFactory::DoubleCombiner(_) => {
                SignalType::Double
            }
            AlgorithmFactory::BooleanCombiner(_) => SignalType::Boolean,
        }
    }

    fn describe(&self) -> String {
        format!("{} {}", self.signal_type(), self.kind())
    }
}

/// Maps symbolic algorithm names to constructible transformer and combiner
/// instances.
///
/// Workflow configuration names each pipeline stage as a string; the registry
/// turns those strings into fresh algorithm instances at run time. Each entry
/// carries explicit kind and element-type metadata, so resolving a name into
/// the wrong kind of stage is reported rather than attempted.
///
/// [`AlgorithmRegistry::default`] registers the built-in algorithms; callers
/// may add their own entries, including closures capturing configuration
/// (e.g. a configured B-score normalizer).
#[derive(Clone)]
pub struct AlgorithmRegistry {
    entries: IndexMap<String, AlgorithmFactory>,
}

impl AlgorithmRegistry {
    /// Creates a registry with no entries.
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Creates a registry holding the built-in algorithms under their
    /// descriptor names.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register_transformer("Log2", || Box::new(Log2));
        registry.register_transformer("ZScorePerExperiment", || Box::new(ZScorePerExperiment));
        registry.register_transformer("ZScorePerPlate", || Box::new(ZScorePerPlate));
        registry.register_transformer("PlateMedianDivider", || Box::new(PlateMedianDivider));
        registry.register_transformer("SampleMedianDivider", || Box::new(SampleMedianDivider));
        registry.register_double_combiner("Median", || Box::new(MedianCombiner));
        registry.register_boolean_combiner("And", || Box::new(AndCombiner));
        registry.register_boolean_combiner("Or", || Box::new(OrCombiner));
        registry
    }

    /// Registers a double-to-double transformer under the given name,
    /// replacing any previous entry.
    pub fn register_transformer(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Box<dyn DynTransformer> + Send + Sync + 'static,
    ) {
        self.entries.insert(
            name.into(),
            AlgorithmFactory::DoubleTransformer(Arc::new(factory)),
        );
    }

    /// Registers a double combiner under the given name, replacing any
    /// previous entry.
    pub fn register_double_combiner(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Box<dyn DynCombiner<f64>> + Send + Sync + 'static,
    ) {
        self.entries.insert(
            name.into(),
            AlgorithmFactory::DoubleCombiner(Arc::new(factory)),
        );
    }

    /// Registers a boolean combiner under the given name, replacing any
    /// previous entry.
    pub fn register_boolean_combiner(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Box<dyn DynCombiner<bool>> + Send + Sync + 'static,
    ) {
        self.entries.insert(
            name.into(),
            AlgorithmFactory::BooleanCombiner(Arc::new(factory)),
        );
    }

    /// The registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The kind and element type registered under the given name.
    pub fn metadata(&self, name: &str) -> Option<(AlgorithmKind, SignalType)> {
        self.entries
            .get(name)
            .map(|entry| (entry.kind(), entry.signal_type()))
    }

    /// Constructs the double transformer registered under the given name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownAlgorithm`] for an unregistered name and
    /// [`EngineError::AlgorithmTypeMismatch`] if the name is registered as
    /// anything but a double transformer.
    pub fn resolve_transformer(&self, name: &str) -> Result<Box<dyn DynTransformer>, EngineError> {
        match self.entries.get(name) {
            None => Err(EngineError::UnknownAlgorithm(name.to_string())),
            Some(AlgorithmFactory::DoubleTransformer(factory)) => Ok(factory()),
            Some(other) => Err(EngineError::AlgorithmTypeMismatch {
                name: name.to_string(),
                registered: other.describe(),
                requested: "double transformer".to_string(),
            }),
        }
    }

    /// Constructs the double combiner registered under the given name.
    ///
    /// # Errors
    ///
    /// Same failure modes as
    /// [`resolve_transformer`](AlgorithmRegistry::resolve_transformer).
    pub fn resolve_double_combiner(
        &self,
        name: &str,
    ) -> Result<Box<dyn DynCombiner<f64>>, EngineError> {
        match self.entries.get(name) {
            None => Err(EngineError::UnknownAlgorithm(name.to_string())),
            Some(AlgorithmFactory::DoubleCombiner(factory)) => Ok(factory()),
            Some(other) => Err(EngineError::AlgorithmTypeMismatch {
                name: name.to_string(),
                registered: other.describe(),
                requested: "double combiner".to_string(),
            }),
        }
    }

    /// Constructs the boolean combiner registered under the given name.
    ///
    /// # Errors
    ///
    /// Same failure modes as
    /// [`resolve_transformer`](AlgorithmRegistry::resolve_transformer).
    pub fn resolve_boolean_combiner(
        &self,
        name: &str,
    ) -> Result<Box<dyn DynCombiner<bool>>, EngineError> {
        match self.entries.get(name) {
            None => Err(EngineError::UnknownAlgorithm(name.to_string())),
            Some(AlgorithmFactory::BooleanCombiner(factory)) => Ok(factory()),
            Some(other) => Err(EngineError::AlgorithmTypeMismatch {
                name: name.to_string(),
                registered: other.describe(),
                requested: "boolean combiner".to_string(),
            }),
        }
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
