//! Startup configuration: where the initial store comes from and how new
//! entity ids are generated.

use std::{path::PathBuf, str::FromStr};

use crate::{
    errors::PostGraphError,
    fixtures::{demo_store, load_store, read_store},
    ids::{RandomIds, SequentialIds},
    mutation::Mutator,
    shared::SharedStore,
    store::Store,
};

/// Initial contents of the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SeedSource {
    /// Start with no records.
    #[default]
    Empty,
    /// The bundled demo users, posts and comments.
    Demo,
    /// A JSON snapshot written by [`crate::fixtures::save_store`].
    Snapshot(PathBuf),
}

impl FromStr for SeedSource {
    type Err = PostGraphError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" => Err(PostGraphError::invalid_input("seed source must not be empty")),
            "empty" => Ok(SeedSource::Empty),
            "demo" => Ok(SeedSource::Demo),
            path => Ok(SeedSource::Snapshot(PathBuf::from(path))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// uuid-v4 shaped random ids.
    #[default]
    Random,
    /// `1`, `2`, `3`, ... skipping ids already in the store.
    Sequential,
}

impl FromStr for IdStrategy {
    type Err = PostGraphError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "random" => Ok(IdStrategy::Random),
            "sequential" => Ok(IdStrategy::Sequential),
            other => Err(PostGraphError::invalid_input(format!(
                "unknown id strategy {other}"
            ))),
        }
    }
}

/// # Examples
///
/// ```rust
/// use postgraph::config::{IdStrategy, SeedSource, StoreConfig};
///
/// let cfg = StoreConfig::demo().with_ids(IdStrategy::Sequential);
/// let (store, _mutator) = cfg.build().unwrap();
/// assert_eq!(store.users().len(), 3);
/// assert_eq!(StoreConfig::default().seed, SeedSource::Empty);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub seed: SeedSource,
    pub ids: IdStrategy,
}

impl StoreConfig {
    pub fn new(seed: SeedSource, ids: IdStrategy) -> Self {
        Self { seed, ids }
    }

    pub fn demo() -> Self {
        Self::new(SeedSource::Demo, IdStrategy::default())
    }

    pub fn with_ids(mut self, ids: IdStrategy) -> Self {
        self.ids = ids;
        self
    }

    pub fn build(&self) -> Result<(Store, Mutator), PostGraphError> {
        let store = match &self.seed {
            SeedSource::Empty => Store::new(),
            SeedSource::Demo => demo_store(),
            SeedSource::Snapshot(path) => load_store(path)?,
        };
        tracing::debug!(seed = ?self.seed, ids = ?self.ids, "built store");
        Ok((store, self.mutator()))
    }

    /// Loads the seed without the integrity audit, for reporting on it.
    /// The store is returned without a mutator so it cannot be modified.
    pub fn build_for_audit(&self) -> Result<Store, PostGraphError> {
        match &self.seed {
            SeedSource::Snapshot(path) => read_store(path),
            SeedSource::Empty | SeedSource::Demo => Ok(self.build()?.0),
        }
    }

    fn mutator(&self) -> Mutator {
        match self.ids {
            IdStrategy::Random => Mutator::new(RandomIds::new()),
            IdStrategy::Sequential => Mutator::new(SequentialIds::default()),
        }
    }

    pub fn build_shared(&self) -> Result<SharedStore, PostGraphError> {
        let (store, mutator) = self.build()?;
        Ok(SharedStore::new(store, mutator))
    }
}
