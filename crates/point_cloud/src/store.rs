use crate::cloud::PointCloud;
use crate::params::{GenerationParameters, Invalidated, ParameterError};
use std::sync::Arc;

/// Holds the last parameter set that passed validation.
#[derive(Clone, Debug, Default)]
pub struct ParameterStore {
    current: GenerationParameters,
}

impl ParameterStore {
    pub fn new(initial: GenerationParameters) -> Result<Self, ParameterError> {
        initial.validate()?;
        Ok(Self { current: initial })
    }

    pub fn current(&self) -> &GenerationParameters {
        &self.current
    }

    /// Validates `proposed` and commits it. On error the store is left untouched.
    pub fn propose(&mut self, proposed: GenerationParameters) -> Result<Invalidated, ParameterError> {
        proposed.validate()?;
        let invalidated = proposed.invalidated_by(&self.current);
        self.current = proposed;
        Ok(invalidated)
    }
}

/// The current cloud for one role, swapped wholesale on every regeneration.
#[derive(Clone, Debug, Default)]
pub struct CloudSlot {
    cloud: Arc<PointCloud>,
    generation: u64,
}

impl CloudSlot {
    pub fn cloud(&self) -> Arc<PointCloud> {
        Arc::clone(&self.cloud)
    }

    /// Bumped on every replace, starts at 0 before the first cloud is stored.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Installs `cloud` and hands back the one it supersedes.
    pub fn replace(&mut self, cloud: PointCloud) -> Arc<PointCloud> {
        self.generation += 1;
        std::mem::replace(&mut self.cloud, Arc::new(cloud))
    }
}
