use rayon::prelude::*;
use tracing::info;

use super::{
    launcher::EvolutionLauncher,
    options::{Params, RunSettings},
    result::RunResult,
};
use crate::{error::Result, instance::Instance, subset::apply_subset};

/// Repeats runs of the algorithm over a list of seeds.
#[derive(Debug, Clone)]
pub struct Experiment {
    params: Params,
    settings: RunSettings,
}

impl Experiment {
    /// Creates an experiment after validating `params`.
    ///
    /// # Errors
    ///
    /// Returns `KnapsackError::Configuration` if `params` fail validation.
    pub fn new(params: Params, settings: RunSettings) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, settings })
    }

    /// The seed of every run, in run order.
    ///
    /// A seed list shorter than `runs` is padded with `len, len + 1, ...`;
    /// extra seeds beyond `runs` are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use knapsack_ga::evolution::{Experiment, Params, RunSettings};
    ///
    /// let params = Params::builder().runs(4).seeds(vec![10, 20]).build().unwrap();
    /// let experiment = Experiment::new(params, RunSettings::default()).unwrap();
    /// assert_eq!(experiment.seeds(), vec![10, 20, 2, 3]);
    /// ```
    pub fn seeds(&self) -> Vec<u64> {
        let runs = self.params.runs;
        let mut seeds: Vec<u64> = self.params.seeds.iter().copied().take(runs).collect();
        let configured = self.params.seeds.len() as u64;
        seeds.extend((configured..).take(runs - seeds.len()));
        seeds
    }

    /// Applies the configured subset sampling to `instance`.
    pub fn prepare(&self, instance: &Instance) -> Instance {
        apply_subset(instance, &self.params.subset)
    }

    /// Runs every seed on `instance` in order, handing each result to
    /// `on_result` as soon as it is available.
    ///
    /// The instance is used as given; call [`Experiment::prepare`] first to
    /// apply subset sampling.
    ///
    /// # Errors
    ///
    /// Stops at the first error from the launcher or from `on_result`.
    pub fn run_instance_with<F>(&self, instance: &Instance, mut on_result: F) -> Result<()>
    where
        F: FnMut(RunResult) -> Result<()>,
    {
        let launcher = EvolutionLauncher::new(instance, self.params.clone(), self.settings.clone())?;
        let runs = self.params.runs;

        for (run_index, seed) in self.seeds().into_iter().enumerate() {
            info!(
                instance = instance.name(),
                run = run_index + 1,
                runs,
                seed,
                n_items = instance.n_items(),
                "starting run"
            );
            on_result(launcher.run(seed, run_index)?)?;
        }
        Ok(())
    }

    /// Runs every seed on `instance` sequentially and collects the results.
    pub fn run_instance(&self, instance: &Instance) -> Result<Vec<RunResult>> {
        let mut results = Vec::with_capacity(self.params.runs);
        self.run_instance_with(instance, |result| {
            results.push(result);
            Ok(())
        })?;
        Ok(results)
    }

    /// Runs every seed on `instance` in parallel.
    ///
    /// Each run owns its random stream, so the results equal those of
    /// [`Experiment::run_instance`] apart from timings, and come back in seed
    /// order.
    pub fn run_instance_parallel(&self, instance: &Instance) -> Result<Vec<RunResult>> {
        let launcher = EvolutionLauncher::new(instance, self.params.clone(), self.settings.clone())?;
        info!(
            instance = instance.name(),
            runs = self.params.runs,
            n_items = instance.n_items(),
            "starting parallel runs"
        );

        self.seeds()
            .into_par_iter()
            .enumerate()
            .map(|(run_index, seed)| launcher.run(seed, run_index))
            .collect()
    }
}
