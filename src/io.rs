//! # File I/O
//!
//! Reading instances and configuration files, and appending run results to a
//! JSON-lines file.
//!
//! Instances come either from a `.json` file holding a single instance or from
//! a `.jsonl` file holding one instance per non-empty line:
//!
//! ```json
//! {"capacity": 10, "items": [{"id": 1, "weight": 5, "value": 10}], "meta": {"name": "toy"}}
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::{
    error::{KnapsackError, Result, ResultExt},
    evolution::{Experiment, Params, RunResult, RunSettings},
    instance::Instance,
};

/// Calls `f` for every instance stored in `path`, in file order.
fn for_each_instance<F>(path: &Path, mut f: F) -> Result<()>
where
    F: FnMut(Instance) -> Result<()>,
{
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => {
            let text = fs::read_to_string(path)?;
            let instance: Instance = serde_json::from_str(&text)?;
            instance.validate()?;
            f(instance)
        }
        Some("jsonl") => {
            let reader = BufReader::new(File::open(path)?);
            for (number, line) in reader.lines().enumerate() {
                let line = line?;
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let instance: Instance = serde_json::from_str(line)
                    .context(format!("{}: line {}", path.display(), number + 1))?;
                instance.validate()?;
                f(instance)?;
            }
            Ok(())
        }
        _ => Err(KnapsackError::Configuration(format!(
            "unsupported instance file `{}`, expected .json or .jsonl",
            path.display()
        ))),
    }
}

/// Loads and validates every instance in `path`.
///
/// # Errors
///
/// Returns `KnapsackError::Configuration` for an unsupported extension, an I/O
/// or JSON error if the file cannot be read or parsed, and
/// `KnapsackError::InvalidInstance` if an instance breaks the data model.
pub fn load_instances<P: AsRef<Path>>(path: P) -> Result<Vec<Instance>> {
    let mut instances = Vec::new();
    for_each_instance(path.as_ref(), |instance| {
        instances.push(instance);
        Ok(())
    })?;
    Ok(instances)
}

/// Loads and validates a `Params` configuration file.
///
/// # Errors
///
/// Returns `KnapsackError::Configuration` if the document does not match the
/// schema (including unknown operator names) or fails validation.
pub fn load_params<P: AsRef<Path>>(path: P) -> Result<Params> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let params: Params = serde_json::from_str(&text)
        .map_err(|e| KnapsackError::Configuration(format!("{}: {}", path.display(), e)))?;
    params.validate()?;
    Ok(params)
}

/// Appends `result` to `path` as a single JSON line.
///
/// Missing parent directories are created.
pub fn append_run_result<P: AsRef<Path>>(result: &RunResult, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let line = serde_json::to_string(result)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// Runs a whole experiment: every instance in `instance_path`, after subset
/// sampling, is run once per seed and every result is appended to `out_path`
/// as soon as it is available.
///
/// Returns the number of results written.
pub fn run_experiment<P, Q>(
    instance_path: P,
    params: &Params,
    settings: &RunSettings,
    out_path: Q,
) -> Result<usize>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let out_path = out_path.as_ref();
    let experiment = Experiment::new(params.clone(), settings.clone())?;
    let mut written = 0;

    for_each_instance(instance_path.as_ref(), |instance| {
        let instance = experiment.prepare(&instance);
        experiment.run_instance_with(&instance, |result| {
            append_run_result(&result, out_path)?;
            written += 1;
            debug!(path = %out_path.display(), seed = result.seed, "result appended");
            Ok(())
        })
    })?;

    info!(results = written, path = %out_path.display(), "experiment finished");
    Ok(written)
}
