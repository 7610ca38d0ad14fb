use crate::error::{CliError, Result};
use foldstore::engine::config as core_config;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialProfilingConfig {
    reference_temperature: Option<u32>,
    sweep_start: Option<u32>,
    sweep_end: Option<u32>,
    sweep_step: Option<u32>,
    melt_threshold: Option<f64>,
    unmelted_sentinel: Option<u32>,
    repetition_motif_length: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    profiling: Option<PartialProfilingConfig>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `path` when given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// `--set` values take precedence over the file, which takes precedence over defaults.
    pub fn merge_with_cli(mut self, set_values: &[String]) -> Result<core_config::ProfilingConfig> {
        self.apply_set_values(set_values)?;
        let partial = self.profiling.unwrap_or_default();

        let mut builder = core_config::ProfilingConfigBuilder::from_defaults();
        if let Some(value) = partial.reference_temperature {
            builder = builder.reference_temperature(value);
        }
        if let Some(value) = partial.sweep_start {
            builder = builder.sweep_start(value);
        }
        if let Some(value) = partial.sweep_end {
            builder = builder.sweep_end(value);
        }
        if let Some(value) = partial.sweep_step {
            builder = builder.sweep_step(value);
        }
        if let Some(value) = partial.melt_threshold {
            builder = builder.melt_threshold(value);
        }
        if let Some(value) = partial.unmelted_sentinel {
            builder = builder.unmelted_sentinel(value);
        }
        if let Some(value) = partial.repetition_motif_length {
            builder = builder.repetition_motif_length(value);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let profiling = self.profiling.get_or_insert_with(Default::default);

            match key {
                "profiling.reference-temperature" => {
                    profiling.reference_temperature = Some(parse_value(key, value_str)?)
                }
                "profiling.sweep-start" => profiling.sweep_start = Some(parse_value(key, value_str)?),
                "profiling.sweep-end" => profiling.sweep_end = Some(parse_value(key, value_str)?),
                "profiling.sweep-step" => profiling.sweep_step = Some(parse_value(key, value_str)?),
                "profiling.melt-threshold" => {
                    profiling.melt_threshold = Some(parse_value(key, value_str)?)
                }
                "profiling.unmelted-sentinel" => {
                    profiling.unmelted_sentinel = Some(parse_value(key, value_str)?)
                }
                "profiling.repetition-motif-length" => {
                    profiling.repetition_motif_length = Some(parse_value(key, value_str)?)
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}
