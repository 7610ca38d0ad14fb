use super::cache::REFERENCE_TEMPERATURE;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for {parameter}: {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// Temperatures visited by the thermal sweep, in °C.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    pub start: u32,
    pub end: u32,
    pub step: u32,
}

impl SweepConfig {
    pub fn temperatures(&self) -> impl Iterator<Item = u32> + use<> {
        (self.start..=self.end).step_by(self.step.max(1) as usize)
    }

    pub fn len(&self) -> usize {
        self.temperatures().count()
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeltingConfig {
    /// A temperature melts once its probability score drops below `threshold * baseline`.
    pub threshold: f64,
    /// Reported when no swept temperature melts.
    pub unmelted_sentinel: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfilingConfig {
    pub reference_temperature: u32,
    pub sweep: SweepConfig,
    pub melting: MeltingConfig,
    pub repetition_motif_length: usize,
}

impl Default for ProfilingConfig {
    fn default() -> Self {
        Self {
            reference_temperature: REFERENCE_TEMPERATURE,
            sweep: SweepConfig {
                start: 37,
                end: 97,
                step: 10,
            },
            melting: MeltingConfig {
                threshold: 0.5,
                unmelted_sentinel: 107,
            },
            repetition_motif_length: 5,
        }
    }
}

#[derive(Default)]
pub struct ProfilingConfigBuilder {
    reference_temperature: Option<u32>,
    sweep_start: Option<u32>,
    sweep_end: Option<u32>,
    sweep_step: Option<u32>,
    melt_threshold: Option<f64>,
    unmelted_sentinel: Option<u32>,
    repetition_motif_length: Option<usize>,
}

impl ProfilingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the standard 37–97°C sweep.
    pub fn from_defaults() -> Self {
        let defaults = ProfilingConfig::default();
        Self {
            reference_temperature: Some(defaults.reference_temperature),
            sweep_start: Some(defaults.sweep.start),
            sweep_end: Some(defaults.sweep.end),
            sweep_step: Some(defaults.sweep.step),
            melt_threshold: Some(defaults.melting.threshold),
            unmelted_sentinel: Some(defaults.melting.unmelted_sentinel),
            repetition_motif_length: Some(defaults.repetition_motif_length),
        }
    }

    pub fn reference_temperature(mut self, temperature: u32) -> Self {
        self.reference_temperature = Some(temperature);
        self
    }
    pub fn sweep_start(mut self, temperature: u32) -> Self {
        self.sweep_start = Some(temperature);
        self
    }
    pub fn sweep_end(mut self, temperature: u32) -> Self {
        self.sweep_end = Some(temperature);
        self
    }
    pub fn sweep_step(mut self, step: u32) -> Self {
        self.sweep_step = Some(step);
        self
    }
    pub fn melt_threshold(mut self, threshold: f64) -> Self {
        self.melt_threshold = Some(threshold);
        self
    }
    pub fn unmelted_sentinel(mut self, temperature: u32) -> Self {
        self.unmelted_sentinel = Some(temperature);
        self
    }
    pub fn repetition_motif_length(mut self, length: usize) -> Self {
        self.repetition_motif_length = Some(length);
        self
    }

    pub fn build(self) -> Result<ProfilingConfig, ConfigError> {
        let reference_temperature = self
            .reference_temperature
            .ok_or(ConfigError::MissingParameter("reference_temperature"))?;
        let sweep = SweepConfig {
            start: self
                .sweep_start
                .ok_or(ConfigError::MissingParameter("sweep_start"))?,
            end: self
                .sweep_end
                .ok_or(ConfigError::MissingParameter("sweep_end"))?,
            step: self
                .sweep_step
                .ok_or(ConfigError::MissingParameter("sweep_step"))?,
        };
        let melting = MeltingConfig {
            threshold: self
                .melt_threshold
                .ok_or(ConfigError::MissingParameter("melt_threshold"))?,
            unmelted_sentinel: self
                .unmelted_sentinel
                .ok_or(ConfigError::MissingParameter("unmelted_sentinel"))?,
        };
        let repetition_motif_length = self
            .repetition_motif_length
            .ok_or(ConfigError::MissingParameter("repetition_motif_length"))?;

        let config = ProfilingConfig {
            reference_temperature,
            sweep,
            melting,
            repetition_motif_length,
        };
        config.validate()?;
        Ok(config)
    }
}

impl ProfilingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |parameter: &'static str, reason: String| {
            Err(ConfigError::InvalidValue { parameter, reason })
        };

        if self.sweep.step == 0 {
            return invalid("sweep_step", "must be greater than zero".to_string());
        }
        if self.sweep.start > self.sweep.end {
            return invalid(
                "sweep_start",
                format!("{} is above sweep end {}", self.sweep.start, self.sweep.end),
            );
        }
        // The sweep compares every step against the reference fold, which must be its first point.
        if self.sweep.start != self.reference_temperature {
            return invalid(
                "sweep_start",
                format!(
                    "must equal the reference temperature {}",
                    self.reference_temperature
                ),
            );
        }
        if !(self.melting.threshold > 0.0 && self.melting.threshold <= 1.0) {
            return invalid(
                "melt_threshold",
                format!("{} is outside (0, 1]", self.melting.threshold),
            );
        }
        let last = self.sweep.temperatures().last().unwrap_or(self.sweep.start);
        if self.melting.unmelted_sentinel <= last {
            return invalid(
                "unmelted_sentinel",
                format!("must be above the last swept temperature {}", last),
            );
        }
        if self.repetition_motif_length == 0 {
            return invalid(
                "repetition_motif_length",
                "must be greater than zero".to_string(),
            );
        }
        Ok(())
    }
}
