//! Run configuration.

use std::path::{Path, PathBuf};

/// Default output directory for the quantized model.
pub const DEFAULT_OUTPUT_DIR: &str = "output/TinyLlama-1.1B-Chat-v1.0-INT8";

/// Default maximum calibration sequence length.
pub const DEFAULT_MAX_SEQ_LENGTH: usize = 2048;

/// Default number of calibration samples.
pub const DEFAULT_NUM_CALIBRATION_SAMPLES: usize = 512;

/// Immutable configuration for a single compression run.
///
/// The model and dataset are pinned; they must match the entries declared in
/// `huggingface.lock.yaml`. Only the output directory and calibration sizes
/// can be chosen by the caller.
///
/// # Example
///
/// ```rust
/// use llmcompress_rs::CompressionConfig;
///
/// let config = CompressionConfig::new("out/int8", 1024, 128);
/// assert_eq!(config.model(), CompressionConfig::MODEL);
/// assert_eq!(config.max_seq_length(), 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionConfig {
    model: String,
    dataset: String,
    output_dir: PathBuf,
    max_seq_length: usize,
    num_calibration_samples: usize,
}

impl CompressionConfig {
    /// Pinned model identifier.
    pub const MODEL: &'static str = "TinyLlama/TinyLlama-1.1B-Chat-v1.0";

    /// Pinned calibration dataset identifier.
    pub const DATASET: &'static str = "open_platypus";

    /// Create a configuration for the pinned model and dataset.
    ///
    /// Values are taken as given; zero counts are forwarded to the backend.
    pub fn new<P: Into<PathBuf>>(
        output_dir: P,
        max_seq_length: usize,
        num_calibration_samples: usize,
    ) -> Self {
        Self {
            model: Self::MODEL.to_string(),
            dataset: Self::DATASET.to_string(),
            output_dir: output_dir.into(),
            max_seq_length,
            num_calibration_samples,
        }
    }

    /// Model identifier resolved by the compression library.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Dataset identifier used for calibration.
    #[must_use]
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Directory the quantized artifacts are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Maximum calibration sequence length.
    #[must_use]
    pub fn max_seq_length(&self) -> usize {
        self.max_seq_length
    }

    /// Number of calibration samples.
    #[must_use]
    pub fn num_calibration_samples(&self) -> usize {
        self.num_calibration_samples
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_OUTPUT_DIR,
            DEFAULT_MAX_SEQ_LENGTH,
            DEFAULT_NUM_CALIBRATION_SAMPLES,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompressionConfig::default();
        assert_eq!(config.model(), "TinyLlama/TinyLlama-1.1B-Chat-v1.0");
        assert_eq!(config.dataset(), "open_platypus");
        assert_eq!(
            config.output_dir(),
            Path::new("output/TinyLlama-1.1B-Chat-v1.0-INT8")
        );
        assert_eq!(config.max_seq_length(), 2048);
        assert_eq!(config.num_calibration_samples(), 512);
    }

    #[test]
    fn test_values_carried_unchanged() {
        for (seq, samples) in [(1, 1), (512, 64), (4096, 2048), (usize::MAX, 7)] {
            let config = CompressionConfig::new("out", seq, samples);
            assert_eq!(config.max_seq_length(), seq);
            assert_eq!(config.num_calibration_samples(), samples);
        }
    }

    #[test]
    fn test_zero_counts_not_rejected() {
        let config = CompressionConfig::new("out", 0, 0);
        assert_eq!(config.max_seq_length(), 0);
        assert_eq!(config.num_calibration_samples(), 0);
    }

    #[test]
    fn test_model_and_dataset_always_pinned() {
        let a = CompressionConfig::new("a", 1, 2);
        let b = CompressionConfig::new("b", 3, 4);
        assert_eq!(a.model(), b.model());
        assert_eq!(a.dataset(), b.dataset());
    }
}
