//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::backend::{DEFAULT_PYTHON, PYTHON_ENV};
use crate::config::{
    CompressionConfig, DEFAULT_MAX_SEQ_LENGTH, DEFAULT_NUM_CALIBRATION_SAMPLES,
    DEFAULT_OUTPUT_DIR,
};

/// Quantize TinyLlama to 8-bit weights and activations (SmoothQuant + GPTQ).
#[derive(Debug, Parser)]
#[command(name = "llmcompress")]
#[command(about = "Quantize TinyLlama model")]
#[command(version)]
pub struct Cli {
    /// Output directory for quantized model
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Maximum sequence length
    #[arg(long, default_value_t = DEFAULT_MAX_SEQ_LENGTH)]
    pub max_seq_length: usize,

    /// Number of calibration samples
    #[arg(long, default_value_t = DEFAULT_NUM_CALIBRATION_SAMPLES)]
    pub num_calibration_samples: usize,

    /// Python interpreter with llmcompressor installed
    #[arg(long, env = PYTHON_ENV, default_value = DEFAULT_PYTHON)]
    pub python: PathBuf,

    /// Refuse to run unless this lock file pins the model and dataset
    #[arg(long)]
    pub lock_file: Option<PathBuf>,

    /// Print the recipe without running it
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Build the run configuration from the parsed flags.
    #[must_use]
    pub fn config(&self) -> CompressionConfig {
        CompressionConfig::new(
            self.output_dir.clone(),
            self.max_seq_length,
            self.num_calibration_samples,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("llmcompress").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).config();
        assert_eq!(
            config.output_dir(),
            Path::new("output/TinyLlama-1.1B-Chat-v1.0-INT8")
        );
        assert_eq!(config.max_seq_length(), 2048);
        assert_eq!(config.num_calibration_samples(), 512);
    }

    #[test]
    fn test_values_forwarded_unchanged() {
        for (seq, samples) in [("1", "1"), ("512", "64"), ("8192", "4096")] {
            let config = parse(&[
                "--max-seq-length",
                seq,
                "--num-calibration-samples",
                samples,
            ])
            .config();
            assert_eq!(config.max_seq_length().to_string(), seq);
            assert_eq!(config.num_calibration_samples().to_string(), samples);
        }
    }

    #[test]
    fn test_output_dir_override() {
        let config = parse(&["--output-dir", "/tmp/int8"]).config();
        assert_eq!(config.output_dir(), Path::new("/tmp/int8"));
        assert_eq!(config.model(), CompressionConfig::MODEL);
    }

    #[test]
    fn test_zero_is_accepted() {
        let config = parse(&["--num-calibration-samples", "0"]).config();
        assert_eq!(config.num_calibration_samples(), 0);
    }

    #[test]
    fn test_non_integer_rejected() {
        let result = Cli::try_parse_from(["llmcompress", "--max-seq-length", "long"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_rejected() {
        let result = Cli::try_parse_from(["llmcompress", "--num-calibration-samples", "-5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_flags() {
        let cli = parse(&["--python", "/opt/venv/bin/python", "--lock-file", "hf.lock.yaml", "--dry-run"]);
        assert_eq!(cli.python, Path::new("/opt/venv/bin/python"));
        assert_eq!(cli.lock_file.as_deref(), Some(Path::new("hf.lock.yaml")));
        assert!(cli.dry_run);
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
