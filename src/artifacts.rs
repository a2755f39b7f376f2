//! Read-only summary of a compressed model directory.
//!
//! Only safetensors headers and `config.json` are read; tensor data is never loaded.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use safetensors::tensor::TensorInfo;
use serde::Deserialize;

use crate::error::{CompressError, Result};

/// Upper bound on a safetensors header, matching the format's own limit.
const MAX_HEADER_SIZE: u64 = 100_000_000;

/// Summary of the artifacts found in an output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSummary {
    /// Safetensors files found, sorted.
    pub weight_files: Vec<PathBuf>,
    /// Tensor count per dtype across all weight files.
    pub tensors_by_dtype: BTreeMap<String, usize>,
    /// `quantization_config.quant_method` from `config.json`.
    pub quant_method: Option<String>,
    /// `quantization_config.format` from `config.json`.
    pub format: Option<String>,
}

impl ArtifactSummary {
    /// Total number of tensors across all weight files.
    #[must_use]
    pub fn tensor_count(&self) -> usize {
        self.tensors_by_dtype.values().sum()
    }

    /// Log the summary.
    pub fn log(&self) {
        tracing::info!(
            "Found {} weight file(s) holding {} tensors",
            self.weight_files.len(),
            self.tensor_count()
        );
        for (dtype, count) in &self.tensors_by_dtype {
            tracing::info!("  {dtype}: {count}");
        }
        if let Some(method) = &self.quant_method {
            tracing::info!(
                "Quantization method: {} (format: {})",
                method,
                self.format.as_deref().unwrap_or("unknown")
            );
        }
    }
}

#[derive(Deserialize)]
struct ModelConfig {
    #[serde(default)]
    quantization_config: Option<QuantizationConfig>,
}

#[derive(Deserialize)]
struct QuantizationConfig {
    #[serde(default)]
    quant_method: Option<String>,
    #[serde(default)]
    format: Option<String>,
}

/// Summarize the artifacts directly under `dir`.
///
/// # Errors
///
/// Returns an error if the directory cannot be read, a safetensors header is
/// malformed, or `config.json` is not valid JSON.
pub fn summarize(dir: &Path) -> Result<ArtifactSummary> {
    let mut summary = ArtifactSummary::default();

    let mut weight_files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "safetensors"))
        .collect();
    weight_files.sort();

    for path in &weight_files {
        for info in read_header(path)?.into_values() {
            *summary
                .tensors_by_dtype
                .entry(format!("{:?}", info.dtype))
                .or_insert(0) += 1;
        }
    }
    summary.weight_files = weight_files;

    let config_path = dir.join("config.json");
    if config_path.is_file() {
        let config: ModelConfig = serde_json::from_reader(BufReader::new(File::open(config_path)?))?;
        if let Some(quant) = config.quantization_config {
            summary.quant_method = quant.quant_method;
            summary.format = quant.format;
        }
    }

    Ok(summary)
}

/// Read the tensor table of a safetensors file without touching tensor data.
pub fn read_header(path: &Path) -> Result<BTreeMap<String, TensorInfo>> {
    let mut file = File::open(path)?;

    let mut len_bytes = [0u8; 8];
    file.read_exact(&mut len_bytes)?;
    let header_len = u64::from_le_bytes(len_bytes);
    if header_len > MAX_HEADER_SIZE {
        return Err(CompressError::Artifact(format!(
            "{}: safetensors header of {header_len} bytes exceeds limit",
            path.display()
        )));
    }

    let mut header = Vec::new();
    file.take(header_len).read_to_end(&mut header)?;

    let raw: BTreeMap<String, serde_json::Value> = serde_json::from_slice(&header)?;
    raw.into_iter()
        .filter(|(name, _)| name != "__metadata__")
        .map(|(name, value)| -> Result<(String, TensorInfo)> {
            Ok((name, serde_json::from_value(value)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_safetensors(path: &Path, header: &str) {
        let mut bytes = (header.len() as u64).to_le_bytes().to_vec();
        bytes.extend_from_slice(header.as_bytes());
        fs::write(path, bytes).unwrap();
    }

    const INT8_HEADER: &str = r#"{"__metadata__":{"format":"pt"},"model.layers.0.mlp.down_proj.weight":{"dtype":"I8","shape":[2,2],"data_offsets":[0,4]},"model.layers.0.mlp.down_proj.weight_scale":{"dtype":"F16","shape":[2,1],"data_offsets":[4,8]},"lm_head.weight":{"dtype":"F16","shape":[2,2],"data_offsets":[8,16]}}"#;

    #[test]
    fn test_counts_tensors_per_dtype() {
        let temp_dir = TempDir::new().unwrap();
        write_safetensors(&temp_dir.path().join("model.safetensors"), INT8_HEADER);

        let summary = summarize(temp_dir.path()).unwrap();
        assert_eq!(summary.weight_files.len(), 1);
        assert_eq!(summary.tensor_count(), 3);
        assert_eq!(summary.tensors_by_dtype.get("I8"), Some(&1));
        assert_eq!(summary.tensors_by_dtype.get("F16"), Some(&2));
    }

    #[test]
    fn test_reads_quantization_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("config.json"),
            r#"{"model_type":"llama","quantization_config":{"quant_method":"compressed-tensors","format":"int-quantized"}}"#,
        )
        .unwrap();

        let summary = summarize(temp_dir.path()).unwrap();
        assert_eq!(summary.quant_method.as_deref(), Some("compressed-tensors"));
        assert_eq!(summary.format.as_deref(), Some("int-quantized"));
        assert!(summary.weight_files.is_empty());
    }

    #[test]
    fn test_config_without_quantization() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.json"), r#"{"model_type":"llama"}"#).unwrap();

        let summary = summarize(temp_dir.path()).unwrap();
        assert!(summary.quant_method.is_none());
    }

    #[test]
    fn test_truncated_header_is_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("bad.safetensors"), [1u8, 2, 3]).unwrap();
        assert!(summarize(temp_dir.path()).is_err());
    }

    #[test]
    fn test_oversized_header_is_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("huge.safetensors"),
            u64::MAX.to_le_bytes(),
        )
        .unwrap();
        let err = summarize(temp_dir.path()).unwrap_err();
        assert!(matches!(err, CompressError::Artifact(_)));
        assert!(err.to_string().contains("exceeds limit"));
    }

    #[test]
    fn test_missing_directory_is_error() {
        assert!(summarize(Path::new("/nonexistent/output")).is_err());
    }
}
