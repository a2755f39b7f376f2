//! # llmcompress-rs
//!
//! One-shot 8-bit compression of TinyLlama with LLM Compressor.
//!
//! The crate pins the model (`TinyLlama/TinyLlama-1.1B-Chat-v1.0`) and the
//! calibration dataset (`open_platypus`), builds a two-stage recipe
//! (SmoothQuant activation smoothing, then GPTQ `W8A8` quantization of every
//! `Linear` layer except `lm_head`), hands it to the compression library and
//! lists what was written.
//!
//! ## Quick Start (CLI)
//!
//! ```bash
//! # Compress with the defaults
//! llmcompress
//!
//! # Shorter calibration, custom destination
//! llmcompress --output-dir ./int8 --max-seq-length 1024 --num-calibration-samples 128
//!
//! # Enforce the Hub lock file and inspect the recipe only
//! llmcompress --lock-file huggingface.lock.yaml --dry-run
//! ```
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use llmcompress_rs::{CompressionConfig, Driver, LlmCompressor};
//!
//! # fn main() -> llmcompress_rs::Result<()> {
//! let config = CompressionConfig::new("output/int8", 2048, 512);
//! let driver = Driver::new(config, LlmCompressor::new("python3"));
//! driver.run(&mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod artifacts;
pub mod backend;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod lock;
pub mod recipe;
pub mod report;

pub use backend::{LlmCompressor, OneShot};
pub use config::CompressionConfig;
pub use driver::Driver;
pub use error::{CompressError, Result};
pub use lock::HuggingfaceLock;
pub use recipe::{Recipe, RecipeStage, Stage};
