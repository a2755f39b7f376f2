//! Run orchestration: configure, delegate, report.

use std::io::Write;
use std::time::Instant;

use crate::artifacts;
use crate::backend::OneShot;
use crate::config::CompressionConfig;
use crate::error::Result;
use crate::lock::HuggingfaceLock;
use crate::recipe::Recipe;
use crate::report;

/// Drives one compression run against a [`OneShot`] backend.
///
/// # Example
///
/// ```no_run
/// use llmcompress_rs::{CompressionConfig, Driver, LlmCompressor};
///
/// # fn main() -> llmcompress_rs::Result<()> {
/// let driver = Driver::new(CompressionConfig::default(), LlmCompressor::from_env());
/// driver.run(&mut std::io::stdout())?;
/// # Ok(())
/// # }
/// ```
pub struct Driver<B> {
    config: CompressionConfig,
    recipe: Recipe,
    backend: B,
    lock: Option<HuggingfaceLock>,
}

impl<B: OneShot> Driver<B> {
    /// Create a driver using the SmoothQuant + GPTQ W8A8 recipe.
    pub fn new(config: CompressionConfig, backend: B) -> Self {
        Self {
            config,
            recipe: Recipe::smoothquant_w8a8(),
            backend,
            lock: None,
        }
    }

    /// Require the model and dataset to be pinned by `lock`.
    #[must_use]
    pub fn with_lock(mut self, lock: HuggingfaceLock) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Configuration of this run.
    #[must_use]
    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Recipe applied by this run.
    #[must_use]
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Print the run banner and the rendered recipe without compressing anything.
    pub fn dry_run<W: Write>(&self, out: &mut W) -> Result<()> {
        self.check_lock()?;
        self.write_banner(out)?;
        writeln!(out, "\nRecipe:")?;
        write!(out, "{}", self.recipe.to_yaml()?)?;
        Ok(())
    }

    /// Compress the model and list the produced files.
    ///
    /// # Errors
    ///
    /// Returns the backend's error unchanged if compression fails; nothing is
    /// printed after the banner in that case. Also fails if the output
    /// directory cannot be listed afterwards.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        self.check_lock()?;
        self.write_banner(out)?;
        out.flush()?;

        self.delegate()?;

        let output_dir = report::absolute_path(self.config.output_dir())?;
        writeln!(
            out,
            "\nQuantization complete! Model saved to {}",
            output_dir.display()
        )?;
        writeln!(out, "\nOutput files:")?;
        report::write_listing(out, self.config.output_dir())?;

        match artifacts::summarize(self.config.output_dir()) {
            Ok(summary) => summary.log(),
            Err(e) => tracing::warn!("Could not summarize artifacts: {e}"),
        }
        Ok(())
    }

    fn check_lock(&self) -> Result<()> {
        match &self.lock {
            Some(lock) => lock.verify(&self.config),
            None => Ok(()),
        }
    }

    fn write_banner<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Starting quantization of {}", self.config.model())?;
        writeln!(out, "Using dataset: {}", self.config.dataset())?;
        writeln!(
            out,
            "Output directory: {}",
            self.config.output_dir().display()
        )?;
        Ok(())
    }

    /// The single error boundary around the backend call.
    fn delegate(&self) -> Result<()> {
        tracing::info!(
            "Running oneshot: max_seq_length={}, num_calibration_samples={}",
            self.config.max_seq_length(),
            self.config.num_calibration_samples()
        );
        let started = Instant::now();

        self.backend
            .run(&self.config, &self.recipe)
            .inspect_err(|e| tracing::error!("oneshot compression failed: {e}"))?;

        tracing::info!("oneshot finished in {:.1?}", started.elapsed());
        Ok(())
    }
}
