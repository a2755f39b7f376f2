//! One-shot compression backends.
//!
//! [`OneShot`] is the seam between the driver and the library that actually
//! smooths, calibrates and quantizes the model. [`LlmCompressor`] hosts the
//! `llmcompressor` Python package in a child interpreter.

use std::ffi::{OsStr, OsString};
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::config::CompressionConfig;
use crate::error::{CompressError, Result};
use crate::recipe::Recipe;

/// Environment variable selecting the Python interpreter.
pub const PYTHON_ENV: &str = "LLMCOMPRESS_PYTHON";

/// Interpreter used when none is configured.
pub const DEFAULT_PYTHON: &str = "python3";

/// Launcher run by the child interpreter.
///
/// Arguments: model, dataset, recipe path, output dir, max seq length, calibration samples.
const LAUNCHER: &str = r#"
import sys
from llmcompressor import oneshot

model, dataset, recipe, output_dir, max_seq_length, num_samples = sys.argv[1:7]
oneshot(
    model=model,
    dataset=dataset,
    recipe=recipe,
    output_dir=output_dir,
    max_seq_length=int(max_seq_length),
    num_calibration_samples=int(num_samples),
)
"#;

/// A calibration-based, single-pass compression routine.
///
/// Implementations block until the compressed model has been written to
/// `config.output_dir()` or the routine has failed.
pub trait OneShot {
    /// Apply `recipe` to the configured model.
    ///
    /// # Errors
    ///
    /// Returns an error if the model or dataset cannot be resolved, the recipe
    /// is rejected, or compression fails part way through.
    fn run(&self, config: &CompressionConfig, recipe: &Recipe) -> Result<()>;
}

/// Runs LLM Compressor's `oneshot` in a child Python interpreter.
#[derive(Debug, Clone)]
pub struct LlmCompressor {
    python: OsString,
}

impl LlmCompressor {
    /// Use the given interpreter.
    pub fn new<S: Into<OsString>>(python: S) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// Use `$LLMCOMPRESS_PYTHON`, falling back to `python3`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var_os(PYTHON_ENV).unwrap_or_else(|| DEFAULT_PYTHON.into()))
    }

    /// Interpreter this backend launches.
    #[must_use]
    pub fn python(&self) -> &OsStr {
        &self.python
    }

    fn command(&self, config: &CompressionConfig, recipe_path: &Path) -> Command {
        let mut cmd = Command::new(&self.python);
        cmd.arg("-c")
            .arg(LAUNCHER)
            .arg(config.model())
            .arg(config.dataset())
            .arg(recipe_path)
            .arg(config.output_dir())
            .arg(config.max_seq_length().to_string())
            .arg(config.num_calibration_samples().to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Default for LlmCompressor {
    fn default() -> Self {
        Self::new(DEFAULT_PYTHON)
    }
}

impl OneShot for LlmCompressor {
    fn run(&self, config: &CompressionConfig, recipe: &Recipe) -> Result<()> {
        let mut recipe_file = tempfile::Builder::new()
            .prefix("recipe-")
            .suffix(".yaml")
            .tempfile()?;
        recipe_file.write_all(recipe.to_yaml()?.as_bytes())?;
        recipe_file.flush()?;

        tracing::debug!(
            python = %self.python.to_string_lossy(),
            recipe = %recipe_file.path().display(),
            "launching oneshot"
        );

        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {msg}",
        )?);
        pb.set_message(format!("Compressing {}", config.model()));

        let mut child = self
            .command(config, recipe_file.path())
            .spawn()
            .map_err(|source| CompressError::Launch {
                program: self.python.to_string_lossy().into_owned(),
                source,
            })?;
        pb.enable_steady_tick(Duration::from_millis(120));

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        std::thread::scope(|s| {
            let pb = &pb;
            if let Some(out) = stdout {
                s.spawn(move || relay(out, pb));
            }
            if let Some(err) = stderr {
                s.spawn(move || relay(err, pb));
            }
        });

        let status = child.wait()?;
        if !status.success() {
            pb.abandon_with_message("Compression failed");
            return Err(CompressError::Backend(format!(
                "oneshot exited with {status}"
            )));
        }

        pb.finish_with_message("Compression finished");
        Ok(())
    }
}

/// Copy child output line by line above the spinner.
///
/// Reads until EOF; the child must never see a closed pipe while it is running.
fn relay<R: Read>(stream: R, pb: &ProgressBar) {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!("stopped relaying child output: {e}");
                // Keep draining so the child never blocks or gets SIGPIPE.
                let _ = std::io::copy(&mut reader, &mut std::io::sink());
                break;
            }
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        if pb.is_hidden() {
            eprintln!("{line}");
        } else {
            pb.println(line);
        }
    }
}
