//! Compression recipes.
//!
//! A recipe is an ordered list of stages handed to the compression library.
//! Stage order matters: smoothing rescales activations, and quantization
//! calibrates against the smoothed activations, so smoothing runs first.
//!
//! # Example
//!
//! ```rust
//! use llmcompress_rs::recipe::{Recipe, RecipeStage};
//!
//! let recipe = Recipe::smoothquant_w8a8();
//! let names: Vec<_> = recipe.stages().iter().map(|s| s.modifier()).collect();
//! assert_eq!(names, ["SmoothQuantModifier", "GPTQModifier"]);
//! ```

use serde_yaml::{Mapping, Value};

use crate::error::Result;

/// Smoothing strength used by the W8A8 recipe.
pub const DEFAULT_SMOOTHING_STRENGTH: f64 = 0.8;

/// Common capability of every recipe stage.
pub trait RecipeStage {
    /// Name of the library modifier implementing this stage.
    fn modifier(&self) -> &'static str;

    /// Keyword arguments passed to the modifier.
    fn arguments(&self) -> Mapping;
}

/// Activation smoothing (SmoothQuant).
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingStage {
    /// Fraction of quantization difficulty migrated from activations to weights.
    pub smoothing_strength: f64,
}

impl Default for SmoothingStage {
    fn default() -> Self {
        Self {
            smoothing_strength: DEFAULT_SMOOTHING_STRENGTH,
        }
    }
}

impl RecipeStage for SmoothingStage {
    fn modifier(&self) -> &'static str {
        "SmoothQuantModifier"
    }

    fn arguments(&self) -> Mapping {
        let mut args = Mapping::new();
        args.insert("smoothing_strength".into(), self.smoothing_strength.into());
        args
    }
}

/// Weight/activation quantization (GPTQ).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizationStage {
    /// Preset scheme, e.g. `W8A8`.
    pub scheme: String,
    /// Layer types to quantize.
    pub targets: Vec<String>,
    /// Layers left untouched.
    pub ignore: Vec<String>,
}

impl QuantizationStage {
    /// 8-bit weights and activations on every `Linear`, keeping `lm_head` in full precision.
    #[must_use]
    pub fn w8a8() -> Self {
        Self {
            scheme: "W8A8".into(),
            targets: vec!["Linear".into()],
            ignore: vec!["lm_head".into()],
        }
    }
}

fn string_list(items: &[String]) -> Value {
    Value::Sequence(items.iter().cloned().map(Value::String).collect())
}

impl RecipeStage for QuantizationStage {
    fn modifier(&self) -> &'static str {
        "GPTQModifier"
    }

    fn arguments(&self) -> Mapping {
        let mut args = Mapping::new();
        args.insert("scheme".into(), self.scheme.clone().into());
        args.insert("targets".into(), string_list(&self.targets));
        args.insert("ignore".into(), string_list(&self.ignore));
        args
    }
}

/// A single stage of a recipe.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Activation smoothing.
    Smoothing(SmoothingStage),
    /// Quantization.
    Quantization(QuantizationStage),
}

impl RecipeStage for Stage {
    fn modifier(&self) -> &'static str {
        match self {
            Stage::Smoothing(stage) => stage.modifier(),
            Stage::Quantization(stage) => stage.modifier(),
        }
    }

    fn arguments(&self) -> Mapping {
        match self {
            Stage::Smoothing(stage) => stage.arguments(),
            Stage::Quantization(stage) => stage.arguments(),
        }
    }
}

/// Ordered list of stages applied in one shot.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    stages: Vec<Stage>,
}

impl Recipe {
    /// Group name used in the rendered recipe.
    pub const STAGE_GROUP: &'static str = "quant_stage";

    /// SmoothQuant (strength 0.8) followed by GPTQ W8A8 on `Linear`, ignoring `lm_head`.
    #[must_use]
    pub fn smoothquant_w8a8() -> Self {
        Self {
            stages: vec![
                Stage::Smoothing(SmoothingStage::default()),
                Stage::Quantization(QuantizationStage::w8a8()),
            ],
        }
    }

    /// Stages in execution order.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Render the recipe in the library's YAML recipe format.
    ///
    /// Modifiers keep their stage order in the output mapping.
    pub fn to_yaml(&self) -> Result<String> {
        let mut modifiers = Mapping::new();
        for stage in &self.stages {
            modifiers.insert(stage.modifier().into(), Value::Mapping(stage.arguments()));
        }

        let mut group = Mapping::new();
        group.insert("quant_modifiers".into(), Value::Mapping(modifiers));

        let mut root = Mapping::new();
        root.insert(Self::STAGE_GROUP.into(), Value::Mapping(group));

        Ok(serde_yaml::to_string(&root)?)
    }
}
