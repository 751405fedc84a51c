//! On-disk representation of a trained classifier.
//!
//! The artifact is a JSON document holding the class labels, the feature
//! encoding used at training time and a gradient-boosted tree ensemble.
//! Nodes of a tree are stored in a flat array; children always come after
//! their parent so evaluation cannot loop.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const NUMERIC_COLUMNS: [&str; 2] = ["price", "initialprice"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub classes: Vec<i64>,
    #[serde(default)]
    pub class_names: Vec<String>,
    pub features: FeatureSpec,
    pub booster: BoosterSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    #[serde(default = "default_numeric")]
    pub numeric: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoosterSpec {
    pub objective: Objective,
    #[serde(default = "default_base_score")]
    pub base_score: f64,
    #[serde(default)]
    pub trees: Vec<TreeSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Objective {
    #[serde(rename = "binary:logistic")]
    BinaryLogistic,
    #[serde(rename = "multi:softprob")]
    MultiSoftprob,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    /// Index into `classes` this tree contributes to. Always 0 for binary models.
    #[serde(default)]
    pub class: usize,
    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        missing: Option<usize>,
    },
    Leaf {
        leaf: f64,
    },
}

impl Objective {
    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::BinaryLogistic => "binary:logistic",
            Objective::MultiSoftprob => "multi:softprob",
        }
    }
}

impl FeatureSpec {
    /// Length of the encoded feature vector.
    pub fn width(&self) -> usize {
        self.numeric.len() + self.languages.len() + self.genre.len() + self.tags.len()
    }
}

impl ModelArtifact {
    /// Reads an artifact from disk. The file handle is closed before returning,
    /// whether or not parsing succeeded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::model(format!("cannot open artifact {}: {}", path.display(), e))
        })?;
        let artifact: Self = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            Error::model(format!("cannot parse artifact {}: {}", path.display(), e))
        })?;
        Ok(artifact)
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_classes()?;
        self.validate_features()?;
        self.validate_booster()
    }

    fn validate_classes(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(Error::model("artifact declares no classes"));
        }
        let mut seen = HashSet::new();
        for class in &self.classes {
            if !seen.insert(class) {
                return Err(Error::model(format!("duplicate class label {class}")));
            }
        }
        if !self.class_names.is_empty() && self.class_names.len() != self.classes.len() {
            return Err(Error::model(format!(
                "{} class names given for {} classes",
                self.class_names.len(),
                self.classes.len()
            )));
        }
        Ok(())
    }

    fn validate_features(&self) -> Result<()> {
        for column in &self.features.numeric {
            if !NUMERIC_COLUMNS.contains(&column.as_str()) {
                return Err(Error::model(format!("unknown numeric column '{column}'")));
            }
        }
        check_unique("numeric", &self.features.numeric)?;
        check_unique("languages", &self.features.languages)?;
        check_unique("genre", &self.features.genre)?;
        check_unique("tags", &self.features.tags)
    }

    fn validate_booster(&self) -> Result<()> {
        let booster = &self.booster;
        match booster.objective {
            Objective::BinaryLogistic => {
                if self.classes.len() != 2 {
                    return Err(Error::model(format!(
                        "binary:logistic needs exactly 2 classes, got {}",
                        self.classes.len()
                    )));
                }
                if !(booster.base_score > 0.0 && booster.base_score < 1.0) {
                    return Err(Error::model(format!(
                        "base_score must lie in (0, 1) for binary:logistic, got {}",
                        booster.base_score
                    )));
                }
            }
            Objective::MultiSoftprob => {
                if self.classes.len() < 2 {
                    return Err(Error::model("multi:softprob needs at least 2 classes"));
                }
                if !booster.base_score.is_finite() {
                    return Err(Error::model("base_score must be finite"));
                }
            }
        }

        let class_slots = match booster.objective {
            Objective::BinaryLogistic => 1,
            Objective::MultiSoftprob => self.classes.len(),
        };
        let width = self.features.width();
        for (t, tree) in booster.trees.iter().enumerate() {
            if tree.class >= class_slots {
                return Err(Error::model(format!(
                    "tree {t} targets class index {} but only {class_slots} allowed",
                    tree.class
                )));
            }
            validate_tree(t, tree, width)?;
        }
        Ok(())
    }
}

fn validate_tree(t: usize, tree: &TreeSpec, width: usize) -> Result<()> {
    if tree.nodes.is_empty() {
        return Err(Error::model(format!("tree {t} has no nodes")));
    }
    let len = tree.nodes.len();
    for (i, node) in tree.nodes.iter().enumerate() {
        match node {
            NodeSpec::Leaf { leaf } => {
                if !leaf.is_finite() {
                    return Err(Error::model(format!("tree {t} node {i}: non-finite leaf")));
                }
            }
            NodeSpec::Split {
                feature,
                threshold,
                yes,
                no,
                missing,
            } => {
                if *feature >= width {
                    return Err(Error::model(format!(
                        "tree {t} node {i}: feature {feature} out of range (width {width})"
                    )));
                }
                if threshold.is_nan() {
                    return Err(Error::model(format!("tree {t} node {i}: NaN threshold")));
                }
                for child in [Some(*yes), Some(*no), *missing].into_iter().flatten() {
                    if child <= i || child >= len {
                        return Err(Error::model(format!(
                            "tree {t} node {i}: invalid child index {child}"
                        )));
                    }
                }
            }
        }
    }
    Ok(())
}

fn check_unique(column: &str, values: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value.as_str()) {
            return Err(Error::model(format!(
                "duplicate entry '{value}' in {column} features"
            )));
        }
    }
    Ok(())
}

fn default_numeric() -> Vec<String> {
    NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect()
}

fn default_base_score() -> f64 {
    0.5
}
