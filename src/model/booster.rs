use super::artifact::{ModelArtifact, NodeSpec, Objective};
use super::frame::{FeatureFrame, FeatureRow};
use super::{Classifier, ModelInfo};
use crate::{Error, Result};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
enum NumericColumn {
    Price,
    InitialPrice,
}

/// Turns a frame row into the dense vector the trees were trained on:
/// numeric columns first, then one multi-hot slot per known token.
#[derive(Debug, Clone)]
struct FeatureEncoder {
    numeric: Vec<NumericColumn>,
    languages: HashMap<String, usize>,
    genre: HashMap<String, usize>,
    tags: HashMap<String, usize>,
    width: usize,
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
        missing: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone)]
struct Tree {
    class: usize,
    nodes: Vec<Node>,
}

/// Gradient-boosted tree ensemble evaluated in the XGBoost manner.
#[derive(Debug, Clone)]
pub struct GradientBoostedClassifier {
    classes: Vec<i64>,
    class_names: Vec<String>,
    objective: Objective,
    base_score: f64,
    encoder: FeatureEncoder,
    trees: Vec<Tree>,
}

impl FeatureEncoder {
    fn new(artifact: &ModelArtifact) -> Self {
        let spec = &artifact.features;
        let numeric = spec
            .numeric
            .iter()
            .map(|column| match column.as_str() {
                "initialprice" => NumericColumn::InitialPrice,
                _ => NumericColumn::Price,
            })
            .collect::<Vec<_>>();

        let mut offset = numeric.len();
        let mut vocabulary = |tokens: &[String]| {
            let map = tokens
                .iter()
                .enumerate()
                .map(|(i, token)| (token.clone(), offset + i))
                .collect::<HashMap<_, _>>();
            offset += tokens.len();
            map
        };
        let languages = vocabulary(&spec.languages);
        let genre = vocabulary(&spec.genre);
        let tags = vocabulary(&spec.tags);

        Self {
            numeric,
            languages,
            genre,
            tags,
            width: spec.width(),
        }
    }

    fn encode(&self, row: &FeatureRow) -> Vec<f64> {
        let mut x = vec![0.0; self.width];
        for (slot, column) in self.numeric.iter().enumerate() {
            x[slot] = match column {
                NumericColumn::Price => row.price,
                NumericColumn::InitialPrice => row.initialprice,
            };
        }
        for (vocabulary, tokens) in [
            (&self.languages, &row.languages),
            (&self.genre, &row.genre),
            (&self.tags, &row.tags),
        ] {
            for token in tokens {
                if let Some(&slot) = vocabulary.get(token) {
                    x[slot] = 1.0;
                }
            }
        }
        x
    }
}

impl Tree {
    fn leaf_value(&self, x: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf(value) => return *value,
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                } => {
                    let value = x[*feature];
                    idx = if value.is_nan() {
                        *missing
                    } else if value < *threshold {
                        *yes
                    } else {
                        *no
                    };
                }
            }
        }
    }
}

impl GradientBoostedClassifier {
    /// Validates the artifact and prepares it for evaluation.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        artifact.validate()?;

        let encoder = FeatureEncoder::new(&artifact);
        let trees = artifact
            .booster
            .trees
            .iter()
            .map(|tree| Tree {
                class: tree.class,
                nodes: tree
                    .nodes
                    .iter()
                    .map(|node| match node {
                        NodeSpec::Leaf { leaf } => Node::Leaf(*leaf),
                        NodeSpec::Split {
                            feature,
                            threshold,
                            yes,
                            no,
                            missing,
                        } => Node::Split {
                            feature: *feature,
                            threshold: *threshold,
                            yes: *yes,
                            no: *no,
                            missing: missing.unwrap_or(*yes),
                        },
                    })
                    .collect(),
            })
            .collect();

        Ok(Self {
            classes: artifact.classes,
            class_names: artifact.class_names,
            objective: artifact.booster.objective,
            base_score: artifact.booster.base_score,
            encoder,
            trees,
        })
    }

    fn margins(&self, x: &[f64]) -> Vec<f64> {
        let slots = match self.objective {
            Objective::BinaryLogistic => 1,
            Objective::MultiSoftprob => self.classes.len(),
        };
        let base = match self.objective {
            Objective::BinaryLogistic => logit(self.base_score),
            Objective::MultiSoftprob => self.base_score,
        };
        let mut margins = vec![base; slots];
        for tree in &self.trees {
            margins[tree.class] += tree.leaf_value(x);
        }
        margins
    }

    fn row_proba(&self, row: &FeatureRow) -> Result<Vec<f64>> {
        let x = self.encoder.encode(row);
        let margins = self.margins(&x);
        let proba = match self.objective {
            Objective::BinaryLogistic => {
                let p = sigmoid(margins[0]);
                vec![1.0 - p, p]
            }
            Objective::MultiSoftprob => softmax(&margins),
        };
        if proba.iter().any(|p| !p.is_finite()) {
            return Err(Error::inference(format!(
                "non-finite probability from margins {margins:?}"
            )));
        }
        Ok(proba)
    }
}

impl Classifier for GradientBoostedClassifier {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict_proba(&self, frame: &FeatureFrame) -> Result<Vec<Vec<f64>>> {
        frame.rows().iter().map(|row| self.row_proba(row)).collect()
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            classes: self.classes.clone(),
            class_names: self.class_names.clone(),
            objective: self.objective.as_str().to_string(),
            n_trees: self.trees.len(),
            n_features: self.encoder.width,
        }
    }
}

fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}

fn softmax(margins: &[f64]) -> Vec<f64> {
    let max = margins.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = margins.iter().map(|m| (m - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
