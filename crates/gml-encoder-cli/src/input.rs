//! JSON input documents

use gml_encoder::{EncodeError, Feature, FeatureTypeInfo};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid feature document {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Either a bare feature array or an object that also names the feature type
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Collection {
        #[serde(default)]
        feature_type: Option<FeatureTypeInfo>,
        features: Vec<Feature>,
    },
    Features(Vec<Feature>),
}

/// Features read from an input file
#[derive(Debug)]
pub struct FeatureDocument {
    pub feature_type: Option<FeatureTypeInfo>,
    pub features: Vec<Feature>,
}

impl FeatureDocument {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(match serde_json::from_str(json)? {
            RawDocument::Collection {
                feature_type,
                features,
            } => Self {
                feature_type,
                features,
            },
            RawDocument::Features(features) => Self {
                feature_type: None,
                features,
            },
        })
    }

    pub fn read(path: &Path) -> Result<Self, CliError> {
        let json = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::from_json(&json).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            "Read {} features from {}",
            document.features.len(),
            path.display()
        );
        Ok(document)
    }
}
