//! Congestion classifier: labels and the pre-trained model artifact
//!
//! The model itself is produced by an external training toolchain and shipped
//! as a versioned JSON decision-tree artifact. This module only loads it
//! read-only at startup and walks it; there is no training, updating or
//! validation of the model here.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::features::FeatureRecord;
use crate::{Result, TrafficAiError};

/// City-wide congestion level, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CongestionLabel {
    Low,
    Medium,
    High,
}

impl CongestionLabel {
    /// All labels, in severity order
    pub const ALL: [CongestionLabel; 3] =
        [CongestionLabel::Low, CongestionLabel::Medium, CongestionLabel::High];

    /// Banner and marker color for this label
    #[must_use]
    pub fn color_hex(self) -> &'static str {
        match self {
            CongestionLabel::Low => "#22c55e",
            CongestionLabel::Medium => "#f59e0b",
            CongestionLabel::High => "#ef4444",
        }
    }

    /// Map marker size for this label
    #[must_use]
    pub fn display_size(self) -> u32 {
        match self {
            CongestionLabel::Low => 10,
            CongestionLabel::Medium => 18,
            CongestionLabel::High => 25,
        }
    }
}

impl fmt::Display for CongestionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CongestionLabel::Low => "Low",
            CongestionLabel::Medium => "Medium",
            CongestionLabel::High => "High",
        };
        write!(f, "{name}")
    }
}

/// Decision function mapping a feature record to a congestion label.
///
/// Passed explicitly into the pipeline so tests can substitute a stub for
/// the real artifact.
pub trait Classifier: Send + Sync {
    fn predict(&self, record: &FeatureRecord) -> CongestionLabel;
}

/// Feature referenced by a split node in the model artifact.
///
/// Names match the columns of the training frame.
#[derive(Debug, Clone, Copy, Deserialize)]
enum FeatureId {
    #[serde(rename = "temp")]
    Temp,
    #[serde(rename = "rain_1h")]
    Rain1h,
    #[serde(rename = "snow_1h")]
    Snow1h,
    #[serde(rename = "clouds_all")]
    CloudsAll,
    #[serde(rename = "hour")]
    Hour,
    #[serde(rename = "day_of_week")]
    DayOfWeek,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "is_weekend")]
    IsWeekend,
}

impl FeatureId {
    fn value(self, record: &FeatureRecord) -> f64 {
        match self {
            FeatureId::Temp => record.temperature,
            FeatureId::Rain1h => record.rain_1h,
            FeatureId::Snow1h => record.snow_1h,
            FeatureId::CloudsAll => f64::from(record.cloud_cover_pct),
            FeatureId::Hour => f64::from(record.hour),
            FeatureId::DayOfWeek => f64::from(record.day_of_week),
            FeatureId::Month => f64::from(record.month),
            FeatureId::IsWeekend => {
                if record.is_weekend {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum TreeNode {
    Split {
        feature: FeatureId,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        label: CongestionLabel,
    },
}

/// Pre-trained congestion model loaded from a versioned JSON artifact.
#[derive(Debug, Deserialize)]
pub struct ArtifactClassifier {
    version: String,
    root: TreeNode,
}

impl ArtifactClassifier {
    /// Load the model artifact from disk.
    ///
    /// Called once at process start; a missing or corrupt file is fatal and
    /// the caller aborts startup.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            TrafficAiError::artifact(format!(
                "Failed to read model artifact {}: {e}",
                path.display()
            ))
        })?;

        let model = Self::from_json(&raw)?;
        tracing::info!(version = %model.version, path = %path.display(), "Loaded congestion model");
        Ok(model)
    }

    /// Parse an artifact from its JSON representation.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| TrafficAiError::artifact(format!("Corrupt model artifact: {e}")))
    }

    /// Version string recorded by the training toolchain
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl Classifier for ArtifactClassifier {
    fn predict(&self, record: &FeatureRecord) -> CongestionLabel {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { label } => return *label,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if feature.value(record) <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}
