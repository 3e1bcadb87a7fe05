//! AI model status cards. The models are static display data; nothing is
//! trained or evaluated here.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingStatus {
    Completed,
    Training,
}

impl fmt::Display for TrainingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingStatus::Completed => f.write_str("Completed"),
            TrainingStatus::Training => f.write_str("Training"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStatus {
    pub id: u32,
    pub name: String,
    pub model_type: String,
    pub accuracy: f64,
    pub training_status: TrainingStatus,
    pub last_retrain: String,
    pub dataset: String,
}

/// Aggregate numbers for the overview cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOverview {
    pub active_models: usize,
    pub average_accuracy: f64,
    pub training: usize,
}

impl ModelOverview {
    pub fn from_models(models: &[ModelStatus]) -> Self {
        let active_models = models.len();
        let average_accuracy = if models.is_empty() {
            0.0
        } else {
            models.iter().map(|m| m.accuracy).sum::<f64>() / models.len() as f64
        };
        let training = models
            .iter()
            .filter(|m| m.training_status == TrainingStatus::Training)
            .count();

        ModelOverview {
            active_models,
            average_accuracy,
            training,
        }
    }
}

/// The three model cards shown on the status page.
pub fn builtin_models() -> Vec<ModelStatus> {
    vec![
        ModelStatus {
            id: 1,
            name: "Threat Detection Model".to_string(),
            model_type: "Deep Learning (CNN)".to_string(),
            accuracy: 93.5,
            training_status: TrainingStatus::Completed,
            last_retrain: "2025-12-01 14:30:00".to_string(),
            dataset: "50,000 threat samples".to_string(),
        },
        ModelStatus {
            id: 2,
            name: "Anomaly Detection Model".to_string(),
            model_type: "Random Forest".to_string(),
            accuracy: 89.2,
            training_status: TrainingStatus::Completed,
            last_retrain: "2025-11-28 10:15:00".to_string(),
            dataset: "75,000 network logs".to_string(),
        },
        ModelStatus {
            id: 3,
            name: "Behavioral Analysis Model".to_string(),
            model_type: "LSTM Neural Network".to_string(),
            accuracy: 91.8,
            training_status: TrainingStatus::Training,
            last_retrain: "2025-12-03 08:00:00".to_string(),
            dataset: "100,000 behavior patterns".to_string(),
        },
    ]
}
