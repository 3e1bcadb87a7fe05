//! AI model status cards. Static content; the only derived data is the
//! overview aggregation.

use crate::models::ai::{builtin_models, ModelOverview, ModelStatus};

pub struct AiModelsView {
    models: Vec<ModelStatus>,
}

impl AiModelsView {
    pub fn new() -> Self {
        AiModelsView {
            models: builtin_models(),
        }
    }

    pub fn models(&self) -> &[ModelStatus] {
        &self.models
    }

    pub fn overview(&self) -> ModelOverview {
        ModelOverview::from_models(&self.models)
    }
}

impl Default for AiModelsView {
    fn default() -> Self {
        Self::new()
    }
}
