use serde::Serialize;
use uuid::Uuid;

use crate::agents::ModelRegistry;

/// Per-caller chat context. Owns the model selection so that several
/// sessions can share one [`crate::model_manager::ModelManager`].
#[derive(Debug, Clone, Serialize)]
pub struct ChatSession {
    id: Uuid,
    current_model: &'static str,
}

impl ChatSession {
    /// Start on `preferred` if the registry knows it, else on the registry
    /// default.
    pub fn new(registry: &ModelRegistry, preferred: Option<&str>) -> Self {
        let model = preferred
            .and_then(|id| registry.get(id).ok())
            .unwrap_or_else(|| registry.default_model());
        Self {
            id: Uuid::new_v4(),
            current_model: model.id,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current_model(&self) -> &'static str {
        self.current_model
    }

    /// Switch models. Unknown ids are ignored; returns whether the switch
    /// happened.
    pub fn switch_model(&mut self, registry: &ModelRegistry, id: &str) -> bool {
        match registry.get(id) {
            Ok(model) => {
                self.current_model = model.id;
                true
            }
            Err(_) => false,
        }
    }
}
