use std::sync::Arc;

use fa_core::{CompletionModel, Result};

pub mod dummy;
pub mod openai;

pub use dummy::DummyModel;
pub use openai::OpenAiModel;

/// Build a model backend by name: `dummy` for the deterministic model,
/// anything else is treated as an OpenAI-compatible model id.
pub fn create_model(name: &str, api_key: Option<String>) -> Result<Arc<dyn CompletionModel>> {
    match name {
        "dummy" => Ok(Arc::new(DummyModel::new())),
        "openai" => Ok(Arc::new(OpenAiModel::new(api_key)?)),
        model => Ok(Arc::new(OpenAiModel::with_model(api_key, model)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_selects_backends_by_name() {
        assert_eq!(create_model("dummy", None).unwrap().name(), "Dummy");
        assert_eq!(
            create_model("openai", Some("k".to_string())).unwrap().name(),
            "OpenAI"
        );
        assert_eq!(create_model("gpt-4o", None).unwrap().name(), "OpenAI");
    }
}
