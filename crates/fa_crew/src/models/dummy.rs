use async_trait::async_trait;

use fa_core::{CompletionModel, Result};

/// Deterministic model for tests and offline runs. Echoes the start of the
/// prompt inside a fixed JSON report shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyModel;

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CompletionModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, _system: &str, prompt: &str) -> Result<String> {
        let words: Vec<&str> = prompt.split_whitespace().take(20).collect();
        Ok(serde_json::json!({ "summary": words.join(" ") }).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn output_is_valid_json_echoing_the_prompt() {
        let output = DummyModel::new()
            .complete("system", "Analyze the retrieved news about XYZ")
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["summary"].as_str().unwrap().contains("XYZ"));
    }
}
