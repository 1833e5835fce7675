use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use fa_core::{Error, Result};

const DEFAULT_AGENTS: &str = include_str!("../config/agents.yaml");
const DEFAULT_TASKS: &str = include_str!("../config/tasks.yaml");

#[derive(Debug, Clone, Deserialize)]
pub struct AgentSpec {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    #[serde(default)]
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskSpec {
    pub description: String,
    pub expected_output: String,
    pub agent: String,
}

/// Agent and task declarations, in declaration order. Task order is the
/// execution order.
#[derive(Debug, Clone)]
pub struct CrewConfig {
    pub agents: Vec<(String, AgentSpec)>,
    pub tasks: Vec<(String, TaskSpec)>,
}

impl CrewConfig {
    /// The compiled-in default crew.
    pub fn load_default() -> Result<Self> {
        Self::from_yaml(DEFAULT_AGENTS, DEFAULT_TASKS)
    }

    /// Load `agents.yaml` and `tasks.yaml` from a config directory.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let agents = std::fs::read_to_string(dir.join("agents.yaml"))?;
        let tasks = std::fs::read_to_string(dir.join("tasks.yaml"))?;
        Self::from_yaml(&agents, &tasks)
    }

    pub fn from_yaml(agents: &str, tasks: &str) -> Result<Self> {
        Ok(Self {
            agents: parse_ordered(agents)?,
            tasks: parse_ordered(tasks)?,
        })
    }

    pub fn agent(&self, name: &str) -> Option<&AgentSpec> {
        self.agents
            .iter()
            .find(|(agent_name, _)| agent_name == name)
            .map(|(_, spec)| spec)
    }
}

/// Parse a top-level YAML mapping keeping declaration order.
fn parse_ordered<T: serde::de::DeserializeOwned>(raw: &str) -> Result<Vec<(String, T)>> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
    let mapping = value
        .as_mapping()
        .ok_or_else(|| Error::Config("expected a YAML mapping at the top level".to_string()))?;

    let mut entries = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let name = key
            .as_str()
            .ok_or_else(|| Error::Config("mapping keys must be strings".to_string()))?
            .to_string();
        let spec = serde_yaml::from_value(value.clone())
            .map_err(|e| Error::Config(format!("{name}: {e}")))?;
        entries.push((name, spec));
    }
    Ok(entries)
}

/// Apply `{placeholder}` inputs to a template string.
pub fn interpolate(template: &str, inputs: &HashMap<String, String>) -> String {
    let mut out = template.to_string();
    for (key, value) in inputs {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}
