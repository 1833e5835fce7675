use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use fa_core::{CompletionModel, Error, Result};

use crate::config::{interpolate, CrewConfig};
use crate::tools::{create_tool, Tool};

pub struct Agent {
    pub name: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub tools: Vec<Arc<dyn Tool>>,
}

pub struct Task {
    pub name: String,
    pub description: String,
    pub expected_output: String,
    agent: usize,
}

/// A fixed sequence of role-configured steps. Each task's output feeds the
/// next task as context; the last output is the crew's result.
pub struct Crew {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    model: Arc<dyn CompletionModel>,
}

impl std::fmt::Debug for Crew {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crew")
            .field("agents", &self.agents.len())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl Crew {
    /// Wire agents, tasks and tools from configuration.
    pub fn from_config(config: &CrewConfig, model: Arc<dyn CompletionModel>) -> Result<Self> {
        let mut agents = Vec::with_capacity(config.agents.len());
        for (name, spec) in &config.agents {
            let tools = spec
                .tools
                .iter()
                .map(|tool| create_tool(tool))
                .collect::<Result<Vec<_>>>()?;
            agents.push(Agent {
                name: name.clone(),
                role: spec.role.clone(),
                goal: spec.goal.clone(),
                backstory: spec.backstory.clone(),
                tools,
            });
        }

        let mut tasks = Vec::with_capacity(config.tasks.len());
        for (name, spec) in &config.tasks {
            let agent = agents
                .iter()
                .position(|a| a.name == spec.agent)
                .ok_or_else(|| {
                    Error::Config(format!(
                        "task {name} references unknown agent {}",
                        spec.agent
                    ))
                })?;
            tasks.push(Task {
                name: name.clone(),
                description: spec.description.clone(),
                expected_output: spec.expected_output.clone(),
                agent,
            });
        }

        if tasks.is_empty() {
            return Err(Error::Config("a crew needs at least one task".to_string()));
        }

        Ok(Self {
            agents,
            tasks,
            model,
        })
    }

    /// The compiled-in default crew over the given model.
    pub fn with_default_config(model: Arc<dyn CompletionModel>) -> Result<Self> {
        Self::from_config(&CrewConfig::load_default()?, model)
    }

    /// Run the task sequence. Errors in any step propagate to the caller.
    pub async fn kickoff(&self, inputs: &HashMap<String, String>) -> Result<String> {
        let mut context = String::new();

        for task in &self.tasks {
            let agent = &self.agents[task.agent];
            info!("🤖 Running task {} with agent {}", task.name, agent.role);
            context = self.execute(task, agent, inputs, &context).await?;
        }

        Ok(context)
    }

    async fn execute(
        &self,
        task: &Task,
        agent: &Agent,
        inputs: &HashMap<String, String>,
        context: &str,
    ) -> Result<String> {
        // An agent with tools resolves the task to its tool output; the
        // model only runs for tool-less agents.
        if !agent.tools.is_empty() {
            let mut results = Vec::with_capacity(agent.tools.len());
            for tool in &agent.tools {
                info!("🔧 Invoking tool {}", tool.name());
                results.push(tool.run(inputs).await?);
            }
            return Ok(results.join("\n"));
        }

        let system = format!(
            "You are {}. {}\nYour goal: {}",
            agent.role,
            agent.backstory.trim(),
            interpolate(&agent.goal, inputs)
        );

        let mut prompt = interpolate(&task.description, inputs);
        if !context.is_empty() {
            prompt.push_str("\n\nContext from the previous step:\n");
            prompt.push_str(context);
        }
        prompt.push_str("\n\nExpected output: ");
        prompt.push_str(interpolate(&task.expected_output, inputs).trim());

        self.model.complete(&system, &prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingModel {
        calls: Mutex<Vec<(String, String)>>,
        reply: String,
    }

    impl RecordingModel {
        fn new(reply: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply: reply.to_string(),
            }
        }
    }

    #[async_trait]
    impl CompletionModel for RecordingModel {
        fn name(&self) -> &str {
            "recording"
        }

        async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((system.to_string(), prompt.to_string()));
            Ok(self.reply.clone())
        }
    }

    fn ticker_inputs(ticker: &str) -> HashMap<String, String> {
        HashMap::from([("ticker".to_string(), ticker.to_string())])
    }

    #[tokio::test]
    async fn kickoff_feeds_the_retrieval_output_into_the_analysis_prompt() {
        let model = Arc::new(RecordingModel::new(r#"{"sentiment": "bullish"}"#));
        let crew = Crew::with_default_config(model.clone()).unwrap();

        let report = crew.kickoff(&ticker_inputs("XYZ")).await.unwrap();
        assert_eq!(report, r#"{"sentiment": "bullish"}"#);

        // The retrieval step never hits the model, so exactly one
        // completion ran, and it saw the stub's output as context.
        let calls = model.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (system, prompt) = &calls[0];
        assert!(system.contains("Stock News Analyst"));
        assert!(prompt.contains("XYZ surges 5000%."));
        assert!(prompt.contains("Analyze the retrieved news about XYZ"));
    }

    #[tokio::test]
    async fn model_errors_propagate_to_the_caller() {
        #[derive(Debug)]
        struct FailingModel;

        #[async_trait]
        impl CompletionModel for FailingModel {
            fn name(&self) -> &str {
                "failing"
            }

            async fn complete(&self, _system: &str, _prompt: &str) -> Result<String> {
                Err(Error::Inference("model unavailable".to_string()))
            }
        }

        let crew = Crew::with_default_config(Arc::new(FailingModel)).unwrap();
        let err = crew.kickoff(&ticker_inputs("XYZ")).await.unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
    }

    #[tokio::test]
    async fn tool_errors_propagate_to_the_caller() {
        let crew =
            Crew::with_default_config(Arc::new(RecordingModel::new("unused"))).unwrap();
        // No ticker input, so the retrieval tool fails before any model call.
        let err = crew.kickoff(&HashMap::new()).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn unknown_agent_references_are_config_errors() {
        let agents = "a:\n  role: R\n  goal: G\n  backstory: B\n";
        let tasks = "t:\n  description: D\n  expected_output: E\n  agent: missing\n";
        let config = CrewConfig::from_yaml(agents, tasks).unwrap();
        let err = Crew::from_config(&config, Arc::new(RecordingModel::new(""))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn empty_task_lists_are_rejected() {
        let config = CrewConfig::from_yaml("a:\n  role: R\n  goal: G\n  backstory: B\n", "{}")
            .unwrap();
        let err = Crew::from_config(&config, Arc::new(RecordingModel::new(""))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
