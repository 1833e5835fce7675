pub mod config;
pub mod crew;
pub mod models;
pub mod tools;

pub use config::{AgentSpec, CrewConfig, TaskSpec};
pub use crew::{Agent, Crew, Task};
pub use models::create_model;
pub use tools::Tool;

pub mod prelude {
    pub use crate::config::CrewConfig;
    pub use crate::crew::Crew;
    pub use crate::models::create_model;
    pub use fa_core::{CompletionModel, Error, Result};
}
