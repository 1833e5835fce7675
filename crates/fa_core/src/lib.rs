pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use models::CompletionModel;
pub use types::{ArticleSource, CleanRecord, NormalizedArticle};

pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::models::CompletionModel;
    pub use crate::types::{ArticleSource, CleanRecord, NormalizedArticle};
}
