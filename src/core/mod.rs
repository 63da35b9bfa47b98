pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{Earthquake, RenderResult};
pub use crate::domain::ports::{ConfigProvider, OutputFormat, Pipeline, Storage};
pub use crate::utils::error::Result;
