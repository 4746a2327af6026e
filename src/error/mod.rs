mod app;
mod config;
mod fetch;
mod render;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use fetch::FetchError;
pub use render::RenderError;
pub use validation::ValidationError;
