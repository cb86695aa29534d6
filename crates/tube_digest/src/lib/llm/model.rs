use std::{fmt::Display, future::Future};

/// A hosted generative text model
pub trait TextModel {
    const DEFAULT_MODEL: &'static str;

    type Error: Display;

    /// Sends a single prompt and returns the model's text response
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>>;
}
