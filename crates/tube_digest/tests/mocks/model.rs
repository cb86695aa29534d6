use std::sync::{Arc, Mutex};
use tube_digest::TextModel;

/// Answers every prompt with its character count
#[derive(Clone, Default)]
pub struct MockModel {
    pub prompts: Arc<Mutex<Vec<String>>>,
    pub fail_on: Vec<usize>,
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the calls at the given zero-based positions
    pub fn failing_on(calls: &[usize]) -> Self {
        Self {
            fail_on: calls.to_vec(),
            ..Self::default()
        }
    }

    pub fn echo(prompt: &str) -> String {
        format!("prompt length: {}", prompt.chars().count())
    }
}

impl TextModel for MockModel {
    const DEFAULT_MODEL: &'static str = "mock-model";
    type Error = anyhow::Error;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len() - 1
        };

        if self.fail_on.contains(&call) {
            return Err(anyhow::anyhow!("mock model failed on call {call}"));
        }
        Ok(Self::echo(prompt))
    }
}
