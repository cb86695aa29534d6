pub mod gemini;
pub mod model;
pub mod openai;
pub mod summarizer;
