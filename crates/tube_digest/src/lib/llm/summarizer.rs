use itertools::Itertools;

use crate::{error::Error, llm::model::TextModel, text::chunk_text};

#[derive(Debug, Clone)]
pub struct SummaryResponse {
    pub summary: String,
    pub chunk_count: usize,
}

/// Summarizes transcripts with a [`TextModel`], splitting oversized input into
/// parts and merging the partial summaries.
#[derive(Debug)]
pub struct Summarizer<M: TextModel> {
    model: M,
    max_chunk_size: usize,
}

impl<M: TextModel> Summarizer<M> {
    const SINGLE_PROMPT: &str = include_str!("./prompts/summary_single.txt");
    const PART_PROMPT: &str = include_str!("./prompts/summary_part.txt");
    const MERGE_PROMPT: &str = include_str!("./prompts/summary_merge.txt");

    pub fn new(model: M, max_chunk_size: usize) -> Self {
        Self {
            model,
            max_chunk_size,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    #[tracing::instrument(skip_all, fields(transcript_chars = transcript.chars().count()))]
    pub async fn summarize(&self, transcript: &str) -> Result<SummaryResponse, Error> {
        if transcript.trim().is_empty() {
            return Err(Error::EmptyTranscript);
        }

        let chunks = chunk_text(transcript, self.max_chunk_size);
        let chunk_count = chunks.len();

        let summary = match chunks.as_slice() {
            [single] => self.summarize_single(single).await?,
            parts => self.summarize_parts(parts).await?,
        };

        tracing::info!(chunk_count, "Summary complete");

        Ok(SummaryResponse {
            summary,
            chunk_count,
        })
    }

    async fn summarize_single(&self, transcript: &str) -> Result<String, Error> {
        tracing::info!("Summarizing transcript in a single pass");

        let prompt = Self::SINGLE_PROMPT.replace("{transcript}", transcript);

        self.model
            .generate(&prompt)
            .await
            .map_err(|e| Error::ModelGenerationFatal(e.to_string()))
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize transcript"))
    }

    async fn summarize_parts(&self, parts: &[String]) -> Result<String, Error> {
        let total = parts.len();
        tracing::info!(total, "Transcript split into parts");

        let mut summaries = Vec::with_capacity(total);

        for (idx, part) in parts.iter().enumerate() {
            let number = idx + 1;
            tracing::info!(part = number, total, "Summarizing part");

            let prompt = Self::PART_PROMPT
                .replace("{part}", &number.to_string())
                .replace("{total}", &total.to_string())
                .replace("{transcript}", part);

            match self.model.generate(&prompt).await {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    let err = Error::ModelGenerationError {
                        part: number,
                        reason: e.to_string(),
                    };
                    tracing::error!(error = %err, "Continuing with placeholder");
                    summaries.push(format!("[Error summarizing part {number}]"));
                }
            }
        }

        tracing::info!("Merging part summaries");

        let joined = summaries
            .iter()
            .enumerate()
            .map(|(idx, summary)| format!("Part {}: {}", idx + 1, summary))
            .join("\n\n");

        let prompt = Self::MERGE_PROMPT.replace("{summaries}", &joined);

        self.model
            .generate(&prompt)
            .await
            .map_err(|e| Error::ModelGenerationFatal(e.to_string()))
            .inspect_err(|e| tracing::error!(error = %e, "Failed to merge part summaries"))
    }
}
