use crate::{
    llm::model::TextModel,
    text::DEFAULT_MAX_CHUNK_SIZE,
    yt::{LanguageDetector, TranscriptService},
    DigestProcessor,
};

pub struct DigestProcessorBuilder<S = (), D = (), M = ()> {
    transcript_service: S,
    language_detector: D,
    model: M,
    max_chunk_size: usize,
}

impl Default for DigestProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestProcessorBuilder {
    pub fn new() -> Self {
        Self {
            transcript_service: (),
            language_detector: (),
            model: (),
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
        }
    }
}

impl<S, D, M> DigestProcessorBuilder<S, D, M> {
    pub fn transcript_service<S2: TranscriptService>(
        self,
        transcript_service: S2,
    ) -> DigestProcessorBuilder<S2, D, M> {
        DigestProcessorBuilder {
            transcript_service,
            language_detector: self.language_detector,
            model: self.model,
            max_chunk_size: self.max_chunk_size,
        }
    }

    pub fn language_detector<D2: LanguageDetector>(
        self,
        language_detector: D2,
    ) -> DigestProcessorBuilder<S, D2, M> {
        DigestProcessorBuilder {
            transcript_service: self.transcript_service,
            language_detector,
            model: self.model,
            max_chunk_size: self.max_chunk_size,
        }
    }

    pub fn model<M2: TextModel>(self, model: M2) -> DigestProcessorBuilder<S, D, M2> {
        DigestProcessorBuilder {
            transcript_service: self.transcript_service,
            language_detector: self.language_detector,
            model,
            max_chunk_size: self.max_chunk_size,
        }
    }

    pub fn max_chunk_size(mut self, max_chunk_size: usize) -> Self {
        self.max_chunk_size = max_chunk_size;
        self
    }
}

impl<S, D, M> DigestProcessorBuilder<S, D, M>
where
    S: TranscriptService,
    D: LanguageDetector,
    M: TextModel,
{
    pub fn build(self) -> DigestProcessor<S, D, M> {
        DigestProcessor::new(
            self.transcript_service,
            self.language_detector,
            self.model,
            self.max_chunk_size,
        )
    }
}
