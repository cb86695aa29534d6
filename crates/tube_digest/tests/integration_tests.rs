mod mocks;

use mocks::{
    detector::MockDetector,
    model::MockModel,
    transcript_service::{track, track_url, translated_url, MockTranscriptService},
};
use tube_digest::{
    gemini::GeminiClient, openai::OpenAIClient, DigestProcessor, DigestProcessorBuilder, Error,
};

const VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

const THREE_SENTENCES: [&str; 3] = [
    "Sentence number one here.",
    "Sentence number two here.",
    "Sentence number three here.",
];

fn build_processor(
    service: MockTranscriptService,
    detector: MockDetector,
    model: MockModel,
    max_chunk_size: usize,
) -> DigestProcessor<MockTranscriptService, MockDetector, MockModel> {
    DigestProcessorBuilder::new()
        .transcript_service(service)
        .language_detector(detector)
        .model(model)
        .max_chunk_size(max_chunk_size)
        .build()
}

// ─── Happy path ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_end_to_end_single_chunk() {
    let service = MockTranscriptService::new(vec![track("en", false, true)])
        .with_text(track_url("en"), &["Hello world.", "This is a test."]);
    let model = MockModel::new();

    let list_calls = service.list_calls.clone();
    let prompts = model.prompts.clone();

    let processor = build_processor(service, MockDetector::always(Some("en")), model, 8000);

    let digest = processor
        .run(VIDEO_URL, "en")
        .await
        .expect("pipeline should succeed");

    assert_eq!(digest.video.as_str(), "dQw4w9WgXcQ");
    assert_eq!(digest.transcript, "Hello world. This is a test.");
    assert_eq!(digest.chunk_count, 1);
    assert_eq!(*list_calls.lock().unwrap(), vec!["dQw4w9WgXcQ".to_string()]);

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1, "Single chunk should use exactly one model call");
    assert!(prompts[0].contains("Hello world. This is a test."));
    assert_eq!(
        digest.summary,
        MockModel::echo(&prompts[0]),
        "Model response should be returned unmodified"
    );
}

#[tokio::test]
async fn test_all_url_shapes_resolve_to_same_video() {
    let urls = [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
        "https://www.youtube.com/embed/dQw4w9WgXcQ",
        "https://youtu.be/dQw4w9WgXcQ",
    ];

    for url in urls {
        let service = MockTranscriptService::new(vec![track("en", false, true)])
            .with_text(track_url("en"), &["Hello world."]);
        let list_calls = service.list_calls.clone();

        let processor =
            build_processor(service, MockDetector::always(Some("en")), MockModel::new(), 8000);

        let digest = processor
            .run(url, "en")
            .await
            .unwrap();

        assert_eq!(digest.video.as_str(), "dQw4w9WgXcQ", "url: {url}");
        assert_eq!(*list_calls.lock().unwrap(), vec!["dQw4w9WgXcQ".to_string()]);
    }
}

// ─── Track resolution ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_translates_when_requested_language_is_missing() {
    let service = MockTranscriptService::new(vec![track("de", false, true)])
        .translatable_to(&["en", "fr"])
        .with_text(translated_url("de", "en"), &["Hello from  the", "translation."]);

    let fetch_calls = service.fetch_calls.clone();

    let processor =
        build_processor(service, MockDetector::always(Some("en")), MockModel::new(), 8000);

    let digest = processor
        .run(VIDEO_URL, "en")
        .await
        .unwrap();

    assert_eq!(digest.transcript, "Hello from the translation.");
    assert_eq!(
        *fetch_calls.lock().unwrap(),
        vec![translated_url("de", "en")],
        "Only the translated track should be fetched"
    );
}

#[tokio::test]
async fn test_prefers_manual_track_over_generated() {
    let mut generated = track("en", true, true);
    generated.base_url = format!("{}&kind=asr", track_url("en"));

    let service = MockTranscriptService::new(vec![generated, track("en", false, true)])
        .with_text(track_url("en"), &["Manual captions."]);
    let fetch_calls = service.fetch_calls.clone();

    let processor =
        build_processor(service, MockDetector::always(Some("en")), MockModel::new(), 8000);

    let digest = processor
        .run(VIDEO_URL, "en")
        .await
        .unwrap();

    assert_eq!(digest.transcript, "Manual captions.");
    assert_eq!(*fetch_calls.lock().unwrap(), vec![track_url("en")]);
}

#[tokio::test]
async fn test_non_english_request_skips_detection() {
    let service = MockTranscriptService::new(vec![track("es", false, true)])
        .with_text(track_url("es"), &["Hola a todos."]);
    let detector = MockDetector::always(None);
    let detector_calls = detector.calls.clone();

    let processor = build_processor(service, detector, MockModel::new(), 8000);

    let digest = processor
        .run(VIDEO_URL, "es")
        .await
        .unwrap();

    assert_eq!(digest.transcript, "Hola a todos.");
    assert!(detector_calls.lock().unwrap().is_empty());
}

// ─── English sanity check ────────────────────────────────────────────────────

#[tokio::test]
async fn test_corrective_translation_when_text_is_not_english() {
    let service = MockTranscriptService::new(vec![track("en", false, true)])
        .translatable_to(&["en"])
        .with_text(track_url("en"), &["Hola a todos."])
        .with_text(translated_url("en", "en"), &["Hello everyone."]);
    let fetch_calls = service.fetch_calls.clone();

    let detector = MockDetector::scripted(&[Some("es")], Some("en"));

    let processor = build_processor(service, detector, MockModel::new(), 8000);

    let digest = processor
        .run(VIDEO_URL, "en")
        .await
        .unwrap();

    assert_eq!(digest.transcript, "Hello everyone.");
    assert_eq!(fetch_calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_corrective_pass_failure_keeps_fetched_text() {
    // detector cannot decide and no translation target exists
    let service = MockTranscriptService::new(vec![track("en", false, true)])
        .with_text(track_url("en"), &["Mmm hmm."]);
    let detector = MockDetector::always(None);

    let processor = build_processor(service, detector, MockModel::new(), 8000);

    let digest = processor
        .run(VIDEO_URL, "en")
        .await
        .expect("corrective pass errors must not fail the run");

    assert_eq!(digest.transcript, "Mmm hmm.");
}

#[tokio::test]
async fn test_detection_sample_is_bounded() {
    let long_line = "word ".repeat(600);
    let service = MockTranscriptService::new(vec![track("en", false, true)])
        .with_text(track_url("en"), &[long_line.as_str()]);
    let detector = MockDetector::always(Some("en"));
    let detector_calls = detector.calls.clone();

    let processor = build_processor(service, detector, MockModel::new(), 8000);
    processor
        .run(VIDEO_URL, "en")
        .await
        .unwrap();

    let calls = detector_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].chars().count(), 1000);
}

// ─── Chunked summaries ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_failed_part_is_replaced_by_placeholder() {
    let service = MockTranscriptService::new(vec![track("en", false, true)])
        .with_text(track_url("en"), &THREE_SENTENCES);
    let model = MockModel::failing_on(&[1]);
    let prompts = model.prompts.clone();

    let processor = build_processor(service, MockDetector::always(Some("en")), model, 30);

    let digest = processor
        .run(VIDEO_URL, "en")
        .await
        .expect("a failed part must not abort the run");

    assert_eq!(digest.chunk_count, 3);

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 4, "Three parts plus one merge call");
    assert!(prompts[0].contains("part 1 of 3"));
    assert!(prompts[2].contains("part 3 of 3"));

    let merge_prompt = &prompts[3];
    assert!(merge_prompt.contains(&format!("Part 1: {}", MockModel::echo(&prompts[0]))));
    assert!(merge_prompt.contains("Part 2: [Error summarizing part 2]"));
    assert!(merge_prompt.contains(&format!("Part 3: {}", MockModel::echo(&prompts[2]))));
    assert_eq!(digest.summary, MockModel::echo(merge_prompt));
}

#[tokio::test]
async fn test_merge_failure_is_fatal() {
    let service = MockTranscriptService::new(vec![track("en", false, true)])
        .with_text(track_url("en"), &THREE_SENTENCES);

    let processor = build_processor(
        service,
        MockDetector::always(Some("en")),
        MockModel::failing_on(&[3]),
        30,
    );

    let result = processor.run(VIDEO_URL, "en").await;

    assert!(
        matches!(result, Err(Error::ModelGenerationFatal(_))),
        "got {result:?}"
    );
}

#[tokio::test]
async fn test_single_chunk_failure_is_fatal() {
    let service = MockTranscriptService::new(vec![track("en", false, true)])
        .with_text(track_url("en"), &["Hello world."]);

    let processor = build_processor(
        service,
        MockDetector::always(Some("en")),
        MockModel::failing_on(&[0]),
        8000,
    );

    let result = processor.run(VIDEO_URL, "en").await;

    assert!(matches!(result, Err(Error::ModelGenerationFatal(_))));
}

// ─── Failure modes ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_url_never_reaches_service() {
    let service = MockTranscriptService::new(vec![track("en", false, true)]);
    let list_calls = service.list_calls.clone();
    let model = MockModel::new();
    let prompts = model.prompts.clone();

    let processor = build_processor(service, MockDetector::always(Some("en")), model, 8000);

    let result = processor
        .run("not a youtube url", "en")
        .await;

    assert!(matches!(result, Err(Error::InvalidUrl(_))));
    assert!(list_calls.lock().unwrap().is_empty());
    assert!(prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_transcripts_disabled_propagates() {
    let service = MockTranscriptService::failing(|video_id| Error::TranscriptsDisabled {
        video_id: video_id.to_string(),
    });

    let processor =
        build_processor(service, MockDetector::always(Some("en")), MockModel::new(), 8000);

    let result = processor.run(VIDEO_URL, "en").await;

    assert!(
        matches!(result, Err(Error::TranscriptsDisabled { ref video_id }) if video_id == "dQw4w9WgXcQ")
    );
}

#[tokio::test]
async fn test_no_tracks_is_no_transcript_found() {
    let service = MockTranscriptService::new(Vec::new());
    let model = MockModel::new();
    let prompts = model.prompts.clone();

    let processor = build_processor(service, MockDetector::always(Some("en")), model, 8000);

    let result = processor.run(VIDEO_URL, "en").await;

    assert!(matches!(result, Err(Error::NoTranscriptFound { .. })));
    assert!(prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_untranslatable_track_is_translation_failure() {
    let service = MockTranscriptService::new(vec![track("de", false, false)])
        .translatable_to(&["en"]);

    let processor =
        build_processor(service, MockDetector::always(Some("en")), MockModel::new(), 8000);

    let result = processor.run(VIDEO_URL, "en").await;

    assert!(
        matches!(result, Err(Error::TranslationFailed { ref language, .. }) if language == "en")
    );
}

#[tokio::test]
async fn test_track_fetch_error_propagates() {
    // track is listed but its text cannot be fetched
    let service = MockTranscriptService::new(vec![track("en", false, true)]);

    let processor =
        build_processor(service, MockDetector::always(Some("en")), MockModel::new(), 8000);

    let result = processor.run(VIDEO_URL, "en").await;

    assert!(matches!(result, Err(Error::FetchError(_))));
}

#[tokio::test]
async fn test_blank_transcript_is_rejected() {
    let service = MockTranscriptService::new(vec![track("en", false, true)])
        .with_text(track_url("en"), &["<i></i>", "   "]);
    let model = MockModel::new();
    let prompts = model.prompts.clone();

    let processor = build_processor(service, MockDetector::always(Some("en")), model, 8000);

    let result = processor.run(VIDEO_URL, "en").await;

    assert!(matches!(result, Err(Error::EmptyTranscript)));
    assert!(prompts.lock().unwrap().is_empty());
}

#[test]
fn test_empty_api_key_is_model_config_error() {
    assert!(matches!(
        GeminiClient::new(""),
        Err(Error::ModelConfigError(_))
    ));
    assert!(matches!(
        OpenAIClient::new("   "),
        Err(Error::ModelConfigError(_))
    ));
}
