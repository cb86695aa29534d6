use std::sync::LazyLock;

use regex::Regex;

/// Default chunk size, in characters, for model input
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 8000;

static MARKUP_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strips markup tags, drops control characters and collapses whitespace runs
/// into single spaces.
pub fn clean_transcript(text: &str) -> String {
    let without_tags = MARKUP_TAG_RE.replace_all(text, "");
    let without_controls = without_tags
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>();

    WHITESPACE_RE
        .replace_all(&without_controls, " ")
        .trim()
        .to_string()
}

/// Splits `text` after sentence-ending punctuation, consuming the whitespace
/// that follows it.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if c.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            sentences.push(&text[start..idx]);

            let mut next_start = text.len();
            while let Some(&(i, next)) = chars.peek() {
                if !next.is_whitespace() {
                    next_start = i;
                    break;
                }
                chars.next();
            }
            start = next_start;
            prev = None;
            continue;
        }
        prev = Some(c);
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences.into_iter().filter(|s| !s.is_empty()).collect()
}

/// Greedy packer of text units joined by single spaces
struct ChunkPacker {
    max_chunk_size: usize,
    chunks: Vec<String>,
    current: String,
    current_len: usize,
}

impl ChunkPacker {
    fn new(max_chunk_size: usize) -> Self {
        Self {
            max_chunk_size,
            chunks: Vec::new(),
            current: String::new(),
            current_len: 0,
        }
    }

    fn push(&mut self, unit: &str) {
        let unit_len = unit.chars().count();

        if !self.current.is_empty() && self.current_len + 1 + unit_len > self.max_chunk_size {
            self.flush();
        }

        if !self.current.is_empty() {
            self.current.push(' ');
            self.current_len += 1;
        }
        self.current.push_str(unit);
        self.current_len += unit_len;
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.chunks.push(std::mem::take(&mut self.current));
            self.current_len = 0;
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.chunks
    }
}

/// Splits `text` into chunks of at most `max_chunk_size` characters.
///
/// Sentences are packed greedily in order. A sentence that does not fit in a
/// chunk on its own is packed word by word instead; a single word longer than
/// the limit becomes a chunk of its own. At least one chunk is always returned.
pub fn chunk_text(text: &str, max_chunk_size: usize) -> Vec<String> {
    if text.chars().count() <= max_chunk_size {
        return vec![text.to_string()];
    }

    let mut packer = ChunkPacker::new(max_chunk_size);

    for sentence in split_sentences(text) {
        if sentence.chars().count() > max_chunk_size {
            packer.flush();
            for word in sentence.split_whitespace() {
                packer.push(word);
            }
        } else {
            packer.push(sentence);
        }
    }

    let chunks = packer.finish();
    if chunks.is_empty() {
        // whitespace-only input has no words to pack
        return vec![text.to_string()];
    }
    chunks
}
