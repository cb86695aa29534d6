use std::sync::LazyLock;

use regex::Regex;

/// Upper bound for a single outbound message, kept below Telegram's 4096 limit.
pub const MAX_MESSAGE_LEN: usize = 3900;

static MARKDOWN_V2_SPECIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\\_*\[\]()~`>#+\-=|{}.!])").unwrap());

/// Escapes every MarkdownV2 special character with a backslash.
pub fn escape_markdown(text: &str) -> String {
    MARKDOWN_V2_SPECIAL_RE
        .replace_all(text, r"\${1}")
        .into_owned()
}

fn is_markdown_special(c: char) -> bool {
    matches!(
        c,
        '\\' | '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '='
            | '|' | '{' | '}' | '.' | '!'
    )
}

/// Splits `text` into slices of at most `limit` characters.
///
/// Whole lines are packed greedily and keep their line endings. A line that is
/// longer than `limit` on its own is cut into `limit`-sized pieces.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    pack_lines(text, limit, |_| 1)
}

/// Like [`split_message`], but every slice stays within `limit` characters
/// once passed through [`escape_markdown`].
pub fn split_escaped_message(text: &str, limit: usize) -> Vec<String> {
    pack_lines(text, limit, |c| if is_markdown_special(c) { 2 } else { 1 })
}

fn pack_lines(text: &str, limit: usize, width: impl Fn(char) -> usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for line in text.split_inclusive('\n') {
        let line_width = line.chars().map(&width).sum::<usize>();

        if current_width + line_width > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if line_width > limit {
            // the tail may still share a message with the following lines
            for c in line.chars() {
                let w = width(c);
                if current_width + w > limit && !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += w;
            }
            continue;
        }

        current.push_str(line);
        current_width += line_width;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
