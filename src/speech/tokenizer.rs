//! Split phrases into request-sized chunks
//!
//! The translate endpoint rejects text longer than 100 characters, so long
//! phrases are cut at sentence punctuation first, then between words, and
//! only as a last resort inside a word.

/// Longest text accepted by a single request
pub const MAX_CHUNK_CHARS: usize = 100;

/// Characters after which a phrase may be split
const BREAK_CHARS: &[char] = &['.', '!', '?', ';', ':', ',', '…', '¡', '¿', '—'];

/// Split text into chunks of at most `max_chars` characters
///
/// Whitespace is collapsed. Chunks without any letter or digit are
/// dropped, so text made only of punctuation yields no chunks.
pub fn tokenize(text: &str, max_chars: usize) -> Vec<String> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let max_chars = max_chars.max(1);

    let chunks = if normalized.chars().count() <= max_chars {
        vec![normalized]
    } else {
        let mut packer = Packer::new(max_chars);
        for piece in split_after_punctuation(&normalized) {
            packer.push(piece.trim());
        }
        packer.finish()
    };

    chunks.into_iter().filter(|c| is_speakable(c)).collect()
}

/// True if the chunk contains something a voice can read
fn is_speakable(chunk: &str) -> bool {
    chunk.chars().any(char::is_alphanumeric)
}

/// Split after break characters that are followed by whitespace
///
/// "1,5 Liter" stays whole; runs such as "?!" stay attached to their word.
fn split_after_punctuation(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !BREAK_CHARS.contains(&c) {
            continue;
        }
        let at_boundary = match chars.peek() {
            Some((_, next)) => next.is_whitespace(),
            None => true,
        };
        if at_boundary {
            let end = i + c.len_utf8();
            pieces.push(&text[start..end]);
            start = end;
        }
    }

    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}

/// Greedy chunk builder
struct Packer {
    max: usize,
    current: String,
    current_len: usize,
    chunks: Vec<String>,
}

impl Packer {
    fn new(max: usize) -> Self {
        Self {
            max,
            current: String::new(),
            current_len: 0,
            chunks: Vec::new(),
        }
    }

    /// Add a punctuation-delimited piece
    fn push(&mut self, piece: &str) {
        if piece.is_empty() {
            return;
        }

        let len = piece.chars().count();
        if len <= self.max {
            self.append(piece, len);
            return;
        }

        for word in piece.split(' ').filter(|w| !w.is_empty()) {
            let word_len = word.chars().count();
            if word_len <= self.max {
                self.append(word, word_len);
            } else {
                self.flush();
                let chars: Vec<char> = word.chars().collect();
                let mut parts = chars.chunks(self.max).peekable();
                while let Some(part) = parts.next() {
                    if parts.peek().is_some() {
                        self.chunks.push(part.iter().collect());
                    } else {
                        // The tail stays open so following words can join it
                        self.append(&part.iter().collect::<String>(), part.len());
                    }
                }
            }
        }
    }

    fn append(&mut self, segment: &str, len: usize) {
        let separator = usize::from(!self.current.is_empty());
        if self.current_len + separator + len > self.max {
            self.flush();
        }
        if !self.current.is_empty() {
            self.current.push(' ');
            self.current_len += 1;
        }
        self.current.push_str(segment);
        self.current_len += len;
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
