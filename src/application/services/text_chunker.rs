pub const DEFAULT_CHUNK_SIZE: usize = 1000;

#[derive(Debug, PartialEq, Eq)]
pub enum ChunkerError {
    InvalidChunkSize(usize),
}

impl std::fmt::Display for ChunkerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkerError::InvalidChunkSize(size) => {
                write!(f, "Chunk size must be positive, got {}", size)
            }
        }
    }
}

impl std::error::Error for ChunkerError {}

/// Fixed-size character slicer.
///
/// Cuts text every `chunk_size` characters with no overlap and no regard for
/// word or sentence boundaries. Joining the chunks gives back the input.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    chunk_size: usize,
}

impl TextChunker {
    pub fn new(chunk_size: usize) -> Result<Self, ChunkerError> {
        if chunk_size == 0 {
            return Err(ChunkerError::InvalidChunkSize(chunk_size));
        }
        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunks<'a>(&self, text: &'a str) -> Chunks<'a> {
        Chunks {
            remaining: text,
            chunk_size: self.chunk_size,
        }
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        self.chunks(text).map(str::to_string).collect()
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Lazy iterator over the chunks of a string.
pub struct Chunks<'a> {
    remaining: &'a str,
    chunk_size: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        // Byte offset of the first character past this chunk, or the end of input.
        let end = self
            .remaining
            .char_indices()
            .nth(self.chunk_size)
            .map(|(idx, _)| idx)
            .unwrap_or(self.remaining.len());

        let (chunk, rest) = self.remaining.split_at(end);
        self.remaining = rest;
        Some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert_eq!(
            TextChunker::new(0).unwrap_err(),
            ChunkerError::InvalidChunkSize(0)
        );
    }

    #[test]
    fn test_exact_sizes_and_reconstruction() {
        let chunker = TextChunker::new(4).unwrap();
        let text = "abcdefghij";
        let chunks = chunker.split(text);

        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
        assert_eq!(chunks.join(""), text);
    }

    #[test]
    fn test_splits_mid_word() {
        let chunker = TextChunker::new(5).unwrap();
        let chunks = chunker.split("Newton's laws");

        assert_eq!(chunks, vec!["Newto", "n's l", "aws"]);
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunker = TextChunker::default();
        let text = "x".repeat(600);
        let chunks = chunker.split(&text);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], text);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        let chunker = TextChunker::new(3).unwrap();
        assert_eq!(chunker.chunks("").count(), 0);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let chunker = TextChunker::new(2).unwrap();
        let text = "éàüöß";
        let chunks = chunker.split(text);

        assert_eq!(chunks, vec!["éà", "üö", "ß"]);
        assert_eq!(chunks.join(""), text);
    }

    #[test]
    fn test_reconstruction_across_sizes() {
        let text = "Momentum is conserved in a closed system; energy too. ∑F = ma.\n".repeat(37);
        let char_count = text.chars().count();

        for size in [1, 2, 3, 7, 64, 999, 1000, char_count, char_count + 1] {
            let chunker = TextChunker::new(size).unwrap();
            let chunks = chunker.split(&text);

            assert_eq!(chunks.concat(), text, "size {}", size);
            let (last, full) = chunks.split_last().unwrap();
            assert!(full.iter().all(|c| c.chars().count() == size), "size {}", size);
            assert!(last.chars().count() <= size);
            assert!(!last.is_empty());
        }
    }
}
