use crate::config::ChunkingConfig;

/// Deterministic sliding-window chunker.
///
/// Window `i` starts at `i * (size - overlap)` characters. Iteration stops
/// when a window's end reaches the end of the text, so the final window
/// absorbs the tail and the chunk count for `len > size` is
/// `ceil((len - overlap) / (size - overlap))`.
pub struct Chunker {
    config: ChunkingConfig,
}

impl Chunker {
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ChunkingConfig {
        self.config
    }

    /// Splits `text` into overlapping windows. Empty text yields no chunks;
    /// text no longer than the window size yields a single chunk equal to the
    /// full text. Windows are measured in characters, never splitting a
    /// multi-byte sequence.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let size = self.config.size();
        let stride = self.config.stride();

        if chars.len() <= size {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = usize::min(start + size, chars.len());
            chunks.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += stride;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(size: usize, overlap: usize) -> Chunker {
        Chunker::new(ChunkingConfig::new(size, overlap).unwrap())
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunker(1000, 200).chunk("").is_empty());
    }

    #[test]
    fn short_text_yields_single_full_chunk() {
        let text = "a".repeat(1000);
        let chunks = chunker(1000, 200).chunk(&text);
        assert_eq!(chunks, vec![text]);
    }

    #[test]
    fn fifteen_hundred_chars_yield_two_chunks() {
        let text = "x".repeat(1500);
        let chunks = chunker(1000, 200).chunk(&text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 1000);
        // Second window starts at 800 and runs to the end.
        assert_eq!(chunks[1].len(), 700);
    }

    #[test]
    fn chunk_count_matches_ceil_formula() {
        // ceil((2500 - 200) / 800) == 3
        let text = "y".repeat(2500);
        let chunks = chunker(1000, 200).chunk(&text);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[1].len(), 1000);
        assert_eq!(chunks[2].len(), 900);
    }

    #[test]
    fn adjacent_chunks_share_the_overlap() {
        let text: String = (0..1500)
            .map(|i| char::from_digit((i % 10) as u32, 10).unwrap())
            .collect();
        let chunks = chunker(1000, 200).chunk(&text);

        let first: Vec<char> = chunks[0].chars().collect();
        let second: Vec<char> = chunks[1].chars().collect();
        assert_eq!(&first[800..1000], &second[0..200]);
    }

    #[test]
    fn rechunking_identical_input_is_idempotent() {
        let text = "the quick brown fox ".repeat(200);
        let c = chunker(1000, 200);
        assert_eq!(c.chunk(&text), c.chunk(&text));
    }

    #[test]
    fn multibyte_text_is_split_on_character_boundaries() {
        let text = "é".repeat(1500);
        let chunks = chunker(1000, 200).chunk(&text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 1000);
        assert_eq!(chunks[1].chars().count(), 700);
    }
}
