use std::{fs, num::NonZeroUsize, path::Path, thread};

use crate::PromotionError;

/// Files smaller than this are searched on the calling thread.
const PARALLEL_THRESHOLD: usize = 1 << 20;

/// Counts occurrences of `code` in the file at `path`. The code is matched
/// upper-cased; coupon files hold upper-case codes only.
pub fn count_in_file(path: &Path, code: &str) -> Result<usize, PromotionError> {
    let text = fs::read_to_string(path).map_err(|source| PromotionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let pattern = code.to_uppercase();

    if text.len() < PARALLEL_THRESHOLD {
        return Ok(count_in_text(&text, &pattern));
    }
    let workers = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(4);
    Ok(count_in_chunks(&text, &pattern, workers))
}

/// Non-overlapping matches, line by line. A match never spans a newline.
pub fn count_in_text(text: &str, pattern: &str) -> usize {
    if pattern.is_empty() {
        return 0;
    }
    text.lines().map(|line| line.matches(pattern).count()).sum()
}

pub(crate) fn count_in_chunks(text: &str, pattern: &str, workers: usize) -> usize {
    let chunks = split_on_lines(text, workers.max(1));
    thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .iter()
            .map(|chunk| scope.spawn(move || count_in_text(chunk, pattern)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or(0))
            .sum()
    })
}

/// Splits `text` into at most roughly `parts` pieces, each ending just after
/// a newline (or at the end of the text).
pub(crate) fn split_on_lines(text: &str, parts: usize) -> Vec<&str> {
    let bytes = text.as_bytes();
    let target = text.len().div_ceil(parts.max(1)).max(1);
    let mut chunks = Vec::with_capacity(parts);
    let mut start = 0;

    while start < bytes.len() {
        let mut end = (start + target).min(bytes.len());
        if end < bytes.len() {
            end = match bytes[end..].iter().position(|b| *b == b'\n') {
                Some(offset) => end + offset + 1,
                None => bytes.len(),
            };
        }
        chunks.push(&text[start..end]);
        start = end;
    }
    chunks
}
