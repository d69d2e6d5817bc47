//! Splitting of comments for providers with a maximum comment size.

use crate::error::{Error, Result};

/// Widest UTF-8 encoded character; every fragment must fit at least one.
const MAX_CHAR_WIDTH: usize = 4;

/// Splits oversized comments into individually postable fragments.
///
/// Every fragment except the last ends with `footer`, every fragment except
/// the first starts with `header`, and no fragment exceeds `limit` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSplitter {
    limit: usize,
    header: String,
    footer: String,
}

impl CommentSplitter {
    /// Create a splitter.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCommentLimit`] if header and footer leave no
    /// room for content within `limit`.
    pub fn new(limit: usize, header: impl Into<String>, footer: impl Into<String>) -> Result<Self> {
        let header = header.into();
        let footer = footer.into();
        let separators = header.len() + footer.len();

        if limit < separators + MAX_CHAR_WIDTH {
            return Err(Error::InvalidCommentLimit { limit, separators });
        }

        Ok(Self {
            limit,
            header,
            footer,
        })
    }

    /// Split `comment` into fragments.
    ///
    /// Comments that already fit are returned unchanged as a single fragment.
    #[must_use]
    pub fn split(&self, comment: &str) -> Vec<String> {
        if comment.len() <= self.limit {
            return vec![comment.to_string()];
        }

        let budget = self.limit - self.header.len() - self.footer.len();
        let chunks = chunk_at_char_boundaries(comment, budget);
        let last = chunks.len() - 1;

        chunks
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| {
                let mut fragment = String::with_capacity(self.limit);
                if i > 0 {
                    fragment.push_str(&self.header);
                }
                fragment.push_str(chunk);
                if i < last {
                    fragment.push_str(&self.footer);
                }
                fragment
            })
            .collect()
    }
}

/// Cut `text` into pieces of at most `budget` bytes without splitting a
/// character. `budget` must be at least [`MAX_CHAR_WIDTH`].
fn chunk_at_char_boundaries(text: &str, budget: usize) -> Vec<&str> {
    let mut chunks = Vec::with_capacity(text.len().div_ceil(budget));
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + budget).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        chunks.push(&text[start..end]);
        start = end;
    }

    chunks
}
