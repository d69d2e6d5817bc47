//! Cursor-based pagination of CodeCommit list calls.
//!
//! CodeCommit returns an opaque `nextToken` with every page that has a
//! successor. [`Paginator`] feeds each token back into the next request until
//! a page arrives without one.

use std::future::Future;

use quay_core::Result;

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,

    /// Cursor for the following page, `None` on the last page.
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// The final page of a listing.
    #[must_use]
    pub const fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }
}

#[derive(Debug)]
enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Drives a paginated call to exhaustion.
///
/// `fetch` receives `None` for the first page and the previous page's token
/// afterwards. The sequence is finite once the provider stops returning
/// tokens and cannot be restarted. There is no page cap.
pub struct Paginator<F> {
    fetch: F,
    cursor: Cursor,
}

impl<F, Fut, T> Paginator<F>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    /// Create a paginator around a page request.
    pub const fn new(fetch: F) -> Self {
        Self {
            fetch,
            cursor: Cursor::Start,
        }
    }

    /// Fetch the next page, or `None` once the listing is exhausted.
    ///
    /// An error also ends the listing.
    pub async fn next_page(&mut self) -> Option<Result<Vec<T>>> {
        let token = match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::Start => None,
            Cursor::Next(token) => Some(token),
            Cursor::Done => return None,
        };

        match (self.fetch)(token).await {
            Ok(page) => {
                if let Some(next) = page.next_token {
                    self.cursor = Cursor::Next(next);
                }
                Some(Ok(page.items))
            }
            Err(e) => Some(Err(e)),
        }
    }

    /// Fetch every remaining page and concatenate the items in order.
    ///
    /// # Errors
    /// Returns the first failing page request's error.
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await {
            items.extend(page?);
        }
        Ok(items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use quay_core::Error;

    use super::*;

    /// Serves `pages` pages with a cursor followed by one final page.
    struct Pages {
        remaining: Mutex<usize>,
        tokens_seen: Mutex<Vec<Option<String>>>,
    }

    impl Pages {
        fn new(pages: usize) -> Self {
            Self {
                remaining: Mutex::new(pages),
                tokens_seen: Mutex::new(Vec::new()),
            }
        }

        async fn fetch(&self, token: Option<String>) -> Result<Page<usize>> {
            let mut seen = self.tokens_seen.lock().unwrap();
            seen.push(token);
            let call = seen.len();

            let mut remaining = self.remaining.lock().unwrap();
            if *remaining == 0 {
                return Ok(Page::last(vec![call]));
            }
            *remaining -= 1;
            Ok(Page {
                items: vec![call],
                next_token: Some(format!("next-token-{remaining}")),
            })
        }
    }

    #[tokio::test]
    async fn test_single_page() {
        let pages = Pages::new(0);
        let items = Paginator::new(|token| pages.fetch(token))
            .collect_all()
            .await
            .unwrap();

        assert_eq!(items, vec![1]);
        assert_eq!(*pages.tokens_seen.lock().unwrap(), vec![None]);
    }

    #[tokio::test]
    async fn test_n_pages_take_n_plus_one_requests() {
        let pages = Pages::new(3);
        let items = Paginator::new(|token| pages.fetch(token))
            .collect_all()
            .await
            .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(
            *pages.tokens_seen.lock().unwrap(),
            vec![
                None,
                Some("next-token-2".to_string()),
                Some("next-token-1".to_string()),
                Some("next-token-0".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_exhausted_paginator_stays_exhausted() {
        let pages = Pages::new(1);
        let mut paginator = Paginator::new(|token| pages.fetch(token));

        assert_eq!(paginator.next_page().await.unwrap().unwrap(), vec![1]);
        assert_eq!(paginator.next_page().await.unwrap().unwrap(), vec![2]);
        assert!(paginator.next_page().await.is_none());
        assert!(paginator.next_page().await.is_none());
        assert_eq!(pages.tokens_seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_error_stops_listing() {
        let mut calls = 0;
        let result: Result<Vec<u8>> = Paginator::new(|_token| {
            calls += 1;
            async { Err(Error::remote("GetDifferences", "throttled")) }
        })
        .collect_all()
        .await;

        assert!(matches!(
            result,
            Err(Error::Remote { operation: "GetDifferences", .. })
        ));
        assert_eq!(calls, 1);
    }
}
