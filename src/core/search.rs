//! Debounced, URL-synchronized search input
//!
//! [`SearchBox`] owns the text a user is typing. Every keystroke updates the
//! local value immediately and (re)starts a [`DebounceTimer`]; only when the
//! quiet interval elapses without another keystroke is the value committed to
//! the page URL through a [`Navigator`], replacing the current history entry.
//!
//! ```text
//! keystroke ──▶ input = value ──▶ timer.cancel(); timer.schedule(commit)
//!                                                      │ (quiet interval)
//!                                                      ▼
//!                          navigator.replace(apply_search_term(current_url, value))
//! ```
//!
//! The timer runs on the tokio runtime, so `SearchBox::on_input` must be
//! called from within one.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use url::Url;

/// URL parameter holding the search term
pub const QUERY_PARAM: &str = "query";
/// URL parameter holding the 1-based page number
pub const PAGE_PARAM: &str = "page";
/// Default quiet interval before a typed value is committed
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Where the search box reads and writes the page URL
pub trait Navigator: Send + Sync + 'static {
    /// URL of the current history entry
    fn current_url(&self) -> Url;

    /// Replace the current history entry with `url` (no new entry is pushed)
    fn replace(&self, url: Url);
}

/// In-process history stack
///
/// `push` adds an entry, `replace` overwrites the top one.
#[derive(Debug)]
pub struct BrowserHistory {
    entries: Mutex<Vec<Url>>,
}

impl BrowserHistory {
    pub fn new(initial: Url) -> Self {
        Self {
            entries: Mutex::new(vec![initial]),
        }
    }

    pub fn push(&self, url: Url) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(url);
        }
    }

    /// Number of history entries
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Navigator for BrowserHistory {
    fn current_url(&self) -> Url {
        // history is created with one entry and never shrinks
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries[entries.len() - 1].clone()
    }

    fn replace(&self, url: Url) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(top) = entries.last_mut() {
            *top = url;
        }
    }
}

/// Trailing-edge debounce timer owning at most one pending task
///
/// Scheduling cancels whatever was pending. Dropping the timer cancels too,
/// so nothing fires after its owner is gone.
#[derive(Debug)]
pub struct DebounceTimer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` once `delay` has passed, unless cancelled or rescheduled first
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let deadline = Instant::now() + self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            task.await;
        }));
    }

    /// Abort the pending task, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a scheduled task has neither fired nor been cancelled
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Rewrite `url`'s query string for a committed search term
///
/// A non-empty term sets `query` and resets `page` to `1`; an empty term
/// removes `query` and leaves every other parameter alone. Other parameters
/// keep their order, like `URLSearchParams.set` / `delete`.
pub fn apply_search_term(url: &Url, term: &str) -> Url {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if term.is_empty() {
        pairs.retain(|(k, _)| k != QUERY_PARAM);
    } else {
        set_param(&mut pairs, QUERY_PARAM, term);
        set_param(&mut pairs, PAGE_PARAM, "1");
    }

    let mut next = url.clone();
    if pairs.is_empty() {
        next.set_query(None);
    } else {
        next.query_pairs_mut().clear().extend_pairs(pairs);
    }
    next
}

/// Replace the first `key` in place and drop the rest, or append it
fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    match pairs.iter().position(|(k, _)| k == key) {
        Some(first) => {
            pairs[first].1 = value.to_string();
            let mut index = 0;
            pairs.retain(|(k, _)| {
                let keep = k != key || index == first;
                index += 1;
                keep
            });
        }
        None => pairs.push((key.to_string(), value.to_string())),
    }
}

/// Search term currently in `url`, or empty
pub fn search_term(url: &Url) -> String {
    url.query_pairs()
        .find(|(k, _)| k == QUERY_PARAM)
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default()
}

/// Text input mirrored into the URL's `query` parameter
pub struct SearchBox<N: Navigator> {
    input: String,
    navigator: Arc<N>,
    timer: DebounceTimer,
}

impl<N: Navigator> SearchBox<N> {
    /// Mount a search box; the visible value starts from the URL's `query`
    pub fn new(navigator: Arc<N>, debounce: Duration) -> Self {
        let input = search_term(&navigator.current_url());
        Self {
            input,
            navigator,
            timer: DebounceTimer::new(debounce),
        }
    }

    /// Currently displayed value
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether a commit is waiting for the quiet interval to elapse
    pub fn has_pending_commit(&self) -> bool {
        self.timer.is_pending()
    }

    /// Handle one keystroke: echo it now, commit it once typing pauses
    pub fn on_input(&mut self, value: impl Into<String>) {
        self.input = value.into();

        let navigator = Arc::clone(&self.navigator);
        let term = self.input.clone();
        self.timer.schedule(async move {
            let current = navigator.current_url();
            let next = apply_search_term(&current, &term);
            tracing::debug!(term = %term, url = %next, "committing search term");
            navigator.replace(next);
        });
    }

    /// Tear down the box, discarding any uncommitted value
    pub fn unmount(mut self) {
        self.timer.cancel();
    }
}
