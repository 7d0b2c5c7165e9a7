use std::thread;
use std::time::Duration;

use super::SearchClient;
use crate::error::{Error, Result};
use crate::log;

/// Retries `SearchUnavailable` failures with exponential backoff.
///
/// Other errors (no results, malformed payloads) are returned immediately:
/// asking again would give the same answer.
pub struct RetryingSearchClient<C> {
    inner: C,
    max_retries: u32,
    backoff: Duration,
}

impl<C: SearchClient> RetryingSearchClient<C> {
    /// `backoff` is the delay before the first retry; it doubles after each one.
    pub fn new(inner: C, max_retries: u32, backoff: Duration) -> Self {
        Self {
            inner,
            max_retries,
            backoff,
        }
    }
}

impl<C: SearchClient> SearchClient for RetryingSearchClient<C> {
    fn query(&self, text: &str) -> Result<Vec<String>> {
        let mut delay = self.backoff;
        let mut attempt = 0;

        loop {
            match self.inner.query(text) {
                Err(Error::SearchUnavailable(reason)) if attempt < self.max_retries => {
                    attempt += 1;
                    log(&format!(
                        "Search unavailable ({}), retry {}/{} in {}ms",
                        reason,
                        attempt,
                        self.max_retries,
                        delay.as_millis()
                    ));
                    thread::sleep(delay);
                    delay = delay.saturating_mul(2);
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Replays a fixed sequence of results and counts calls.
    struct ScriptedClient {
        script: RefCell<Vec<Result<Vec<String>>>>,
        calls: Cell<u32>,
    }

    impl ScriptedClient {
        fn new(mut script: Vec<Result<Vec<String>>>) -> Self {
            script.reverse();
            Self {
                script: RefCell::new(script),
                calls: Cell::new(0),
            }
        }
    }

    impl SearchClient for ScriptedClient {
        fn query(&self, _text: &str) -> Result<Vec<String>> {
            self.calls.set(self.calls.get() + 1);
            self.script
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Err(Error::SearchUnavailable("script exhausted".into())))
        }
    }

    fn unavailable() -> Result<Vec<String>> {
        Err(Error::SearchUnavailable("503".into()))
    }

    #[test]
    fn test_retry_recovers_after_transient_failures() {
        let inner = ScriptedClient::new(vec![
            unavailable(),
            unavailable(),
            Ok(vec!["snippet".to_string()]),
        ]);
        let client = RetryingSearchClient::new(&inner, 2, Duration::ZERO);

        assert_eq!(client.query("q").unwrap(), vec!["snippet"]);
        assert_eq!(inner.calls.get(), 3);
    }

    #[test]
    fn test_retry_gives_up_after_limit() {
        let inner = ScriptedClient::new(vec![unavailable(), unavailable(), unavailable()]);
        let client = RetryingSearchClient::new(&inner, 1, Duration::ZERO);

        assert!(matches!(client.query("q"), Err(Error::SearchUnavailable(_))));
        assert_eq!(inner.calls.get(), 2);
    }

    #[test]
    fn test_zero_retries_calls_once() {
        let inner = ScriptedClient::new(vec![unavailable(), Ok(vec![])]);
        let client = RetryingSearchClient::new(&inner, 0, Duration::ZERO);

        assert!(client.query("q").is_err());
        assert_eq!(inner.calls.get(), 1);
    }

    #[test]
    fn test_other_errors_are_not_retried() {
        let inner = ScriptedClient::new(vec![Err(Error::NoResults), Ok(vec![])]);
        let client = RetryingSearchClient::new(&inner, 3, Duration::ZERO);

        assert!(matches!(client.query("q"), Err(Error::NoResults)));
        assert_eq!(inner.calls.get(), 1);

        let inner = ScriptedClient::new(vec![Err(Error::MalformedResponse("bad".into()))]);
        let client = RetryingSearchClient::new(&inner, 3, Duration::ZERO);

        assert!(matches!(client.query("q"), Err(Error::MalformedResponse(_))));
        assert_eq!(inner.calls.get(), 1);
    }
}
