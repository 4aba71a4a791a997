//! Candidate search combinator
//!
//! Geocoding fallbacks, bounding-box sizes and nearby offsets are all searched
//! the same way: try each candidate in order, stop at the first hit, and let
//! only specific failures abort the whole plan.
//!
//! Each plan is a plain `for` loop. The loop awaits one lookup, classifies it
//! into an [`Attempt`] and hands it to a [`Search`], which says whether to
//! stop:
//!
//! ```
//! use say_to_go::search::{Attempt, Search};
//!
//! # fn lookup(n: u32) -> say_to_go::Result<Option<u32>> { Ok((n > 1).then_some(n * 10)) }
//! let mut search = Search::new();
//! for candidate in [1, 2, 3] {
//!     if search.record(candidate, Attempt::lenient(lookup(candidate)))? {
//!         break;
//!     }
//! }
//! assert_eq!(search.finish(), Some((2, 20)));
//! # Ok::<(), say_to_go::Error>(())
//! ```

use crate::error::{Error, Result};
use std::fmt::Debug;
use tracing::{debug, warn};

/// Outcome of one attempt in a candidate search
#[derive(Debug)]
pub enum Attempt<T> {
    /// The candidate produced a result; stop searching
    Found(T),
    /// Nothing here, or a failure the search absorbs; try the next candidate
    Skip,
    /// Stop searching and propagate the error
    Abort(Error),
}

impl<T> Attempt<T> {
    /// Classify a fallible lookup. Errors for which `fatal` returns true abort,
    /// every other error is logged and skipped.
    pub fn classify(result: Result<Option<T>>, fatal: impl Fn(&Error) -> bool) -> Self {
        match result {
            Ok(Some(value)) => Attempt::Found(value),
            Ok(None) => Attempt::Skip,
            Err(e) if fatal(&e) => Attempt::Abort(e),
            Err(e) => {
                warn!("Attempt failed, trying next candidate: {}", e);
                Attempt::Skip
            }
        }
    }

    /// Classify a lookup whose errors never abort the search
    pub fn lenient(result: Result<Option<T>>) -> Self {
        Self::classify(result, |_| false)
    }
}

/// First-success search state
///
/// Records attempts in candidate order and keeps the first hit.
#[derive(Debug)]
pub struct Search<C, T> {
    hit: Option<(C, T)>,
}

impl<C, T> Default for Search<C, T> {
    fn default() -> Self {
        Self { hit: None }
    }
}

impl<C: Debug, T> Search<C, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the attempt made for `candidate`
    ///
    /// Returns `Ok(true)` once the search is done and the loop should stop,
    /// `Ok(false)` to move on to the next candidate.
    ///
    /// # Errors
    /// The error carried by `Attempt::Abort`
    pub fn record(&mut self, candidate: C, attempt: Attempt<T>) -> Result<bool> {
        if self.hit.is_some() {
            return Ok(true);
        }
        match attempt {
            Attempt::Found(value) => {
                debug!("Candidate {:?} succeeded", candidate);
                self.hit = Some((candidate, value));
                Ok(true)
            }
            Attempt::Skip => {
                debug!("Candidate {:?} yielded nothing", candidate);
                Ok(false)
            }
            Attempt::Abort(e) => {
                debug!("Candidate {:?} aborted the search", candidate);
                Err(e)
            }
        }
    }

    /// The winning candidate and its result, or None when every candidate
    /// was skipped
    pub fn finish(self) -> Option<(C, T)> {
        self.hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(candidates: &[i32], attempt: impl Fn(i32) -> Attempt<i32>) -> (Result<Option<(i32, i32)>>, Vec<i32>) {
        let mut tried = Vec::new();
        let mut search = Search::new();
        for &candidate in candidates {
            tried.push(candidate);
            match search.record(candidate, attempt(candidate)) {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => return (Err(e), tried),
            }
        }
        (Ok(search.finish()), tried)
    }

    #[test]
    fn test_first_hit_wins() {
        let (result, tried) = run(&[1, 2, 3, 4], |n| {
            if n >= 2 {
                Attempt::Found(n * 10)
            } else {
                Attempt::Skip
            }
        });

        assert_eq!(result.unwrap(), Some((2, 20)));
        assert_eq!(tried, vec![1, 2]);
    }

    #[test]
    fn test_exhausted_is_none() {
        let (result, tried) = run(&[1, 2], |_| Attempt::Skip);
        assert!(result.unwrap().is_none());
        assert_eq!(tried, vec![1, 2]);
    }

    #[test]
    fn test_abort_stops_immediately() {
        let (result, tried) = run(&[1, 2, 3], |n| {
            if n == 2 {
                Attempt::Abort(Error::Auth("rejected".to_string()))
            } else {
                Attempt::Skip
            }
        });

        assert!(matches!(result, Err(Error::Auth(_))));
        assert_eq!(tried, vec![1, 2]);
    }

    #[test]
    fn test_record_after_hit_keeps_first() {
        let mut search = Search::new();
        assert!(search.record("a", Attempt::Found(1)).unwrap());
        assert!(search.record("b", Attempt::Found(2)).unwrap());
        assert_eq!(search.finish(), Some(("a", 1)));
    }

    #[test]
    fn test_classify() {
        let is_auth = |e: &Error| matches!(e, Error::Auth(_));

        assert!(matches!(Attempt::classify(Ok(Some(1)), is_auth), Attempt::Found(1)));
        assert!(matches!(Attempt::<i32>::classify(Ok(None), is_auth), Attempt::Skip));
        assert!(matches!(
            Attempt::<i32>::classify(Err(Error::Auth("x".into())), is_auth),
            Attempt::Abort(Error::Auth(_))
        ));
        assert!(matches!(
            Attempt::<i32>::classify(Err(Error::Server("x".into())), is_auth),
            Attempt::Skip
        ));
        assert!(matches!(
            Attempt::<i32>::lenient(Err(Error::Auth("x".into()))),
            Attempt::Skip
        ));
    }
}
