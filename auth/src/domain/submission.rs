//! Single-flight guard for screen submissions.

use std::sync::atomic::{AtomicBool, Ordering};

/// Marks a provider call as outstanding until dropped.
///
/// Dropping the guard clears the flag, so a submit future that is cancelled
/// mid-call still leaves the screen ready for another attempt.
#[derive(Debug)]
pub(crate) struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    /// Claim `flag`, or return `None` when another call already holds it.
    pub(crate) fn try_begin(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_fails_until_first_is_dropped() {
        let flag = AtomicBool::new(false);
        let first = InFlight::try_begin(&flag).expect("first claim");
        assert!(InFlight::try_begin(&flag).is_none());
        drop(first);
        assert!(!flag.load(Ordering::Acquire));
        assert!(InFlight::try_begin(&flag).is_some());
    }
}
