//! Bounded action retry: perform an action, re-check a post-condition, and
//! repeat a fixed number of times with a fixed delay.
//!
//! Unlike [`crate::poll`], this primitive is attempt-based, not time-based,
//! and exhausting the attempts is not an error: the loop reports `false` and
//! the caller decides whether that fails the test.

use std::time::Duration;

use crate::driver::ElementHandle;
use crate::result::{SondarError, SondarResult};

/// Default number of attempts before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Default delay between attempts (750 milliseconds)
pub const DEFAULT_RETRY_DELAY_MS: u64 = 750;

/// Policy for a bounded retry loop
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of action invocations
    pub max_attempts: usize,
    /// Fixed delay between attempts, in milliseconds
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of attempts
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the delay between attempts in milliseconds
    #[must_use]
    pub const fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Get the delay as a Duration
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Perform `action` then evaluate `post_condition`, retrying up to
/// `policy.max_attempts` times with `policy.delay_ms` between attempts.
///
/// Returns `Ok(true)` as soon as the post-condition holds, `Ok(false)` when
/// the attempts are exhausted. The delay is skipped after the final attempt.
/// Errors from either closure propagate and abort the loop.
pub fn retry_until<A, C>(
    mut action: A,
    mut post_condition: C,
    policy: &RetryPolicy,
) -> SondarResult<bool>
where
    A: FnMut() -> SondarResult<()>,
    C: FnMut() -> SondarResult<bool>,
{
    for attempt in 1..=policy.max_attempts {
        action()?;
        if post_condition()? {
            return Ok(true);
        }
        if attempt < policy.max_attempts {
            std::thread::sleep(policy.delay());
        }
    }
    Ok(false)
}

/// Click until a named attribute no longer contains `needle`.
///
/// A blank or absent attribute counts as cleared. Used for controls that
/// flip a state class or flag attribute when the click finally lands.
pub fn click_until_attribute_clears<E: ElementHandle>(
    element: &E,
    attribute: &str,
    needle: &str,
    policy: &RetryPolicy,
) -> SondarResult<bool> {
    retry_until(
        || element.click(),
        || {
            let value = element.attribute(attribute)?;
            Ok(match value {
                Some(v) => v.trim().is_empty() || !v.contains(needle),
                None => true,
            })
        },
        policy,
    )
}

/// Click until the target disappears.
///
/// A click rejected as not-interactable means the target is gone, which is
/// the success condition here, so that failure breaks the loop instead of
/// propagating.
pub fn click_until_hidden<E: ElementHandle>(
    element: &E,
    policy: &RetryPolicy,
) -> SondarResult<bool> {
    let vanished = std::cell::Cell::new(false);
    retry_until(
        || match element.click() {
            Ok(()) => Ok(()),
            Err(SondarError::NotInteractable { .. }) => {
                vanished.set(true);
                Ok(())
            }
            Err(e) => Err(e),
        },
        || Ok(vanished.get()),
        policy,
    )
}

/// Click until the control reports itself selected (radio buttons,
/// checkboxes).
pub fn click_until_selected<E: ElementHandle>(
    element: &E,
    policy: &RetryPolicy,
) -> SondarResult<bool> {
    retry_until(|| element.click(), || element.is_selected(), policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockElement;
    use proptest::prelude::*;
    use std::cell::Cell;

    fn immediate() -> RetryPolicy {
        RetryPolicy::new().with_delay(0)
    }

    mod retry_until_tests {
        use super::*;

        #[test]
        fn test_succeeds_on_first_attempt() {
            let actions = Cell::new(0usize);
            let outcome = retry_until(
                || {
                    actions.set(actions.get() + 1);
                    Ok(())
                },
                || Ok(true),
                &immediate(),
            )
            .unwrap();
            assert!(outcome);
            assert_eq!(actions.get(), 1);
        }

        #[test]
        fn test_exhaustion_returns_false_after_exact_attempts() {
            let actions = Cell::new(0usize);
            let outcome = retry_until(
                || {
                    actions.set(actions.get() + 1);
                    Ok(())
                },
                || Ok(false),
                &immediate(),
            )
            .unwrap();
            assert!(!outcome);
            assert_eq!(actions.get(), DEFAULT_MAX_ATTEMPTS);
        }

        #[test]
        fn test_condition_satisfied_midway() {
            let actions = Cell::new(0usize);
            let outcome = retry_until(
                || {
                    actions.set(actions.get() + 1);
                    Ok(())
                },
                || Ok(actions.get() >= 4),
                &immediate(),
            )
            .unwrap();
            assert!(outcome);
            assert_eq!(actions.get(), 4);
        }

        #[test]
        fn test_action_error_propagates() {
            let err = retry_until(
                || Err(SondarError::driver("gone")),
                || Ok(true),
                &immediate(),
            )
            .unwrap_err();
            assert!(matches!(err, SondarError::Driver { .. }));
        }

        proptest! {
            #[test]
            fn prop_never_exceeds_max_attempts(max_attempts in 1usize..32) {
                let policy = RetryPolicy::new()
                    .with_max_attempts(max_attempts)
                    .with_delay(0);
                let actions = Cell::new(0usize);
                let outcome = retry_until(
                    || {
                        actions.set(actions.get() + 1);
                        Ok(())
                    },
                    || Ok(false),
                    &policy,
                )
                .unwrap();
                prop_assert!(!outcome);
                prop_assert_eq!(actions.get(), max_attempts);
            }
        }
    }

    mod attribute_clear_tests {
        use super::*;

        #[test]
        fn test_clears_after_clicks() {
            let element = MockElement::ready()
                .with_attribute("class", "btn busy")
                .attribute_clears_after("class", 3);
            let done =
                click_until_attribute_clears(&element, "class", "busy", &immediate())
                    .unwrap();
            assert!(done);
            assert_eq!(element.click_count(), 3);
        }

        #[test]
        fn test_attribute_without_needle_is_immediately_clear() {
            let element = MockElement::ready().with_attribute("class", "btn");
            let done =
                click_until_attribute_clears(&element, "class", "busy", &immediate())
                    .unwrap();
            assert!(done);
            assert_eq!(element.click_count(), 1);
        }

        #[test]
        fn test_sticky_attribute_exhausts_attempts() {
            let element = MockElement::ready().with_attribute("class", "busy");
            let policy = immediate().with_max_attempts(5);
            let done =
                click_until_attribute_clears(&element, "class", "busy", &policy).unwrap();
            assert!(!done);
            assert_eq!(element.click_count(), 5);
        }
    }

    mod hidden_tests {
        use super::*;

        #[test]
        fn test_vanishing_target_counts_as_success() {
            let element = MockElement::ready().vanishes_after(2);
            let done = click_until_hidden(&element, &immediate()).unwrap();
            assert!(done);
            assert_eq!(element.click_count(), 2);
        }

        #[test]
        fn test_persistent_target_exhausts_attempts() {
            let element = MockElement::ready();
            let policy = immediate().with_max_attempts(3);
            let done = click_until_hidden(&element, &policy).unwrap();
            assert!(!done);
            assert_eq!(element.click_count(), 3);
        }
    }

    mod selection_tests {
        use super::*;

        #[test]
        fn test_selects_after_clicks() {
            let element = MockElement::ready().selects_after(2);
            let done = click_until_selected(&element, &immediate()).unwrap();
            assert!(done);
            assert_eq!(element.click_count(), 2);
        }

        #[test]
        fn test_never_selected_exhausts_attempts() {
            let element = MockElement::ready();
            let policy = immediate().with_max_attempts(4);
            let done = click_until_selected(&element, &policy).unwrap();
            assert!(!done);
            assert_eq!(element.click_count(), 4);
        }
    }
}
