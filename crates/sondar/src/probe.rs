//! Probe abstraction: a single non-blocking query against driver state.
//!
//! A probe samples the driver once and classifies what it saw. The poller in
//! [`crate::poll`] drives probes against a deadline; probes themselves never
//! sleep or loop.

use tracing::debug;

use crate::driver::{Driver, ElementHandle};
use crate::locator::Locator;
use crate::result::SondarResult;

/// Outcome of a single probe sample
#[derive(Debug)]
pub enum ProbeOutcome<T> {
    /// The awaited condition has not materialized yet
    Pending,
    /// The condition holds; carries the awaited value
    Ready(T),
    /// A recoverable driver-level failure; retried like `Pending`
    Transient(String),
}

/// A polymorphic readiness query.
///
/// `sample` takes `&mut self` so implementations can remember what they saw
/// across samples; the poller uses [`Probe::saw_candidate`] at the deadline
/// to distinguish "never located anything" from "located a value that kept
/// failing its readiness check".
pub trait Probe {
    /// Value produced when the probe is ready
    type Output;

    /// Query the driver once and classify the result
    fn sample(&mut self) -> ProbeOutcome<Self::Output>;

    /// Human-readable description of what is being awaited
    fn describe(&self) -> String;

    /// Whether any sample produced a candidate value that then failed the
    /// final readiness check
    fn saw_candidate(&self) -> bool {
        false
    }
}

/// Ready once the element exists, reports enabled, and reports displayed.
///
/// A driver-level lookup miss is pending and a driver fault is transient;
/// neither fails the enclosing poll, which keeps retrying until its deadline.
pub struct ElementReadinessProbe<'d, D: Driver> {
    driver: &'d D,
    locator: Locator,
    saw_candidate: bool,
}

impl<'d, D: Driver> ElementReadinessProbe<'d, D> {
    /// Probe for the element addressed by `locator`
    pub fn new(driver: &'d D, locator: Locator) -> Self {
        Self {
            driver,
            locator,
            saw_candidate: false,
        }
    }

    fn check_ready(element: &D::Element) -> SondarResult<bool> {
        Ok(element.is_enabled()? && element.is_displayed()?)
    }

    fn classify(&mut self, element: D::Element) -> ProbeOutcome<D::Element> {
        let ready = match Self::check_ready(&element) {
            Ok(ready) => ready,
            Err(e) => return ProbeOutcome::Transient(e.to_string()),
        };
        if ready {
            ProbeOutcome::Ready(element)
        } else {
            // Located but failed the readiness check; remembered so the
            // deadline error can say "found but not ready".
            self.saw_candidate = true;
            ProbeOutcome::Pending
        }
    }
}

impl<D: Driver> Probe for ElementReadinessProbe<'_, D> {
    type Output = D::Element;

    fn sample(&mut self) -> ProbeOutcome<Self::Output> {
        match self.driver.find_element(&self.locator) {
            Ok(Some(element)) => self.classify(element),
            Ok(None) => ProbeOutcome::Pending,
            Err(e) => {
                debug!(locator = %self.locator, error = %e, "lookup failed, retrying");
                ProbeOutcome::Transient(e.to_string())
            }
        }
    }

    fn describe(&self) -> String {
        self.locator.to_string()
    }

    fn saw_candidate(&self) -> bool {
        self.saw_candidate
    }
}

/// Ready once a select-like control reports at least `min_count` options.
///
/// Used for dropdowns populated asynchronously after the page renders.
pub struct OptionCountProbe<'d, D: Driver> {
    driver: &'d D,
    locator: Locator,
    min_count: usize,
    saw_candidate: bool,
}

impl<'d, D: Driver> OptionCountProbe<'d, D> {
    /// Probe for the control addressed by `locator` to carry `min_count` options
    pub fn new(driver: &'d D, locator: Locator, min_count: usize) -> Self {
        Self {
            driver,
            locator,
            min_count,
            saw_candidate: false,
        }
    }
}

impl<D: Driver> Probe for OptionCountProbe<'_, D> {
    type Output = D::Element;

    fn sample(&mut self) -> ProbeOutcome<Self::Output> {
        match self.driver.find_element(&self.locator) {
            Ok(Some(element)) => match element.option_count() {
                Ok(count) if count >= self.min_count => ProbeOutcome::Ready(element),
                Ok(_) => {
                    self.saw_candidate = true;
                    ProbeOutcome::Pending
                }
                Err(e) => ProbeOutcome::Transient(e.to_string()),
            },
            Ok(None) => ProbeOutcome::Pending,
            Err(e) => {
                debug!(locator = %self.locator, error = %e, "lookup failed, retrying");
                ProbeOutcome::Transient(e.to_string())
            }
        }
    }

    fn describe(&self) -> String {
        format!("{}[options>={}]", self.locator, self.min_count)
    }

    fn saw_candidate(&self) -> bool {
        self.saw_candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDriver, MockElement};

    mod element_readiness_tests {
        use super::*;

        #[test]
        fn test_missing_element_is_pending() {
            let driver = MockDriver::new();
            let mut probe = ElementReadinessProbe::new(&driver, Locator::id("absent"));
            assert!(matches!(probe.sample(), ProbeOutcome::Pending));
            assert!(!probe.saw_candidate());
        }

        #[test]
        fn test_ready_element_is_ready() {
            let driver = MockDriver::new().with_element("id=ok", MockElement::ready());
            let mut probe = ElementReadinessProbe::new(&driver, Locator::id("ok"));
            assert!(matches!(probe.sample(), ProbeOutcome::Ready(_)));
        }

        #[test]
        fn test_hidden_element_is_pending_candidate() {
            let driver = MockDriver::new().with_element("id=veil", MockElement::hidden());
            let mut probe = ElementReadinessProbe::new(&driver, Locator::id("veil"));
            assert!(matches!(probe.sample(), ProbeOutcome::Pending));
            assert!(probe.saw_candidate());
        }

        #[test]
        fn test_disabled_element_is_pending_candidate() {
            let driver = MockDriver::new().with_element("id=off", MockElement::disabled());
            let mut probe = ElementReadinessProbe::new(&driver, Locator::id("off"));
            assert!(matches!(probe.sample(), ProbeOutcome::Pending));
            assert!(probe.saw_candidate());
        }

        #[test]
        fn test_describe_names_locator() {
            let driver = MockDriver::new();
            let probe = ElementReadinessProbe::new(&driver, Locator::css(".spinner"));
            assert!(probe.describe().contains("css=.spinner"));
        }
    }

    mod option_count_tests {
        use super::*;

        #[test]
        fn test_ready_once_count_reached() {
            let element = MockElement::ready().with_option_counts(vec![0, 1, 3]);
            let driver = MockDriver::new().with_element("id=combo", element);
            let mut probe = OptionCountProbe::new(&driver, Locator::id("combo"), 3);

            assert!(matches!(probe.sample(), ProbeOutcome::Pending));
            assert!(matches!(probe.sample(), ProbeOutcome::Pending));
            assert!(matches!(probe.sample(), ProbeOutcome::Ready(_)));
        }

        #[test]
        fn test_count_above_target_is_ready() {
            let element = MockElement::ready().with_option_counts(vec![5]);
            let driver = MockDriver::new().with_element("id=combo", element);
            let mut probe = OptionCountProbe::new(&driver, Locator::id("combo"), 3);
            assert!(matches!(probe.sample(), ProbeOutcome::Ready(_)));
        }

        #[test]
        fn test_underpopulated_control_is_candidate() {
            let element = MockElement::ready().with_option_counts(vec![1]);
            let driver = MockDriver::new().with_element("id=combo", element);
            let mut probe = OptionCountProbe::new(&driver, Locator::id("combo"), 4);
            assert!(matches!(probe.sample(), ProbeOutcome::Pending));
            assert!(probe.saw_candidate());
        }
    }
}
