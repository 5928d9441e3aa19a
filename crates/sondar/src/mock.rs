//! Scripted test doubles for the driver capabilities.
//!
//! Lets the polling, retry and session layers be exercised without a real
//! browser. Elements are cheaply cloneable handles over shared state, so a
//! test can keep a handle and observe clicks or keystrokes after the code
//! under test interacted with it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::driver::{Driver, ElementHandle, Screenshot};
use crate::locator::Locator;
use crate::result::{SondarError, SondarResult};

#[derive(Debug, Default)]
struct ElementState {
    clicks: usize,
    keys: String,
    readiness_checks: usize,
    attributes: HashMap<String, String>,
}

/// Scripted element double
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    state: Arc<Mutex<ElementState>>,
    enabled: bool,
    /// Number of readiness checks that report "not displayed" before the
    /// element becomes visible; `usize::MAX` means never
    displayed_after: usize,
    /// Element reports selected once it has received this many clicks
    selected_after_clicks: Option<usize>,
    /// Clicks start failing as not-interactable once this many landed
    vanishes_after_clicks: Option<usize>,
    /// Named attribute disappears once this many clicks landed
    attribute_clears_after: Option<(String, usize)>,
    /// Option counts reported per query; the last entry repeats
    option_counts: Arc<Vec<usize>>,
    option_cursor: Arc<AtomicUsize>,
}

impl MockElement {
    /// Element that is enabled and displayed from the first check
    #[must_use]
    pub fn ready() -> Self {
        Self {
            enabled: true,
            displayed_after: 0,
            option_counts: Arc::new(vec![0]),
            ..Default::default()
        }
    }

    /// Element that becomes displayed only after `checks` readiness checks
    #[must_use]
    pub fn ready_after(checks: usize) -> Self {
        Self {
            displayed_after: checks,
            ..Self::ready()
        }
    }

    /// Element that exists and is enabled but is never displayed
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            displayed_after: usize::MAX,
            ..Self::ready()
        }
    }

    /// Element that reports disabled
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::ready()
        }
    }

    /// Set an attribute value
    #[must_use]
    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .attributes
            .insert(name.into(), value.into());
        self
    }

    /// The named attribute reads as absent once `clicks` clicks landed
    #[must_use]
    pub fn attribute_clears_after(mut self, name: impl Into<String>, clicks: usize) -> Self {
        self.attribute_clears_after = Some((name.into(), clicks));
        self
    }

    /// Element reports selected once it received `clicks` clicks
    #[must_use]
    pub fn selects_after(mut self, clicks: usize) -> Self {
        self.selected_after_clicks = Some(clicks);
        self
    }

    /// Clicks fail as not-interactable once `clicks` clicks landed
    #[must_use]
    pub fn vanishes_after(mut self, clicks: usize) -> Self {
        self.vanishes_after_clicks = Some(clicks);
        self
    }

    /// Option counts reported by successive `option_count` queries
    #[must_use]
    pub fn with_option_counts(mut self, counts: Vec<usize>) -> Self {
        assert!(!counts.is_empty(), "need at least one option count");
        self.option_counts = Arc::new(counts);
        self
    }

    /// Clicks observed so far
    #[must_use]
    pub fn click_count(&self) -> usize {
        self.state.lock().unwrap().clicks
    }

    /// Keys observed so far
    #[must_use]
    pub fn keys_sent(&self) -> String {
        self.state.lock().unwrap().keys.clone()
    }

    /// Readiness checks observed so far
    #[must_use]
    pub fn readiness_checks(&self) -> usize {
        self.state.lock().unwrap().readiness_checks
    }
}

impl ElementHandle for MockElement {
    fn click(&self) -> SondarResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(limit) = self.vanishes_after_clicks {
            if state.clicks >= limit {
                return Err(SondarError::NotInteractable {
                    message: "element is no longer visible".to_string(),
                });
            }
        }
        state.clicks += 1;
        Ok(())
    }

    fn is_enabled(&self) -> SondarResult<bool> {
        Ok(self.enabled)
    }

    fn is_displayed(&self) -> SondarResult<bool> {
        let mut state = self.state.lock().unwrap();
        let displayed = state.readiness_checks >= self.displayed_after;
        state.readiness_checks += 1;
        Ok(displayed)
    }

    fn is_selected(&self) -> SondarResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(self
            .selected_after_clicks
            .is_some_and(|limit| state.clicks >= limit))
    }

    fn attribute(&self, name: &str) -> SondarResult<Option<String>> {
        let state = self.state.lock().unwrap();
        if let Some((attr, limit)) = &self.attribute_clears_after {
            if attr == name && state.clicks >= *limit {
                return Ok(None);
            }
        }
        Ok(state.attributes.get(name).cloned())
    }

    fn send_keys(&self, keys: &str) -> SondarResult<()> {
        self.state.lock().unwrap().keys.push_str(keys);
        Ok(())
    }

    fn option_count(&self) -> SondarResult<usize> {
        if self.option_counts.is_empty() {
            return Ok(0);
        }
        let cursor = self.option_cursor.fetch_add(1, Ordering::SeqCst);
        let idx = cursor.min(self.option_counts.len() - 1);
        Ok(self.option_counts[idx])
    }
}

/// Fixed-payload screenshot double
#[derive(Debug, Clone)]
pub struct MockScreenshot {
    bytes: Vec<u8>,
}

impl MockScreenshot {
    /// Screenshot capability returning the given bytes on every capture
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl Screenshot for MockScreenshot {
    fn capture(&self) -> SondarResult<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

#[derive(Debug)]
struct Registration {
    element: MockElement,
    /// Lookups that miss before the element shows up in the document
    appears_after: usize,
    misses: AtomicUsize,
}

/// Scripted driver double
#[derive(Debug, Default)]
pub struct MockDriver {
    elements: HashMap<String, Registration>,
    scripts: Mutex<Vec<String>>,
    screenshot: Option<MockScreenshot>,
    lookups: AtomicUsize,
}

impl MockDriver {
    /// Empty driver: every lookup misses
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element under a locator key (the locator's `Display` form)
    #[must_use]
    pub fn with_element(self, key: impl Into<String>, element: MockElement) -> Self {
        self.with_element_after(key, element, 0)
    }

    /// Register an element that misses the first `appears_after` lookups
    #[must_use]
    pub fn with_element_after(
        mut self,
        key: impl Into<String>,
        element: MockElement,
        appears_after: usize,
    ) -> Self {
        self.elements.insert(
            key.into(),
            Registration {
                element,
                appears_after,
                misses: AtomicUsize::new(0),
            },
        );
        self
    }

    /// Attach a screenshot capability
    #[must_use]
    pub fn with_screenshot(mut self, bytes: Vec<u8>) -> Self {
        self.screenshot = Some(MockScreenshot::new(bytes));
        self
    }

    /// Scripts executed so far
    #[must_use]
    pub fn scripts_run(&self) -> Vec<String> {
        self.scripts.lock().unwrap().clone()
    }

    /// Lookups performed so far
    #[must_use]
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Driver for MockDriver {
    type Element = MockElement;

    fn find_element(&self, locator: &Locator) -> SondarResult<Option<Self::Element>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match self.elements.get(&locator.to_string()) {
            Some(registration) => {
                let seen = registration.misses.fetch_add(1, Ordering::SeqCst);
                if seen < registration.appears_after {
                    Ok(None)
                } else {
                    Ok(Some(registration.element.clone()))
                }
            }
            None => Ok(None),
        }
    }

    fn execute_script(&self, source: &str) -> SondarResult<()> {
        self.scripts.lock().unwrap().push(source.to_string());
        Ok(())
    }

    fn screenshots(&self) -> Option<&dyn Screenshot> {
        self.screenshot.as_ref().map(|s| s as &dyn Screenshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_driver_misses() {
        let driver = MockDriver::new();
        let found = driver.find_element(&Locator::id("missing")).unwrap();
        assert!(found.is_none());
        assert_eq!(driver.lookup_count(), 1);
    }

    #[test]
    fn test_element_appears_after_misses() {
        let driver =
            MockDriver::new().with_element_after("id=late", MockElement::ready(), 2);
        let locator = Locator::id("late");
        assert!(driver.find_element(&locator).unwrap().is_none());
        assert!(driver.find_element(&locator).unwrap().is_none());
        assert!(driver.find_element(&locator).unwrap().is_some());
    }

    #[test]
    fn test_element_handles_share_state() {
        let element = MockElement::ready();
        let other = element.clone();
        other.click().unwrap();
        assert_eq!(element.click_count(), 1);
    }

    #[test]
    fn test_ready_after_becomes_displayed() {
        let element = MockElement::ready_after(2);
        assert!(!element.is_displayed().unwrap());
        assert!(!element.is_displayed().unwrap());
        assert!(element.is_displayed().unwrap());
    }

    #[test]
    fn test_vanishing_element_rejects_late_clicks() {
        let element = MockElement::ready().vanishes_after(1);
        element.click().unwrap();
        let err = element.click().unwrap_err();
        assert!(matches!(err, SondarError::NotInteractable { .. }));
    }

    #[test]
    fn test_option_counts_repeat_last_value() {
        let element = MockElement::ready().with_option_counts(vec![0, 2]);
        assert_eq!(element.option_count().unwrap(), 0);
        assert_eq!(element.option_count().unwrap(), 2);
        assert_eq!(element.option_count().unwrap(), 2);
    }

    #[test]
    fn test_screenshot_capability() {
        let driver = MockDriver::new().with_screenshot(vec![1, 2, 3]);
        let shot = driver.screenshots().unwrap().capture().unwrap();
        assert_eq!(shot, vec![1, 2, 3]);
        assert!(MockDriver::new().screenshots().is_none());
    }
}
