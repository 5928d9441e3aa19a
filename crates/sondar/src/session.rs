//! Per-run test session: driver, configuration and evidence in one fixture.
//!
//! The session replaces process-wide driver/config singletons with an owned
//! struct constructed once per run and passed into each test. Tests run
//! serially against it; the evidence aggregator relies on that.

use std::path::PathBuf;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::attachment::{AttachmentAggregator, AttachmentBucket, AttachmentRecord, TestId};
use crate::config::SuiteConfig;
use crate::driver::{Activation, Driver};
use crate::locator::Locator;
use crate::poll::{self, PollOptions, DEFAULT_TIMEOUT_MS};
use crate::report::{bucket_report, ReportEntry};
use crate::result::{SondarError, SondarResult};

/// PNG MIME type used for captured screenshots
const SCREENSHOT_CONTENT_TYPE: &str = "image/png";

/// Test fixture wiring a driver, suite configuration and evidence collection
pub struct TestSession<D: Driver> {
    driver: D,
    config: SuiteConfig,
    activation: Activation,
    aggregator: AttachmentAggregator,
    evidence_dir: PathBuf,
}

impl<D: Driver> TestSession<D> {
    /// Create a session around a pre-constructed driver
    #[must_use]
    pub fn new(driver: D, config: SuiteConfig) -> Self {
        let evidence_dir = config.evidence_dir();
        Self {
            driver,
            config,
            activation: Activation::default(),
            aggregator: AttachmentAggregator::new(),
            evidence_dir,
        }
    }

    /// Choose the activation strategy for this browser
    #[must_use]
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// The underlying driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The suite configuration
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Poll options seeded from the configured timeout
    #[must_use]
    pub fn poll_options(&self) -> PollOptions {
        PollOptions::new().with_timeout(self.config.timeout_ms(DEFAULT_TIMEOUT_MS))
    }

    /// Wait for an element to be present, enabled and displayed, using the
    /// configured timeout.
    pub fn wait_for(&self, locator: Locator) -> SondarResult<D::Element> {
        self.wait_for_with(locator, &self.poll_options())
    }

    /// Wait for an element with explicit poll options
    pub fn wait_for_with(
        &self,
        locator: Locator,
        options: &PollOptions,
    ) -> SondarResult<D::Element> {
        poll::wait_for_element(&self.driver, locator, options)
    }

    /// Wait for a select-like control to carry at least `min_count` options
    pub fn wait_for_options(
        &self,
        locator: Locator,
        min_count: usize,
    ) -> SondarResult<D::Element> {
        poll::wait_for_option_count(&self.driver, locator, min_count, &self.poll_options())
    }

    /// Wait for the element, then activate it with the session's strategy
    pub fn activate(&self, locator: Locator) -> SondarResult<()> {
        let element = self.wait_for(locator.clone())?;
        self.activation.perform(&self.driver, &element, &locator)
    }

    /// Capture a screenshot, persist it to the evidence directory and attach
    /// it under the given test identity.
    ///
    /// Fails with [`SondarError::UnsupportedCapability`] when the driver
    /// cannot take screenshots.
    pub fn attach_screenshot(
        &mut self,
        test: &TestId,
        description: impl Into<String>,
    ) -> SondarResult<()> {
        let Some(screenshots) = self.driver.screenshots() else {
            warn!(%test, "driver does not support screenshots, no evidence captured");
            return Err(SondarError::UnsupportedCapability {
                capability: "screenshots".to_string(),
            });
        };
        let bytes = screenshots.capture()?;

        std::fs::create_dir_all(&self.evidence_dir)?;
        let file_name = format!("{}.png", Uuid::new_v4());
        let path = self.evidence_dir.join(&file_name);
        std::fs::write(&path, &bytes)?;
        debug!(%test, path = %path.display(), size = bytes.len(), "captured screenshot");

        let record = AttachmentRecord::new(
            bytes,
            SCREENSHOT_CONTENT_TYPE,
            description,
            file_name,
            path.to_string_lossy(),
        );
        self.aggregator.attach(test, record);
        Ok(())
    }

    /// Attach an existing evidence file under the given test identity
    pub fn attach_file(
        &mut self,
        test: &TestId,
        path: impl AsRef<std::path::Path>,
        content_type: impl Into<String>,
        description: impl Into<String>,
    ) -> SondarResult<()> {
        let record = AttachmentRecord::from_file(path, content_type, description)?;
        self.aggregator.attach(test, record);
        Ok(())
    }

    /// Hand the current evidence bucket for a test to the report layer.
    ///
    /// Read-only: the bucket stays live until another test attaches.
    #[must_use]
    pub fn flush(&self, test: &TestId) -> AttachmentBucket {
        self.aggregator.flush(test)
    }

    /// Report entries for a test's evidence, in attachment order
    #[must_use]
    pub fn report(&self, test: &TestId) -> Vec<ReportEntry> {
        bucket_report(&self.flush(test))
    }
}

impl<D: Driver + std::fmt::Debug> std::fmt::Debug for TestSession<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestSession")
            .field("driver", &self.driver)
            .field("activation", &self.activation)
            .field("evidence_dir", &self.evidence_dir)
            .finish_non_exhaustive()
    }
}
