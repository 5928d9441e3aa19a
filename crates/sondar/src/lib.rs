//! Sondar: synchronous support for browser-driven UI tests.
//!
//! Sondar supplies the three pieces of a UI test harness that carry real
//! control flow and state, leaving browser protocols and report formats to
//! external collaborators:
//!
//! - **Deadline polling** ([`poll`], [`probe`]): drive a readiness probe at
//!   a fixed interval until it yields a value or a time budget expires.
//! - **Bounded click retry** ([`retry`]): perform an action and re-check a
//!   post-condition a fixed number of times; exhaustion is a result, not an
//!   error.
//! - **Evidence attachments** ([`attachment`], [`report`]): screenshots and
//!   other captures collected per test method and handed to a report writer
//!   as base64-encoded `File-*` entries.
//!
//! The automation driver is consumed through the capability traits in
//! [`driver`]; [`mock`] ships scripted doubles so everything can be tested
//! without a browser. [`session::TestSession`] wires driver, configuration
//! and evidence into one fixture passed into each test — there are no
//! process-wide singletons, and test methods are expected to run serially.
//!
//! # Example
//!
//! ```
//! use sondar::attachment::TestId;
//! use sondar::config::SuiteConfig;
//! use sondar::locator::Locator;
//! use sondar::mock::{MockDriver, MockElement};
//! use sondar::session::TestSession;
//!
//! let driver = MockDriver::new()
//!     .with_element("id=login", MockElement::ready())
//!     .with_screenshot(vec![0x89, b'P', b'N', b'G']);
//! let config = SuiteConfig::from_pairs([("selenium.timeout", "1000")]);
//! let mut session = TestSession::new(driver, config);
//!
//! session.activate(Locator::id("login"))?;
//!
//! let test = TestId::new("login_suite", "test_login");
//! session.attach_screenshot(&test, "after clicking login")?;
//! assert_eq!(session.report(&test).len(), 1);
//! # Ok::<(), sondar::result::SondarError>(())
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

/// Evidence records, ordered buckets and the per-method aggregator
pub mod attachment;
/// String-keyed suite configuration with typed accessors
pub mod config;
/// Abstract driver capabilities and the activation strategy
pub mod driver;
/// Element locators
pub mod locator;
/// Scripted driver doubles for browser-free testing
pub mod mock;
/// Deadline polling of readiness probes
pub mod poll;
/// The Probe abstraction and its element/option-count specializations
pub mod probe;
/// Report payload for flushed attachment buckets
pub mod report;
/// Result and error types
pub mod result;
/// Bounded action retry loops
pub mod retry;
/// Per-run test fixture
pub mod session;
/// Tabular data for data-driven tests
pub mod table;

pub use attachment::{AttachmentAggregator, AttachmentBucket, AttachmentRecord, TestId};
pub use config::SuiteConfig;
pub use driver::{Activation, Driver, ElementHandle, Screenshot};
pub use locator::Locator;
pub use poll::{
    poll_until, wait_for_element, wait_for_option_count, PollOptions, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_TIMEOUT_MS,
};
pub use probe::{ElementReadinessProbe, OptionCountProbe, Probe, ProbeOutcome};
pub use report::{bucket_report, ReportEntry};
pub use result::{SondarError, SondarResult};
pub use retry::{
    click_until_attribute_clears, click_until_hidden, click_until_selected, retry_until,
    RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_MS,
};
pub use session::TestSession;
pub use table::DataTable;
