//! Abstract browser automation capabilities.
//!
//! The polling and retry engines never talk to a concrete browser protocol.
//! They consume a pre-constructed driver through the narrow capability traits
//! below, so implementations can be backed by WebDriver, CDP, or a scripted
//! test double (see [`crate::mock`]).

use crate::locator::Locator;
use crate::result::{SondarError, SondarResult};

/// Key code for the Enter key, as drivers encode it in `send_keys` payloads
pub const ENTER_KEY: char = '\u{e007}';

/// Handle to a located DOM element
pub trait ElementHandle {
    /// Click the element
    fn click(&self) -> SondarResult<()>;

    /// Whether the element reports itself enabled
    fn is_enabled(&self) -> SondarResult<bool>;

    /// Whether the element reports itself displayed
    fn is_displayed(&self) -> SondarResult<bool>;

    /// Whether the element reports itself selected (radio/checkbox/option)
    fn is_selected(&self) -> SondarResult<bool>;

    /// Read an attribute value, `None` when the attribute is absent
    fn attribute(&self, name: &str) -> SondarResult<Option<String>>;

    /// Type keys into the element
    fn send_keys(&self, keys: &str) -> SondarResult<()>;

    /// Number of options for select-like controls
    fn option_count(&self) -> SondarResult<usize>;
}

/// Capability for capturing screenshots of the current page
pub trait Screenshot {
    /// Capture the current viewport as PNG bytes
    fn capture(&self) -> SondarResult<Vec<u8>>;
}

/// Abstract automation driver
pub trait Driver {
    /// Element handle type produced by lookups
    type Element: ElementHandle;

    /// Look up a single element.
    ///
    /// `Ok(None)` means the element is not (yet) in the document and is a
    /// recoverable condition; `Err` is reserved for hard driver faults.
    fn find_element(&self, locator: &Locator) -> SondarResult<Option<Self::Element>>;

    /// Execute a script in the page context
    fn execute_script(&self, source: &str) -> SondarResult<()>;

    /// Screenshot capability, if this driver supports one
    fn screenshots(&self) -> Option<&dyn Screenshot> {
        None
    }
}

/// How a browser activates a control.
///
/// Some browsers deliver a reliable native click, others need the Enter key
/// or an explicit focus before clicking. The strategy is chosen once when
/// the session is constructed instead of branching on the driver type at
/// every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    /// Plain native click
    #[default]
    Click,
    /// Send the Enter key to the focused control
    SendEnter,
    /// Focus the control via script, then click
    FocusThenClick,
}

impl Activation {
    /// Perform this activation against a located element.
    pub fn perform<D: Driver>(
        self,
        driver: &D,
        element: &D::Element,
        locator: &Locator,
    ) -> SondarResult<()> {
        match self {
            Self::Click => element.click(),
            Self::SendEnter => element.send_keys(&ENTER_KEY.to_string()),
            Self::FocusThenClick => {
                if let Locator::Id(id) = locator {
                    driver.execute_script(&format!(
                        "var el = document.getElementById('{id}'); if (el) el.focus();"
                    ))?;
                } else {
                    return Err(SondarError::driver(format!(
                        "focus-then-click activation needs an id locator, got {locator}"
                    )));
                }
                element.click()
            }
        }
    }
}
