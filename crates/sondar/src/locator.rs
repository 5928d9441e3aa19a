//! Locator abstraction for addressing page elements.
//!
//! Locators are opaque to the polling engine; the driver decides how to
//! resolve them. The variants mirror the lookup strategies drivers commonly
//! expose.

use serde::{Deserialize, Serialize};

/// Strategy for locating an element on the page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locator {
    /// Element id attribute
    Id(String),
    /// CSS selector (e.g. "button.primary")
    Css(String),
    /// XPath expression
    XPath(String),
    /// Form control name attribute
    Name(String),
}

impl Locator {
    /// Locate by element id
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Locate by CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Locate by XPath expression
    #[must_use]
    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::XPath(expression.into())
    }

    /// Locate by name attribute
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// The raw selector text, without the strategy prefix
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Id(s) | Self::Css(s) | Self::XPath(s) | Self::Name(s) => s,
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(s) => write!(f, "id={s}"),
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::Name(s) => write!(f, "name={s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_locator() {
        let locator = Locator::id("submit");
        assert_eq!(locator, Locator::Id("submit".to_string()));
        assert_eq!(locator.value(), "submit");
    }

    #[test]
    fn test_css_locator_display() {
        let locator = Locator::css("button.primary");
        assert_eq!(locator.to_string(), "css=button.primary");
    }

    #[test]
    fn test_xpath_locator_display() {
        let locator = Locator::xpath("//div[@id='main']");
        assert_eq!(locator.to_string(), "xpath=//div[@id='main']");
    }

    #[test]
    fn test_name_locator() {
        let locator = Locator::name("q");
        assert_eq!(locator.to_string(), "name=q");
        assert_eq!(locator.value(), "q");
    }
}
