#![allow(dead_code)]

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Shared error type for the recording kernel crates.
#[derive(Debug, Error, Clone)]
pub enum RecorderError {
    #[error("{message}")]
    Message { message: String },
}

impl RecorderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one browsing context: the top-level document or a nested frame.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FrameId(pub String);

impl FrameId {
    pub fn named(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a recorded user interaction.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-full", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ActionKind {
    Click,
    Input,
    Select,
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Click => "click",
            ActionKind::Input => "input",
            ActionKind::Select => "select",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One recorded, replayable user interaction.
///
/// Wire format keeps the original field names (`type`, `tagName`,
/// `fromIframe`) so harvested logs stay compatible with downstream
/// script tooling.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-full", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, PartialEq)]
pub struct ActionRecord {
    #[cfg_attr(feature = "serde-full", serde(rename = "type"))]
    pub kind: ActionKind,
    /// Epoch milliseconds at capture time.
    pub timestamp: i64,
    /// Primary CSS-like selector. Synthesized, not guaranteed unique.
    pub selector: String,
    /// Fallback attribute-qualified XPath.
    pub xpath: String,
    #[cfg_attr(
        feature = "serde-full",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub value: Option<String>,
    #[cfg_attr(
        feature = "serde-full",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub text: Option<String>,
    /// Lower-cased tag, or the synthetic tag `contenteditable`.
    pub tag_name: String,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub from_iframe: bool,
}

impl ActionRecord {
    pub fn click(
        timestamp: i64,
        selector: impl Into<String>,
        xpath: impl Into<String>,
        text: impl Into<String>,
        tag_name: impl Into<String>,
    ) -> Self {
        Self {
            kind: ActionKind::Click,
            timestamp,
            selector: selector.into(),
            xpath: xpath.into(),
            value: None,
            text: Some(text.into()),
            tag_name: tag_name.into(),
            from_iframe: false,
        }
    }

    pub fn input(
        timestamp: i64,
        selector: impl Into<String>,
        xpath: impl Into<String>,
        value: impl Into<String>,
        tag_name: impl Into<String>,
    ) -> Self {
        Self {
            kind: ActionKind::Input,
            timestamp,
            selector: selector.into(),
            xpath: xpath.into(),
            value: Some(value.into()),
            text: None,
            tag_name: tag_name.into(),
            from_iframe: false,
        }
    }

    pub fn select(
        timestamp: i64,
        selector: impl Into<String>,
        xpath: impl Into<String>,
        value: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind: ActionKind::Select,
            timestamp,
            selector: selector.into(),
            xpath: xpath.into(),
            value: Some(value.into()),
            text: Some(text.into()),
            tag_name: "select".to_string(),
            from_iframe: false,
        }
    }

    /// Selector identity used by the dedup/merge policy: two records point
    /// at the same element when either the css selector or the xpath agree.
    pub fn same_target(&self, other: &ActionRecord) -> bool {
        self.selector == other.selector || self.xpath == other.xpath
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_target_matches_on_either_selector() {
        let a = ActionRecord::input(1, "input[name=\"q\"]", "//input[@name=\"q\"]", "x", "input");
        let mut b = a.clone();
        b.selector = "other".into();
        assert!(a.same_target(&b));
        b.xpath = "//other".into();
        assert!(!a.same_target(&b));
    }

    #[test]
    fn kind_names() {
        assert_eq!(ActionKind::Click.name(), "click");
        assert_eq!(ActionKind::Select.to_string(), "select");
    }
}
