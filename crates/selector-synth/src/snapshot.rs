use serde::{Deserialize, Serialize};

/// Currently selected option of a `<select>` element.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub value: String,
    pub text: String,
}

/// Detached description of a DOM element at capture time.
///
/// The capture layer builds one of these from the live event target; the
/// synthesizer and reconciler only ever see this snapshot, never the
/// element itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    /// Raw tag name. `None` for non-element targets such as text nodes.
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    /// The `name` attribute, not the accessible name.
    #[serde(default)]
    pub name: Option<String>,
    /// Raw `class` attribute, whitespace and all.
    #[serde(default)]
    pub class_attr: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    /// Visible text content.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub content_editable: bool,
    #[serde(default)]
    pub selected: Option<SelectedOption>,
    /// Set on elements belonging to the recorder's own floating panel so
    /// the capture layer never records its own UI.
    #[serde(default)]
    pub recorder_ui: bool,
}

impl ElementSnapshot {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_class(mut self, class_attr: impl Into<String>) -> Self {
        self.class_attr = Some(class_attr.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_selected(mut self, value: impl Into<String>, text: impl Into<String>) -> Self {
        self.selected = Some(SelectedOption {
            value: value.into(),
            text: text.into(),
        });
        self
    }

    pub fn editable(mut self) -> Self {
        self.content_editable = true;
        self
    }

    pub fn as_recorder_ui(mut self) -> Self {
        self.recorder_ui = true;
        self
    }

    /// Lower-cased tag name, or `None` for non-element targets.
    pub fn tag_lower(&self) -> Option<String> {
        self.tag
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_ascii_lowercase)
    }

    /// Whether this element accepts text input events.
    pub fn is_text_entry(&self) -> bool {
        if self.content_editable {
            return true;
        }
        matches!(
            self.tag_lower().as_deref(),
            Some("input") | Some("textarea")
        )
    }

    pub fn is_select(&self) -> bool {
        self.tag_lower().as_deref() == Some("select")
    }

    pub fn is_body(&self) -> bool {
        self.tag_lower().as_deref() == Some("body")
    }

    /// Current editable content: text for contenteditable hosts, the
    /// value attribute otherwise.
    pub fn entry_value(&self) -> String {
        if self.content_editable {
            self.text.clone().unwrap_or_default()
        } else {
            self.value.clone().unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_entry_detection() {
        assert!(ElementSnapshot::new("INPUT").is_text_entry());
        assert!(ElementSnapshot::new("textarea").is_text_entry());
        assert!(ElementSnapshot::new("div").editable().is_text_entry());
        assert!(!ElementSnapshot::new("div").is_text_entry());
        assert!(!ElementSnapshot::default().is_text_entry());
    }

    #[test]
    fn entry_value_prefers_text_for_editable_hosts() {
        let host = ElementSnapshot::new("div")
            .editable()
            .with_text("draft")
            .with_value("ignored");
        assert_eq!(host.entry_value(), "draft");

        let field = ElementSnapshot::new("input").with_value("typed");
        assert_eq!(field.entry_value(), "typed");
    }

    #[test]
    fn tag_lower_rejects_blank_tags() {
        assert_eq!(ElementSnapshot::new("  ").tag_lower(), None);
        assert_eq!(
            ElementSnapshot::new("DIV").tag_lower().as_deref(),
            Some("div")
        );
    }
}
