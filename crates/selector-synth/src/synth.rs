use serde::{Deserialize, Serialize};

use crate::snapshot::ElementSnapshot;

/// Tag reported when the target is missing or not an element.
pub const SENTINEL_TAG: &str = "unknown";
/// XPath reported for the sentinel case.
pub const SENTINEL_XPATH: &str = "//*";

/// Candidate selector pair for one element.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SelectorPair {
    pub css: String,
    pub xpath: String,
}

impl SelectorPair {
    pub fn sentinel() -> Self {
        Self {
            css: SENTINEL_TAG.to_string(),
            xpath: SENTINEL_XPATH.to_string(),
        }
    }

    /// Prefix both selectors with the nested-frame segment so the
    /// top-level reconciler can express "inside this nested frame,
    /// find ...". Deliberately lossy: a single level of nesting is
    /// assumed distinguishable by prefix alone.
    pub fn for_frame(self) -> Self {
        Self {
            css: format!("iframe {}", self.css),
            xpath: format!("//iframe{}", self.xpath),
        }
    }
}

/// Synthesize a `{css, xpath}` pair for an element snapshot.
///
/// Priority order, first match wins:
/// 1. id        -> `#id` / `//*[@id="id"]`
/// 2. name attr -> `tag[name="..."]` / `//tag[@name="..."]`
/// 3. fallback  -> tag, css optionally narrowed by the first class token
///
/// Deterministic and side-effect free; missing or invalid input yields
/// the sentinel pair instead of an error.
pub fn synthesize(element: &ElementSnapshot) -> SelectorPair {
    let tag = match element.tag_lower() {
        Some(tag) => tag,
        None => return SelectorPair::sentinel(),
    };

    if let Some(id) = non_empty(element.id.as_deref()) {
        return SelectorPair {
            css: format!("#{id}"),
            xpath: format!("//*[@id=\"{id}\"]"),
        };
    }

    if let Some(name) = non_empty(element.name.as_deref()) {
        return SelectorPair {
            css: format!("{tag}[name=\"{name}\"]"),
            xpath: format!("//{tag}[@name=\"{name}\"]"),
        };
    }

    let mut css = tag.clone();
    if let Some(class) = first_class_token(element.class_attr.as_deref()) {
        css.push('.');
        css.push_str(class);
    }

    SelectorPair {
        css,
        xpath: format!("//{tag}"),
    }
}

fn non_empty(attr: Option<&str>) -> Option<&str> {
    attr.map(str::trim).filter(|v| !v.is_empty())
}

fn first_class_token(class_attr: Option<&str>) -> Option<&str> {
    class_attr?.split_whitespace().next()
}
