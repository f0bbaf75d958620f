//! Typing guard: shortcuts stay quiet while the user types into a text field.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::types::{canonicalize_key, Combo};
use crate::config::RegistryConfig;

/// The element that has keyboard focus when a key event arrives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FocusTarget {
    /// Nothing focused (document body).
    #[default]
    Nothing,
    /// A content-editable node.
    ContentEditable,
    TextArea,
    /// An `<input>`; `None` means no `type` attribute, which browsers treat
    /// as `text`.
    Input { input_type: Option<String> },
    /// Any other element, by tag name.
    Element { tag: String },
}

impl FocusTarget {
    pub fn input(input_type: impl Into<String>) -> Self {
        Self::Input {
            input_type: Some(input_type.into()),
        }
    }

    /// Whether this element takes typed text, given the input types that
    /// count as text entry.
    pub fn accepts_text(&self, text_input_types: &[String]) -> bool {
        match self {
            Self::ContentEditable | Self::TextArea => true,
            Self::Input { input_type } => {
                let input_type = input_type
                    .as_deref()
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "text".to_string());
                text_input_types.contains(&input_type)
            }
            Self::Nothing | Self::Element { .. } => false,
        }
    }
}

/// Parses `none`, `contenteditable`, `textarea`, `input`, `input:<type>`;
/// anything else is an element tag.
impl FromStr for FocusTarget {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Ok(match lower.as_str() {
            "" | "none" | "body" => Self::Nothing,
            "contenteditable" => Self::ContentEditable,
            "textarea" => Self::TextArea,
            "input" => Self::Input { input_type: None },
            other => match other.strip_prefix("input:") {
                Some(input_type) => Self::input(input_type),
                None => Self::Element {
                    tag: other.to_string(),
                },
            },
        })
    }
}

impl fmt::Display for FocusTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nothing => f.write_str("none"),
            Self::ContentEditable => f.write_str("contenteditable"),
            Self::TextArea => f.write_str("textarea"),
            Self::Input { input_type: None } => f.write_str("input"),
            Self::Input {
                input_type: Some(input_type),
            } => write!(f, "input:{}", input_type),
            Self::Element { tag } => f.write_str(tag),
        }
    }
}

/// Decides whether a matched combo is suppressed because focus is in a text
/// field. Combos holding a modifier always pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingGuard {
    enabled: bool,
    text_input_types: Vec<String>,
    modifier_keys: Vec<String>,
}

impl TypingGuard {
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self {
            enabled: config.typing_guard,
            text_input_types: config
                .text_input_types
                .iter()
                .map(|t| t.trim().to_lowercase())
                .collect(),
            modifier_keys: config
                .modifier_keys
                .iter()
                .map(|k| canonicalize_key(k))
                .collect(),
        }
    }

    pub fn suppresses(&self, focus: &FocusTarget, combo: &Combo) -> bool {
        self.enabled
            && focus.accepts_text(&self.text_input_types)
            && !combo.has_modifier(&self.modifier_keys)
    }
}

impl Default for TypingGuard {
    fn default() -> Self {
        Self::from_config(&RegistryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo(keys: &[&str]) -> Combo {
        Combo::new(keys.iter().copied()).unwrap()
    }

    #[test]
    fn test_text_fields_accept_text() {
        let guard = TypingGuard::default();
        let k = combo(&["k"]);
        for focus in [
            FocusTarget::ContentEditable,
            FocusTarget::TextArea,
            FocusTarget::Input { input_type: None },
            FocusTarget::input("text"),
            FocusTarget::input("Password"),
            FocusTarget::input("email"),
            FocusTarget::input("search"),
            FocusTarget::input("tel"),
            FocusTarget::input("url"),
            FocusTarget::input("number"),
            FocusTarget::input("date"),
            FocusTarget::input("datetime-local"),
            FocusTarget::input("month"),
            FocusTarget::input("time"),
            FocusTarget::input("week"),
        ] {
            assert!(guard.suppresses(&focus, &k), "expected {} to guard", focus);
        }
    }

    #[test]
    fn test_non_text_targets_do_not_guard() {
        let guard = TypingGuard::default();
        let k = combo(&["k"]);
        for focus in [
            FocusTarget::Nothing,
            FocusTarget::input("checkbox"),
            FocusTarget::input("button"),
            FocusTarget::input("range"),
            FocusTarget::Element {
                tag: "button".to_string(),
            },
        ] {
            assert!(!guard.suppresses(&focus, &k), "expected {} to pass", focus);
        }
    }

    #[test]
    fn test_modifier_combos_bypass_guard() {
        let guard = TypingGuard::default();
        let focus = FocusTarget::input("text");
        assert!(!guard.suppresses(&focus, &combo(&["meta", "k"])));
        assert!(!guard.suppresses(&focus, &combo(&["control", "s"])));
        assert!(!guard.suppresses(&focus, &combo(&["ctrl", "s"])));
        assert!(!guard.suppresses(&focus, &combo(&["alt", "x"])));
        assert!(!guard.suppresses(&focus, &combo(&["cmd", "z"])));
        assert!(guard.suppresses(&focus, &combo(&["shift", "a"])));
    }

    #[test]
    fn test_disabled_guard_never_suppresses() {
        let config = RegistryConfig {
            typing_guard: false,
            ..RegistryConfig::default()
        };
        let guard = TypingGuard::from_config(&config);
        assert!(!guard.suppresses(&FocusTarget::TextArea, &combo(&["k"])));
    }

    #[test]
    fn test_parse_focus_target() {
        assert_eq!("none".parse::<FocusTarget>().unwrap(), FocusTarget::Nothing);
        assert_eq!(
            "TextArea".parse::<FocusTarget>().unwrap(),
            FocusTarget::TextArea
        );
        assert_eq!(
            "input".parse::<FocusTarget>().unwrap(),
            FocusTarget::Input { input_type: None }
        );
        assert_eq!(
            "input:email".parse::<FocusTarget>().unwrap(),
            FocusTarget::input("email")
        );
        assert_eq!(
            "div".parse::<FocusTarget>().unwrap(),
            FocusTarget::Element {
                tag: "div".to_string()
            }
        );
    }
}
