//! Human-readable key glyphs for shortcut legends.
//!
//! Display only: nothing here affects matching or identity.

use serde::Serialize;

use super::types::{canonicalize_key, KeySpec};

/// Text placed between alternative combos.
pub const ALTERNATIVE_SEPARATOR: &str = " or ";

/// Map a key name to its glyph, e.g. `control` -> `⌃`.
///
/// Keys without a glyph are rendered upper-cased.
pub fn key_to_symbol(key: &str) -> String {
    let canonical = canonicalize_key(key);
    match canonical.as_str() {
        "control" | "ctrl" => "⌃",
        "alt" | "option" => "⌥",
        "shift" => "⇧",
        "meta" | "command" | "cmd" => "⌘",
        "enter" | "return" => "↵",
        "backspace" => "⌫",
        "delete" => "⌦",
        "escape" | "esc" => "⎋",
        "tab" => "⇥",
        "space" => "␣",
        "up" | "arrowup" => "↑",
        "down" | "arrowdown" => "↓",
        "left" | "arrowleft" => "←",
        "right" | "arrowright" => "→",
        _ => return key.trim().to_uppercase(),
    }
    .to_string()
}

/// What a display segment holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Keycap glyphs of one combo, space separated.
    Combo,
    /// The text between alternatives.
    Separator,
}

/// One piece of a rendered key legend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplaySegment {
    pub kind: SegmentKind,
    pub text: String,
}

impl DisplaySegment {
    fn combo(text: String) -> Self {
        Self {
            kind: SegmentKind::Combo,
            text,
        }
    }

    fn separator() -> Self {
        Self {
            kind: SegmentKind::Separator,
            text: ALTERNATIVE_SEPARATOR.to_string(),
        }
    }
}

/// Lay out a key spec as keycap segments and `or` separators.
///
/// Keys keep the caller's order, so `["meta", "k"]` reads `⌘ K`.
pub fn format_for_display(keys: &KeySpec) -> Vec<DisplaySegment> {
    let mut segments = Vec::new();
    for (index, combo) in keys.raw_combos().iter().enumerate() {
        if index > 0 {
            segments.push(DisplaySegment::separator());
        }
        let glyphs = combo
            .iter()
            .map(|key| key_to_symbol(key))
            .collect::<Vec<_>>()
            .join(" ");
        segments.push(DisplaySegment::combo(glyphs));
    }
    segments
}

/// The segments of [`format_for_display`] concatenated.
pub fn display_string(keys: &KeySpec) -> String {
    format_for_display(keys)
        .into_iter()
        .map(|segment| segment.text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_symbols() {
        assert_eq!(key_to_symbol("control"), "⌃");
        assert_eq!(key_to_symbol("Ctrl"), "⌃");
        assert_eq!(key_to_symbol("option"), "⌥");
        assert_eq!(key_to_symbol("SHIFT"), "⇧");
        assert_eq!(key_to_symbol("cmd"), "⌘");
        assert_eq!(key_to_symbol("command"), "⌘");
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(key_to_symbol("escape"), "⎋");
        assert_eq!(key_to_symbol("Esc"), "⎋");
        assert_eq!(key_to_symbol("return"), "↵");
        assert_eq!(key_to_symbol("ArrowUp"), "↑");
        assert_eq!(key_to_symbol("left"), "←");
        assert_eq!(key_to_symbol(" "), "␣");
    }

    #[test]
    fn test_unknown_keys_uppercase() {
        assert_eq!(key_to_symbol("k"), "K");
        assert_eq!(key_to_symbol("?"), "?");
        assert_eq!(key_to_symbol("f12"), "F12");
    }

    #[test]
    fn test_display_single_key() {
        assert_eq!(display_string(&KeySpec::from("?")), "?");
        assert_eq!(display_string(&KeySpec::from("escape")), "⎋");
    }

    #[test]
    fn test_display_combo_keeps_caller_order() {
        assert_eq!(display_string(&KeySpec::from(["meta", "k"])), "⌘ K");
        assert_eq!(
            display_string(&KeySpec::from(["ctrl", "shift", "t"])),
            "⌃ ⇧ T"
        );
    }

    #[test]
    fn test_display_alternatives() {
        assert_eq!(display_string(&KeySpec::from([["?"], ["/"]])), "? or /");
        assert_eq!(
            display_string(&KeySpec::from([["meta", "k"], ["ctrl", "k"]])),
            "⌘ K or ⌃ K"
        );
    }

    #[test]
    fn test_segments_mark_separators() {
        let segments = format_for_display(&KeySpec::from([["meta", "s"], ["control", "s"]]));
        let kinds: Vec<_> = segments.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SegmentKind::Combo, SegmentKind::Separator, SegmentKind::Combo]
        );
        assert_eq!(segments[1].text, " or ");
        assert_eq!(segments[2].text, "⌃ S");
    }

    #[test]
    fn test_empty_spec_has_no_segments() {
        assert!(format_for_display(&KeySpec::Combo(Vec::new())).is_empty());
    }
}
