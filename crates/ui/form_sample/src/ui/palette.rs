//! Class-name → terminal style resolution.
//!
//! The form's `StyleMap` carries class names (as it would for CSS). In the
//! terminal each class name maps to a ratatui `Style`; a region with several
//! classes (`"submit primary"`) gets the patched combination of all of them,
//! left to right. Unknown classes are ignored.

use std::collections::HashMap;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// Serialisable style for a single class name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClassStyle {
    #[serde(default)]
    pub fg: Option<Color>,
    #[serde(default)]
    pub bg: Option<Color>,
    #[serde(default)]
    pub bold: bool,
}

impl ClassStyle {
    pub fn to_style(&self) -> Style {
        let mut style = Style::default();
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }
}

#[derive(Debug, Clone)]
pub struct Palette {
    classes: HashMap<String, Style>,
}

impl Default for Palette {
    fn default() -> Self {
        let classes = [
            ("container", Style::default()),
            ("label", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            ("input", Style::default().fg(Color::Cyan)),
            ("error", Style::default().fg(Color::Red)),
            ("submit", Style::default().fg(Color::White).bg(Color::Blue)),
            ("cancel", Style::default().fg(Color::White).bg(Color::Red)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self { classes }
    }
}

impl Palette {
    /// Built-in classes plus configured ones (configured entries win).
    pub fn with_classes(extra: &HashMap<String, ClassStyle>) -> Self {
        let mut palette = Self::default();
        for (name, style) in extra {
            palette.classes.insert(name.clone(), style.to_style());
        }
        palette
    }

    /// Style for a whitespace-separated class list.
    pub fn resolve(&self, class_list: &str) -> Style {
        class_list
            .split_whitespace()
            .filter_map(|class| self.classes.get(class))
            .fold(Style::default(), |acc, s| acc.patch(*s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_classes_patch_left_to_right() {
        let mut extra = HashMap::new();
        extra.insert(
            "primary".to_string(),
            ClassStyle {
                bg: Some(Color::Green),
                ..Default::default()
            },
        );
        let palette = Palette::with_classes(&extra);
        let style = palette.resolve("submit primary");
        assert_eq!(style.fg, Some(Color::White));
        assert_eq!(style.bg, Some(Color::Green));
    }

    #[test]
    fn unknown_classes_are_ignored() {
        let palette = Palette::default();
        assert_eq!(palette.resolve("nope"), Style::default());
        assert_eq!(palette.resolve("error nope").fg, Some(Color::Red));
    }
}
