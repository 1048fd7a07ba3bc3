use serde::{Deserialize, Serialize};

/// Class names applied to the rendered form regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleMap {
    pub container: String,
    pub label: String,
    pub input: String,
    pub error: String,
    pub submit: String,
    pub cancel: String,
}

impl Default for StyleMap {
    fn default() -> Self {
        Self {
            container: "container".into(),
            label: "label".into(),
            input: "input".into(),
            error: "error".into(),
            submit: "submit".into(),
            cancel: "cancel".into(),
        }
    }
}

impl StyleMap {
    /// Defaults with the given overrides applied.
    pub fn with_overrides(overrides: &StyleOverrides) -> Self {
        let mut styles = Self::default();
        styles.apply(overrides);
        styles
    }

    pub fn apply(&mut self, overrides: &StyleOverrides) {
        let slots = [
            (&mut self.container, &overrides.container),
            (&mut self.label, &overrides.label),
            (&mut self.input, &overrides.input),
            (&mut self.error, &overrides.error),
            (&mut self.submit, &overrides.submit),
            (&mut self.cancel, &overrides.cancel),
        ];
        for (slot, value) in slots {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }
    }
}

/// Partial style map as supplied by the host; `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
    pub container: Option<String>,
    pub label: Option<String>,
    pub input: Option<String>,
    pub error: Option<String>,
    pub submit: Option<String>,
    pub cancel: Option<String>,
}
