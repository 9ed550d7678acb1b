/// Result of formatting: where to write and what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormattedPost {
    pub filename: String,
    pub content: String,
}

/// Ordered `key: value` header lines. Values are already formatted.
#[derive(Debug, Clone, Default)]
pub(crate) struct FrontMatter {
    entries: Vec<(String, String)>,
}

impl FrontMatter {
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn render(&self) -> String {
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect();
        format!("---\n{}\n---\n\n<!-- Your content here -->\n", lines.join("\n"))
    }
}
