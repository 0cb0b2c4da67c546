//! Formatting of variadic message fragments into a single log line.

use std::fmt::{self, Display, Write as _};

/// One newline-terminated log record.
///
/// Fragments are concatenated in order using their `Display` form, with no
/// separator and no prefix. Callers include their own spacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine(String);

impl LogLine {
    /// Builds a line from heterogeneous fragments.
    #[must_use]
    pub fn from_fragments(fragments: &[&dyn Display]) -> Self {
        let mut text = String::new();
        for fragment in fragments {
            // Writing into a `String` only fails if a `Display` impl reports an
            // error; such a fragment contributes whatever it wrote.
            let _ = write!(text, "{fragment}");
        }
        text.push('\n');
        Self(text)
    }

    /// The line including its trailing newline.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The line without its trailing newline.
    #[must_use]
    pub fn content(&self) -> &str {
        self.0.strip_suffix('\n').unwrap_or(&self.0)
    }

    /// Raw bytes to append, including the newline.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content())
    }
}
