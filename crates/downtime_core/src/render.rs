//! Config-text rendering helpers.

use crate::error::AppError;

/// Quotes a raw string for embedding in generated configuration.
pub trait StringEscaper {
    /// # Errors
    /// Returns [`AppError::Render`] when `raw` cannot be represented.
    fn render_string(&self, raw: &str) -> Result<String, AppError>;
}

/// Objects that render themselves as configuration blocks.
pub trait ConfigRenderer {
    fn to_config_string(&self) -> Result<String, AppError>;

    /// Representation in the legacy (1.x) config format.
    fn to_legacy_config_string(&self) -> Result<String, AppError>;
}

/// Default escaper: double-quoted string with C-style escapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigEscaper;

impl StringEscaper for ConfigEscaper {
    fn render_string(&self, raw: &str) -> Result<String, AppError> {
        let mut rendered = String::with_capacity(raw.len() + 2);
        rendered.push('"');
        for ch in raw.chars() {
            match ch {
                '\\' => rendered.push_str("\\\\"),
                '"' => rendered.push_str("\\\""),
                '\t' => rendered.push_str("\\t"),
                '\r' => rendered.push_str("\\r"),
                '\n' => rendered.push_str("\\n"),
                '\u{0c}' => rendered.push_str("\\f"),
                '\u{08}' => rendered.push_str("\\b"),
                c if c.is_control() => {
                    return Err(AppError::Render(format!(
                        "control character U+{:04X} cannot be embedded in {:?}",
                        c as u32, raw
                    )));
                }
                c => rendered.push(c),
            }
        }
        rendered.push('"');
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigEscaper, StringEscaper};
    use crate::AppError;

    #[test]
    fn plain_tokens_are_wrapped_in_quotes() {
        assert_eq!(
            ConfigEscaper.render_string("09:00-17:00").expect("render"),
            "\"09:00-17:00\""
        );
        assert_eq!(ConfigEscaper.render_string("").expect("render"), "\"\"");
    }

    #[test]
    fn special_characters_are_escaped() {
        let rendered = ConfigEscaper
            .render_string("say \"hi\"\\\n\tnow")
            .expect("render");
        assert_eq!(rendered, "\"say \\\"hi\\\"\\\\\\n\\tnow\"");
    }

    #[test]
    fn macros_and_unicode_pass_through() {
        assert_eq!(
            ConfigEscaper.render_string("$host.name$ – ü").expect("render"),
            "\"$host.name$ – ü\""
        );
    }

    #[test]
    fn nul_bytes_are_rejected() {
        let err = ConfigEscaper
            .render_string("mon\0day")
            .expect_err("nul must not render");
        assert!(
            matches!(err, AppError::Render(ref message) if message.contains("U+0000")),
            "unexpected error: {}",
            err
        );
    }
}
