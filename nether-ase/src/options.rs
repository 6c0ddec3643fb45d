//! Decoder configuration

use serde::Deserialize;

/// Options controlling how strictly a document is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Reject header and frame magic mismatches
    ///
    /// When disabled, a mismatch is logged and decoding continues with the
    /// value that was actually read.
    pub strict_magic: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { strict_magic: true }
    }
}

impl DecodeOptions {
    pub fn with_strict_magic(mut self, strict: bool) -> Self {
        self.strict_magic = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_strict() {
        assert!(DecodeOptions::default().strict_magic);
        assert!(!DecodeOptions::default().with_strict_magic(false).strict_magic);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: DecodeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, DecodeOptions::default());

        let options: DecodeOptions = serde_json::from_str(r#"{"strict_magic": false}"#).unwrap();
        assert!(!options.strict_magic);
    }
}
