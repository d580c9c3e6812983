use std::fmt;

use serde::{Deserialize, Serialize};

/// How a raw identifier is turned into a join key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyTransform {
    /// Trim, then drop everything from the first hyphen on (`ORD1-2` → `ORD1`).
    #[default]
    StripSuffix,
    /// Trim only.
    Trim,
}

/// Canonical comparison key. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Normalize `raw` with the default transform. `None` means "no identifier".
    pub fn from_raw(raw: &str) -> Option<Self> {
        Self::with_transform(raw, KeyTransform::StripSuffix)
    }

    pub fn with_transform(raw: &str, transform: KeyTransform) -> Option<Self> {
        let key = apply_key_transform(raw, transform);
        if key.is_empty() {
            None
        } else {
            Some(Self(key.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strip surrounding whitespace and any `-<variant>` suffix.
///
/// The result may be empty (blank input, or input starting with a hyphen);
/// callers treat that as "no identifier".
pub fn normalize_key(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.split_once('-') {
        Some((base, _)) => base.trim(),
        None => trimmed,
    }
}

pub fn apply_key_transform(raw: &str, transform: KeyTransform) -> &str {
    match transform {
        KeyTransform::StripSuffix => normalize_key(raw),
        KeyTransform::Trim => raw.trim(),
    }
}
