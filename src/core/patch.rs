//! Textual post-processing of the synthesized document.
//!
//! The AWS bindings name the security group rule flag `self_attribute`
//! because `self` is reserved in Rust, while Terraform only accepts `self`.
//! The default patch rewrites the emitted file after synthesis.

use crate::domain::ports::Storage;
use crate::utils::error::{Result, StackError};
use serde::{Deserialize, Serialize};

pub const SELF_ATTRIBUTE_PATCH: (&str, &str) = ("self_attribute", "self");

/// Global literal substitution of `from` with `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    pub from: String,
    pub to: String,
}

impl Default for Patch {
    fn default() -> Self {
        Self::new(SELF_ATTRIBUTE_PATCH.0, SELF_ATTRIBUTE_PATCH.1)
    }
}

impl Patch {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// A patch whose replacement contains its own pattern would grow the
    /// document on every run.
    pub fn check(&self) -> Result<()> {
        let reason = if self.from.is_empty() {
            Some("pattern cannot be empty")
        } else if self.to.contains(&self.from) {
            Some("replacement contains the pattern, so repeated runs would not converge")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(StackError::InvalidPatch {
                from: self.from.clone(),
                to: self.to.clone(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Returns the patched text and the number of replacements made.
    pub fn apply(&self, text: &str) -> (String, usize) {
        let count = text.matches(self.from.as_str()).count();
        if count == 0 {
            return (text.to_string(), 0);
        }
        (text.replace(self.from.as_str(), &self.to), count)
    }
}

/// Applies every patch in order to an in-memory document.
///
/// Fails when any pattern is still present afterwards, which happens when
/// a replacement joins with its neighbours to form a pattern again. A
/// result free of every pattern is a fixed point, so a second run makes
/// no replacements.
pub fn apply_all(patches: &[Patch], text: &str) -> Result<(String, usize)> {
    let mut current = text.to_string();
    let mut total = 0;
    for patch in patches {
        patch.check()?;
        let (next, count) = patch.apply(&current);
        current = next;
        total += count;
    }

    if let Some(patch) = patches.iter().find(|p| current.contains(p.from.as_str())) {
        return Err(StackError::InvalidPatch {
            from: patch.from.clone(),
            to: patch.to.clone(),
            reason: format!(
                "{} occurrence(s) remain after patching",
                current.matches(patch.from.as_str()).count()
            ),
        });
    }

    Ok((current, total))
}

/// Reads `path`, applies every patch and writes the result back.
///
/// Returns the patched document and the number of replacements. Both the
/// read and the write propagate their failure; the file is only rewritten
/// when at least one replacement happened.
pub async fn patch_file<S: Storage>(
    storage: &S,
    path: &str,
    patches: &[Patch],
) -> Result<(String, usize)> {
    let location = storage.locate(path);

    let bytes = storage
        .read_file(path)
        .await
        .map_err(|e| StackError::patch(&location, e))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        StackError::patch(
            &location,
            StackError::ConfigError {
                message: format!("document is not valid UTF-8: {}", e),
            },
        )
    })?;

    let (patched, replacements) = apply_all(patches, &text)?;

    if replacements == 0 {
        tracing::debug!("{} already patched, nothing to rewrite", location);
        return Ok((patched, 0));
    }

    storage
        .write_file(path, patched.as_bytes())
        .await
        .map_err(|e| StackError::patch(&location, e))?;

    tracing::info!(replacements, "Patched {}", location);
    Ok((patched, replacements))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patch_replaces_every_occurrence() {
        let text = r#"{"ingress":[{"self_attribute":false},{"self_attribute":true}]}"#;
        let (patched, count) = Patch::default().apply(text);
        assert_eq!(count, 2);
        assert_eq!(patched, r#"{"ingress":[{"self":false},{"self":true}]}"#);
        assert!(!patched.contains("self_attribute"));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let text = r#"{"egress":[{"self_attribute":false}]}"#;
        let (once, _) = apply_all(&[Patch::default()], text).unwrap();
        let (twice, count) = apply_all(&[Patch::default()], &once).unwrap();
        assert_eq!(once, twice);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_replacement_forming_the_pattern_again_is_rejected() {
        let err = apply_all(&[Patch::new("ab", "b")], "aab").unwrap_err();
        assert!(matches!(err, StackError::InvalidPatch { .. }));

        let text = r#"{"name":"selfself_attribute_attribute"}"#;
        assert!(apply_all(&[Patch::default()], text).is_err());
    }

    #[test]
    fn test_check_rejects_non_converging_patches() {
        assert!(Patch::default().check().is_ok());
        assert!(Patch::new("", "x").check().is_err());
        assert!(Patch::new("self", "self_attribute").check().is_err());
    }
}
