//! Manifest artifact encoding.
//!
//! The artifact is a small script that defines `structure` and exposes it both
//! through `module.exports` and `window.structure`. Readers never evaluate it:
//! [`parse_artifact`] locates the assignment and deserializes the literal.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use crate::core::error::ManifestError;
use crate::core::node::Tree;

const ASSIGNMENT_MARKERS: &[&str] = &["const structure =", "module.exports =", "window.structure ="];

/// Render the artifact text for `tree`
pub fn render_artifact(tree: &Tree, generated_at: DateTime<Utc>) -> Result<String, ManifestError> {
    let literal = serde_json::to_string_pretty(tree)?;
    Ok(format!(
        "// Auto-generated navigation manifest\n\
         // Generated: {}\n\
         \n\
         const structure = {};\n\
         \n\
         if (typeof module !== 'undefined' && module.exports) {{\n  module.exports = structure;\n}}\n\
         \n\
         if (typeof window !== 'undefined') {{\n  window.structure = structure;\n}}\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        literal
    ))
}

/// Parse an artifact (or bare JSON) into a tree
pub fn parse_artifact(text: &str) -> Result<Tree, ManifestError> {
    let literal = ASSIGNMENT_MARKERS
        .iter()
        .filter_map(|marker| text.find(marker).map(|at| at + marker.len()))
        .min()
        .map(|start| &text[start..])
        .unwrap_or(text);

    // Trailing script after the literal is ignored
    let mut de = serde_json::Deserializer::from_str(literal);
    let tree = Tree::deserialize(&mut de)?;
    Ok(tree)
}
