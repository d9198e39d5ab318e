//! Block extractor - fenced code segments → file roles
//!
//! Classification is a fixed priority list: the first rule whose marker
//! appears in a block wins (providers > variables > outputs > main).

use std::sync::LazyLock;

use regex::Regex;

use crate::bundle::{ClassifiedBundle, Role};

/// Fenced segment, optionally tagged `hcl` or `terraform`
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static FENCED_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```(?:hcl|terraform)?\s*\n(.*?)```").unwrap());

const PROVIDER_MARKERS: [&str; 2] = ["terraform {", "provider \""];
const VARIABLE_MARKER: &str = "variable \"";
const OUTPUT_MARKER: &str = "output \"";

/// Split raw text (an LLM reply or caller-supplied code) into a bundle.
///
/// Text without any fenced segment is taken wholesale as `main`.
pub fn extract_blocks(text: &str) -> ClassifiedBundle {
    let mut bundle = ClassifiedBundle::new();

    let segments: Vec<&str> = FENCED_BLOCK_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    if segments.is_empty() {
        bundle.set(Role::Main, text.trim());
        return bundle;
    }

    for segment in segments {
        let block = segment.trim();
        if block.is_empty() {
            continue;
        }
        bundle.append(classify(block), block);
    }

    bundle
}

/// Pick the role for a single trimmed block
pub fn classify(block: &str) -> Role {
    if PROVIDER_MARKERS.iter().any(|marker| block.contains(marker)) {
        Role::Providers
    } else if block.contains(VARIABLE_MARKER) {
        Role::Variables
    } else if block.contains(OUTPUT_MARKER) {
        Role::Outputs
    } else {
        Role::Main
    }
}
