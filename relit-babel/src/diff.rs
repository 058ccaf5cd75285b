//! Difference reports between a conversion and what is already on disk
//!
//! Two modes: compare the conversion of an input against an existing target, or,
//! with no target, convert there and back again and compare against the input.

use crate::error::Result;
use crate::options::ConvertOptions;
use crate::registry::LanguageRegistry;
use similar::TextDiff;

/// Unified diff of `old` → `new`, `None` when they are identical.
pub fn diff_report(old: &str, new: &str, old_name: &str, new_name: &str) -> Option<String> {
    if old == new {
        return None;
    }
    let diff = TextDiff::from_lines(old, new);
    Some(
        diff.unified_diff()
            .context_radius(3)
            .header(old_name, new_name)
            .to_string(),
    )
}

/// An existing conversion result to compare against.
pub struct DiffTarget<'a> {
    pub name: &'a str,
    pub text: &'a str,
}

/// Outcome of [`diff`]: the names compared and the report, if they differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOutcome {
    pub old_name: String,
    pub new_name: String,
    pub report: Option<String>,
}

impl DiffOutcome {
    pub fn has_differences(&self) -> bool {
        self.report.is_some()
    }
}

/// Convert `input` and report how it differs from `target`.
///
/// Without a target the result is converted back with the inverse direction and
/// compared against `input` itself.
pub fn diff(
    input: &str,
    input_name: &str,
    target: Option<DiffTarget<'_>>,
    options: &ConvertOptions,
    registry: &LanguageRegistry,
) -> Result<DiffOutcome> {
    let plain = ConvertOptions {
        strip: false,
        ..options.clone()
    };
    let converted = crate::convert(input, &plain, registry)?;

    let (old, old_name, new, new_name) = match target {
        Some(target) => (
            target.text.to_string(),
            target.name.to_string(),
            converted,
            format!("<conversion of {input_name}>"),
        ),
        None => {
            let back = crate::convert(&converted, &plain.inverted(), registry)?;
            (
                input.to_string(),
                input_name.to_string(),
                back,
                format!("<round-conversion of {input_name}>"),
            )
        }
    };

    Ok(DiffOutcome {
        report: diff_report(&old, &new, &old_name, &new_name),
        old_name,
        new_name,
    })
}
