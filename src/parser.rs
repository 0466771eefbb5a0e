use std::sync::OnceLock;

use glam::DVec3;
use regex::{Captures, Regex};
use tracing::warn;

use crate::{BoneDefinition, BoneTable};

const DEFINEBONE_PATTERN: &str = concat!(
    r#"(?i)\$definebone\s+"#,
    r#""([^"]+)"\s+"#,
    r#""([^"]*)"\s+"#,
    r#"([-\d.eE+]+)\s+([-\d.eE+]+)\s+([-\d.eE+]+)\s+"#,
    r#"([-\d.eE+]+)\s+([-\d.eE+]+)\s+([-\d.eE+]+)"#,
);

static DEFINEBONE: OnceLock<Regex> = OnceLock::new();

fn definebone_regex() -> &'static Regex {
    DEFINEBONE.get_or_init(|| Regex::new(DEFINEBONE_PATTERN).expect("Valid $definebone pattern"))
}

/// Lazily yields every well formed `$definebone` statement in `text`.
///
/// Statements may span lines. Anything that does not match, including
/// statements with unparsable numbers, is skipped.
pub fn definebone_statements(text: &str) -> impl Iterator<Item = BoneDefinition> + '_ {
    definebone_regex()
        .captures_iter(text)
        .filter_map(|captures| statement_from_captures(&captures))
}

/// Parses all `$definebone` statements into a table. Returns an empty table
/// when there are none.
pub fn parse_definebones(text: &str) -> BoneTable {
    let mut table = BoneTable::new();
    for bone in definebone_statements(text) {
        if let Some(previous) = table.insert(bone) {
            warn!(bone = %previous.name, "duplicate $definebone, keeping the last one");
        }
    }
    table
}

/// True if any line declares an `$ikchain`.
pub fn detect_ik_chains(text: &str) -> bool {
    text.lines()
        .any(|line| line.trim().to_lowercase().starts_with("$ikchain"))
}

fn statement_from_captures(captures: &Captures<'_>) -> Option<BoneDefinition> {
    let number = |group: usize| -> Option<f64> {
        captures
            .get(group)?
            .as_str()
            .parse()
            .ok()
            .filter(|value: &f64| value.is_finite())
    };

    let position = DVec3::new(number(3)?, number(4)?, number(5)?);
    let rotation = DVec3::new(number(6)?, number(7)?, number(8)?);

    Some(BoneDefinition::new(
        captures.get(1)?.as_str(),
        captures.get(2)?.as_str(),
        position,
        rotation,
    ))
}
