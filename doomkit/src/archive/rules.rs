//! Canonical roles and the name-pattern table that recognizes them.
//!
//! Classification is data-driven: supporting a mirror whose archive names its
//! payload differently means adding a row to [`RULES`], not a branch.

use serde::Serialize;

/// Logical category of a required payload file.
///
/// Each role maps to exactly one fixed output filename. Variant order is the
/// order used when listing produced files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalRole {
    /// The game executable (`DOOM.EXE`).
    PrimaryExecutable,
    /// The shareware game data (`DOOM1.WAD`).
    PrimaryData,
    /// The setup utility (`SETUP.EXE`); optional.
    AuxiliarySetup,
}

impl CanonicalRole {
    /// Every role, in listing order.
    pub const ALL: [CanonicalRole; 3] = [
        CanonicalRole::PrimaryExecutable,
        CanonicalRole::PrimaryData,
        CanonicalRole::AuxiliarySetup,
    ];

    /// The fixed filename this role is stored under.
    pub fn file_name(self) -> &'static str {
        match self {
            CanonicalRole::PrimaryExecutable => "DOOM.EXE",
            CanonicalRole::PrimaryData => "DOOM1.WAD",
            CanonicalRole::AuxiliarySetup => "SETUP.EXE",
        }
    }

    /// Whether the game cannot start without this file.
    pub fn is_required(self) -> bool {
        !matches!(self, CanonicalRole::AuxiliarySetup)
    }
}

/// A test over a normalized (uppercase base) entry name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePredicate {
    /// Name equals one of the listed names.
    OneOf(&'static [&'static str]),
    /// Name starts with `prefix` and ends with `suffix`.
    PrefixSuffix {
        prefix: &'static str,
        suffix: &'static str,
    },
}

impl NamePredicate {
    /// Test a normalized name.
    pub fn matches(&self, name: &str) -> bool {
        match *self {
            NamePredicate::OneOf(names) => names.contains(&name),
            NamePredicate::PrefixSuffix { prefix, suffix } => {
                name.len() >= prefix.len() + suffix.len()
                    && name.starts_with(prefix)
                    && name.ends_with(suffix)
            }
        }
    }
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    pub predicate: NamePredicate,
    pub role: CanonicalRole,
}

/// Classification table, evaluated top to bottom; first match wins per entry.
pub const RULES: &[ClassificationRule] = &[
    ClassificationRule {
        predicate: NamePredicate::OneOf(&["DOOM.EXE", "DOOM1.EXE", "DOOM2.EXE"]),
        role: CanonicalRole::PrimaryExecutable,
    },
    ClassificationRule {
        predicate: NamePredicate::PrefixSuffix {
            prefix: "DOOM",
            suffix: ".EXE",
        },
        role: CanonicalRole::PrimaryExecutable,
    },
    ClassificationRule {
        predicate: NamePredicate::OneOf(&["DOOM1.WAD", "DOOM.WAD", "DOOM_1.WAD"]),
        role: CanonicalRole::PrimaryData,
    },
    ClassificationRule {
        predicate: NamePredicate::OneOf(&["SETUP.EXE"]),
        role: CanonicalRole::AuxiliarySetup,
    },
];

/// Base name of an archive entry path.
///
/// Archives produced on DOS may use `\` as separator, so both are honored.
/// Returns `None` for directory entries and empty names.
pub fn base_name(entry_name: &str) -> Option<&str> {
    if entry_name.ends_with('/') || entry_name.ends_with('\\') {
        return None;
    }
    let base = entry_name.rsplit(['/', '\\']).next().unwrap_or(entry_name);
    (!base.is_empty()).then_some(base)
}

/// Normalize an entry base name for matching.
pub fn normalize(base: &str) -> String {
    base.to_ascii_uppercase()
}

/// Classify a normalized name against a rule table.
pub fn classify_with(rules: &[ClassificationRule], name: &str) -> Option<CanonicalRole> {
    rules
        .iter()
        .find(|rule| rule.predicate.matches(name))
        .map(|rule| rule.role)
}

/// Classify a normalized name against [`RULES`].
pub fn classify(name: &str) -> Option<CanonicalRole> {
    classify_with(RULES, name)
}
