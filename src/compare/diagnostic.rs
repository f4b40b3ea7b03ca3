//! Typed diagnostics produced by the comparison engine.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// Which pair of repositories a comparison covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Plugin sources (left) against content (right).
    PluginContent,
    /// Content (left) against playbooks (right).
    ContentPlaybook,
}

impl Phase {
    /// Report heading for the phase.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::PluginContent => "ERRORS in content repo diff to plugin repo",
            Self::ContentPlaybook => "ERRORS in playbook repo diff to content repo",
        }
    }

    /// Whether left entries under `security` are screened by the security policy.
    ///
    /// The plugin repository holds no security rules, so only the playbook
    /// phase screens its left side.
    #[must_use]
    pub fn screens_left_security(self) -> bool {
        matches!(self, Self::ContentPlaybook)
    }
}

/// Stable short code of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ErrorCode {
    /// Plugin has no content counterpart.
    #[serde(rename = "ERR11")]
    Err11,
    /// Content exists for a non-existent plugin.
    #[serde(rename = "ERR12")]
    Err12,
    /// Content filed under the wrong domain path.
    #[serde(rename = "ERR13")]
    Err13,
    /// Content missing a declared error key.
    #[serde(rename = "ERR14")]
    Err14,
    /// Content has undeclared extra error keys.
    #[serde(rename = "ERR15")]
    Err15,
    /// Content has no playbook counterpart.
    #[serde(rename = "ERR21")]
    Err21,
    /// Playbook exists for a non-existent content entry.
    #[serde(rename = "ERR22")]
    Err22,
    /// Playbook filed under the wrong domain path.
    #[serde(rename = "ERR23")]
    Err23,
    /// Playbook missing a content-declared error key.
    #[serde(rename = "ERR24")]
    Err24,
    /// Playbook has extra error keys.
    #[serde(rename = "ERR25")]
    Err25,
    /// Playbook role set disagrees with the content role set.
    #[serde(rename = "ERR26")]
    Err26,
}

impl ErrorCode {
    /// The code as printed, e.g. `ERR14`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Err11 => "ERR11",
            Self::Err12 => "ERR12",
            Self::Err13 => "ERR13",
            Self::Err14 => "ERR14",
            Self::Err15 => "ERR15",
            Self::Err21 => "ERR21",
            Self::Err22 => "ERR22",
            Self::Err23 => "ERR23",
            Self::Err24 => "ERR24",
            Self::Err25 => "ERR25",
            Self::Err26 => "ERR26",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What diverged between the two sides for one plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// The plugin is missing from the right side.
    MissingCounterpart,
    /// The right side files the plugin under another domain path.
    WrongLocation {
        /// Domain path on the left side.
        expected: String,
        /// Domain path on the right side.
        found: String,
    },
    /// An error key of the left side is missing on the right side.
    MissingKey {
        /// The missing key.
        key: String,
    },
    /// Error keys only the right side has.
    ExtraKeys {
        /// The extra keys, sorted.
        keys: BTreeSet<String>,
    },
    /// Both sides have the key but disagree on its role tags.
    RoleMismatch {
        /// The shared key.
        key: String,
        /// Role tags on the left side.
        expected: BTreeSet<String>,
        /// Role tags on the right side.
        found: BTreeSet<String>,
    },
    /// The plugin exists only on the right side.
    UnexpectedCounterpart,
}

/// One detected divergence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Stable short code.
    pub code: ErrorCode,
    /// Plugin the diagnostic is about.
    pub plugin: String,
    /// Domain path of the plugin on the side it was found.
    pub domain_path: String,
    /// Details of the divergence.
    #[serde(flatten)]
    pub finding: Finding,
}

impl Diagnostic {
    /// Builds a diagnostic, deriving its code from the phase and finding.
    #[must_use]
    pub fn new(phase: Phase, plugin: &str, domain_path: &str, finding: Finding) -> Self {
        Self {
            code: code_for(phase, &finding),
            plugin: plugin.to_string(),
            domain_path: domain_path.to_string(),
            finding,
        }
    }

    /// Human-readable message, without the code prefix.
    #[must_use]
    pub fn message(&self) -> String {
        let (p, path) = (&self.plugin, &self.domain_path);
        match (&self.finding, self.code) {
            (Finding::MissingCounterpart, ErrorCode::Err11) => {
                format!("Plugin {p} in {path} has no content dir at all")
            }
            (Finding::MissingCounterpart, _) => {
                format!("Plugin {p} in {path} has no playbook dir at all")
            }
            (Finding::UnexpectedCounterpart, ErrorCode::Err12) => {
                format!("Content of non-existent plugin {p} at {path}")
            }
            (Finding::UnexpectedCounterpart, _) => {
                format!("Playbook of plugin {p} at {path} no longer exists in content repo")
            }
            (Finding::WrongLocation { expected, found }, ErrorCode::Err13) => {
                format!("Should move {p}'s content dir from domain {found} to {expected}")
            }
            (Finding::WrongLocation { expected, found }, _) => {
                format!("Should move {p}'s playbook dir from {found} to {expected}")
            }
            (Finding::MissingKey { key }, ErrorCode::Err14) => {
                format!("{p} {path}: content missing error-key: {key}")
            }
            (Finding::MissingKey { key }, _) => {
                format!("{path} {p}'s playbooks missing error-key: {key}")
            }
            (Finding::ExtraKeys { keys }, ErrorCode::Err15) => {
                format!("{p}'s content has extra error-key(s): {}", format_set(keys))
            }
            (Finding::ExtraKeys { keys }, _) => {
                format!("{path} {p}'s playbook has extra error-key(s): {}", format_set(keys))
            }
            (Finding::RoleMismatch { key, expected, found }, _) => format!(
                "Error-key {path} {p} {key}'s playbooks have inconsistent product dirs with content: \
                 content repo contains {}; playbooks repo contains {}",
                format_set(expected),
                format_set(found)
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message())
    }
}

fn code_for(phase: Phase, finding: &Finding) -> ErrorCode {
    match (phase, finding) {
        (Phase::PluginContent, Finding::MissingCounterpart) => ErrorCode::Err11,
        (Phase::PluginContent, Finding::UnexpectedCounterpart) => ErrorCode::Err12,
        (Phase::PluginContent, Finding::WrongLocation { .. }) => ErrorCode::Err13,
        (Phase::PluginContent, Finding::MissingKey { .. }) => ErrorCode::Err14,
        (Phase::PluginContent, Finding::ExtraKeys { .. }) => ErrorCode::Err15,
        (Phase::ContentPlaybook, Finding::MissingCounterpart) => ErrorCode::Err21,
        (Phase::ContentPlaybook, Finding::UnexpectedCounterpart) => ErrorCode::Err22,
        (Phase::ContentPlaybook, Finding::WrongLocation { .. }) => ErrorCode::Err23,
        (Phase::ContentPlaybook, Finding::MissingKey { .. }) => ErrorCode::Err24,
        (Phase::ContentPlaybook, Finding::ExtraKeys { .. }) => ErrorCode::Err25,
        (_, Finding::RoleMismatch { .. }) => ErrorCode::Err26,
    }
}

/// Formats a sorted set as `{a, b}`.
pub(crate) fn format_set(items: &BTreeSet<String>) -> String {
    let joined: Vec<&str> = items.iter().map(String::as_str).collect();
    format!("{{{}}}", joined.join(", "))
}
