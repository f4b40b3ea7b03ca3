//! Plugin source scanner.
//!
//! Every source file below the `plugins` marker is one plugin; its domain is
//! the directory path after the marker and its error keys are the
//! `ERROR_KEY` constants it assigns.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::context::ServiceContext;
use crate::error::{ScanError, ScanWarning};
use crate::scan::{segments_after_marker, walk_root, ScanOutcome};
use crate::taxonomy::PluginRecord;

/// Marker segment preceding the domain path in the plugin repository.
pub const PLUGINS_MARKER: &str = "plugins";

/// Directories whose plugins never get content.
const EXCLUDED_DIRS: [&str; 2] = ["security", "util"];

const ERROR_KEY_PREFIX: &str = "ERROR_KEY";

/// Scans the plugin source tree rooted at `root`.
///
/// Unreadable source files are kept without keys and reported as warnings.
/// Lines that are not valid UTF-8 are skipped one by one.
///
/// # Errors
///
/// Returns an error if `root` cannot be walked.
pub fn scan(ctx: &ServiceContext, root: &Path) -> Result<ScanOutcome<PluginRecord>, ScanError> {
    let mut outcome = ScanOutcome::default();

    for listing in walk_root(ctx, PLUGINS_MARKER, root)? {
        let dir_name = listing.path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if EXCLUDED_DIRS.contains(&dir_name) {
            continue;
        }
        let Some(segments) = segments_after_marker(root, &listing.path, PLUGINS_MARKER) else {
            continue;
        };
        if segments.is_empty() {
            continue;
        }
        let domain = segments.join("/");

        for file in listing.files.iter().filter(|f| is_plugin_source(f)) {
            let path = listing.path.join(file);
            let Some(name) = Path::new(file).file_stem().map(|s| s.to_string_lossy().into_owned())
            else {
                continue;
            };
            let error_keys = read_error_keys(ctx, &path, &mut outcome.warnings);
            debug!(plugin = %name, domain = %domain, keys = error_keys.len(), "Found plugin");

            let record = PluginRecord { domain_path: domain.clone(), error_keys };
            if let Some(previous) = outcome.map.insert(name.clone(), record) {
                if previous.domain_path != domain {
                    let warning = ScanWarning::DuplicatePlugin {
                        name,
                        previous: previous.domain_path,
                        replacement: domain.clone(),
                    };
                    warn!(%warning, "Plugin name collision");
                    outcome.warnings.push(warning);
                }
            }
        }
    }

    info!(
        repo = PLUGINS_MARKER,
        plugins = outcome.map.len(),
        warnings = outcome.warnings.len(),
        "Scan complete"
    );
    Ok(outcome)
}

fn is_plugin_source(file: &str) -> bool {
    !file.ends_with(".pyc") && file != "__init__.py"
}

fn read_error_keys(
    ctx: &ServiceContext,
    path: &Path,
    warnings: &mut Vec<ScanWarning>,
) -> BTreeSet<String> {
    let contents = match ctx.fs.read_bytes(path) {
        Ok(contents) => contents,
        Err(e) => {
            let warning =
                ScanWarning::UnreadableSource { path: path.to_path_buf(), reason: e.to_string() };
            warn!(%warning, "Skipping unreadable plugin source");
            warnings.push(warning);
            return BTreeSet::new();
        }
    };

    let (keys, faults) = extract_error_keys(&contents);
    for (line, fault) in faults {
        let path = path.to_path_buf();
        let warning = match fault {
            LineFault::Malformed => ScanWarning::MalformedErrorKey { path, line },
            LineFault::Undecodable => ScanWarning::UndecodableErrorKey { path, line },
        };
        warn!(%warning, "Ignoring ERROR_KEY line");
        warnings.push(warning);
    }
    keys
}

/// Why an `ERROR_KEY` line yielded no key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineFault {
    Malformed,
    Undecodable,
}

/// Extracts `ERROR_KEY = "..."` values from source bytes.
///
/// Lines are decoded one at a time, so a stray non-UTF-8 byte only costs
/// the line it sits on. Returns the keys and the one-based numbers of
/// `ERROR_KEY` lines that yielded nothing.
fn extract_error_keys(contents: &[u8]) -> (BTreeSet<String>, Vec<(usize, LineFault)>) {
    let mut keys = BTreeSet::new();
    let mut faults = Vec::new();

    for (idx, raw) in contents.split(|b| *b == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        if !raw.starts_with(ERROR_KEY_PREFIX.as_bytes()) {
            continue;
        }
        let Ok(line) = std::str::from_utf8(raw) else {
            faults.push((idx + 1, LineFault::Undecodable));
            continue;
        };
        match parse_assignment(line) {
            Some(key) => {
                keys.insert(key);
            }
            None => faults.push((idx + 1, LineFault::Malformed)),
        }
    }

    (keys, faults)
}

fn parse_assignment(line: &str) -> Option<String> {
    let (_, rest) = line.split_once('=')?;
    let value = rest.split('=').next().unwrap_or_default();
    let value = value.split('#').next().unwrap_or_default();
    let value = value.trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'');
    (!value.is_empty()).then(|| value.to_string())
}
