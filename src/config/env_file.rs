//! Environment file merging.
//!
//! The frontend shares its `.env` with the backend one directory up. Values
//! from that file are overlaid onto an explicit [`EnvironmentMap`], with the
//! file winning over anything already set. Writing back into the process
//! environment is opt-in via [`EnvironmentMap::export_to_process`].

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use super::constants::{DEFAULT_PASSTHROUGH_VALUE, ENV_FILE_NAME, PARENT_ENV_DIR};
use crate::errors::{AppError, AppResult};

/// Resolved environment used to assemble the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentMap {
    vars: BTreeMap<String, String>,
}

/// What a merge did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Whether the env file existed
    pub found: bool,
    /// Number of key/value pairs applied
    pub applied: usize,
    /// Number of malformed lines skipped
    pub skipped: usize,
}

impl EnvironmentMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    ///
    /// Entries whose key or value is not valid UTF-8 are left out.
    pub fn from_process() -> Self {
        let vars = env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Value for `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Value for `key`, or the passthrough default when unset.
    pub fn get_or_default(&self, key: &str) -> String {
        self.get(key)
            .unwrap_or(DEFAULT_PASSTHROUGH_VALUE)
            .to_string()
    }

    /// Set `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay the contents of a dotenv file, overwriting existing keys.
    ///
    /// A missing file is not an error. Undecodable bytes are replaced, and a
    /// line dotenvy rejects is either read as a plain `KEY=value` assignment
    /// or skipped with a warning. Only I/O failures are returned.
    pub fn merge_env_file(&mut self, path: &Path) -> AppResult<MergeOutcome> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No env file found, skipping merge");
                return Ok(MergeOutcome::default());
            }
            Err(e) => return Err(AppError::env_file(path, dotenvy::Error::Io(e))),
        };

        let contents = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = contents {
            tracing::warn!(path = %path.display(), "Env file is not valid UTF-8, replacing bad bytes");
        }

        let mut outcome = MergeOutcome {
            found: true,
            ..MergeOutcome::default()
        };

        // An unterminated quote swallows the rest of the file into one bad
        // entry; rescan what follows its first line.
        let mut pending = Some(contents.into_owned());
        while let Some(text) = pending.take() {
            let mut entries = dotenvy::from_read_iter(text.as_bytes()).peekable();
            while let Some(entry) = entries.next() {
                match entry {
                    Ok((key, value)) => {
                        self.vars.insert(key, value);
                        outcome.applied += 1;
                    }
                    Err(dotenvy::Error::LineParse(line, index)) => {
                        if let Some((key, value)) = plain_assignment(&line) {
                            tracing::debug!(key = %key, "Read env file line as plain assignment");
                            self.vars.insert(key, value);
                            outcome.applied += 1;
                            continue;
                        }

                        let bad_line = line.lines().next().unwrap_or_default();
                        tracing::warn!(
                            path = %path.display(),
                            line = %bad_line,
                            index,
                            "Skipping malformed env file line"
                        );
                        outcome.skipped += 1;

                        if line.contains('\n') && entries.peek().is_none() {
                            pending = line
                                .split_once('\n')
                                .map(|(_, rest)| rest.to_string());
                        }
                    }
                    Err(e) => return Err(AppError::env_file(path, e)),
                }
            }
        }

        tracing::debug!(
            path = %path.display(),
            applied = outcome.applied,
            skipped = outcome.skipped,
            "Merged env file"
        );

        Ok(outcome)
    }

    /// Write every entry into the process environment.
    ///
    /// Must run before anything else reads the environment; it is not safe
    /// to call while other threads access it.
    pub fn export_to_process(&self) {
        for (key, value) in &self.vars {
            env::set_var(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for EnvironmentMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Read a single line as `KEY=value`, splitting at the first `=` and
/// trimming both sides. Matching outer quotes are removed and an unquoted
/// value ends at ` #`.
fn plain_assignment(line: &str) -> Option<(String, String)> {
    if line.contains('\n') {
        return None;
    }

    let line = line.trim();
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return None;
    }

    let value = value.trim();
    let value = match unquote(value) {
        Some(inner) => inner,
        None => value.split(" #").next().unwrap_or_default().trim_end(),
    };

    Some((key.to_string(), value.to_string()))
}

fn unquote(value: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}

/// Merge an env file straight into the process environment.
///
/// Only the file's own entries are written; existing process values for the
/// same keys are overwritten.
pub fn merge_into_process(path: &Path) -> AppResult<MergeOutcome> {
    let mut from_file = EnvironmentMap::new();
    let outcome = from_file.merge_env_file(path)?;
    from_file.export_to_process();
    Ok(outcome)
}

/// Location of the shared env file for a given working directory.
pub fn parent_env_path(cwd: &Path) -> PathBuf {
    cwd.join(PARENT_ENV_DIR).join(ENV_FILE_NAME)
}

/// Location of the shared env file for the current working directory.
pub fn default_parent_env_path() -> AppResult<PathBuf> {
    Ok(parent_env_path(&env::current_dir()?))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;

    use super::*;

    fn write_env(contents: impl AsRef<[u8]>) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_ref()).unwrap();
        file
    }

    #[test]
    fn test_parent_env_path() {
        let path = parent_env_path(Path::new("/srv/app/frontend"));
        assert_eq!(path, PathBuf::from("/srv/app/frontend/../.env"));
    }

    #[test]
    #[serial]
    fn test_missing_file_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut env: EnvironmentMap = [("FOO", "old")].into_iter().collect();

        let outcome = env.merge_env_file(&dir.path().join(".env")).unwrap();

        assert_eq!(outcome, MergeOutcome::default());
        assert_eq!(env.get("FOO"), Some("old"));
        assert_eq!(env.len(), 1);
    }

    #[test]
    #[serial]
    fn test_file_values_win() {
        let file = write_env("FOO=bar\nNEW=value\n");
        let mut env: EnvironmentMap = [("FOO", "old")].into_iter().collect();

        let outcome = env.merge_env_file(file.path()).unwrap();

        assert!(outcome.found);
        assert_eq!(outcome.applied, 2);
        assert_eq!(env.get("FOO"), Some("bar"));
        assert_eq!(env.get("NEW"), Some("value"));
    }

    #[test]
    #[serial]
    fn test_comments_and_quotes() {
        let file = write_env("# shared settings\nexport API=\"http://localhost:8686\"\nEMPTY=\n");
        let mut env = EnvironmentMap::new();

        env.merge_env_file(file.path()).unwrap();

        assert_eq!(env.get("API"), Some("http://localhost:8686"));
        assert_eq!(env.get("EMPTY"), Some(""));
        assert_eq!(env.len(), 2);
    }

    #[test]
    #[serial]
    fn test_malformed_lines_skipped() {
        let file = write_env("GOOD=1\nthis is not valid\nALSO_GOOD=2\n");
        let mut env = EnvironmentMap::new();

        let outcome = env.merge_env_file(file.path()).unwrap();

        assert_eq!(outcome.skipped, 1);
        assert_eq!(env.get("GOOD"), Some("1"));
        assert_eq!(env.get("ALSO_GOOD"), Some("2"));
    }

    #[test]
    #[serial]
    fn test_directory_path_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = EnvironmentMap::new();

        let err = env.merge_env_file(dir.path()).unwrap_err();

        assert_eq!(err.code(), "ENV_FILE_ERROR");
    }

    #[test]
    fn test_get_or_default() {
        let env: EnvironmentMap = [("SET", "yes")].into_iter().collect();
        assert_eq!(env.get_or_default("SET"), "yes");
        assert_eq!(env.get_or_default("UNSET"), "");
    }

    #[test]
    #[serial]
    fn test_unquoted_value_with_spaces() {
        let file = write_env("NEXT_PUBLIC_REMOTE_PATTERNS=a.com, b.com\nAFTER=1\n");
        let mut env = EnvironmentMap::new();

        let outcome = env.merge_env_file(file.path()).unwrap();

        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(env.get("NEXT_PUBLIC_REMOTE_PATTERNS"), Some("a.com, b.com"));
        assert_eq!(env.get("AFTER"), Some("1"));
    }

    #[test]
    #[serial]
    fn test_unterminated_quote_skips_only_its_line() {
        let file = write_env("A=\"unterminated\nB=1\nC=2\n");
        let mut env = EnvironmentMap::new();

        let outcome = env.merge_env_file(file.path()).unwrap();

        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.applied, 2);
        assert_eq!(env.get("A"), None);
        assert_eq!(env.get("B"), Some("1"));
        assert_eq!(env.get("C"), Some("2"));
    }

    #[test]
    #[serial]
    fn test_invalid_utf8_is_not_fatal() {
        let file = write_env(b"GOOD=1\nBAD=\xff\xfe\nALSO=2\n");
        let mut env = EnvironmentMap::new();

        let outcome = env.merge_env_file(file.path()).unwrap();

        assert!(outcome.found);
        assert_eq!(env.get("GOOD"), Some("1"));
        assert_eq!(env.get("ALSO"), Some("2"));
    }

    #[test]
    fn test_plain_assignment() {
        assert_eq!(
            plain_assignment("export KEY = a b  # note"),
            Some(("KEY".to_string(), "a b".to_string()))
        );
        assert_eq!(
            plain_assignment("KEY='x = y'"),
            Some(("KEY".to_string(), "x = y".to_string()))
        );
        assert_eq!(plain_assignment("this is not valid"), None);
        assert_eq!(plain_assignment("BAD KEY=1"), None);
        assert_eq!(plain_assignment("A=\"x\nB=1"), None);
    }
}
