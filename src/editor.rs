use std::env;

use tracing::debug;

use crate::error::HoteditError;

#[cfg(windows)]
const FALLBACK_EDITOR: &str = "notepad.exe";
#[cfg(not(windows))]
const FALLBACK_EDITOR: &str = "vi";

/// A resolved editor invocation, shell-split into program and arguments.
///
/// Parsed once per edit session and immutable afterwards. Handles editor
/// strings with flags and quoting, e.g. `code --wait` or
/// `nvim -c 'set ft=markdown'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    program: String,
    args: Vec<String>,
}

impl EditorCommand {
    pub fn parse(raw: &str) -> Result<Self, HoteditError> {
        let mut argv = shlex::split(raw).ok_or_else(|| {
            HoteditError::Configuration(format!("couldn't split editor command `{raw}`"))
        })?;
        if argv.is_empty() {
            return Err(HoteditError::Configuration("empty editor command".into()));
        }
        let program = argv.remove(0);
        Ok(Self { program, args: argv })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Configuration values consulted when no explicit editor is given.
///
/// Capturing these up front keeps [`resolve_editor`] pure; the process
/// environment is read once, in [`EditorSources::from_environment`], at the
/// call site that owns process-wide configuration.
#[derive(Debug, Clone, Default)]
pub struct EditorSources {
    pub git_core_editor: Option<String>,
    pub env_editor: Option<String>,
    pub env_visual: Option<String>,
}

impl EditorSources {
    /// Snapshot git `core.editor`, `$EDITOR` and `$VISUAL`.
    pub fn from_environment() -> Self {
        Self {
            git_core_editor: read_git_editor(),
            env_editor: env::var("EDITOR").ok().filter(|v| !v.is_empty()),
            env_visual: env::var("VISUAL").ok().filter(|v| !v.is_empty()),
        }
    }
}

/// git `core.editor`, if a default git config is readable at all
fn read_git_editor() -> Option<String> {
    let cfg = git2::Config::open_default().ok()?;
    let entry = cfg.get_entry("core.editor").ok()?;
    entry.value().map(String::from)
}

/// Pick the editor command string for this session.
///
/// Resolution order: explicit argument, git `core.editor`, `$EDITOR`,
/// `$VISUAL`, platform default. A candidate always exists because every
/// supported platform has a default.
pub fn resolve_editor(explicit: Option<&str>, sources: &EditorSources) -> String {
    explicit
        .map(str::to_owned)
        .or_else(|| sources.git_core_editor.clone())
        .or_else(|| sources.env_editor.clone())
        .or_else(|| sources.env_visual.clone())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_owned())
}

/// Resolve and shell-split the editor command in one step, reading the
/// process environment here. Fails only if the winning candidate cannot be
/// split into a non-empty argv.
pub fn determine_editor(explicit: Option<&str>) -> Result<EditorCommand, HoteditError> {
    let raw = resolve_editor(explicit, &EditorSources::from_environment());
    debug!("resolved editor command: {raw}");
    EditorCommand::parse(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(git: Option<&str>, editor: Option<&str>, visual: Option<&str>) -> EditorSources {
        EditorSources {
            git_core_editor: git.map(String::from),
            env_editor: editor.map(String::from),
            env_visual: visual.map(String::from),
        }
    }

    #[test]
    fn test_explicit_wins() {
        let s = sources(Some("gitedit"), Some("envedit"), Some("visedit"));
        assert_eq!(resolve_editor(Some("nano"), &s), "nano");
    }

    #[test]
    fn test_git_beats_environment() {
        let s = sources(Some("gitedit"), Some("envedit"), Some("visedit"));
        assert_eq!(resolve_editor(None, &s), "gitedit");
    }

    #[test]
    fn test_editor_beats_visual() {
        let s = sources(None, Some("envedit"), Some("visedit"));
        assert_eq!(resolve_editor(None, &s), "envedit");
        let s = sources(None, None, Some("visedit"));
        assert_eq!(resolve_editor(None, &s), "visedit");
    }

    #[test]
    fn test_platform_fallback() {
        assert_eq!(resolve_editor(None, &EditorSources::default()), FALLBACK_EDITOR);
    }

    #[test]
    fn test_parse_with_args() {
        let cmd = EditorCommand::parse("code --wait -n").unwrap();
        assert_eq!(cmd.program(), "code");
        assert_eq!(cmd.args(), ["--wait", "-n"]);
    }

    #[test]
    fn test_parse_quoted_args() {
        let cmd = EditorCommand::parse("nvim -c 'set ft=markdown'").unwrap();
        assert_eq!(cmd.program(), "nvim");
        assert_eq!(cmd.args(), ["-c", "set ft=markdown"]);
    }

    #[test]
    fn test_parse_empty_command() {
        assert!(matches!(EditorCommand::parse(""), Err(HoteditError::Configuration(_))));
        assert!(matches!(EditorCommand::parse("   "), Err(HoteditError::Configuration(_))));
    }

    #[test]
    fn test_parse_unbalanced_quote() {
        assert!(matches!(EditorCommand::parse("vim '"), Err(HoteditError::Configuration(_))));
    }

    #[test]
    fn test_determine_editor_explicit_ignores_environment() {
        // Explicit argument short-circuits before any configured source.
        let cmd = determine_editor(Some("code --wait")).unwrap();
        assert_eq!(cmd.program(), "code");
        assert_eq!(cmd.args(), ["--wait"]);
    }
}
