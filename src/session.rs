use std::fs;
use std::io::Write;
use std::process::Command;

use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use crate::editor::determine_editor;
use crate::error::HoteditError;

const SCRATCH_SUFFIX: &str = ".hotedit";
const COMMENT_PREFIX: &str = "# ";

/// What the user did with the buffer.
///
/// Both variants carry the final text with any instruction banner stripped.
/// Callers that treat "no edit" as cancellation branch on the variant and
/// ignore the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Byte-for-byte identical to the initial text after banner removal.
    Unchanged(String),
    Changed(String),
}

impl EditOutcome {
    pub fn into_text(self) -> String {
        match self {
            Self::Unchanged(text) | Self::Changed(text) => text,
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

/// One edit session: scratch file, blocking editor run, harvested text.
///
/// The call blocks for as long as the user keeps the editor open; human
/// interaction time is unbounded, so there is no timeout.
#[derive(Debug, Default)]
pub struct HotEdit {
    editor: Option<String>,
    instructions: Option<String>,
}

impl HotEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit editor command, overriding every configured source.
    pub fn editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = Some(editor.into());
        self
    }

    /// Instruction text shown comment-prefixed above the buffer and stripped
    /// from the result.
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Launch the editor on `initial` and block until it exits.
    ///
    /// The scratch file is deleted before this returns, on every exit path:
    /// the `NamedTempFile` guard removes it if anything below fails, and the
    /// success path closes it explicitly so a removal failure is reported.
    pub fn invoke(&self, initial: &str) -> Result<EditOutcome, HoteditError> {
        let command = determine_editor(self.editor.as_deref())?;
        let banner = self.instructions.as_deref().map(render_banner);

        let scratch = seed_scratch(banner.as_deref(), initial)?;
        debug!("seeded scratch file {}", scratch.path().display());

        let status = Command::new(command.program())
            .args(command.args())
            .arg(scratch.path())
            .status()
            .map_err(|source| HoteditError::Launch {
                program: command.program().to_owned(),
                source,
            })?;
        if !status.success() {
            return Err(HoteditError::Editing { program: command.program().to_owned(), status });
        }
        debug!("editor exited with {status}");

        let edited = harvest_scratch(scratch)?;
        let text = match banner.as_deref() {
            Some(b) if edited.starts_with(b) => edited[b.len()..].to_owned(),
            _ => edited,
        };

        if text == initial {
            Ok(EditOutcome::Unchanged(text))
        } else {
            Ok(EditOutcome::Changed(text))
        }
    }
}

/// Resolve an editor, run it on `initial` and report the outcome.
///
/// `editor` overrides every configured source; `instructions` is shown as a
/// comment banner above the text and stripped from the result.
pub fn hotedit(
    initial: &str,
    editor: Option<&str>,
    instructions: Option<&str>,
) -> Result<EditOutcome, HoteditError> {
    let mut session = HotEdit::new();
    if let Some(editor) = editor {
        session = session.editor(editor);
    }
    if let Some(instructions) = instructions {
        session = session.instructions(instructions);
    }
    session.invoke(initial)
}

/// Prefix every instruction line so it reads as a comment inside the editor.
fn render_banner(instructions: &str) -> String {
    let mut banner = String::new();
    for line in instructions.lines() {
        if line.is_empty() {
            banner.push_str(COMMENT_PREFIX.trim_end());
        } else {
            banner.push_str(COMMENT_PREFIX);
            banner.push_str(line);
        }
        banner.push('\n');
    }
    banner
}

/// Create the uniquely named scratch file and seed it with the banner (if
/// any) followed by the initial text.
fn seed_scratch(banner: Option<&str>, initial: &str) -> Result<NamedTempFile, HoteditError> {
    let mut scratch = Builder::new().suffix(SCRATCH_SUFFIX).tempfile()?;
    if let Some(banner) = banner {
        scratch.write_all(banner.as_bytes())?;
    }
    scratch.write_all(initial.as_bytes())?;
    scratch.flush()?;
    Ok(scratch)
}

/// Read the scratch file back and delete it.
///
/// Reopens by path: some editors replace the file atomically instead of
/// writing in place, so the seeded handle can point at a stale inode.
fn harvest_scratch(scratch: NamedTempFile) -> Result<String, HoteditError> {
    let edited = fs::read_to_string(scratch.path())?;
    scratch.close()?;
    Ok(edited)
}
