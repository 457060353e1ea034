//! Open the user's preferred text editor on a piece of text and capture the
//! result.
//!
//! The whole crate is one blocking operation: seed a scratch file, launch the
//! editor on it, wait for the process to exit, read the file back and report
//! whether the user changed anything. The scratch file is deleted before the
//! call returns, on every exit path.
//!
//! ```no_run
//! use hotedit::{EditOutcome, hotedit};
//!
//! # fn main() -> Result<(), hotedit::HoteditError> {
//! match hotedit("hello\n", None, Some("Edit the greeting, then save and quit"))? {
//!     EditOutcome::Changed(text) => println!("new text: {text}"),
//!     EditOutcome::Unchanged(_) => println!("no edit, treating as cancelled"),
//! }
//! # Ok(())
//! # }
//! ```

mod editor;
mod error;
mod session;

pub use editor::{EditorCommand, EditorSources, determine_editor, resolve_editor};
pub use error::HoteditError;
pub use session::{EditOutcome, HotEdit, hotedit};
