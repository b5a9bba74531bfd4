pub mod compile;
pub mod init;
pub mod layout;
pub mod suggest;

pub use compile::{compile, CompileArgs};
pub use init::{init, InitArgs};
pub use layout::{layout, LayoutArgs};
pub use suggest::{suggest, SuggestArgs};

use std::path::{Path, PathBuf};

/// Resolve a user supplied path against the working directory.
pub(crate) fn resolve(cwd: &str, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        PathBuf::from(cwd).join(path)
    }
}
