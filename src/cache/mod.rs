//! URL-keyed artifact cache: directory location, key mapping, atomic commit.
//!
//! The cache is content-addressed by download URL. Entries move through a
//! fixed lifecycle: absent, then a process-unique `*.tmp` file being
//! written, then committed under the final name by one atomic rename.
//! Readers therefore see either nothing or a fully written artifact; no
//! cross-process locking exists or is needed.

mod key;
mod locator;
mod temp;

pub use key::cached_artifact_path;
pub use locator::cache_dir;
pub use temp::{TempFileGuard, temp_file_path};
