//! File I/O: library reading, output writing, front matter

mod frontmatter;
mod fs;
mod library;
mod storage;

pub use frontmatter::{SOURCE, iso8601, serialize};
pub use fs::{DryRunOutput, FsOutput, OutputSink, dir_has_entries};
pub use library::{load_content, load_library};
pub use storage::{FsStorage, LibraryError, Storage};
