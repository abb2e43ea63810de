//! Test harness for CLI integration tests.
//!
//! Provides throwaway Quiver libraries built on disk, programmatic note
//! creation, and CLI assertion helpers using `assert_cmd`.

mod command;
mod library;
mod note;

#[allow(unused_imports)]
pub use command::QuiverCommand;
#[allow(unused_imports)]
pub use library::{TestLibrary, leaf, node};
#[allow(unused_imports)]
pub use note::TestNote;
