//! Output-side file system operations: directories, copies, atomic writes
//! and best-effort timestamps.

use chrono::{DateTime, Utc};
use std::fs::{self, File, FileTimes};
use std::io::{self, Write as IoWrite};
use std::path::Path;
use std::time::SystemTime;
use tempfile::NamedTempFile;

/// Where an export writes its files.
pub trait OutputSink {
    /// Creates `dir` and its parents. Succeeds if it already exists.
    fn ensure_dir(&self, dir: &Path) -> io::Result<()>;

    /// Copies the bytes of `src` to `dst`.
    fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<()>;

    /// Writes `content` to `path`, replacing it atomically.
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Sets creation (where supported) and modification times.
    fn set_times(&self, path: &Path, created: DateTime<Utc>, modified: DateTime<Utc>)
    -> io::Result<()>;
}

/// [`OutputSink`] writing to the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOutput;

/// [`OutputSink`] that writes nothing, for dry runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunOutput;

impl OutputSink for FsOutput {
    fn ensure_dir(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<()> {
        fs::copy(src, dst).map(|_| ())
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(content.as_bytes())?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn set_times(
        &self,
        path: &Path,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> io::Result<()> {
        let modified: SystemTime = modified.into();
        let times = FileTimes::new().set_accessed(modified).set_modified(modified);
        let times = with_created(times, created.into());
        File::options().write(true).open(path)?.set_times(times)
    }
}

#[cfg(target_os = "macos")]
fn with_created(times: FileTimes, created: SystemTime) -> FileTimes {
    use std::os::macos::fs::FileTimesExt;
    times.set_created(created)
}

#[cfg(windows)]
fn with_created(times: FileTimes, created: SystemTime) -> FileTimes {
    use std::os::windows::fs::FileTimesExt;
    times.set_created(created)
}

#[cfg(not(any(target_os = "macos", windows)))]
fn with_created(times: FileTimes, _created: SystemTime) -> FileTimes {
    times
}

impl OutputSink for DryRunOutput {
    fn ensure_dir(&self, _dir: &Path) -> io::Result<()> {
        Ok(())
    }

    fn copy_file(&self, _src: &Path, _dst: &Path) -> io::Result<()> {
        Ok(())
    }

    fn write_file(&self, _path: &Path, _content: &str) -> io::Result<()> {
        Ok(())
    }

    fn set_times(
        &self,
        _path: &Path,
        _created: DateTime<Utc>,
        _modified: DateTime<Utc>,
    ) -> io::Result<()> {
        Ok(())
    }
}

/// Returns true if `dir` exists and holds at least one entry.
pub fn dir_has_entries(dir: &Path) -> io::Result<bool> {
    match fs::read_dir(dir) {
        Ok(mut entries) => Ok(entries.next().is_some()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
