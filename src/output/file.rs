//! The log file itself: provisioning under a conflict policy, appends, and release.

use crate::conflict::{ConflictPolicy, ConflictResolver, Resolution};
use crate::error::Error;
use crate::fmt::Clock;
use crate::internal;

use chrono::{DateTime, Local};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Open append-mode handle on the log file.
///
/// Appends go through a mutex so concurrent callers each land a whole line.
#[derive(Debug)]
pub struct FileHandle {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileHandle {
    fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(Some(file)),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// False once [`release`](Self::release) has run.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Writes `line` and a trailing newline in a single `write_all`.
    ///
    /// # Errors
    /// [`Error::Write`] if the write fails or the handle was already released.
    pub fn append(&self, line: &str) -> Result<(), Error> {
        let mut guard = self.lock();
        let result = match guard.as_mut() {
            Some(file) => {
                let mut content = String::with_capacity(line.len() + 1);
                content.push_str(line);
                content.push('\n');
                file.write_all(content.as_bytes())
            }
            None => Err(io::Error::other("log file handle was released")),
        };
        result.map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Closes the file. Calling it again is a no-op.
    pub fn release(&self) {
        if let Some(file) = self.lock().take() {
            if let Err(e) = file.sync_data() {
                internal::warn(
                    "FILE",
                    &format!("Could not flush {}: {e}", self.path.display()),
                );
            }
            internal::info("FILE", &format!("Closed {}", self.path.display()));
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Result of a successful [`provision`].
#[derive(Debug)]
pub struct Provisioned {
    pub handle: FileHandle,
    /// Present when the file already existed and the resolver was consulted.
    pub resolution: Option<Resolution>,
    /// Where the previous file went under [`ConflictPolicy::Rename`].
    pub renamed_to: Option<PathBuf>,
}

/// Makes `path` ready for appending: creates the parent directory if needed, resolves
/// a pre-existing file through `resolver`, applies the chosen policy, and opens it.
///
/// # Errors
/// [`Error::Provisioning`] if the directory can't be created or the file can't be
/// truncated, renamed or opened.
pub fn provision(
    path: &Path,
    default_policy: ConflictPolicy,
    resolver: &ConflictResolver,
    clock: &dyn Clock,
) -> Result<Provisioned, Error> {
    let failed = |at: &Path| {
        let at = at.to_path_buf();
        move |source: io::Error| Error::Provisioning { path: at, source }
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        internal::warn(
            "FILE",
            &format!("Directory does not exist, creating {}", parent.display()),
        );
        fs::create_dir_all(parent).map_err(failed(parent))?;
    }

    let mut resolution = None;
    let mut renamed_to = None;

    if path.is_file() {
        let decided = resolver.resolve(path, default_policy);
        match decided.policy {
            ConflictPolicy::Append => {}
            ConflictPolicy::Overwrite => {
                File::create(path).map_err(failed(path))?;
                internal::info("FILE", &format!("Truncated {}", path.display()));
            }
            ConflictPolicy::Rename => {
                let moved = rename_aside(path, &clock.now()).map_err(failed(path))?;
                internal::info(
                    "FILE",
                    &format!("Moved {} to {}", path.display(), moved.display()),
                );
                renamed_to = Some(moved);
            }
        }
        resolution = Some(decided);
    }

    let handle = open_fresh(path, renamed_to.as_deref())?;
    internal::info("FILE", &format!("Opened {}", path.display()));

    Ok(Provisioned {
        handle,
        resolution,
        renamed_to,
    })
}

/// Opens `path`; when that fails after the old file was moved aside, the diagnostic
/// says where it went, since the caller only gets the open error.
fn open_fresh(path: &Path, renamed_to: Option<&Path>) -> Result<FileHandle, Error> {
    FileHandle::open(path).map_err(|source| {
        if let Some(moved) = renamed_to {
            internal::error(
                "FILE",
                &format!(
                    "Could not open {} after moving the previous file to {}: {source}",
                    path.display(),
                    moved.display()
                ),
            );
        }
        Error::Provisioning {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Moves the file at `path` to `<stem>_r<YYYY-MM-DD_HH-MM-SS>[.ext]` beside it.
///
/// If that name is taken, `.restart-NNNN` is added to the stem, counting up from 0000.
///
/// # Errors
/// Propagates the rename failure.
pub fn rename_aside(path: &Path, instant: &DateTime<Local>) -> io::Result<PathBuf> {
    let target = aside_path(path, instant);
    fs::rename(path, &target)?;
    Ok(target)
}

fn aside_path(path: &Path, instant: &DateTime<Local>) -> PathBuf {
    let stem = path
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
    let ext = path
        .extension()
        .map_or_else(String::new, |e| format!(".{}", e.to_string_lossy()));
    let stamp = instant.format("_r%Y-%m-%d_%H-%M-%S").to_string();

    let candidate = path.with_file_name(format!("{stem}{stamp}{ext}"));
    if !candidate.exists() {
        return candidate;
    }

    (0_u32..)
        .map(|n| path.with_file_name(format!("{stem}{stamp}.restart-{n:04}{ext}")))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}
