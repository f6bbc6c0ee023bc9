//! The filesystem behind the server: every client-supplied path is resolved
//! through the sandbox here, and all file and directory operations go
//! through the [`Filesystem`] handle.

use chrono::{DateTime, Datelike, Local};
use std::fmt::{self, Formatter, Write as _};
use std::io;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// The error returned when a client path resolves outside the server root.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("path escapes the server root")]
pub struct SandboxViolation;

/// Serves files out of a single root directory on local disk. When the root
/// is `/srv/ftp` and a client asks for `/hello.txt`, it gets
/// `/srv/ftp/hello.txt`; nothing outside the root is reachable.
#[derive(Debug, Clone)]
pub struct Filesystem {
    root: PathBuf,
}

impl Filesystem {
    /// Creates a handle rooted at `root`, which must already be an
    /// absolute, canonicalised path (the configuration loader takes care
    /// of that).
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Filesystem { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a client-supplied path against `base` (the session's
    /// current directory). A path starting with `/` is taken relative to
    /// the server root, which is the client's view of `/`. The result is
    /// normalised lexically and must stay inside the root.
    pub fn resolve(&self, base: &Path, target: &str) -> Result<PathBuf, SandboxViolation> {
        let joined = if let Some(stripped) = target.strip_prefix('/') {
            self.root.join(stripped)
        } else {
            base.join(target)
        };

        let mut out = PathBuf::new();
        for component in joined.components() {
            match component {
                Component::RootDir => out.push(Component::RootDir),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !out.pop() {
                        return Err(SandboxViolation);
                    }
                }
                Component::Normal(part) => out.push(part),
                Component::Prefix(_) => return Err(SandboxViolation),
            }
        }

        if out.starts_with(&self.root) {
            Ok(out)
        } else {
            Err(SandboxViolation)
        }
    }

    /// Renders an absolute directory under the root as the path the client
    /// sees: the root itself is `/`.
    pub fn display(&self, dir: &Path) -> String {
        match dir.strip_prefix(&self.root) {
            Ok(rest) if rest.as_os_str().is_empty() => "/".to_string(),
            Ok(rest) => format!("/{}", rest.display()),
            Err(_) => "/".to_string(),
        }
    }

    /// Returns the metadata of `path` without following a final symlink,
    /// like `lstat`.
    pub async fn metadata(&self, path: &Path) -> io::Result<std::fs::Metadata> {
        tokio::fs::symlink_metadata(path).await
    }

    /// Lists the entries of `dir`, dotfiles included, `.` and `..`
    /// excluded, sorted by name.
    pub async fn list(&self, dir: &Path) -> io::Result<Vec<Fileinfo>> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut out = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            let link_target = if metadata.file_type().is_symlink() {
                tokio::fs::read_link(entry.path()).await.ok()
            } else {
                None
            };
            out.push(Fileinfo {
                path: PathBuf::from(entry.file_name()),
                metadata,
                link_target,
            });
        }
        out.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(out)
    }

    /// Returns the bytes of a long-format directory listing ready to be
    /// sent over a data connection.
    pub async fn list_fmt(&self, dir: &Path) -> io::Result<Vec<u8>> {
        let list = self.list(dir).await?;
        let buffer = list.iter().fold(String::new(), |mut buf, fi| {
            let _ = write!(buf, "{}\r\n", fi);
            buf
        });
        Ok(buffer.into_bytes())
    }

    /// Creates a directory with mode `0755`.
    pub async fn mkd(&self, path: &Path) -> io::Result<()> {
        let mut builder = tokio::fs::DirBuilder::new();
        builder.mode(0o755);
        builder.create(path).await
    }

    /// Removes an (empty) directory.
    pub async fn rmd(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_dir(path).await
    }

    /// Unlinks `path`, refusing anything that is not a regular file.
    /// POSIX permits `unlink` to remove other things; directories must go
    /// through `rmd` instead.
    pub async fn dele(&self, path: &Path) -> io::Result<()> {
        let meta = self.metadata(path).await?;
        if !meta.is_file() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
        }
        tokio::fs::remove_file(path).await
    }

    /// Renames `from` to `to`.
    pub async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        tokio::fs::rename(from, to).await
    }
}

/// One directory entry with everything the long listing format needs.
#[derive(Debug)]
pub struct Fileinfo {
    /// The entry's name (no directory part).
    pub path: PathBuf,
    pub metadata: std::fs::Metadata,
    pub link_target: Option<PathBuf>,
}

impl fmt::Display for Fileinfo {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let modified = self
            .metadata
            .modified()
            .map(|modified| {
                let modified = DateTime::<Local>::from(modified);
                let now = Local::now();
                if modified.year() == now.year() {
                    modified.format("%b %d %H:%M").to_string()
                } else {
                    modified.format("%b %d %Y").to_string()
                }
            })
            .unwrap_or_else(|_| "--- -- --:--".to_string());
        let filetype = if self.metadata.is_dir() {
            "d"
        } else if self.metadata.file_type().is_symlink() {
            "l"
        } else {
            "-"
        };
        let link_target = match &self.link_target {
            Some(target) => format!(" -> {}", target.display()),
            None => String::new(),
        };
        write!(
            f,
            "{}{} {:>4} {:>8} {:>8} {:>12} {:>12} {}{}",
            filetype,
            Permissions(self.metadata.permissions().mode()),
            self.metadata.nlink(),
            self.metadata.uid(),
            self.metadata.gid(),
            self.metadata.len(),
            modified,
            self.path.display(),
            link_target,
        )
    }
}

/// The mode bits of a file, rendered `rwxr-xr-x` style.
pub struct Permissions(pub u32);

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for shift in [6u32, 3, 0] {
            let bits = (self.0 >> shift) & 0o7;
            f.write_char(if bits & 0o4 > 0 { 'r' } else { '-' })?;
            f.write_char(if bits & 0o2 > 0 { 'w' } else { '-' })?;
            f.write_char(if bits & 0o1 > 0 { 'x' } else { '-' })?;
        }
        Ok(())
    }
}
