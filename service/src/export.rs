//! Schema export to disk.
//!
//! The schema is fetched and rendered in memory before the filesystem is
//! touched, then written to a staging file beside the destination and renamed
//! over it. A failing provider or serializer therefore never creates or
//! modifies the destination, and an I/O failure mid-write leaves the previous
//! file in place.

use crate::error::ExportError;
use crate::format::OutputFormat;
use crate::provider::SchemaProvider;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Result of comparing a freshly rendered schema with the file on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    UpToDate,
    Stale,
    Missing,
}

impl CheckOutcome {
    #[must_use]
    pub const fn is_up_to_date(self) -> bool {
        matches!(self, Self::UpToDate)
    }
}

/// Writes provider schemas to files.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaExporter {
    format: OutputFormat,
}

impl SchemaExporter {
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    #[must_use]
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Fetch the schema and render it as text.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Provider`] or [`ExportError::Serialization`].
    pub fn render<P>(&self, provider: &P) -> Result<String, ExportError>
    where
        P: SchemaProvider + ?Sized,
    {
        let schema = provider.schema()?;
        tracing::debug!(format = %self.format, "schema acquired from provider");
        self.format.render(&schema)
    }

    /// Export the provider's schema to `destination`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Provider`] if the schema cannot be produced,
    /// [`ExportError::Serialization`] if it cannot be rendered, and
    /// [`ExportError::Io`] if the destination cannot be written. In every
    /// error case the destination is left as it was.
    pub fn export<P>(&self, provider: &P, destination: impl AsRef<Path>) -> Result<(), ExportError>
    where
        P: SchemaProvider + ?Sized,
    {
        let destination = destination.as_ref();
        let rendered = self.render(provider)?;

        write_atomically(destination, rendered.as_bytes())
            .map_err(|source| ExportError::io(destination, source))?;

        tracing::info!(
            path = %destination.display(),
            format = %self.format,
            bytes = rendered.len(),
            "schema exported"
        );
        Ok(())
    }

    /// Compare the provider's current schema with `destination` without writing.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Provider`] or [`ExportError::Serialization`] if
    /// the schema cannot be rendered, and [`ExportError::Io`] if the existing
    /// file cannot be read.
    pub fn check<P>(
        &self,
        provider: &P,
        destination: impl AsRef<Path>,
    ) -> Result<CheckOutcome, ExportError>
    where
        P: SchemaProvider + ?Sized,
    {
        let destination = destination.as_ref();
        let rendered = self.render(provider)?;

        let outcome = match fs::read(destination) {
            Ok(existing) if existing == rendered.as_bytes() => CheckOutcome::UpToDate,
            Ok(_) => CheckOutcome::Stale,
            Err(err) if err.kind() == io::ErrorKind::NotFound => CheckOutcome::Missing,
            Err(err) => return Err(ExportError::io(destination, err)),
        };

        if !outcome.is_up_to_date() {
            tracing::warn!(path = %destination.display(), ?outcome, "exported schema is out of date");
        }
        Ok(outcome)
    }
}

/// Export `provider`'s schema as YAML to `destination`.
///
/// # Errors
///
/// See [`SchemaExporter::export`].
pub fn export<P>(provider: &P, destination: impl AsRef<Path>) -> Result<(), ExportError>
where
    P: SchemaProvider + ?Sized,
{
    SchemaExporter::default().export(provider, destination)
}

/// Symlink chains longer than this are treated as a loop.
const MAX_LINK_HOPS: usize = 40;

/// Stage `contents` beside `destination` and rename it into place.
///
/// A symlinked destination is written through: the link stays and its final
/// target is replaced. The staging file is removed on drop if anything before
/// the rename fails.
fn write_atomically(destination: &Path, contents: &[u8]) -> io::Result<()> {
    let target = resolve_links(destination)?;
    let parent = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(parent)?;
    staged.write_all(contents)?;
    staged.flush()?;
    apply_permissions(staged.as_file(), &target)?;
    staged.as_file().sync_all()?;
    staged.persist(&target).map_err(|err| err.error)?;
    Ok(())
}

/// Follow `path` through any symlinks to the file that should be replaced.
///
/// Dangling links resolve to their (not yet existing) target.
fn resolve_links(path: &Path) -> io::Result<PathBuf> {
    let mut current = path.to_path_buf();
    for _ in 0..MAX_LINK_HOPS {
        match fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let link = fs::read_link(&current)?;
                current = match current.parent() {
                    Some(dir) => dir.join(link),
                    None => link,
                };
            }
            Ok(_) => return Ok(current),
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(current),
            Err(err) => return Err(err),
        }
    }
    Err(io::Error::other(format!(
        "too many levels of symbolic links at {}",
        path.display()
    )))
}

/// Existing files keep their mode; new ones get the usual 0644.
fn apply_permissions(staged: &File, destination: &Path) -> io::Result<()> {
    match fs::metadata(destination) {
        Ok(meta) => staged.set_permissions(meta.permissions()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => set_default_permissions(staged),
        Err(err) => Err(err),
    }
}

#[cfg(unix)]
fn set_default_permissions(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn set_default_permissions(_file: &File) -> io::Result<()> {
    Ok(())
}
