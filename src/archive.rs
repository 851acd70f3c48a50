use crate::context::Context;
use crate::entry::{self, ArchiveEntry};
use crate::error::Error;
use crate::result::Result;
use crate::task::ArchiveTask;
use std::fs::{self, File, Metadata};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use time::{OffsetDateTime, UtcOffset};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Entries at or above this size need ZIP64 headers
const ZIP64_THRESHOLD: u64 = 0xFFFF_FFFF;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Packages an [`ArchiveTask`] into a zip file
pub struct Archiver<'a> {
    ctx: &'a Context,
}

impl<'a> Archiver<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Discover and write every entry of `task`, returning the archive path
    pub fn run(&self, task: &ArchiveTask) -> Result<PathBuf> {
        let entries = entry::plan(self.ctx, task)?;
        self.write(&task.output_path, &entries)?;
        Ok(task.output_path.clone())
    }

    /// Write `entries` in order into a fresh archive at `output`.
    ///
    /// The file is truncated if present and removed again if anything fails
    /// before the central directory is written.
    pub fn write(&self, output: &Path, entries: &[ArchiveEntry]) -> Result<()> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::output(output, e))?;
        }

        let file = File::create(output).map_err(|e| Error::output(output, e))?;
        let guard = PartialOutput::new(output);
        let mut zip = ZipWriter::new(file);

        for entry in entries {
            let source = &entry.source_path;
            let file = match File::open(source) {
                Ok(file) => file,
                Err(e) if entry.optional && e.kind() == ErrorKind::NotFound => {
                    self.ctx.detail(format!("Skipping {}: not found", source.display()));
                    continue;
                }
                Err(e) => return Err(Error::entry(source, e)),
            };

            self.ctx.progress(format!("Adding {} to zip", entry.archive_path));
            self.ctx.detail(format!("  from {}", source.display()));
            add_entry(&mut zip, output, entry, file)?;
        }

        let file = zip.finish().map_err(|e| Error::output(output, e))?;
        file.sync_all().map_err(|e| Error::output(output, e))?;

        guard.commit();
        Ok(())
    }
}

fn add_entry(
    zip: &mut ZipWriter<File>,
    output: &Path,
    entry: &ArchiveEntry,
    mut file: File,
) -> Result<()> {
    let source = &entry.source_path;
    let metadata = file.metadata().map_err(|e| Error::entry(source, e))?;

    zip.start_file(entry.archive_path.as_str(), entry_options(&metadata))
        .map_err(|e| Error::output(output, e))?;

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    loop {
        let read = match file.read(&mut buffer) {
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::entry(source, e)),
        };
        if read == 0 {
            break;
        }
        zip.write_all(&buffer[..read]).map_err(|e| Error::output(output, e))?;
    }

    Ok(())
}

fn entry_options(metadata: &Metadata) -> SimpleFileOptions {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(modified_time(metadata))
        .large_file(metadata.len() >= ZIP64_THRESHOLD);

    #[cfg(unix)]
    let options = {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(metadata.permissions().mode())
    };

    options
}

/// Source modification time in UTC, or the zip epoch when unrepresentable
fn modified_time(metadata: &Metadata) -> zip::DateTime {
    metadata
        .modified()
        .ok()
        .and_then(|t| dos_time(OffsetDateTime::from(t)))
        .unwrap_or_default()
}

fn dos_time(time: OffsetDateTime) -> Option<zip::DateTime> {
    let time = time.to_offset(UtcOffset::UTC);
    let year = u16::try_from(time.year()).ok()?;
    zip::DateTime::from_date_and_time(
        year,
        u8::from(time.month()),
        time.day(),
        time.hour(),
        time.minute(),
        time.second(),
    )
    .ok()
}

/// Removes a half-written archive unless committed
struct PartialOutput<'a> {
    path: &'a Path,
    armed: bool,
}

impl<'a> PartialOutput<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path, armed: true }
    }

    fn commit(mut self) {
        self.armed = false;
    }
}

impl Drop for PartialOutput<'_> {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_file(self.path);
        }
    }
}
