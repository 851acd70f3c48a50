use crate::context::Context;
use crate::error::Error;
use crate::result::Result;
use crate::task::{ArchiveTask, MissingAssets};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// One file destined for the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Location on disk, opened only when the entry is written
    pub source_path: PathBuf,

    /// `/`-separated name inside the archive
    pub archive_path: String,

    /// Skipped instead of failing when the source is gone at write time
    pub optional: bool,
}

impl ArchiveEntry {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(source_path: P, archive_path: S) -> Self {
        Self {
            source_path: source_path.into(),
            archive_path: archive_path.into(),
            optional: false,
        }
    }

    /// Root-level entry that may be missing when the archive is written
    pub fn standalone(source_path: PathBuf, archive_path: String) -> Self {
        Self {
            optional: true,
            ..Self::new(source_path, archive_path)
        }
    }
}

/// Join `relative` under `prefix` using `/` regardless of the host separator
pub fn archive_path(prefix: &str, relative: &Path) -> String {
    let mut name = prefix.trim_end_matches(['/', '\\']).to_string();

    for component in relative.components() {
        if let Component::Normal(part) = component {
            if !name.is_empty() {
                name.push('/');
            }
            name.push_str(&part.to_string_lossy());
        }
    }

    name
}

/// Discover every entry of `task` in write order: the assets tree in
/// lexical per-directory order, then the standalone file if it exists.
pub fn plan(ctx: &Context, task: &ArchiveTask) -> Result<Vec<ArchiveEntry>> {
    let output = output_identity(&task.output_path);
    let mut entries = collect_assets(ctx, task, output.as_deref())?;
    let standalone = &task.standalone_path;

    if !standalone.is_file() {
        ctx.detail(format!("Skipping {}: not found", standalone.display()));
    } else if is_output(standalone, output.as_deref()) {
        ctx.detail(format!("Skipping {}: output archive", standalone.display()));
    } else {
        entries.push(ArchiveEntry::standalone(
            standalone.clone(),
            task.standalone_name.clone(),
        ));
    }

    Ok(entries)
}

fn collect_assets(
    ctx: &Context,
    task: &ArchiveTask,
    output: Option<&Path>,
) -> Result<Vec<ArchiveEntry>> {
    let root = &task.assets_root;

    if !root.is_dir() {
        return match task.missing_assets {
            MissingAssets::Fail => Err(Error::AssetsRootMissing(root.clone())),
            MissingAssets::Empty => {
                ctx.detail(format!(
                    "Assets root {} not found, packaging no assets",
                    root.display()
                ));
                Ok(Vec::new())
            }
        };
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.clone());
            Error::entry(path, err)
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if is_output(path, output) {
            ctx.detail(format!("Skipping {}: output archive", path.display()));
            continue;
        }

        let relative = path.strip_prefix(root).map_err(|_| {
            Error::entry(path, io::Error::other("path escapes the assets root"))
        })?;

        entries.push(ArchiveEntry::new(
            path,
            archive_path(&task.assets_prefix, relative),
        ));
    }

    Ok(entries)
}

/// Canonical location the archive will be written to, if its directory exists
fn output_identity(output: &Path) -> Option<PathBuf> {
    let name = output.file_name()?;
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::canonicalize(parent).ok().map(|p| p.join(name))
}

fn is_output(path: &Path, output: Option<&Path>) -> bool {
    match output {
        Some(out) if path.file_name() == out.file_name() => fs::canonicalize(path)
            .map(|p| p == out)
            .unwrap_or(false),
        _ => false,
    }
}
