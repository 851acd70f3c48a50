use std::path::PathBuf;

pub const DEFAULT_ASSETS_ROOT: &str = "zig-out/bin/assets";
pub const DEFAULT_ASSETS_PREFIX: &str = "assets";
pub const DEFAULT_STANDALONE_PATH: &str = "zig-out/bin/Dogfight2025.exe";
pub const DEFAULT_STANDALONE_NAME: &str = "Dogfight2025.exe";
pub const DEFAULT_OUTPUT_PATH: &str = "Dogfight2025.zip";

/// What to do when the assets root does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingAssets {
    /// Abort with `AssetsRootMissing`
    #[default]
    Fail,
    /// Package zero asset entries
    Empty,
}

/// A single packaging job: one assets tree and at most one standalone file
/// written into one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveTask {
    /// Directory mirrored into the archive
    pub assets_root: PathBuf,

    /// Folder name the assets are nested under inside the archive
    pub assets_prefix: String,

    /// Extra file placed at the archive root when it exists
    pub standalone_path: PathBuf,

    /// Name of the standalone file inside the archive
    pub standalone_name: String,

    /// Destination archive, truncated if present
    pub output_path: PathBuf,

    pub missing_assets: MissingAssets,
}

impl Default for ArchiveTask {
    fn default() -> Self {
        Self {
            assets_root: PathBuf::from(DEFAULT_ASSETS_ROOT),
            assets_prefix: DEFAULT_ASSETS_PREFIX.to_string(),
            standalone_path: PathBuf::from(DEFAULT_STANDALONE_PATH),
            standalone_name: DEFAULT_STANDALONE_NAME.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            missing_assets: MissingAssets::Fail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_task_matches_release_layout() {
        let task = ArchiveTask::default();
        assert_eq!(task.assets_root, PathBuf::from("zig-out/bin/assets"));
        assert_eq!(task.assets_prefix, "assets");
        assert_eq!(task.standalone_path, PathBuf::from("zig-out/bin/Dogfight2025.exe"));
        assert_eq!(task.standalone_name, "Dogfight2025.exe");
        assert_eq!(task.output_path, PathBuf::from("Dogfight2025.zip"));
        assert_eq!(task.missing_assets, MissingAssets::Fail);
    }
}
