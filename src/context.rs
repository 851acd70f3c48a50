use std::path::PathBuf;

/// Run-wide settings shared by every stage of the packaging run
#[derive(Clone, Debug)]
pub struct Context {
    /// Show source paths and skip notices
    pub verbose: bool,

    /// Suppress per-entry progress lines and the interactive frame
    pub quiet: bool,

    /// Directory relative task paths are resolved against
    pub base_dir: PathBuf,
}

impl Context {
    pub fn new(base_dir: PathBuf, verbose: bool, quiet: bool) -> Self {
        Self {
            verbose: verbose && !quiet,
            quiet,
            base_dir,
        }
    }

    /// Print a progress line unless running quietly
    pub fn progress(&self, line: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", line.as_ref());
        }
    }

    /// Print a detail line in verbose mode only
    pub fn detail(&self, line: impl AsRef<str>) {
        if self.verbose {
            println!("{}", line.as_ref());
        }
    }
}
