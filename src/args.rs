use crate::task::{ArchiveTask, MissingAssets};
use clap::builder::NonEmptyStringValueParser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Command-line arguments for winzip; each one overrides a task default
#[derive(Debug, Default)]
pub struct Args {
    /// Show source paths and skip notices
    pub verbose: bool,

    /// Only print errors
    pub quiet: bool,

    /// List the planned entries without writing the archive
    pub dry_run: bool,

    /// Package no assets instead of failing when the assets root is missing
    pub allow_missing_assets: bool,

    /// TOML file with an `[archive]` table
    pub config: Option<PathBuf>,

    pub assets: Option<PathBuf>,
    pub prefix: Option<String>,
    pub standalone: Option<PathBuf>,
    pub standalone_name: Option<String>,
    pub output: Option<PathBuf>,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    #[cfg(test)]
    pub fn parse_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::from_matches(&command().get_matches_from(args))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let path = |id: &str| matches.get_one::<String>(id).map(PathBuf::from);
        let string = |id: &str| matches.get_one::<String>(id).cloned();

        Self {
            verbose: matches.get_flag("verbose"),
            quiet: matches.get_flag("quiet"),
            dry_run: matches.get_flag("dry-run"),
            allow_missing_assets: matches.get_flag("allow-missing-assets"),
            config: path("config"),
            assets: path("assets"),
            prefix: string("prefix"),
            standalone: path("standalone"),
            standalone_name: string("standalone-name"),
            output: path("output"),
        }
    }

    /// Apply the flags that were given on top of `task`
    pub fn apply(&self, task: &mut ArchiveTask) {
        if let Some(assets) = &self.assets {
            task.assets_root = assets.clone();
        }
        if let Some(prefix) = &self.prefix {
            task.assets_prefix = prefix.clone();
        }
        if let Some(standalone) = &self.standalone {
            task.standalone_path = standalone.clone();
        }
        if let Some(name) = &self.standalone_name {
            task.standalone_name = name.clone();
        }
        if let Some(output) = &self.output {
            task.output_path = output.clone();
        }
        if self.allow_missing_assets {
            task.missing_assets = MissingAssets::Empty;
        }
    }
}

fn command() -> Command {
    let non_empty = NonEmptyStringValueParser::new;

    Command::new("winzip")
        .version(clap::crate_version!())
        .about("Package a build's executable and asset tree into a zip archive")
        .arg(
            Arg::new("assets")
                .short('a')
                .long("assets")
                .value_name("DIR")
                .value_parser(non_empty())
                .help("Assets directory to bundle [default: zig-out/bin/assets]")
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .value_name("NAME")
                .value_parser(non_empty())
                .help("Folder the assets are placed under inside the archive [default: assets]")
        )
        .arg(
            Arg::new("standalone")
                .short('s')
                .long("standalone")
                .value_name("FILE")
                .value_parser(non_empty())
                .help("Extra file added at the archive root when present [default: zig-out/bin/Dogfight2025.exe]")
        )
        .arg(
            Arg::new("standalone-name")
                .long("standalone-name")
                .value_name("NAME")
                .value_parser(non_empty())
                .help("Name of the standalone file inside the archive [default: Dogfight2025.exe]")
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(non_empty())
                .help("Archive to write, overwritten if present [default: Dogfight2025.zip]")
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(non_empty())
                .help("TOML file with an [archive] table overriding the defaults")
        )
        .arg(
            Arg::new("allow-missing-assets")
                .long("allow-missing-assets")
                .action(ArgAction::SetTrue)
                .help("Package no assets instead of failing when the assets directory is missing")
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("List the entries that would be added without writing the archive")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
                .help("Enable verbose output")
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only print errors")
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_keep_default_task() {
        let args = Args::parse_from(["winzip"]);
        let mut task = ArchiveTask::default();
        args.apply(&mut task);

        assert_eq!(task, ArchiveTask::default());
        assert!(!args.verbose && !args.quiet && !args.dry_run);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_flags_override_task() {
        let args = Args::parse_from([
            "winzip",
            "-a",
            "out/assets",
            "--prefix",
            "data",
            "-s",
            "out/game",
            "--standalone-name",
            "game",
            "-o",
            "game.zip",
            "--allow-missing-assets",
        ]);
        let mut task = ArchiveTask::default();
        args.apply(&mut task);

        assert_eq!(task.assets_root, PathBuf::from("out/assets"));
        assert_eq!(task.assets_prefix, "data");
        assert_eq!(task.standalone_path, PathBuf::from("out/game"));
        assert_eq!(task.standalone_name, "game");
        assert_eq!(task.output_path, PathBuf::from("game.zip"));
        assert_eq!(task.missing_assets, MissingAssets::Empty);
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        assert!(command().try_get_matches_from(["winzip", "--prefix", ""]).is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(command().try_get_matches_from(["winzip", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_command_definition_is_valid() {
        command().debug_assert();
    }
}
