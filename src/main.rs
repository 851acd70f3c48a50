mod archive;
mod args;
mod config;
mod context;
mod entry;
mod error;
mod result;
mod task;
mod tpl;
mod utils;

use archive::Archiver;
use args::Args;
use config::ArchiveConfig;
use context::Context;
use entry::ArchiveEntry;
use std::path::PathBuf;
use task::ArchiveTask;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> result::Result<()> {
    let args = Args::parse();

    let base_dir = match &args.config {
        Some(path) => config::base_dir(path),
        None => PathBuf::from("."),
    };
    let ctx = Context::new(base_dir, args.verbose, args.quiet);

    // Defaults, then config file, then flags
    let mut task = ArchiveTask::default();
    if let Some(path) = &args.config {
        ArchiveConfig::load(path)?.apply(&mut task, &ctx.base_dir)?;
    }
    args.apply(&mut task);

    if ctx.quiet {
        if args.dry_run {
            entry::plan(&ctx, &task)?;
        } else {
            Archiver::new(&ctx).run(&task)?;
        }
        return Ok(());
    }

    cliclack::intro("winzip")?;

    if args.dry_run {
        let entries = discover(&ctx, &task)?;
        for entry in &entries {
            ctx.progress(format!("Would add {}", entry.archive_path));
        }
        cliclack::outro(format!(
            "Dry run: {} entries, nothing written to {}",
            entries.len(),
            task.output_path.display()
        ))?;
        return Ok(());
    }

    ctx.progress("Creating zip file...");
    let entries = discover(&ctx, &task)?;
    Archiver::new(&ctx).write(&task.output_path, &entries)?;

    cliclack::outro(format!("Archive created: {}", task.output_path.display()))?;
    Ok(())
}

fn discover(ctx: &Context, task: &ArchiveTask) -> result::Result<Vec<ArchiveEntry>> {
    let spinner = cliclack::spinner();
    spinner.start("Scanning assets...");

    match entry::plan(ctx, task) {
        Ok(entries) => {
            spinner.stop(format!("Found {} entries", entries.len()));
            Ok(entries)
        }
        Err(e) => {
            spinner.error("Failed to scan assets");
            Err(e)
        }
    }
}
