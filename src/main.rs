use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use structure_cleaner::engine::dispatcher::JobDispatcher;
use structure_cleaner::engine::processor::{RegionProcessor, UnknownVersionPolicy};
use structure_cleaner::engine::strategy::RemovalStrategy;
use structure_cleaner::logging;
use structure_cleaner::shared::config::load_settings;

const SEP: &str = "--------------------------------";

#[derive(Parser)]
#[command(name = "structure_cleaner")]
#[command(version, about = "Removes structure tags from region files", long_about = None)]
struct Args {
    /// Exact structure tag to remove; a trailing `*` matches a prefix.
    /// Leave empty to purge every non-vanilla structure.
    #[arg(short, long, num_args = 0..)]
    tag: Vec<String>,

    /// Number of worker threads (default: half the available cores)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// World directory to process
    #[arg(short, long, default_value = "world")]
    path: PathBuf,

    /// Dimension folder inside the world, e.g. `DIM-1`
    #[arg(short, long, default_value = "")]
    region: String,

    /// Directory that receives `new_region<DIM>`
    #[arg(short, long, default_value = "./")]
    output: PathBuf,

    /// Configuration file (default: structure_cleaner.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Proceed even when the destination already exists
    #[arg(long)]
    force: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Copy chunks with an unknown data version instead of aborting
    #[arg(long)]
    skip_unknown_versions: bool,
}

impl Args {
    fn source_dir(&self) -> PathBuf {
        self.path.join(&self.region).join("region")
    }

    fn dest_dir(&self) -> PathBuf {
        self.output.join(format!("new_region{}", self.region))
    }
}

fn prepare_destination(dest: &Path, force: bool) -> anyhow::Result<bool> {
    if dest.exists() {
        println!("{} exists, this may cause problems", display(dest));
        if !force {
            println!("Pass --force to proceed regardless");
            return Ok(false);
        }
        return Ok(true);
    }
    fs::create_dir_all(dest)?;
    println!("Saving newly generated region files to {}", display(dest));
    Ok(true)
}

fn display(path: &Path) -> String {
    path.canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let settings = load_settings(args.config.as_deref())?;
    logging::init(&settings.logging)?;

    let strategy = RemovalStrategy::from_specifiers(args.tag.iter().cloned());
    let source = args.source_dir();
    let dest = args.dest_dir();
    let workers = args.jobs.unwrap_or_else(|| settings.cleaner.workers());
    let policy = if args.skip_unknown_versions {
        UnknownVersionPolicy::Skip
    } else {
        settings.cleaner.unknown_version_policy
    };

    println!("{SEP}");
    if strategy.is_purge() {
        println!("No tag given, will run in purge mode.");
    } else {
        println!("Tag(s) given, will run in list mode.");
    }
    println!("Removing {} in all region files in {}.", strategy.describe(), source.display());
    println!("{SEP}");

    if !source.is_dir() {
        println!("Couldn't find {}", display(&source));
        return Ok(ExitCode::FAILURE);
    }
    if !prepare_destination(&dest, args.force)? {
        println!("Aborted, nothing was done");
        return Ok(ExitCode::FAILURE);
    }

    info!(target: "main", mode = strategy.name(), workers, ?policy, "Structure cleaner starting");

    let processor = RegionProcessor::default()
        .with_adapter(settings.cleaner.adapter())
        .with_policy(policy);
    let dispatcher = JobDispatcher::new(processor);

    match dispatcher.run(strategy, &source, &dest, workers).await {
        Ok(summary) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{SEP}");
                println!("{summary}");
                println!("{SEP}");
                println!(
                    "Processed {} files, skipped {}",
                    summary.files_processed, summary.files_skipped
                );
                println!("You can now replace {} with {}", source.display(), dest.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Aborted: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
