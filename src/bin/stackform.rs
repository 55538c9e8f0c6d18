use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stackform", version)]
struct Cli {
    /// Log debug events to stderr (overridden by `RUST_LOG`).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the constraints a stack container would install for a scene.
    Constraints(ConstraintsArgs),
    /// Validate a scene and report what laying it out would create.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct ConstraintsArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Emit the constraints as JSON instead of one line each.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Constraints(args) => cmd_constraints(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "stackform=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_scene_json(path: &Path) -> anyhow::Result<stackform::Scene> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let scene: stackform::Scene =
        serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    Ok(scene)
}

fn cmd_constraints(args: ConstraintsArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    let layout = scene.layout()?;

    if args.json {
        let out = serde_json::to_string_pretty(&layout.constraints)
            .context("serialize constraints")?;
        println!("{out}");
        return Ok(());
    }
    for line in layout.lines() {
        println!("{line}");
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    let layout = scene
        .layout()
        .with_context(|| format!("scene '{}' is invalid", args.in_path.display()))?;

    println!(
        "ok: {} boxes ({} visible), {} scaffold, {} constraints",
        scene.boxes.len(),
        layout.visible,
        layout.scaffold.len(),
        layout.constraints.len()
    );
    Ok(())
}
