use driftfield::{FieldChoice, Scene, SceneConfig};
use driftfield::{run_icons, run_particles, run_trail};
//use driftfield::{bench_links, bench_step};

use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use log::LevelFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "ambient.yaml")]
    file_name: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initializes the global logger. Bevy's own LogPlugin is disabled by the
/// viewers so the `log` facade owns all output.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    // try_init only fails if a logger was already set; ignore that case
    let _ = Builder::from_env(env).try_init();
}

// load here to keep main clean
fn load_scene_from_yaml(file_name: &str) -> Result<SceneConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scene_cfg: SceneConfig = serde_yaml::from_reader(reader)?;

    Ok(scene_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let scene_cfg = load_scene_from_yaml(&args.file_name)?;
    log::debug!("loaded scene config: {scene_cfg:?}");

    match scene_cfg.engine.field {
        FieldChoice::Particles => run_particles(Scene::build_scene(scene_cfg)),
        FieldChoice::Icons => run_icons(Scene::build_scene(scene_cfg)),
        FieldChoice::Trail => run_trail(Scene::build_scene(scene_cfg)),
    }

    //bench_step();
    //bench_links();

    Ok(())
}
