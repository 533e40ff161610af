use kgrav::{ScenarioConfig, Scenario, FrameRecorder, Rgba};
use kgrav::{run_2d, run_headless};
use kgrav::{downsize_dir, make_mosaic, MosaicOptions};
use kgrav::{bench_neighbors, bench_step};

use clap::{Parser, Subcommand};
use anyhow::{Context, Result};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "k-nearest-neighbour gravity particle sketch")]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a window and run until it is closed (default)
    View,
    /// Run without a window, exporting frames
    Headless {
        /// Frames to step; defaults to the scenario's max_iterations
        #[arg(long)]
        frames: Option<u64>,
        /// Override the scenario's export directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Square thumbnails of every .jpg in a directory
    Downsize {
        #[arg(long, default_value = "ori_images")]
        input: PathBuf,
        #[arg(long, default_value = "small_images")]
        output: PathBuf,
        #[arg(long, default_value_t = 80)]
        size: u32,
    },
    /// Photo mosaic of a reference image from thumbnail pieces
    Mosaic {
        #[arg(long, default_value = "small_images")]
        tiles: PathBuf,
        #[arg(long, default_value = "reference.png")]
        reference: PathBuf,
        #[arg(long, default_value = "mosaic_output.jpg")]
        output: PathBuf,
        #[arg(long, default_value_t = 20)]
        piece_size: u32,
        #[arg(long, default_value_t = 80)]
        height: u32,
    },
    /// Time neighbour search and both step modes
    Bench,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command.unwrap_or(Command::View) {
        Command::View => {
            // bevy's LogPlugin owns logging inside the viewer
            let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
            let scenario = Scenario::build_scenario(&scenario_cfg)?;
            let recorder = FrameRecorder::from_config(&scenario_cfg)?;
            let background = Rgba::try_from(&scenario_cfg.render.background)?;
            run_2d(scenario, recorder, background, scenario_cfg.render.window_width);
        }
        Command::Headless { frames, output_dir } => {
            init_logging();
            let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
            let mut scenario = Scenario::build_scenario(&scenario_cfg)?;
            let mut recorder = FrameRecorder::from_config(&scenario_cfg)?;
            if let Some(dir) = output_dir {
                recorder.exporter = recorder.exporter.with_output_dir(dir);
            }
            let frames = frames.unwrap_or(scenario_cfg.engine.max_iterations);
            run_headless(&mut scenario, &mut recorder, frames);
        }
        Command::Downsize { input, output, size } => {
            init_logging();
            downsize_dir(&input, &output, size)?;
        }
        Command::Mosaic { tiles, reference, output, piece_size, height } => {
            init_logging();
            let opts = MosaicOptions {
                piece_size,
                target_height: height,
                ..MosaicOptions::default()
            };
            make_mosaic(&tiles, &reference, &output, &opts)?;
        }
        Command::Bench => {
            init_logging();
            bench_neighbors()?;
            bench_step()?;
        }
    }

    Ok(())
}
