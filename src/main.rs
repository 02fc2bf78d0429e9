use clap::{ArgAction, Parser, Subcommand};
use log::{Level, debug};
use std::path::PathBuf;
use upres::batch::{self, BatchProgress, ProgressSink};
use upres::imaging::ScaleFactor;
use upres::{config, output};

#[derive(Parser)]
#[command(name = "upres")]
#[command(about = "Batch upscaler for bitmaps and OpenEXR renders")]
#[command(long_about = "\
Batch upscaler for bitmaps and OpenEXR renders

Every recognized image directly inside INPUT_DIR is resized by the scale
factor and written to OUTPUT_DIR under the same file name.

  Recognized:  png jpg jpeg tiff bmp gif exr (any letter case)
  Bitmaps:     Lanczos3 resize, optional unsharp mask
  EXR:         R, G, B float channels resampled without clamping

Run 'upres gen-config' to generate a documented upres.toml.")]
#[command(version)]
struct Cli {
    /// Config file (see `gen-config`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors and hide progress lines
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct RunArgs {
    /// Directory to read images from (not recursive)
    input_dir: PathBuf,

    /// Directory to write results to (created if missing)
    output_dir: PathBuf,

    /// Multiplier for width and height [default: 2.0]
    #[arg(long)]
    scale: Option<f64>,

    /// Apply an unsharp mask after resizing (bitmaps only)
    #[arg(long)]
    sharpen: bool,

    /// Sharpening intensity [default: 2.0]
    #[arg(long)]
    sharpen_intensity: Option<f64>,

    /// Skip failing files instead of stopping at the first one
    #[arg(long)]
    keep_going: bool,

    /// Write a JSON report of the run to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Upscale every image in a directory
    Run(RunArgs),
    /// List the images a run would process, without touching them
    Check {
        input_dir: PathBuf,
        #[arg(default_value = "upscaled")]
        output_dir: PathBuf,
    },
    /// Print a stock upres.toml with all options documented
    GenConfig,
}

fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::Error;
    }
    match verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let level = log_level(cli.verbose, cli.quiet);
    simple_logger::init_with_level(level)?;
    debug!("Log level: {}", level);

    match cli.command {
        Command::Run(args) => {
            let config = config::resolve_config(cli.config.as_deref())?;
            let mut params = config.batch_params(&args.input_dir, &args.output_dir)?;

            if let Some(scale) = args.scale {
                params.scale_factor = ScaleFactor::new(scale).ok_or_else(|| {
                    format!("--scale must be a finite number greater than 0, got {scale}")
                })?;
            }
            if args.sharpen {
                params.apply_sharpen = true;
            }
            if let Some(intensity) = args.sharpen_intensity {
                params.sharpen_intensity = intensity;
            }
            if args.keep_going {
                params.error_policy = batch::ErrorPolicy::Continue;
            }

            println!(
                "==> Upscaling {} \u{2192} {} ({})",
                params.input_dir.display(),
                params.output_dir.display(),
                params.scale_factor
            );
            let mut printer = |progress: BatchProgress| output::print_progress(&progress);
            let sink: Option<&mut dyn ProgressSink> = if cli.quiet {
                None
            } else {
                Some(&mut printer)
            };
            let result = batch::run_batch(&params, sink)?;
            output::print_batch_summary(&result);

            if let Some(report) = &args.report {
                std::fs::write(report, serde_json::to_string_pretty(&result)?)?;
                println!("Report: {}", report.display());
            }

            if !result.failures.is_empty() {
                return Err(format!(
                    "{} of {} images failed",
                    result.failures.len(),
                    result.found
                )
                .into());
            }
        }
        Command::Check {
            input_dir,
            output_dir,
        } => {
            let config = config::resolve_config(cli.config.as_deref())?;
            println!(
                "==> Checking {} ({})",
                input_dir.display(),
                config.scale()?
            );
            let plan = batch::plan_batch(&input_dir, &output_dir)?;
            output::print_plan(&plan);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn log_level_from_flags() {
        assert_eq!(log_level(0, false), Level::Warn);
        assert_eq!(log_level(1, false), Level::Info);
        assert_eq!(log_level(2, false), Level::Debug);
        assert_eq!(log_level(5, false), Level::Trace);
        assert_eq!(log_level(3, true), Level::Error);
    }

    #[test]
    fn run_args_parse() {
        let cli = Cli::try_parse_from([
            "upres",
            "-vv",
            "run",
            "in",
            "out",
            "--scale",
            "1.5",
            "--sharpen",
            "--keep-going",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.input_dir, PathBuf::from("in"));
                assert_eq!(args.scale, Some(1.5));
                assert!(args.sharpen);
                assert!(args.keep_going);
                assert!(args.report.is_none());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn check_output_dir_defaults() {
        let cli = Cli::try_parse_from(["upres", "check", "in"]).unwrap();
        match cli.command {
            Command::Check { output_dir, .. } => {
                assert_eq!(output_dir, PathBuf::from("upscaled"))
            }
            _ => panic!("expected check"),
        }
    }
}
