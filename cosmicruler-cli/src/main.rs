use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cosmicruler_app::error::RulerAppError;
use cosmicruler_app::layout::RulerLayout;
use cosmicruler_app::ruler::assemble;
use cosmicruler_physics::catalog::read_records;
use log::{error, info};

/// Draws the cosmic ruler as an SVG file, optionally rasterized to PNG
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output path for the SVG drawing
    #[arg(short, long, default_value = "glass.svg")]
    output: PathBuf,

    /// Also save a PNG image to this path
    #[arg(long)]
    png: Option<PathBuf>,

    /// Scale factor for the PNG image
    #[arg(short, long, default_value_t = 2.0)]
    scale: f32,

    /// JSON layout file replacing the built-in glass layout
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// CSV galaxy catalog; adds the cumulative count scales
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Use the flat fiducial layout (upright labels below each scale)
    #[arg(long, conflicts_with = "layout")]
    fiducial: bool,
}

fn run(cli: &Cli) -> Result<(), RulerAppError> {
    let layout = match (&cli.layout, cli.fiducial) {
        (Some(path), _) => RulerLayout::from_path(path)?,
        (None, true) => RulerLayout::fiducial(),
        (None, false) => RulerLayout::glass(),
    };
    let records = cli
        .catalog
        .as_ref()
        .map(|path| read_records(path))
        .transpose()?;
    info!("Drawing up to {} scales", layout.scales.len());

    let scene = assemble(&layout, records.as_deref())?;
    match &cli.png {
        Some(png) => scene.save_svg_and_png(&cli.output, png, cli.scale)?,
        None => scene.save_svg(&cli.output)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["cosmicruler"]);
        assert_eq!(cli.output, PathBuf::from("glass.svg"));
        assert_eq!(cli.scale, 2.0);
        assert!(cli.png.is_none() && !cli.fiducial);

        let cli = Cli::parse_from(["cosmicruler", "--fiducial", "-o", "flat.svg", "--png", "flat.png"]);
        assert!(cli.fiducial);
        assert_eq!(cli.png, Some(PathBuf::from("flat.png")));
        assert!(Cli::try_parse_from(["cosmicruler", "--fiducial", "-l", "layout.json"]).is_err());
    }
}
