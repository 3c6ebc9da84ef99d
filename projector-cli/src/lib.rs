/// Command-line front end for the projection pipeline
use anyhow::{bail, Context};
use clap::Parser;
use log::info;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use projector_core::{points, stl, PipelineConfig, Screen, Vector};

pub mod logging;

pub use logging::{init_logging, LoggingConfig};

/// Project model-space points to screen pixels
#[derive(Debug, Parser)]
#[command(name = "projector", version)]
pub struct Args {
    /// Pipeline config (JSON); defaults apply when omitted
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// STL model whose vertices are projected
    #[arg(long)]
    pub stl: Option<PathBuf>,

    /// Model point as `x,y,z`; may be repeated
    #[arg(long = "point", short = 'p', value_name = "X,Y,Z", allow_hyphen_values = true)]
    pub points: Vec<Vector>,

    /// Screen size override, e.g. `1024x768`
    #[arg(long, value_parser = parse_screen)]
    pub screen: Option<Screen>,

    /// Edge length of the cube projected when no points are given
    #[arg(long, default_value_t = 2.0)]
    pub cube_size: f64,

    /// Log filter in env_logger syntax (falls back to RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,
}

fn parse_screen(s: &str) -> Result<Screen, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", s))?;
    let width = w.trim().parse::<u32>().map_err(|e| format!("width: {}", e))?;
    let height = h.trim().parse::<u32>().map_err(|e| format!("height: {}", e))?;
    Ok(Screen::new(width, height))
}

/// Resolve the effective config: file (or defaults), then CLI overrides.
pub fn load_config(args: &Args) -> anyhow::Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            PipelineConfig::from_json(&json)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };
    if let Some(screen) = args.screen {
        config.screen = screen;
    }
    config.validate()?;
    Ok(config)
}

/// Gather model points: STL vertices, then `--point` values, else a cube.
pub fn load_points(args: &Args) -> anyhow::Result<Vec<Vector>> {
    let mut model = Vec::new();
    if let Some(path) = &args.stl {
        let data =
            fs::read(path).with_context(|| format!("failed to read STL file {}", path.display()))?;
        let loaded = stl::parse_stl(&data)
            .with_context(|| format!("failed to parse STL {}", path.display()))?;
        info!("loaded {} points from {}", loaded.len(), path.display());
        model.extend(loaded);
    }
    model.extend(args.points.iter().cloned());

    if model.is_empty() {
        if args.cube_size <= 0.0 {
            bail!("cube size must be positive, got {}", args.cube_size);
        }
        info!("no points given, projecting a cube of size {}", args.cube_size);
        model = points::cube(args.cube_size);
    }
    Ok(model)
}

/// Run the pipeline for `args` and return the visible screen points.
pub fn run(args: &Args) -> anyhow::Result<Vec<Vector>> {
    let config = load_config(args)?;
    let model = load_points(args)?;
    let screen_points = config
        .engine()
        .execute(&model, &config.transform, config.screen)
        .context("pipeline failed")?;
    info!(
        "{} of {} points visible on {}x{}",
        screen_points.len(),
        model.len(),
        config.screen.width,
        config.screen.height
    );
    Ok(screen_points)
}

/// One `x y` line per point.
pub fn write_points<W: Write>(writer: &mut W, screen_points: &[Vector]) -> io::Result<()> {
    for p in screen_points {
        writeln!(writer, "{:.3} {:.3}", p[0], p[1])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("projector").chain(extra.iter().copied()))
    }

    #[test]
    fn test_parse_screen() {
        assert_eq!(parse_screen("1024x768"), Ok(Screen::new(1024, 768)));
        assert!(parse_screen("1024").is_err());
        assert!(parse_screen("ax768").is_err());
    }

    #[test]
    fn test_points_from_arguments() {
        let a = args(&["-p", "0,0,0", "--point", "-100,0,0"]);
        assert_eq!(a.points.len(), 2);
        let out = run(&a).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!((out[0][0], out[0][1]), (400.0, 300.0));
        assert_eq!(out[1][0], 0.0);
    }

    #[test]
    fn test_default_cube_is_projected() {
        let model = load_points(&args(&[])).unwrap();
        assert_eq!(model.len(), 8);
        assert!(load_points(&args(&["--cube-size", "0"])).is_err());
    }

    #[test]
    fn test_screen_override_is_validated() {
        let config = load_config(&args(&["--screen", "320x200"])).unwrap();
        assert_eq!(config.screen, Screen::new(320, 200));
        assert!(load_config(&args(&["--screen", "0x200"])).is_err());
    }

    #[test]
    fn test_write_points() {
        let mut out = Vec::new();
        write_points(&mut out, &[projector_core::vector![400, 300, 0, 1]]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "400.000 300.000\n");
    }
}
