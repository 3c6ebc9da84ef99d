/// Projector CLI - prints the screen position of each visible model point
///
/// Examples:
///   projector --point 0,0,0 --point 50,20,-10
///   projector --config pipeline.json --stl model.stl --screen 1920x1080
use clap::Parser;
use projector_cli::{init_logging, run, write_points, Args, LoggingConfig};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    let screen_points = run(&args)?;

    let stdout = std::io::stdout();
    write_points(&mut stdout.lock(), &screen_points)?;
    Ok(())
}
