use anyhow::{Context, Result};
use clap::Parser;
use cube_starter::app::{App, AppConfig};
use cube_starter::{build_info, health, logging};
use tracing::{info, warn};
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser, Debug)]
#[command(name = "cube-demo")]
#[command(about = "Textured rotating cube with an egui overlay", long_about = None)]
struct Args {
    /// Configuration profile to load (defaults to APP_PROFILE, then release)
    #[arg(short, long)]
    profile: Option<String>,

    /// Run the startup health checks and exit without opening a window
    #[arg(long)]
    health_check: bool,

    /// Only run health checks whose name contains this text
    #[arg(long, value_name = "NAME", requires = "health_check")]
    check: Option<String>,

    /// Include targets, threads and source locations in log lines
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(profile: Option<&str>) -> AppConfig {
    let result = match profile {
        Some(profile) => AppConfig::load(profile),
        None => AppConfig::load_from_env(),
    };
    result.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using built-in defaults");
        AppConfig::builtin(profile.unwrap_or("release"))
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    info!(version = %build_info::version_string(), "cube-demo");

    let config = load_config(args.profile.as_deref());

    if args.health_check {
        let report = health::checks_for(&config)
            .with_filter(args.check.as_deref())
            .run();
        health::print_report(&report);
        std::process::exit(report.exit_code());
    }

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")?;

    if let Some(e) = app.take_init_error() {
        return Err(e.context("demo failed to start"));
    }

    info!("Window closed, exiting");
    Ok(())
}
