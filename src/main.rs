//! pingdeck - a GUI front-end for the system `ping` command
//!
//! Parses command-line arguments, initializes logging and configuration,
//! and runs the eframe application.

use std::env;
use std::path::PathBuf;
use std::process;

use eframe::egui;
use tracing::{debug, error, info, warn};

use pingdeck::app::PingdeckApp;
use pingdeck::config::ConfigLoader;
use pingdeck::error::Result;
use pingdeck::Config;

/// Parsed command-line arguments
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug logging
    debug: bool,
    /// Window width
    width: Option<f32>,
    /// Window height
    height: Option<f32>,
    /// Theme override
    theme: Option<String>,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> Result<Self> {
        let args: Vec<String> = env::args().collect();
        let mut app_args = AppArgs::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        app_args.config_path = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    } else {
                        return Err("Missing config file path".into());
                    }
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--width" | "-w" => {
                    if i + 1 < args.len() {
                        app_args.width = args[i + 1].parse().ok();
                        i += 1;
                    }
                }
                "--height" | "-h" => {
                    if i + 1 < args.len() {
                        app_args.height = args[i + 1].parse().ok();
                        i += 1;
                    }
                }
                "--theme" | "-t" => {
                    if i + 1 < args.len() {
                        app_args.theme = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--help" | "-?" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-v" => {
                    println!("pingdeck v{}", env!("CARGO_PKG_VERSION"));
                    process::exit(0);
                }
                arg if arg.starts_with('-') => {
                    return Err(format!("Unknown option: {}", arg).into());
                }
                _ => {
                    warn!("Ignoring positional argument: {}", args[i]);
                }
            }
            i += 1;
        }

        Ok(app_args)
    }
}

/// Print help information
fn print_help() {
    println!("pingdeck - a GUI front-end for the system ping command");
    println!();
    println!("USAGE:");
    println!("    pingdeck [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Path to configuration file");
    println!("    -d, --debug            Enable debug logging");
    println!("    -w, --width <WIDTH>    Initial window width");
    println!("    -h, --height <HEIGHT>  Initial window height");
    println!("    -t, --theme <THEME>    Theme override (dark, light)");
    println!("    -?, --help             Print this help message");
    println!("    -v, --version          Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    pingdeck looks for configuration files in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. $PINGDECK_CONFIG");
    println!("    3. $XDG_CONFIG_HOME/pingdeck/config.toml");
    println!("    4. ~/.pingdeck/config.toml");
    println!("    5. Built-in defaults");
    println!();
    println!("ENVIRONMENT:");
    println!("    PINGDECK_CONFIG        Path to configuration file");
    println!("    PINGDECK_DEBUG         Enable debug logging (1 or true)");
    println!("    RUST_LOG               Set logging level (error, warn, info, debug, trace)");
}

fn main() -> Result<()> {
    let args = AppArgs::parse().unwrap_or_else(|e| {
        eprintln!("Failed to parse arguments: {}", e);
        print_help();
        process::exit(1);
    });

    // Initialize logging based on the debug flag
    let log_level = if args.debug
        || env::var("PINGDECK_DEBUG").map_or(false, |v| v == "1" || v.to_lowercase() == "true")
    {
        "debug"
    } else {
        "info"
    };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("starting pingdeck v{}", env!("CARGO_PKG_VERSION"));
    debug!("debug logging enabled");

    let config = load_configuration(&args);
    let app = PingdeckApp::new(config)?;
    let native_options = create_native_options(&args);

    if let Err(e) = eframe::run_native(
        "pingdeck",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    ) {
        error!("application failed: {}", e);
        process::exit(1);
    }

    info!("pingdeck shutdown complete");
    Ok(())
}

/// Load configuration from file or use defaults
fn load_configuration(args: &AppArgs) -> Config {
    let mut config = if let Some(path) = &args.config_path {
        debug!("loading config from: {}", path.display());
        match ConfigLoader::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("failed to load config from {}: {}", path.display(), e);
                info!("falling back to default search paths");
                pingdeck::init()
            }
        }
    } else {
        pingdeck::init()
    };

    // Apply command-line theme override
    if let Some(theme) = &args.theme {
        if matches!(theme.as_str(), "dark" | "light") {
            config.ui.theme = theme.clone();
        } else {
            warn!("ignoring unknown theme '{}'", theme);
        }
    }

    config
}

/// Create native options for the application window
fn create_native_options(args: &AppArgs) -> eframe::NativeOptions {
    let width = args.width.unwrap_or(900.0);
    let height = args.height.unwrap_or(640.0);

    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("pingdeck")
            .with_app_id("pingdeck")
            .with_inner_size([width, height])
            .with_min_inner_size([480.0, 360.0])
            .with_resizable(true),
        renderer: eframe::Renderer::Glow,
        ..Default::default()
    }
}
