use chrono::Duration;
use std::sync::Arc;
use worldclock_clock::SystemClock;
use worldclock_geo::CityCatalog;
use worldclock_runner::{ClockService, HostConfig, load_config};

fn print_help() {
    eprintln!(
        r#"worldclock - several clocks on one shared time

USAGE:
    worldclock [OPTIONS]

OPTIONS:
    --config <PATH>     Load host configuration from JSON file
    --catalog <PATH>    Load the city catalog from JSON file
    --skew <SECONDS>    Correct the system clock by this many seconds
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Run with defaults
    worldclock

    # Fixed device position and 24-hour clocks
    echo '{{"use_24_hour": true, "device_position": {{"latitude": 35.7, "longitude": 139.7}}}}' > host.json
    worldclock --config host.json
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut catalog_path: Option<String> = None;
    let mut skew_seconds: i64 = 0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            flag @ ("--config" | "--catalog" | "--skew") => {
                i += 1;
                let Some(value) = args.get(i) else {
                    eprintln!("Error: {} requires a value", flag);
                    std::process::exit(1);
                };
                match flag {
                    "--config" => config_path = Some(value.clone()),
                    "--catalog" => catalog_path = Some(value.clone()),
                    _ => skew_seconds = value.parse()?,
                }
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            load_config(&path)?
        }
        None => HostConfig::default(),
    };

    let catalog = match catalog_path {
        Some(path) => {
            log::info!("Loading city catalog from: {}", path);
            CityCatalog::from_json_file(&path)?
        }
        None => CityCatalog::embedded()?,
    };
    log::info!("Catalog: {} cities", catalog.len());

    let clock = Arc::new(SystemClock::with_skew(Duration::seconds(skew_seconds)));
    let provider = config.cached_location(config.static_location());
    let (clocks, task) = ClockService::spawn(config, Arc::new(catalog), clock, provider);

    let mut feed = clocks.subscribe();
    loop {
        tokio::select! {
            changed = feed.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = feed.borrow_and_update().clone();
                let line = snapshot
                    .slots
                    .iter()
                    .map(|slot| format!("{}  {}", slot.location_key, slot.display))
                    .collect::<Vec<_>>()
                    .join("  |  ");
                println!("{}", line);
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted");
                break;
            }
        }
    }

    drop(feed);
    drop(clocks);
    task.await?;
    Ok(())
}
