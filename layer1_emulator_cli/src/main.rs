use clap::{Arg, Command};
use indicatif::{MultiProgress, ProgressBar};
use indicatif_log_bridge::LogWrapper;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use liblayer1_emulator::config::Config;
use liblayer1_emulator::process::process;

/// Write a default configuration for the user to fill in
fn make_template_config(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let yaml_str = serde_yaml::to_string(&Config::default())?;
    std::fs::write(path, yaml_str)?;
    Ok(())
}

fn main() {
    let matches = Command::new("layer1_emulator_cli")
        .about("Emulate the Layer-1 link encoding for a file of calorimeter events")
        .subcommand(Command::new("new").about("Write a template configuration yaml file"))
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .required(true)
                .help("Path to the configuration file"),
        )
        .get_matches();

    // Terminal logging and the progress bar share the terminal, so the
    // logger has to go through the progress manager
    let logger = simplelog::TermLogger::new(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    let progress_manager = MultiProgress::new();
    LogWrapper::new(progress_manager.clone(), logger)
        .try_init()
        .expect("logger was already initialized");

    let config_path = PathBuf::from(
        matches
            .get_one::<String>("path")
            .expect("clap enforces --path"),
    );

    if matches.subcommand_matches("new").is_some() {
        match make_template_config(&config_path) {
            Ok(()) => log::info!(
                "Wrote a template config to {}",
                config_path.to_string_lossy()
            ),
            Err(e) => log::error!("Could not write template config: {e}"),
        }
        return;
    }

    let config = match Config::read_config_file(&config_path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    log::info!("Loaded config from {}", config_path.to_string_lossy());
    log::info!("Event Path: {}", config.event_path.to_string_lossy());
    log::info!("Output Path: {}", config.output_path.to_string_lossy());
    log::info!("Debug: {}", config.debug);

    let bar = progress_manager.add(ProgressBar::new(100));
    let progress = Arc::new(Mutex::new(0.0));
    let worker_progress = progress.clone();
    let worker = std::thread::spawn(|| process(config, worker_progress));

    // Poll the worker's progress fraction until it finishes
    loop {
        std::thread::sleep(Duration::from_millis(200));
        match progress.lock() {
            Ok(fraction) => bar.set_position((*fraction * 100.0) as u64),
            Err(e) => log::error!("{e}"),
        }

        if worker.is_finished() {
            break;
        }
    }
    bar.finish();

    match worker.join() {
        Ok(Ok(())) => log::info!("Emulated all events."),
        Ok(Err(e)) => log::error!("Emulation failed: {e}"),
        Err(_) => log::error!("The emulation thread panicked!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_config_is_readable() {
        let path = std::env::temp_dir().join("layer1_emulator_template_config.yml");
        make_template_config(&path).unwrap();
        let config = Config::read_config_file(&path).unwrap();
        assert_eq!(config, Config::default());
        std::fs::remove_file(&path).ok();
    }
}
