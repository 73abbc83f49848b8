//! Vimprover - flags avoidable keyboard habits as you type
//!
//! Usage: `sudo vimprover [DEVICE]`

use anyhow::{Context, Result};
use log::{error, info, warn};
use nix::unistd::geteuid;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use vimprover::{
    alert,
    config::Config,
    keyboard::{Device, EventDecoder},
    report::ViolationReporter,
    rules::RuleEngine,
    App, Error,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    if !geteuid().is_root() {
        return Err(Error::PermissionDenied(
            "vimprover reads raw keyboard events and must run as root".to_string(),
        )
        .into());
    }

    let device = resolve_device(&config)?;
    let mut decoder = EventDecoder::open(&device.path).map_err(|e| open_error(&device, e))?;
    info!("Listening on {}", device);

    ctrlc::set_handler(|| {
        info!("Interrupted, exiting");
        std::process::exit(0);
    })
    .context("failed to install Ctrl-C handler")?;

    let engine = RuleEngine::from_config(&config.rules);
    let reporter = ViolationReporter::stdout(
        config.summary_interval(),
        alert::from_command(&config.alert.command),
    );
    let mut app = App::new(engine, reporter);

    if let Err(e) = app.run(&mut decoder) {
        error!("Listener terminated: {}", e);
        return Err(Error::from(e).into());
    }

    Ok(())
}

/// Device from the command line, then config, then discovery
fn resolve_device(config: &Config) -> Result<Device, Error> {
    let locator = config.device.locator();

    let fixed = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.device.path.clone());
    if let Some(path) = fixed {
        return Ok(locator.device_for_path(&path));
    }

    Ok(locator.locate(&mut prompt_for_device)?)
}

/// Ask on stdin until a valid index is entered; `None` on end of input
fn prompt_for_device(candidates: &[Device]) -> Option<usize> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("Select a device:");
        for (i, device) in candidates.iter().enumerate() {
            println!("[{}]: {}", i, device);
        }
        print!("> ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => return None,
        };
        match line.trim().parse::<usize>() {
            Ok(i) if i < candidates.len() => return Some(i),
            _ => println!("Invalid selection: {}", line.trim()),
        }
    }
}

fn open_error(device: &Device, e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::PermissionDenied {
        Error::PermissionDenied(format!("cannot open {}", device.path.display()))
    } else {
        Error::Io(e)
    }
}
