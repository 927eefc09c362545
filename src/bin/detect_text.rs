use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;
use veriscan_lib::{init_logging, AppConfig, ConfigStore, DetectionEngine, LoggingConfig};

const USAGE: &str = "Usage:\n  detect_text [<path>|-] [--config <dir>] [--lines] [--pretty] [--log]\n\nNotes:\n  - Reads stdin when no path (or `-`) is given.\n  - `--lines` analyzes each non-empty line as its own sample and prints a batch response.\n  - `--config` points at a directory holding config.json (default: platform config dir).\n  - Logging is off unless `--log` is given; RUST_LOG overrides the configured filter.";

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

/// First argument that is neither a flag nor a flag's value.
fn input_path(args: &[String]) -> Option<String> {
    let mut skip_next = false;
    for arg in args.iter().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--config" {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        return Some(arg.clone());
    }
    None
}

fn load_config(args: &[String]) -> Result<AppConfig> {
    let dir = match parse_arg_value(args, "--config") {
        Some(dir) => PathBuf::from(dir),
        None => match ConfigStore::default_config_dir() {
            Some(dir) => dir,
            None => return Ok(AppConfig::default()),
        },
    };
    let store = ConfigStore::new(dir);
    store
        .load()
        .with_context(|| format!("loading {}", store.config_file().display()))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading {}", p)),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = load_config(&args)?;
    if has_flag(&args, "--log") {
        init_logging(&config.logging);
    } else {
        init_logging(&LoggingConfig {
            filter: "off".to_string(),
            file_log: false,
            ..config.logging.clone()
        });
    }

    let text = read_input(input_path(&args).as_deref())?;
    let engine = DetectionEngine::new(config.detection);
    let pretty = has_flag(&args, "--pretty");

    let json = if has_flag(&args, "--lines") {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        let response = engine.detect_batch(&lines);
        if pretty {
            serde_json::to_string_pretty(&response)?
        } else {
            serde_json::to_string(&response)?
        }
    } else {
        let result = engine.detect(&text);
        if pretty {
            serde_json::to_string_pretty(&result)?
        } else {
            serde_json::to_string(&result)?
        }
    };

    println!("{}", json);
    Ok(())
}
