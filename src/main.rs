use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::{error, info};

use future_jobs_explorer::config::{OutputFormat, Settings};
use future_jobs_explorer::data::loader::load_file;
use future_jobs_explorer::{report, Dashboard};

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let mut settings = Settings::from_env().context("reading settings")?;
    if let Some(path) = std::env::args_os().nth(1) {
        settings.dataset_path = PathBuf::from(path);
    }

    let dataset = load_file(&settings.dataset_path)
        .with_context(|| format!("loading {}", settings.dataset_path.display()))?;
    let dashboard = Dashboard::new(dataset);

    let criteria = settings.criteria_for(&dashboard);
    let view = dashboard.compute(&criteria);
    info!(
        "{} of {} postings match",
        view.metrics.total_jobs,
        dashboard.base().len()
    );

    match settings.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&view).context("serializing view")?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", report::render_text(&view)),
    }
    Ok(())
}
