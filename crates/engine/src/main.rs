//! Headless replay: run a JSON command batch against a session and print the
//! responses.
//!
//! planogram-engine [--scene <scene.json>] [--catalog <catalog.json>] --commands <commands.json>

use std::process::ExitCode;

use planogram_lib::command::execute_json_batch;
use planogram_lib::fixtures::demo_catalog;
use planogram_lib::session::Session;
use planogram_lib::state::EngineSettings;
use shared::Catalog;

struct Args {
    scene: Option<String>,
    catalog: Option<String>,
    commands: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        scene: None,
        catalog: None,
        commands: None,
    };
    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1).cloned();
        match args[i].as_str() {
            "--scene" => parsed.scene = value,
            "--catalog" => parsed.catalog = value,
            "--commands" => parsed.commands = value,
            other => {
                tracing::warn!("Ignoring unknown argument {other}");
                i += 1;
                continue;
            }
        }
        i += 2;
    }
    parsed
}

fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read {path}: {e}"))
}

fn run(args: Args) -> Result<(), String> {
    let catalog = match &args.catalog {
        Some(path) => serde_json::from_str::<Catalog>(&read_file(path)?)
            .map_err(|e| format!("Failed to parse catalog JSON from {path}: {e}"))?,
        None => demo_catalog(),
    };

    let mut session = Session::with_settings(catalog, EngineSettings::load());

    if let Some(path) = &args.scene {
        session.load_scene_json(&read_file(path)?)?;
        tracing::info!("Loaded scene from {path} ({} fixtures)", session.fixture_count());
    }

    let Some(path) = &args.commands else {
        return Err("Missing --commands <path>".to_string());
    };
    let responses = execute_json_batch(&mut session, &read_file(path)?)?;
    let failed = responses.iter().filter(|r| !r.success).count();

    let out = serde_json::to_string_pretty(&responses).map_err(|e| e.to_string())?;
    println!("{out}");
    tracing::info!(
        "Executed {} commands ({} failed), {} components placed",
        responses.len(),
        failed,
        session.component_count()
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planogram_engine=info,planogram_lib=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(parse_args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
