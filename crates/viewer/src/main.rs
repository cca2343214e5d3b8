use std::path::PathBuf;

use dog_viewer_lib::command::{
    execute_command, execute_json_batch, CommandResponse, PoseRef, RigCommand,
};
use dog_viewer_lib::harness::TestHarness;
use dog_viewer_lib::state::ViewerSettings;

/// Parsed command line
#[derive(Debug, Default)]
struct CliArgs {
    settings: Option<PathBuf>,
    script: Option<PathBuf>,
    pose: Option<String>,
    export: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dog_viewer=info,dog_viewer_lib=info".into()),
        )
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("usage: dog-viewer [--settings PATH] [--script PATH] [--pose NAME|INDEX] [--export OUT.glb]");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<(), String> {
    let settings = match &args.settings {
        Some(path) => ViewerSettings::load_from(path),
        None => ViewerSettings::load(),
    };
    let mut harness = TestHarness::with_settings(settings);
    let mut responses: Vec<CommandResponse> = Vec::new();

    if let Some(path) = &args.script {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read script {}: {e}", path.display()))?;
        responses.extend(execute_json_batch(&mut harness, &json)?);
        tracing::info!("Ran script {} ({} commands)", path.display(), responses.len());
    }

    if let Some(pose) = &args.pose {
        let index = match pose.parse::<u64>() {
            Ok(i) => PoseRef::Index(i),
            Err(_) => PoseRef::Name(pose.clone()),
        };
        let response = execute_command(&mut harness, RigCommand::ApplyPose { index });
        if let Some(e) = &response.error {
            return Err(format!("Invalid pose '{pose}': {e}"));
        }
        responses.push(response);
    }

    responses.push(execute_command(&mut harness, RigCommand::Frame));

    let out = serde_json::to_string_pretty(&responses).map_err(|e| e.to_string())?;
    println!("{out}");

    if let Some(path) = &args.export {
        let glb = harness.export_glb()?;
        std::fs::write(path, &glb)
            .map_err(|e| format!("Failed to write GLB {}: {e}", path.display()))?;
        tracing::info!("Exported {} bytes to {}", glb.len(), path.display());
    }

    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    while let Some(flag) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{flag} expects a value"));
        match flag.as_str() {
            "--settings" => parsed.settings = Some(value()?.into()),
            "--script" => parsed.script = Some(value()?.into()),
            "--pose" => parsed.pose = Some(value()?),
            "--export" => parsed.export = Some(value()?.into()),
            other => return Err(format!("Unknown argument '{other}'")),
        }
    }
    Ok(parsed)
}
