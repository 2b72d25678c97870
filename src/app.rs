//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments (no subcommand means `tui`)
//! - resolves configuration and starts logging
//! - loads the model artifacts once
//! - dispatches to the dashboard or the one-shot commands

use clap::Parser;

use crate::cli::{Cli, Command, PredictArgs};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::logging::Fallback;
use crate::models::Predictor;
use crate::report::{RESULT_NOTE, format_artifacts, format_breakdown, format_request, format_success};

pub mod pipeline;

/// Entry point for the `ghg` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli.command();

    let config = AppConfig::from_env(&cli.overrides());
    let fallback = match command {
        Command::Tui => Fallback::Discard,
        Command::Predict(_) | Command::Inspect => Fallback::Stderr,
    };
    crate::logging::init(&config.log_file, fallback);
    tracing::info!(
        model = %config.artifacts.model.display(),
        scaler = %config.artifacts.scaler.display(),
        "configuration resolved"
    );

    let predictor = pipeline::load_predictor(&config)?;

    match command {
        Command::Tui => crate::tui::run(predictor),
        Command::Predict(args) => handle_predict(&predictor, &args),
        Command::Inspect => handle_inspect(&predictor),
    }
}

fn handle_predict(predictor: &Predictor, args: &PredictArgs) -> Result<(), AppError> {
    let output = pipeline::run_prediction(&args.to_form(), predictor)?;

    println!("{}", format_success(output.value()));
    println!("{RESULT_NOTE}");

    if args.explain {
        println!();
        print!("{}", format_request(&output.request));
        println!();
        print!("{}", format_breakdown(&output.breakdown));
    }

    if let Some(path) = &args.export {
        crate::io::export::write_prediction_json(path, &output.request, &output.breakdown)?;
    }

    Ok(())
}

fn handle_inspect(predictor: &Predictor) -> Result<(), AppError> {
    print!("{}", format_artifacts(predictor.artifacts()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::predictor::tests::test_artifacts;

    fn predictor() -> Predictor {
        Predictor::new(Arc::new(test_artifacts())).unwrap()
    }

    fn predict_args(extra: &[&str]) -> PredictArgs {
        let mut argv = vec!["ghg", "predict", "--supply-wo-margin", "1", "--margin", "0.2"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command() {
            Command::Predict(args) => args,
            other => panic!("expected predict, got {other:?}"),
        }
    }

    #[test]
    fn predict_with_explain_writes_export() {
        let path = std::env::temp_dir().join(format!("ghg-app-export-{}.json", std::process::id()));
        let args = predict_args(&["--explain", "--export", path.to_str().unwrap()]);
        handle_predict(&predictor(), &args).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["request"]["margin"], 0.2);
        assert!(json["prediction"].as_f64().unwrap().is_finite());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn predict_rejects_invalid_input_with_input_exit_code() {
        let args = predict_args(&["--substance", "unobtanium"]);
        let err = handle_predict(&predictor(), &args).unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("unobtanium"));
    }

    #[test]
    fn inspect_succeeds_on_loaded_artifacts() {
        handle_inspect(&predictor()).unwrap();
    }
}
