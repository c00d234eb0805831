use clap::Parser;
use trebuchet::utils::{logger, validation::Validate};
use trebuchet::{
    CalibrationEngine, CalibrationPipeline, CliConfig, ConfigProvider, ConsoleSink,
    FileLineSource, Result, TomlConfig,
};

fn run<C: ConfigProvider + Validate>(config: C) -> Result<()> {
    config.validate()?;

    tracing::info!("Input file: {}", config.input_path());
    let source = FileLineSource::new(config.input_path());
    let sink = ConsoleSink::stdout(config.output_format());
    let monitor_enabled = config.monitor();
    if monitor_enabled {
        tracing::info!("Process monitoring enabled");
    }

    let pipeline = CalibrationPipeline::new(source, sink, config);
    let mut engine = CalibrationEngine::new_with_monitoring(pipeline, monitor_enabled);
    engine.run()?;
    Ok(())
}

fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let outcome = match cli.config.clone() {
        Some(path) => {
            tracing::info!("Loading config from {}", path);
            TomlConfig::from_file(&path).and_then(run)
        }
        None => run(cli),
    };

    if let Err(e) = outcome {
        tracing::error!(
            "Calibration failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("Error: {}", e.user_friendly_message());
        eprintln!("Hint: {}", e.recovery_suggestion());
        std::process::exit(e.severity().exit_code());
    }
}
