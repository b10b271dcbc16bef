use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use facescreen_core::classification::infrastructure::http_classifier::HttpClassifier;
use facescreen_core::detection::domain::face_mesh_extractor::FaceMeshExtractor;
use facescreen_core::detection::infrastructure::http_face_mesh_extractor::HttpFaceMeshExtractor;
use facescreen_core::shared::constants::{DEFAULT_SERVICE_URL, SIMULATED_PROCESSING_DELAY};
use facescreen_core::shared::selected_image::SelectedImage;
use facescreen_core::shared::service_config::ServiceConfig;
use facescreen_core::workflow::navigation::{ProcessingInput, Screen, Wizard, INSTRUCTION_SLIDES};
use facescreen_core::workflow::prediction_outcome::PredictionOutcome;
use facescreen_core::workflow::processing_use_case::{ProcessingBackend, ProcessingUseCase};
use facescreen_core::workflow::result_stage::ResultView;
use facescreen_core::workflow::upload_stage::{SubmitMode, SubmitOutcome, UploadStage};
use facescreen_core::workflow::workflow_logger::SummaryWorkflowLogger;

/// Screen a face photo against the remote classification service.
#[derive(Parser)]
#[command(name = "facescreen")]
struct Cli {
    /// Photo of the face to analyse.
    photo: PathBuf,

    /// Base URL of the face mesh and prediction service.
    #[arg(long, default_value = DEFAULT_SERVICE_URL)]
    service_url: String,

    /// Per-request timeout in seconds (0 = no timeout).
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Extract the face mesh before entering processing.
    #[arg(long)]
    extract_on_upload: bool,

    /// Skip the service and report a positive result after a fixed delay.
    #[arg(long)]
    simulate: bool,

    /// Delay used by --simulate, in milliseconds.
    #[arg(long)]
    simulate_delay_ms: Option<u64>,

    /// Print the instruction slides before analysing.
    #[arg(long)]
    show_instructions: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let mut config = ServiceConfig::new(&cli.service_url)?;
    if cli.timeout_secs > 0 {
        config = config.with_timeout(Duration::from_secs(cli.timeout_secs));
    }

    let mut wizard = Wizard::new();
    wizard.start();
    if cli.show_instructions {
        for (i, slide) in INSTRUCTION_SLIDES.iter().enumerate() {
            eprintln!("[{}/{}] {slide}", i + 1, INSTRUCTION_SLIDES.len());
        }
    }
    while *wizard.screen() != Screen::Upload {
        wizard.next_slide();
    }

    let input = upload(&cli, &config, &cli.photo)?;
    wizard.submit_upload(input);

    let outcome = process(&cli, &config, wizard.take_processing_input())?;
    wizard.finish_processing(outcome.clone());

    println!("{}", ResultView::render(&outcome));
    Ok(())
}

fn upload(
    cli: &Cli,
    config: &ServiceConfig,
    photo: &Path,
) -> Result<ProcessingInput, Box<dyn std::error::Error>> {
    let mode = if cli.extract_on_upload && !cli.simulate {
        SubmitMode::ExtractFirst
    } else {
        SubmitMode::Forward
    };
    let mut stage = UploadStage::new(mode);
    let image = SelectedImage::from_path(photo)?;
    log::info!(
        "Selected {} ({}, {} bytes)",
        image.file_name(),
        image.mime_type(),
        image.len()
    );
    stage.select(image);

    let extractor: Box<dyn FaceMeshExtractor> = Box::new(HttpFaceMeshExtractor::new(config)?);
    match stage.submit(extractor.as_ref()) {
        SubmitOutcome::Navigate(input) => Ok(input),
        SubmitOutcome::Failed(err) => Err(err.user_message().into()),
        SubmitOutcome::Inert => Err("Nothing to submit".into()),
    }
}

fn process(
    cli: &Cli,
    config: &ServiceConfig,
    input: Option<ProcessingInput>,
) -> Result<PredictionOutcome, Box<dyn std::error::Error>> {
    let backend = if cli.simulate {
        log::warn!("Simulation mode: no service calls, result is always positive");
        ProcessingBackend::Simulated {
            delay: simulation_delay(cli),
        }
    } else {
        ProcessingBackend::Network {
            extractor: Box::new(HttpFaceMeshExtractor::new(config)?),
            classifier: Box::new(HttpClassifier::new(config)?),
        }
    };

    let mut use_case = ProcessingUseCase::new(backend, Box::new(SummaryWorkflowLogger::new()));
    use_case
        .execute(input, Arc::new(AtomicBool::new(false)))
        .ok_or_else(|| "Processing was cancelled".into())
}

fn simulation_delay(cli: &Cli) -> Duration {
    cli.simulate_delay_ms
        .map(Duration::from_millis)
        .unwrap_or(SIMULATED_PROCESSING_DELAY)
}

// The photo's format is checked when it is loaded, from its contents first.
fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.photo.exists() {
        return Err(format!("Photo not found: {}", cli.photo.display()).into());
    }
    if cli.simulate_delay_ms.is_some() && !cli.simulate {
        return Err("--simulate-delay-ms requires --simulate".into());
    }
    Ok(())
}
