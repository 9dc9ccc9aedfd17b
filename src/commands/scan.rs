use std::process::ExitCode;
use std::sync::Arc;

use tracing::info;

use super::AppContext;
use crate::capture::{CommandCamera, ImageSourceAdapter, PathPicker, StoredPermissions};
use crate::classifier::HttpClassifier;
use crate::cli::ScanArgs;
use crate::history::{HistoryStore, ScanRecord};
use crate::labels::{LabelTable, SeverityTier};
use crate::prompt::{AssumeYes, Prompter};
use crate::session::{ScanSession, ScanState};

/// Prompters for one scan. `--yes` answers only the review question;
/// permission grants are remembered, so they are always asked for real.
struct ScanPrompts {
    interactive: Arc<dyn Prompter>,
    review: Arc<dyn Prompter>,
}

impl ScanPrompts {
    fn new(skip_review: bool, interactive: Arc<dyn Prompter>) -> Self {
        let review = if skip_review {
            Arc::new(AssumeYes) as Arc<dyn Prompter>
        } else {
            interactive.clone()
        };
        Self {
            interactive,
            review,
        }
    }
}

/// Run one scan: acquire, review, classify, record.
pub(super) async fn run_scan(ctx: &AppContext, args: ScanArgs) -> anyhow::Result<ExitCode> {
    let config = &ctx.config;
    let prompts = ScanPrompts::new(args.yes, AppContext::prompter(false));

    let permissions = Arc::new(StoredPermissions::new(
        ctx.store.clone(),
        prompts.interactive.clone(),
    ));
    let camera = CommandCamera::new(config.camera_command.clone(), config.captures_dir());
    let picker = PathPicker::new(args.file.clone(), prompts.interactive.clone());
    let source = ImageSourceAdapter::new(permissions, Box::new(camera), Box::new(picker));

    let classifier = HttpClassifier::new(&config.classifier_endpoint, config.request_timeout())?;
    let history = Arc::new(HistoryStore::new(ctx.store.clone()));

    let mut session = ScanSession::new(source, classifier, history);
    if let Some(path) = &config.label_table {
        session = session.with_labels(LabelTable::load(path)?);
    }

    let acquired = if args.camera {
        session.capture()?.clone()
    } else {
        session.pick()?.clone()
    };

    match acquired {
        ScanState::Reviewing(image) => {
            let message = format!("Use this photo? {}", image.uri);
            if !prompts.review.confirm("Review", &message) {
                session.discard()?;
                println!("Photo discarded.");
                return Ok(ExitCode::SUCCESS);
            }
        }
        ScanState::Idle => {
            println!("No photo selected.");
            return Ok(ExitCode::SUCCESS);
        }
        ScanState::Failed(alert) => {
            eprintln!("{}", alert);
            session.acknowledge()?;
            return Ok(ExitCode::FAILURE);
        }
        other => anyhow::bail!("Unexpected scan state: {}", other.name()),
    }

    println!("Analyzing photo...");
    let outcome = session.use_photo().await?.clone();
    session.acknowledge()?;

    match outcome {
        ScanState::ShowingResult(record) => {
            print_result(&record);
            info!("Scan {} complete", record.id);
            Ok(ExitCode::SUCCESS)
        }
        ScanState::Failed(alert) => {
            eprintln!("{}", alert);
            Ok(ExitCode::FAILURE)
        }
        other => anyhow::bail!("Unexpected scan state: {}", other.name()),
    }
}

fn print_result(record: &ScanRecord) {
    let tier = SeverityTier::from_severity(&record.severity);
    println!("Result:      {}", record.name);
    println!("Severity:    {} [{}]", record.severity, tier.badge());
    println!("Description: {}", record.description);
    println!("Date:        {}", record.date);
    println!("Saved as:    {}", record.id);
    if tier.needs_attention() {
        println!("Please seek medical care for this wound.");
    }
}
