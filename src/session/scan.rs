use std::sync::Arc;

use tracing::{info, warn};

use super::alert::Alert;
use super::clock::{Clock, IdGenerator, SystemClock};
use super::state::ScanState;
use crate::capture::{ImageRef, ImageSourceAdapter, SourceKind, SourceOutcome};
use crate::classifier::Classifier;
use crate::encoder::encode;
use crate::error::{Result, SkinScanError};
use crate::history::{HistoryStore, ScanRecord};
use crate::labels::{default_table, LabelTable};
use crate::storage::KeyValueStore;

/// Drives one screen's worth of scanning: acquire a photo, review it,
/// classify it and record the result.
///
/// Collaborators are injected; the session owns no globals. Each public
/// method is one user action and returns the state it left the session in.
pub struct ScanSession<C: Classifier, S: KeyValueStore> {
    source: ImageSourceAdapter,
    classifier: C,
    history: Arc<HistoryStore<S>>,
    labels: LabelTable,
    clock: Box<dyn Clock>,
    ids: IdGenerator,
    state: ScanState,
}

impl<C: Classifier, S: KeyValueStore> ScanSession<C, S> {
    pub fn new(source: ImageSourceAdapter, classifier: C, history: Arc<HistoryStore<S>>) -> Self {
        let floor = history
            .load_all()
            .iter()
            .filter_map(|r| r.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            source,
            classifier,
            history,
            labels: default_table().clone(),
            clock: Box::new(SystemClock),
            ids: IdGenerator::starting_after(floor),
            state: ScanState::Idle,
        }
    }

    pub fn with_labels(mut self, labels: LabelTable) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Take a photo with the camera. Idle -> Reviewing, or Failed.
    pub fn capture(&mut self) -> Result<&ScanState> {
        self.expect_idle("capture")?;
        self.state = ScanState::Capturing(SourceKind::Camera);

        self.state = match self.source.capture_from_device() {
            Ok(image) => ScanState::Reviewing(image),
            Err(e) => fail(e),
        };
        Ok(&self.state)
    }

    /// Choose a photo from the library. Idle -> Reviewing, back to Idle on
    /// cancel, or Failed.
    pub fn pick(&mut self) -> Result<&ScanState> {
        self.expect_idle("pick a photo")?;
        self.state = ScanState::Capturing(SourceKind::Library);

        self.state = match self.source.pick_from_library() {
            Ok(SourceOutcome::Selected(image)) => ScanState::Reviewing(image),
            Ok(SourceOutcome::Cancelled) => ScanState::Idle,
            Err(e) => fail(e),
        };
        Ok(&self.state)
    }

    /// Drop the photo under review. Reviewing -> Idle.
    pub fn discard(&mut self) -> Result<&ScanState> {
        match &self.state {
            ScanState::Reviewing(image) => {
                info!("Discarded {}", image.uri);
                self.state = ScanState::Idle;
                Ok(&self.state)
            }
            other => Err(invalid("discard", other)),
        }
    }

    /// Classify the photo under review and record the result.
    /// Reviewing -> Classifying -> ShowingResult, or Failed with nothing
    /// written to history.
    pub async fn use_photo(&mut self) -> Result<&ScanState> {
        let image = match &self.state {
            ScanState::Reviewing(image) => image.clone(),
            other => return Err(invalid("use a photo", other)),
        };
        self.state = ScanState::Classifying(image.clone());

        self.state = match self.classify_and_record(&image).await {
            Ok(record) => ScanState::ShowingResult(record),
            Err(e) => fail(e),
        };
        Ok(&self.state)
    }

    /// Dismiss the result or the alert. ShowingResult/Failed -> Idle.
    pub fn acknowledge(&mut self) -> Result<&ScanState> {
        match &self.state {
            ScanState::ShowingResult(_) | ScanState::Failed(_) => {
                self.state = ScanState::Idle;
                Ok(&self.state)
            }
            other => Err(invalid("acknowledge", other)),
        }
    }

    async fn classify_and_record(&self, image: &ImageRef) -> Result<ScanRecord> {
        let payload = encode(&image.uri)?;
        let label = self.classifier.classify(&payload).await?;
        let diagnosis = self.labels.map(&label);

        let now = self.clock.now();
        let record = ScanRecord::new(
            self.ids.next(now),
            image.uri.clone(),
            diagnosis,
            now.format("%Y-%m-%d").to_string(),
        );

        self.history.append(record.clone())?;
        info!(
            "Recorded scan {}: {} ({})",
            record.id, record.name, record.severity
        );
        Ok(record)
    }

    fn expect_idle(&self, action: &'static str) -> Result<()> {
        match &self.state {
            ScanState::Idle => Ok(()),
            other => Err(invalid(action, other)),
        }
    }
}

fn fail(err: SkinScanError) -> ScanState {
    warn!("Scan step failed: {}", err);
    ScanState::Failed(Alert::from(&err))
}

fn invalid(action: &'static str, state: &ScanState) -> SkinScanError {
    SkinScanError::InvalidTransition {
        action,
        state: state.name(),
    }
}
