use crate::auth::AuthProvider;
use crate::capture::{ImageBlob, ImageSource};
use crate::controller::editor::{HoleField, set_course_name, set_date, set_hole_field};
use crate::controller::ocr::{VisionModel, extract_scorecard};
use crate::controller::register::persist_record;
use crate::error::AppError;
use crate::model::{ScoreRecord, is_save_eligible};

/// Screen-level stage of the capture pipeline. Camera substates live inside
/// the model's `ImageSource`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Picking,
    Extracting,
    Correcting,
    Saving,
}

/// Explicit pipeline state owned by the controller; no ambient singleton
/// holds the current scorecard.
pub struct PipelineModel {
    pub stage: Stage,
    pub source: ImageSource,
    pub image: Option<ImageBlob>,
    pub record: Option<ScoreRecord>,
    /// Error overlay; cleared when the user moves on.
    pub error: Option<AppError>,
    pub saved_id: Option<i64>,
}

impl Default for PipelineModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineModel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            source: ImageSource::new(),
            image: None,
            record: None,
            error: None,
            saved_id: None,
        }
    }

    /// One atomic reset: image preview, picker state and record are cleared
    /// together. Partial resets are a defect.
    fn reset_to_idle(&mut self) {
        self.stage = Stage::Idle;
        self.source.reset();
        self.image = None;
        self.record = None;
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    UploadRequested,
    ImageObtained(ImageBlob),
    PickCancelled,
    DeviceFailed(String),
    Extracted(ScoreRecord),
    ExtractionFailed(AppError),
    EditHole {
        index: usize,
        field: HoleField,
        raw: String,
    },
    EditCourseName(String),
    EditDate(String),
    SaveRequested,
    Saved(i64),
    SaveFailed(AppError),
    StartOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    RunExtraction,
    PersistRecord,
}

/// Advance the state machine by one message; transitions with no edge from
/// the current stage are ignored without mutation.
pub fn update(model: &mut PipelineModel, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::UploadRequested => {
            if model.stage == Stage::Idle {
                model.stage = Stage::Picking;
                model.error = None;
                model.saved_id = None;
            }
            vec![]
        }
        Msg::ImageObtained(blob) => {
            // Gate on Picking so a second blob cannot start a duplicate
            // in-flight extraction.
            if model.stage == Stage::Picking {
                model.image = Some(blob);
                model.stage = Stage::Extracting;
                model.error = None;
                vec![Effect::RunExtraction]
            } else {
                vec![]
            }
        }
        Msg::PickCancelled => {
            // A cancel is a no-op, never a failure.
            if model.stage == Stage::Picking {
                model.reset_to_idle();
            }
            vec![]
        }
        Msg::DeviceFailed(reason) => {
            // Stay in Picking; the user may fall back to file mode.
            if model.stage == Stage::Picking {
                model.error = Some(AppError::Device(reason));
            }
            vec![]
        }
        Msg::Extracted(record) => {
            if model.stage == Stage::Extracting {
                model.record = Some(record);
                model.stage = Stage::Correcting;
            }
            vec![]
        }
        Msg::ExtractionFailed(e) => {
            // Discard partial state entirely; the user restarts from Idle.
            if model.stage == Stage::Extracting {
                model.reset_to_idle();
                model.error = Some(e);
            }
            vec![]
        }
        Msg::EditHole { index, field, raw } => {
            if model.stage == Stage::Correcting {
                if let Some(record) = model.record.as_mut() {
                    set_hole_field(record, index, field, &raw);
                }
            }
            vec![]
        }
        Msg::EditCourseName(value) => {
            if model.stage == Stage::Correcting {
                if let Some(record) = model.record.as_mut() {
                    set_course_name(record, &value);
                }
            }
            vec![]
        }
        Msg::EditDate(value) => {
            if model.stage == Stage::Correcting {
                if let Some(record) = model.record.as_mut() {
                    set_date(record, &value);
                }
            }
            vec![]
        }
        Msg::SaveRequested => {
            // At most one save in flight, and only for an eligible record.
            let eligible = model
                .record
                .as_ref()
                .is_some_and(is_save_eligible);
            if model.stage == Stage::Correcting && eligible {
                model.stage = Stage::Saving;
                model.error = None;
                vec![Effect::PersistRecord]
            } else {
                vec![]
            }
        }
        Msg::Saved(id) => {
            if model.stage == Stage::Saving {
                model.reset_to_idle();
                model.saved_id = Some(id);
            }
            vec![]
        }
        Msg::SaveFailed(e) => {
            // Record preserved; the user may retry or keep editing.
            if model.stage == Stage::Saving {
                model.stage = Stage::Correcting;
                model.error = Some(e);
            }
            vec![]
        }
        Msg::StartOver => {
            if model.stage == Stage::Correcting {
                model.stage = Stage::Picking;
                model.source.reset();
                model.image = None;
                model.record = None;
                model.error = None;
            }
            vec![]
        }
    }
}

#[derive(Clone, Copy)]
pub struct Deps<'a> {
    pub vision: &'a dyn VisionModel,
    pub store: &'a dyn crate::storage::ScoreStore,
    pub auth: &'a dyn AuthProvider,
}

/// Execute one effect against the external collaborators. Neither network
/// call supports cancellation; the pipeline simply awaits the outcome.
pub async fn run_effect(effect: Effect, model: &PipelineModel, deps: Deps<'_>) -> Msg {
    match effect {
        Effect::RunExtraction => {
            let Some(image) = model.image.as_ref() else {
                return Msg::ExtractionFailed(AppError::Extraction(
                    "extraction requested without an image".into(),
                ));
            };
            match extract_scorecard(deps.vision, &image.bytes, &image.mime_type).await {
                Ok(record) => Msg::Extracted(record),
                Err(e) => Msg::ExtractionFailed(e),
            }
        }
        Effect::PersistRecord => {
            let Some(record) = model.record.as_ref() else {
                return Msg::SaveFailed(AppError::Persistence(
                    "save requested without a record".into(),
                ));
            };
            match persist_record(deps.store, deps.auth, record).await {
                Ok(id) => Msg::Saved(id),
                Err(e) => Msg::SaveFailed(e),
            }
        }
    }
}
