use std::sync::Mutex;

use async_trait::async_trait;

use cardcaddy::auth::{AuthProvider, SessionAuth};
use cardcaddy::capture::ImageBlob;
use cardcaddy::controller::editor::HoleField;
use cardcaddy::error::AppError;
use cardcaddy::model::ScoreRecord;
use cardcaddy::mvu::pipeline::{Deps, Effect, Msg, PipelineModel, Stage, update};
use cardcaddy::mvu::runtime::run_pipeline;
use cardcaddy::storage::{ScoreStore, StorageError, StoredScore};

mod common;

#[derive(Default)]
struct MemStore {
    rows: Mutex<Vec<(String, ScoreRecord)>>,
}

#[async_trait]
impl ScoreStore for MemStore {
    async fn append_score(
        &self,
        user_id: &str,
        record: &ScoreRecord,
    ) -> Result<i64, StorageError> {
        let mut rows = self.rows.lock().expect("store lock poisoned");
        rows.push((user_id.to_string(), record.clone()));
        Ok(rows.len() as i64)
    }

    async fn scores_for_user(&self, user_id: &str) -> Result<Vec<StoredScore>, StorageError> {
        let rows = self.rows.lock().expect("store lock poisoned");
        Ok(rows
            .iter()
            .enumerate()
            .filter(|(_, (uid, _))| uid == user_id)
            .map(|(i, (_, record))| StoredScore {
                id: (i + 1) as i64,
                created_at: "2024-05-01T00:00:00Z".to_string(),
                record: record.clone(),
            })
            .collect())
    }
}

struct FailingStore;

#[async_trait]
impl ScoreStore for FailingStore {
    async fn append_score(&self, _: &str, _: &ScoreRecord) -> Result<i64, StorageError> {
        Err(StorageError::new("backend quota exceeded"))
    }

    async fn scores_for_user(&self, _: &str) -> Result<Vec<StoredScore>, StorageError> {
        Err(StorageError::new("backend quota exceeded"))
    }
}

fn test_image() -> ImageBlob {
    ImageBlob {
        bytes: vec![0xff, 0xd8, 0xff, 0xe0],
        mime_type: "image/jpeg".to_string(),
    }
}

#[tokio::test]
async fn happy_path_runs_idle_to_idle() {
    let vision = common::CannedVision {
        reply: common::well_formed_reply(),
    };
    let store = MemStore::default();
    let auth = SessionAuth::signed_in("user-1");
    let deps = Deps {
        vision: &vision,
        store: &store,
        auth: &auth,
    };

    let mut model = PipelineModel::new();
    update(&mut model, Msg::UploadRequested);
    assert_eq!(model.stage, Stage::Picking);

    run_pipeline(&mut model, Msg::ImageObtained(test_image()), deps).await;
    assert_eq!(model.stage, Stage::Correcting);
    let record = model.record.as_ref().expect("record after extraction");
    assert_eq!(record.course_name, "Pine Valley");

    run_pipeline(&mut model, Msg::SaveRequested, deps).await;
    assert_eq!(model.stage, Stage::Idle);
    assert_eq!(model.saved_id, Some(1));
    // Atomic reset: image and record are gone together.
    assert!(model.image.is_none());
    assert!(model.record.is_none());
    assert_eq!(store.scores_for_user("user-1").await.unwrap().len(), 1);
}

// Scenario: a fenced non-JSON reply fails extraction; the pipeline returns
// to Idle with no record and no retained image.
#[tokio::test]
async fn extraction_failure_resets_to_idle() {
    let vision = common::CannedVision {
        reply: "```json\n{not valid json\n```".to_string(),
    };
    let store = MemStore::default();
    let auth = SessionAuth::signed_in("user-1");
    let deps = Deps {
        vision: &vision,
        store: &store,
        auth: &auth,
    };

    let mut model = PipelineModel::new();
    update(&mut model, Msg::UploadRequested);
    run_pipeline(&mut model, Msg::ImageObtained(test_image()), deps).await;

    assert_eq!(model.stage, Stage::Idle);
    assert!(model.record.is_none());
    assert!(model.image.is_none());
    assert!(matches!(model.error, Some(AppError::Extraction(_))));
}

#[tokio::test]
async fn model_failure_is_surfaced_the_same_way() {
    let vision = common::FailingVision;
    let store = MemStore::default();
    let auth = SessionAuth::signed_in("user-1");
    let deps = Deps {
        vision: &vision,
        store: &store,
        auth: &auth,
    };

    let mut model = PipelineModel::new();
    update(&mut model, Msg::UploadRequested);
    run_pipeline(&mut model, Msg::ImageObtained(test_image()), deps).await;
    assert_eq!(model.stage, Stage::Idle);
    assert!(matches!(model.error, Some(AppError::Extraction(_))));
}

// Scenario: a valid record with nobody signed in is rejected before any
// store attempt and the record stays in memory.
#[tokio::test]
async fn unauthenticated_save_keeps_record() {
    let vision = common::CannedVision {
        reply: common::well_formed_reply(),
    };
    let store = MemStore::default();
    let auth = SessionAuth::new();
    let deps = Deps {
        vision: &vision,
        store: &store,
        auth: &auth,
    };

    let mut model = PipelineModel::new();
    update(&mut model, Msg::UploadRequested);
    run_pipeline(&mut model, Msg::ImageObtained(test_image()), deps).await;
    assert_eq!(model.stage, Stage::Correcting);

    run_pipeline(&mut model, Msg::SaveRequested, deps).await;
    assert_eq!(model.stage, Stage::Correcting);
    assert!(model.record.is_some());
    assert!(matches!(model.error, Some(AppError::Unauthenticated)));
    assert!(store.rows.lock().unwrap().is_empty());

    // Signing in and retrying succeeds with the same record.
    auth.login("user-2");
    run_pipeline(&mut model, Msg::SaveRequested, deps).await;
    assert_eq!(model.stage, Stage::Idle);
    assert_eq!(store.scores_for_user("user-2").await.unwrap().len(), 1);
}

#[tokio::test]
async fn persistence_failure_returns_to_correcting() {
    let vision = common::CannedVision {
        reply: common::well_formed_reply(),
    };
    let store = FailingStore;
    let auth = SessionAuth::signed_in("user-1");
    let deps = Deps {
        vision: &vision,
        store: &store,
        auth: &auth,
    };

    let mut model = PipelineModel::new();
    update(&mut model, Msg::UploadRequested);
    run_pipeline(&mut model, Msg::ImageObtained(test_image()), deps).await;
    run_pipeline(&mut model, Msg::SaveRequested, deps).await;

    assert_eq!(model.stage, Stage::Correcting);
    assert!(model.record.is_some());
    assert!(matches!(model.error, Some(AppError::Persistence(_))));
}

#[test]
fn ineligible_record_cannot_enter_saving() {
    let mut model = PipelineModel::new();
    update(&mut model, Msg::UploadRequested);
    model.stage = Stage::Correcting;
    let mut record = common::filled_record();
    record.holes[17].score = None;
    record.recompute_totals();
    model.record = Some(record);

    let effects = update(&mut model, Msg::SaveRequested);
    assert!(effects.is_empty());
    assert_eq!(model.stage, Stage::Correcting);
}

#[test]
fn duplicate_saves_and_images_are_gated() {
    let mut model = PipelineModel::new();
    update(&mut model, Msg::UploadRequested);

    let effects = update(&mut model, Msg::ImageObtained(test_image()));
    assert_eq!(effects, vec![Effect::RunExtraction]);
    // A second blob while extracting must not start another OCR call.
    let effects = update(&mut model, Msg::ImageObtained(test_image()));
    assert!(effects.is_empty());

    model.stage = Stage::Correcting;
    model.record = Some(common::filled_record());
    let effects = update(&mut model, Msg::SaveRequested);
    assert_eq!(effects, vec![Effect::PersistRecord]);
    // Already saving: a second request is rejected outright.
    let effects = update(&mut model, Msg::SaveRequested);
    assert!(effects.is_empty());
}

#[test]
fn edits_only_apply_while_correcting() {
    let mut model = PipelineModel::new();
    model.stage = Stage::Correcting;
    model.record = Some(common::filled_record());

    update(
        &mut model,
        Msg::EditHole {
            index: 0,
            field: HoleField::Score,
            raw: "3".to_string(),
        },
    );
    assert_eq!(model.record.as_ref().unwrap().holes[0].score, Some(3));

    model.stage = Stage::Saving;
    update(
        &mut model,
        Msg::EditHole {
            index: 0,
            field: HoleField::Score,
            raw: "9".to_string(),
        },
    );
    assert_eq!(model.record.as_ref().unwrap().holes[0].score, Some(3));
}

#[test]
fn start_over_discards_image_and_record() {
    let mut model = PipelineModel::new();
    model.stage = Stage::Correcting;
    model.image = Some(test_image());
    model.record = Some(common::filled_record());

    update(&mut model, Msg::StartOver);
    assert_eq!(model.stage, Stage::Picking);
    assert!(model.image.is_none());
    assert!(model.record.is_none());
}

#[test]
fn cancel_and_device_failure_edges() {
    let mut model = PipelineModel::new();
    update(&mut model, Msg::UploadRequested);

    update(&mut model, Msg::DeviceFailed("permission denied".to_string()));
    // Device failure keeps the user in Picking for a file-mode fallback.
    assert_eq!(model.stage, Stage::Picking);
    assert!(matches!(model.error, Some(AppError::Device(_))));

    update(&mut model, Msg::PickCancelled);
    assert_eq!(model.stage, Stage::Idle);
}
