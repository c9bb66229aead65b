use std::sync::Arc;

use actix_web::web::Data;
use actix_web::{HttpResponse, Responder, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::SessionAuth;
use crate::controller::ocr::{VisionModel, extract_scorecard};
use crate::controller::register::data_service::{can_persist, persist_record, saved_rounds};
use crate::error::AppError;
use crate::model::{HOLES_PER_ROUND, ScoreRecord, validate};
use crate::storage::ScoreStore;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrRequest {
    #[serde(default)]
    pub image_base64: String,
    #[serde(default)]
    pub mime_type: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
}

#[derive(Serialize)]
struct SavedRound {
    id: i64,
    created_at: String,
    #[serde(flatten)]
    record: ScoreRecord,
}

/// POST /api/ocr — inline base64 image in, extracted `ScoreRecord` out.
/// Missing or undecodable image data is a 400; any extraction failure is a
/// 502 with an `{ "error": … }` payload.
pub async fn ocr_extract(
    body: web::Json<OcrRequest>,
    vision: Data<Arc<dyn VisionModel>>,
) -> impl Responder {
    if body.image_base64.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "No image data" }));
    }
    let image = match STANDARD.decode(&body.image_base64) {
        Ok(bytes) => bytes,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(json!({ "error": format!("Invalid image encoding: {e}") }));
        }
    };
    let mime_type = if body.mime_type.is_empty() {
        "image/jpeg"
    } else {
        &body.mime_type
    };

    match extract_scorecard(vision.get_ref().as_ref(), &image, mime_type).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => {
            eprintln!("OCR error: {e}");
            HttpResponse::BadGateway().json(json!({ "error": e.to_string() }))
        }
    }
}

/// POST /api/scores — append a corrected record to the signed-in user's
/// score log. Rejected without a store attempt when unauthenticated (401) or
/// not save-eligible (422).
pub async fn save_score(
    body: web::Json<ScoreRecord>,
    store: Data<Arc<dyn ScoreStore>>,
    auth: Data<SessionAuth>,
) -> impl Responder {
    let mut record = body.into_inner();
    if record.holes.len() != HOLES_PER_ROUND {
        return HttpResponse::UnprocessableEntity()
            .json(json!({ "error": format!("expected {HOLES_PER_ROUND} holes") }));
    }
    // Totals are derived; never trust the client's.
    record.recompute_totals();

    if !can_persist(&record) {
        let errors = validate(&record).error_count();
        return HttpResponse::UnprocessableEntity()
            .json(json!({ "error": format!("fix {errors} field errors before saving") }));
    }

    match persist_record(store.get_ref().as_ref(), auth.get_ref(), &record).await {
        Ok(id) => HttpResponse::Ok().json(json!({ "id": id })),
        Err(AppError::Unauthenticated) => {
            HttpResponse::Unauthorized().json(json!({ "error": "not signed in" }))
        }
        Err(e) => {
            eprintln!("Save error: {e}");
            HttpResponse::BadGateway().json(json!({ "error": e.to_string() }))
        }
    }
}

/// GET /api/scores — the signed-in user's saved rounds, newest first.
pub async fn list_scores(
    store: Data<Arc<dyn ScoreStore>>,
    auth: Data<SessionAuth>,
) -> impl Responder {
    match saved_rounds(store.get_ref().as_ref(), auth.get_ref()).await {
        Ok(rounds) => {
            let out: Vec<SavedRound> = rounds
                .into_iter()
                .map(|s| SavedRound {
                    id: s.id,
                    created_at: s.created_at,
                    record: s.record,
                })
                .collect();
            HttpResponse::Ok().json(out)
        }
        Err(AppError::Unauthenticated) => {
            HttpResponse::Unauthorized().json(json!({ "error": "not signed in" }))
        }
        Err(e) => {
            eprintln!("List error: {e}");
            HttpResponse::BadGateway().json(json!({ "error": e.to_string() }))
        }
    }
}

/// POST /api/login — fire-and-forget flip of the session auth capability.
pub async fn login(body: web::Json<LoginRequest>, auth: Data<SessionAuth>) -> impl Responder {
    use crate::auth::AuthProvider;
    auth.get_ref().login(&body.user_id);
    HttpResponse::Ok().json(json!({ "authenticated": auth.get_ref().is_authenticated() }))
}
