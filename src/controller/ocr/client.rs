use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::controller::ocr::EXTRACTION_PROMPT;
use crate::controller::ocr::parse::parse_extraction_reply;
use crate::error::AppError;
use crate::model::ScoreRecord;

/// Opaque vision model: prompt + inline image in, text out.
#[async_trait]
pub trait VisionModel: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        image_base64: &str,
        mime_type: &str,
    ) -> Result<String, AppError>;
}

/// Gemini `generateContent` client with the image passed as an inlineData
/// part.
pub struct GeminiVision {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

pub const DEFAULT_VISION_MODEL: &str = "gemini-2.0-flash";
const VISION_TIMEOUT_SECS: u64 = 60;

impl GeminiVision {
    #[must_use]
    pub fn new(api_key: String, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(VISION_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            api_key,
            model,
            client,
        }
    }
}

#[async_trait]
impl VisionModel for GeminiVision {
    async fn generate(
        &self,
        prompt: &str,
        image_base64: &str,
        mime_type: &str,
    ) -> Result<String, AppError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [
                { "text": prompt },
                { "inlineData": { "mimeType": mime_type, "data": image_base64 } }
            ]}]
        });

        let resp = self.client.post(&url).json(&body).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            return Err(AppError::Extraction(format!(
                "vision model returned {status}: {detail}"
            )));
        }

        let json: serde_json::Value = resp.json().await?;
        json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AppError::Extraction("vision reply had no text part".into()))
    }
}

/// Run one OCR pass over a scorecard image. Idempotent; safe to invoke again
/// on a re-upload with no state left from a prior attempt.
///
/// # Errors
///
/// Returns `AppError::Extraction` for any model, network or reply-shape
/// failure; a malformed reply is never partially adopted.
pub async fn extract_scorecard(
    vision: &dyn VisionModel,
    image: &[u8],
    mime_type: &str,
) -> Result<ScoreRecord, AppError> {
    let image_base64 = STANDARD.encode(image);
    let reply = vision
        .generate(EXTRACTION_PROMPT, &image_base64, mime_type)
        .await?;
    parse_extraction_reply(&reply)
}
