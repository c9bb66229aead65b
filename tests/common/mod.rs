// Shared across integration tests; not every test exercises every helper.
#![allow(dead_code)]

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use sql_middleware::SqlMiddlewareDbError;
use sql_middleware::middleware::ConfigAndPool;

use cardcaddy::controller::ocr::VisionModel;
use cardcaddy::error::AppError;
use cardcaddy::model::{HOLES_PER_ROUND, HoleEntry, ScoreRecord};
use cardcaddy::storage::db::execute_batch_sql;

pub struct TestContext {
    pub config_and_pool: ConfigAndPool,
}

pub async fn setup_test_context() -> Result<TestContext, SqlMiddlewareDbError> {
    let db_name = format!(
        "file:test_db_{}?mode=memory&cache=shared",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time went backwards")
            .as_nanos()
    );

    let config_and_pool = ConfigAndPool::new_sqlite(db_name).await?;
    execute_batch_sql(
        &config_and_pool,
        include_str!("../../src/sql/schema/sqlite/00_score_entry.sql"),
    )
    .await?;

    Ok(TestContext { config_and_pool })
}

/// A fully filled, save-eligible 18-hole record.
#[allow(dead_code)]
pub fn filled_record() -> ScoreRecord {
    let holes = (1..=HOLES_PER_ROUND as u8)
        .map(|number| HoleEntry {
            number,
            par: Some(4),
            score: Some(5),
            putts: Some(2),
        })
        .collect();
    let mut record = ScoreRecord {
        course_name: "Pine Valley".to_string(),
        date: "2024-05-01".to_string(),
        total_score: 0,
        total_putts: None,
        holes,
    };
    record.recompute_totals();
    record
}

/// Vision stub that replies with a fixed string.
#[allow(dead_code)]
pub struct CannedVision {
    pub reply: String,
}

#[async_trait]
impl VisionModel for CannedVision {
    async fn generate(
        &self,
        _prompt: &str,
        _image_base64: &str,
        _mime_type: &str,
    ) -> Result<String, AppError> {
        Ok(self.reply.clone())
    }
}

/// Vision stub whose call itself fails.
#[allow(dead_code)]
pub struct FailingVision;

#[async_trait]
impl VisionModel for FailingVision {
    async fn generate(
        &self,
        _prompt: &str,
        _image_base64: &str,
        _mime_type: &str,
    ) -> Result<String, AppError> {
        Err(AppError::Extraction("model quota exceeded".to_string()))
    }
}

/// A reply in the exact shape the extraction prompt requests.
#[allow(dead_code)]
pub fn well_formed_reply() -> String {
    let holes: Vec<String> = (1..=18)
        .map(|n| format!(r#"{{ "number": {n}, "par": 4, "score": 5, "putts": 2 }}"#))
        .collect();
    format!(
        r#"{{ "course_name": "Pine Valley", "date": "2024-05-01", "total_score": 90, "total_putts": 36, "holes": [{}] }}"#,
        holes.join(",")
    )
}
