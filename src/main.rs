use std::sync::Arc;

use actix_files::Files;
use actix_web::web::Data;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use deadpool_postgres::{ManagerConfig, RecyclingMethod};
use sql_middleware::middleware::{ConfigAndPool, DatabaseType};

use cardcaddy::args;
use cardcaddy::auth::SessionAuth;
use cardcaddy::controller::ocr::{GeminiVision, VisionModel};
use cardcaddy::controller::register::{list_scores, login, ocr_extract, save_score};
use cardcaddy::storage::db::execute_batch_sql;
use cardcaddy::storage::{DbScoreStore, ScoreStore};
use cardcaddy::view::index::{DEFAULT_INDEX_TITLE, render_index_template};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::args_checks();

    let config_and_pool: ConfigAndPool;
    if args.db_type == DatabaseType::Postgres {
        let mut postgres_config = deadpool_postgres::Config::new();
        postgres_config.dbname = Some(args.db_name.clone());
        postgres_config.host = args.db_host.clone();
        postgres_config.port = args.db_port;
        postgres_config.user = args.db_user.clone();
        postgres_config.password = args.db_password.clone();
        postgres_config.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        config_and_pool = ConfigAndPool::new_postgres(postgres_config).await?;
    } else {
        match ConfigAndPool::new_sqlite(args.db_name.clone()).await {
            Ok(pool) => {
                config_and_pool = pool;
            }
            Err(e) => {
                eprintln!("Error: {e}\nBacktrace: {:?}", std::backtrace::Backtrace::capture());
                std::process::exit(1);
            }
        }
    }

    if args.db_type == DatabaseType::Sqlite {
        execute_batch_sql(
            &config_and_pool,
            include_str!("sql/schema/sqlite/00_score_entry.sql"),
        )
        .await?;
    }

    if args.db_startup_script.is_some() {
        execute_batch_sql(&config_and_pool, &args.combined_sql_script).await?;
    }

    let vision: Arc<dyn VisionModel> = Arc::new(GeminiVision::new(
        args.vision_api_key.clone(),
        args.vision_model.clone(),
    ));
    let store: Arc<dyn ScoreStore> = Arc::new(DbScoreStore::new(config_and_pool.clone()));

    // Built once so every worker shares the same session state.
    let auth_data = Data::new(SessionAuth::new());
    let vision_data = Data::new(vision);
    let store_data = Data::new(store);
    let pool_data = Data::new(config_and_pool.clone());
    let args_for_web = args.clone();
    let bind = args.bind.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .app_data(Data::new(args_for_web.clone()))
            .app_data(auth_data.clone())
            .app_data(vision_data.clone())
            .app_data(store_data.clone())
            .route("/", web::get().to(index))
            .route("/api/ocr", web::post().to(ocr_extract))
            .route("/api/scores", web::post().to(save_score))
            .route("/api/scores", web::get().to(list_scores))
            .route("/api/login", web::post().to(login))
            .route("/health", web::get().to(HttpResponse::Ok))
            .service(Files::new("/static", "./static"))
    })
    .bind(bind)?
    .run()
    .await?;
    Ok(())
}

async fn index() -> impl Responder {
    let markup = render_index_template(DEFAULT_INDEX_TITLE);
    HttpResponse::Ok()
        .content_type("text/html")
        .body(markup.into_string())
}
