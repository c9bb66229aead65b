pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs};

use clap::Parser;
use std::fs;

/// Parse the command line into ready-to-use args: the startup script paths
/// (semicolon separated) are read and concatenated here, and the vision API
/// key falls back to the GOOGLE_API_KEY environment variable.
#[must_use]
pub fn args_checks() -> CleanArgs {
    let args = Args::parse();

    let combined_sql_script = args
        .db_startup_script
        .as_deref()
        .map(|scripts| {
            scripts
                .split(';')
                .filter_map(|path| fs::read_to_string(path).ok())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    let vision_api_key = args
        .vision_api_key
        .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
        .unwrap_or_default();

    CleanArgs {
        db_type: args.db_type,
        db_host: args.db_host,
        db_port: args.db_port,
        db_user: args.db_user,
        db_password: args.db_password,
        db_name: args.db_name,
        db_startup_script: args.db_startup_script,
        combined_sql_script,
        vision_api_key,
        vision_model: args.vision_model,
        bind: args.bind,
    }
}
