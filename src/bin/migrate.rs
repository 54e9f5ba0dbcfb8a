//! Import the legacy `kanji_index.json` store into the SQLite database.
//!
//! Reads `LEGACY_JSON_PATH` and writes to `DATABASE_PATH`. Safe to re-run:
//! words already present are counted as duplicates.

use anyhow::Context;
use kanji_vocab::legacy::{import_index, load_legacy_index};
use kanji_vocab::{config::Config, db::init_db, Repository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    let index = load_legacy_index(&config.legacy_json_path)
        .with_context(|| format!("loading {}", config.legacy_json_path))?;
    let pool = init_db(&config.database_path)
        .await
        .with_context(|| format!("opening {}", config.database_path))?;
    let repo = Repository::new(pool);

    let report = import_index(&repo, &index).await?;

    println!("Migration finished");
    println!("  migrated:   {}", report.migrated);
    println!("  duplicates: {}", report.duplicates);
    println!("  failed:     {}", report.failed);
    println!("  in store:   {}", repo.count_words().await?);
    Ok(())
}
