use callibri_rs::consts::SAVE_SUCCESS_MESSAGE;
use callibri_rs::error::handle_error;
use callibri_rs::{CallRepository, Config, StatisticsFetcher};

use anyhow::{anyhow, Context};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::Targets::new().with_targets([
            ("hyper", tracing_subscriber::filter::LevelFilter::OFF),
            ("callibri_rs", tracing_subscriber::filter::LevelFilter::DEBUG),
        ]));
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    let config = Config::from_env()?;
    info!(range = ?config.range, site_index = config.site_index, "starting");

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("failed to connect to database")?;

    let fetcher =
        StatisticsFetcher::new(config.api.clone()).context("failed to build http client")?;
    let calls_data = fetcher.fetch_all(&config.range).await?;
    let batch = calls_data.get(config.site_index).ok_or_else(|| {
        anyhow!(
            "no site at index {}; the account has {} site(s)",
            config.site_index,
            calls_data.len()
        )
    })?;

    let repository = CallRepository::new(db_pool);
    match repository.save(batch).await {
        Ok(_) => println!("{SAVE_SUCCESS_MESSAGE}"),
        Err(e) => {
            handle_error(&e);
            println!("{e}");
        }
    }

    Ok(())
}
