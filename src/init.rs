use std::str::FromStr;

use anyhow::Context;
use axum::Router;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use tokio::net::TcpListener;

use crate::{config::Config, db, routes, telemetry, Data};

pub async fn init_database(config: &Config) -> anyhow::Result<Pool<Sqlite>> {
    tracing::info!("initializing database connection...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("invalid DATABASE_URL {:?}", config.database_url))?
        .create_if_missing(true)
        .foreign_keys(true);

    // every in-memory connection is its own database, so keep exactly one alive
    let db = if config.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(opts.journal_mode(sqlx::sqlite::SqliteJournalMode::Wal))
            .await?
    };

    if config.reset_database {
        tracing::info!("resetting database...");
        let mut conn = db.acquire().await?;
        db::reset(&mut conn).await?;
    }

    tracing::info!("running migrations...");
    db::MIGRATOR.run(&db).await?;
    tracing::info!("finished running migrations!");

    Ok(db)
}

pub struct Server {
    listener: TcpListener,
    app: Router,
}

impl Server {
    pub async fn run(self) -> anyhow::Result<()> {
        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server stopped.");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(err = ?e, "an error occurred when listening for shutdown signal");
        std::future::pending::<()>().await;
    }

    tracing::info!("received shutdown signal, finishing in-flight requests...");
}

pub async fn init() -> anyhow::Result<Server> {
    let config = Config::from_env()?;

    telemetry::init_telemetry(config.otlp_endpoint.as_deref())
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize telemetry")?;

    tracing::info!("initializing... please wait warmly.");
    config.log_defaults();

    let db = init_database(&config).await?;
    let app = routes::router(Data { db });

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;

    tracing::info!("finished initializing! listening on {}", listener.local_addr()?);
    Ok(Server { listener, app })
}
