use quotes_api::{constants::STARTUP_TIME, init};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let _ = &*STARTUP_TIME;

    let server = init::init().await?;
    server.run().await?;

    Ok(())
}
