use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Dashboard exited with error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    subcentral::observability::init_observability("dashboard")?;

    dashboard::run().await
}
