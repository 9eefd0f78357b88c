use clinic_billing::config;
use clinic_billing::errors::Result;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the clinic configuration
    let app_config = config::clinic::load_default_config()?;
    info!(clinic = %app_config.clinic.name, "Loaded clinic configuration.");

    // 4. Initialize the database
    let database_url = config::database::get_database_url()?;
    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!(
        url = %database_url,
        cutoff_hour = app_config.reports.cutoff_hour,
        "Billing database ready."
    );

    Ok(())
}
