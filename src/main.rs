use color_eyre::eyre::Result;
use cutandgo_api::config::ApiConfig;
use cutandgo_db::{create_pool, schema::initialize_database};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Make sure the schema exists before serving
    initialize_database(&db_pool).await?;

    // Start API server
    cutandgo_api::start_server(config, db_pool).await?;

    Ok(())
}
