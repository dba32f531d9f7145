use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use spark_api::{config::ApiConfig, ApiState};
use spark_chat::{bridge_from_config, config::ChatConfig};
use spark_db::{create_pool, schema::initialize_database, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = ApiConfig::from_env()?;
    spark_api::init_tracing(config.log_level)?;

    let db_pool = create_pool(&config.database_url).await?;
    initialize_database(&db_pool).await?;

    let chat = bridge_from_config(ChatConfig::from_env());
    let state = ApiState::from_store(Arc::new(PgStore::new(db_pool)), chat);

    spark_api::start_server(config, Arc::new(state)).await?;

    Ok(())
}
