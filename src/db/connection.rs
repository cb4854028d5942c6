use mongodb::bson::doc;

use crate::config::AppConfig;
use crate::error::AppError;

/// Build the shared client and verify the server is reachable.
///
/// `Client::with_uri_str` connects lazily, so a `ping` is issued to make an
/// unreachable database fail here rather than on the first request.
pub async fn connect(config: &AppConfig) -> Result<mongodb::Database, AppError> {
    let client = mongodb::Client::with_uri_str(&config.mongodb_uri).await?;
    let db = client.database(&config.database);

    db.run_command(doc! { "ping": 1 }).await?;

    Ok(db)
}
