use entities::song_local_model::SongModel;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Fresh in-memory SQLite database with the catalog schema applied.
///
/// The pool is pinned to one connection, each SQLite memory connection is its own database.
pub async fn init_test_database() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn song_fields(title: &str, artist: &str) -> SongModel {
    SongModel {
        title: Some(title.to_string()),
        artist: Some(artist.to_string()),
        ..Default::default()
    }
}
