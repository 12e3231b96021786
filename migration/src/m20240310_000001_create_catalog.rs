use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Musica {
    Table,
    Id,
    Cancion,
    Artista,
    Album,
    Anio,
    Duracion,
    FechaLanzamiento,
    HoraEstreno,
    Descripcion,
    EmailContacto,
    Activo,
}

#[derive(DeriveIden)]
enum Playlist {
    Table,
    Id,
    Nombre,
}

#[derive(DeriveIden)]
enum PlaylistSong {
    Table,
    PlaylistId,
    MusicaId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Musica::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Musica::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Musica::Cancion).string_len(100).null())
                    .col(ColumnDef::new(Musica::Artista).string_len(100).null())
                    .col(ColumnDef::new(Musica::Album).string_len(100).null())
                    .col(ColumnDef::new(Musica::Anio).integer().null())
                    .col(ColumnDef::new(Musica::Duracion).integer().null())
                    .col(ColumnDef::new(Musica::FechaLanzamiento).date().null())
                    .col(ColumnDef::new(Musica::HoraEstreno).time().null())
                    .col(ColumnDef::new(Musica::Descripcion).text().null())
                    .col(ColumnDef::new(Musica::EmailContacto).string_len(100).null())
                    .col(
                        ColumnDef::new(Musica::Activo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Playlist::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Playlist::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Playlist::Nombre).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        // A song appears at most once per playlist
        manager
            .create_table(
                Table::create()
                    .table(PlaylistSong::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PlaylistSong::PlaylistId).integer().not_null())
                    .col(ColumnDef::new(PlaylistSong::MusicaId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk-playlist_song")
                            .col(PlaylistSong::PlaylistId)
                            .col(PlaylistSong::MusicaId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-playlist_song-playlist_id")
                            .from(PlaylistSong::Table, PlaylistSong::PlaylistId)
                            .to(Playlist::Table, Playlist::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-playlist_song-musica_id")
                            .from(PlaylistSong::Table, PlaylistSong::MusicaId)
                            .to(Musica::Table, Musica::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlaylistSong::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Playlist::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Musica::Table).to_owned())
            .await?;
        Ok(())
    }
}
