use sea_orm::entity::prelude::*;

/// A catalog entry. Rows are never physically removed, `active` is flipped instead.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "musica")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "cancion")]
    pub title: Option<String>,
    #[sea_orm(column_name = "artista")]
    pub artist: Option<String>,
    pub album: Option<String>,
    #[sea_orm(column_name = "anio")]
    pub year: Option<i32>,
    #[sea_orm(column_name = "duracion")]
    pub duration: Option<i32>,
    #[sea_orm(column_name = "fecha_lanzamiento")]
    pub release_date: Option<Date>,
    #[sea_orm(column_name = "hora_estreno")]
    pub release_time: Option<Time>,
    #[sea_orm(column_name = "descripcion", column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_name = "email_contacto")]
    pub contact_email: Option<String>,
    #[sea_orm(column_name = "activo")]
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::playlist_song::Entity")]
    PlaylistSong,
}

impl Related<super::playlist_song::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlaylistSong.def()
    }
}

impl Related<super::playlist::Entity> for Entity {
    fn to() -> RelationDef {
        super::playlist_song::Relation::Playlist.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::playlist_song::Relation::Song.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}
