use entities::song_local_model::SongModel;
use entities::{playlist, playlist_song, song};
use log::{debug, info};
use sea_orm::sea_query::{Expr, Func, LikeExpr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder,
};

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

/// Optional narrowing of the active song listing. Blank needles are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub artist: Option<String>,
    pub title: Option<String>,
}

/// Outcome of asking for a song to be added to a playlist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Outcome of asking for a song to be taken out of a playlist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotMember,
}

fn contains_pattern(needle: &str) -> LikeExpr {
    let escaped = needle
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    LikeExpr::new(format!("%{}%", escaped)).escape('\\')
}

/// Whitespace-only needles are ignored, any other needle is matched verbatim.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

pub async fn get_active_songs<C: ConnectionTrait>(
    db: &C,
    filter: &SongFilter,
) -> Result<Vec<song::Model>, DbErr> {
    let mut query = song::Entity::find().filter(song::Column::Active.eq(true));
    if let Some(artist) = non_blank(&filter.artist) {
        query = query.filter(
            Expr::expr(Func::lower(Expr::col((song::Entity, song::Column::Artist))))
                .like(contains_pattern(artist)),
        );
    }
    if let Some(title) = non_blank(&filter.title) {
        query = query.filter(
            Expr::expr(Func::lower(Expr::col((song::Entity, song::Column::Title))))
                .like(contains_pattern(title)),
        );
    }
    query.order_by_asc(song::Column::Id).all(db).await
}

pub async fn get_all_playlists<C: ConnectionTrait>(db: &C) -> Result<Vec<playlist::Model>, DbErr> {
    playlist::Entity::find()
        .order_by_asc(playlist::Column::Id)
        .all(db)
        .await
}

pub async fn get_song_by_id<C: ConnectionTrait>(
    db: &C,
    song_id: i32,
) -> Result<Option<song::Model>, DbErr> {
    song::Entity::find_by_id(song_id).one(db).await
}

pub async fn get_playlist_by_id<C: ConnectionTrait>(
    db: &C,
    playlist_id: i32,
) -> Result<Option<playlist::Model>, DbErr> {
    playlist::Entity::find_by_id(playlist_id).one(db).await
}

/// Members of a playlist, inactive songs included.
pub async fn get_playlist_songs<C: ConnectionTrait>(
    db: &C,
    playlist: &playlist::Model,
) -> Result<Vec<song::Model>, DbErr> {
    playlist
        .find_related(song::Entity)
        .order_by_asc(song::Column::Id)
        .all(db)
        .await
}

pub async fn add_song<C: ConnectionTrait>(db: &C, fields: SongModel) -> Result<song::Model, DbErr> {
    let mut model: song::ActiveModel = fields.into_active_model();
    model.active = ActiveValue::Set(true);
    let inserted = model.insert(db).await?;
    info!("Added song {} with id {}", inserted.display_title(), inserted.id);
    Ok(inserted)
}

/// Rewrites every editable column. The active flag is left alone.
pub async fn update_song<C: ConnectionTrait>(
    db: &C,
    song: song::Model,
    fields: SongModel,
) -> Result<song::Model, DbErr> {
    let mut model: song::ActiveModel = fields.into_active_model();
    model.id = ActiveValue::Unchanged(song.id);
    let updated = model.update(db).await?;
    info!("Updated song {} with id {}", updated.display_title(), updated.id);
    Ok(updated)
}

pub async fn deactivate_song<C: ConnectionTrait>(
    db: &C,
    song: song::Model,
) -> Result<song::Model, DbErr> {
    let mut model = song.into_active_model();
    model.active = ActiveValue::Set(false);
    let updated = model.update(db).await?;
    info!("Deactivated song {} with id {}", updated.display_title(), updated.id);
    Ok(updated)
}

pub async fn add_playlist<C: ConnectionTrait>(db: &C, name: String) -> Result<playlist::Model, DbErr> {
    let inserted = playlist::ActiveModel {
        name: ActiveValue::Set(name),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!("Added playlist {} with id {}", inserted.name, inserted.id);
    Ok(inserted)
}

pub async fn is_playlist_member<C: ConnectionTrait>(
    db: &C,
    playlist_id: i32,
    song_id: i32,
) -> Result<bool, DbErr> {
    let membership = playlist_song::Entity::find_by_id((playlist_id, song_id))
        .one(db)
        .await?;
    Ok(membership.is_some())
}

/// Inserts the membership unless it exists. Conflicts on the composite key are
/// swallowed by the store, so concurrent duplicates still leave one row.
pub async fn add_song_to_playlist<C: ConnectionTrait>(
    db: &C,
    playlist_id: i32,
    song_id: i32,
) -> Result<AddOutcome, DbErr> {
    if is_playlist_member(db, playlist_id, song_id).await? {
        debug!("Song {} already in playlist {}", song_id, playlist_id);
        return Ok(AddOutcome::AlreadyPresent);
    }
    let membership = playlist_song::ActiveModel {
        playlist_id: ActiveValue::Set(playlist_id),
        song_id: ActiveValue::Set(song_id),
    };
    let inserted = playlist_song::Entity::insert(membership)
        .on_conflict(
            OnConflict::columns([
                playlist_song::Column::PlaylistId,
                playlist_song::Column::SongId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    if inserted == 0 {
        return Ok(AddOutcome::AlreadyPresent);
    }
    info!("Added song {} to playlist {}", song_id, playlist_id);
    Ok(AddOutcome::Added)
}

pub async fn remove_song_from_playlist<C: ConnectionTrait>(
    db: &C,
    playlist_id: i32,
    song_id: i32,
) -> Result<RemoveOutcome, DbErr> {
    let deleted = playlist_song::Entity::delete_many()
        .filter(playlist_song::Column::PlaylistId.eq(playlist_id))
        .filter(playlist_song::Column::SongId.eq(song_id))
        .exec(db)
        .await?;
    if deleted.rows_affected == 0 {
        return Ok(RemoveOutcome::NotMember);
    }
    info!("Removed song {} from playlist {}", song_id, playlist_id);
    Ok(RemoveOutcome::Removed)
}
