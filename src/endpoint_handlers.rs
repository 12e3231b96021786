use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use axum::{Form, Json};
use log::{debug, info};
use queries::{AddOutcome, RemoveOutcome, SongFilter};
use sea_orm::TransactionTrait;
use serde::Deserialize;

use crate::error::AppError;
use crate::flash::{Flash, FlashJar};
use crate::forms::{PlaylistForm, SongForm};
use crate::responses::playlist_response::PlaylistResponse;
use crate::responses::song_response::SongResponse;
use crate::responses::views::{EditSongView, IndexView, PlayerView, PlaylistDetailView};
use crate::DatabaseState;

type Page<T> = Result<(FlashJar, Json<T>), AppError>;
type Redirection = Result<(FlashJar, Redirect), AppError>;

#[derive(Deserialize, Clone, Debug, Default)]
pub struct SongSearchQuery {
    artist: Option<String>,
    title: Option<String>,
}

async fn render_listing(
    state: &DatabaseState,
    mut flashes: FlashJar,
    query: SongSearchQuery,
) -> Page<IndexView> {
    let filter = SongFilter {
        artist: query.artist.clone(),
        title: query.title.clone(),
    };
    let txn = state.connection.begin().await?;
    let songs = queries::get_active_songs(&txn, &filter).await?;
    let playlists = queries::get_all_playlists(&txn).await?;
    txn.commit().await?;

    let view = IndexView {
        songs: SongResponse::from_songs(songs),
        playlists: PlaylistResponse::from_playlists(playlists),
        artist: query.artist,
        title: query.title,
        messages: flashes.take(),
    };
    Ok((flashes, Json(view)))
}

pub async fn index(State(state): State<DatabaseState>, flashes: FlashJar) -> Page<IndexView> {
    render_listing(&state, flashes, SongSearchQuery::default()).await
}

pub async fn list_songs(
    State(state): State<DatabaseState>,
    flashes: FlashJar,
    Query(query): Query<SongSearchQuery>,
) -> Page<IndexView> {
    render_listing(&state, flashes, query).await
}

pub async fn create_song(
    State(state): State<DatabaseState>,
    flashes: FlashJar,
    Form(form): Form<SongForm>,
) -> Redirection {
    let fields = form.validate()?;
    let txn = state.connection.begin().await?;
    let song = queries::add_song(&txn, fields).await?;
    txn.commit().await?;

    let flashes = flashes.push(Flash::success(format!(
        "Song \"{}\" has been added.",
        song.display_title()
    )));
    Ok((flashes, Redirect::to("/")))
}

pub async fn delete_song(
    State(state): State<DatabaseState>,
    flashes: FlashJar,
    Path(id): Path<i32>,
) -> Redirection {
    let txn = state.connection.begin().await?;
    let song = queries::get_song_by_id(&txn, id)
        .await?
        .ok_or_else(|| AppError::song_not_found(id))?;
    let song = queries::deactivate_song(&txn, song).await?;
    txn.commit().await?;

    let flashes = flashes.push(Flash::warning(format!(
        "Song \"{}\" has been deactivated.",
        song.display_title()
    )));
    Ok((flashes, Redirect::to("/")))
}

pub async fn edit_song_form(
    State(state): State<DatabaseState>,
    mut flashes: FlashJar,
    Path(id): Path<i32>,
) -> Page<EditSongView> {
    let txn = state.connection.begin().await?;
    let song = queries::get_song_by_id(&txn, id)
        .await?
        .ok_or_else(|| AppError::song_not_found(id))?;
    txn.commit().await?;

    let view = EditSongView {
        song: SongResponse::from(song),
        messages: flashes.take(),
    };
    Ok((flashes, Json(view)))
}

pub async fn edit_song(
    State(state): State<DatabaseState>,
    flashes: FlashJar,
    Path(id): Path<i32>,
    Form(form): Form<SongForm>,
) -> Redirection {
    let txn = state.connection.begin().await?;
    let song = queries::get_song_by_id(&txn, id)
        .await?
        .ok_or_else(|| AppError::song_not_found(id))?;
    let fields = form.validate()?;
    let song = queries::update_song(&txn, song, fields).await?;
    txn.commit().await?;

    let flashes = flashes.push(Flash::success(format!(
        "Song \"{}\" has been updated.",
        song.display_title()
    )));
    Ok((flashes, Redirect::to("/")))
}

pub async fn create_playlist(
    State(state): State<DatabaseState>,
    flashes: FlashJar,
    Form(form): Form<PlaylistForm>,
) -> Redirection {
    let name = form.validate()?;
    let txn = state.connection.begin().await?;
    let playlist = queries::add_playlist(&txn, name).await?;
    txn.commit().await?;

    let flashes = flashes.push(Flash::success(format!(
        "Playlist \"{}\" has been created.",
        playlist.name
    )));
    Ok((flashes, Redirect::to("/")))
}

/// Missing playlists or songs are skipped without a message unless lookups are strict.
pub async fn add_to_playlist(
    State(state): State<DatabaseState>,
    flashes: FlashJar,
    Path((playlist_id, song_id)): Path<(i32, i32)>,
) -> Redirection {
    let txn = state.connection.begin().await?;
    let playlist = queries::get_playlist_by_id(&txn, playlist_id).await?;
    let song = queries::get_song_by_id(&txn, song_id).await?;

    let (playlist, song) = match (playlist, song) {
        (Some(playlist), Some(song)) => (playlist, song),
        (None, _) if state.strict_lookups => return Err(AppError::playlist_not_found(playlist_id)),
        (_, None) if state.strict_lookups => return Err(AppError::song_not_found(song_id)),
        _ => {
            debug!(
                "Skipping add of song {} to playlist {}, one of them does not exist",
                song_id, playlist_id
            );
            return Ok((flashes, Redirect::to("/")));
        }
    };

    let flash = match queries::add_song_to_playlist(&txn, playlist.id, song.id).await? {
        AddOutcome::Added => Flash::success(format!(
            "Song \"{}\" has been added to playlist \"{}\".",
            song.display_title(),
            playlist.name
        )),
        AddOutcome::AlreadyPresent => Flash::warning(format!(
            "Song \"{}\" is already in playlist \"{}\".",
            song.display_title(),
            playlist.name
        )),
    };
    txn.commit().await?;

    Ok((flashes.push(flash), Redirect::to("/")))
}

/// Sends the client back to the playlist page rather than the listing.
pub async fn remove_from_playlist(
    State(state): State<DatabaseState>,
    flashes: FlashJar,
    Path((playlist_id, song_id)): Path<(i32, i32)>,
) -> Redirection {
    let txn = state.connection.begin().await?;
    let playlist = queries::get_playlist_by_id(&txn, playlist_id)
        .await?
        .ok_or_else(|| AppError::playlist_not_found(playlist_id))?;
    let song = queries::get_song_by_id(&txn, song_id)
        .await?
        .ok_or_else(|| AppError::song_not_found(song_id))?;

    let flash = match queries::remove_song_from_playlist(&txn, playlist.id, song.id).await? {
        RemoveOutcome::Removed => Flash::success(format!(
            "Song \"{}\" has been removed from playlist \"{}\".",
            song.display_title(),
            playlist.name
        )),
        RemoveOutcome::NotMember => Flash::warning("The song is not in this playlist."),
    };
    txn.commit().await?;

    let target = format!("/playlist/{}", playlist_id);
    Ok((flashes.push(flash), Redirect::to(&target)))
}

pub async fn playlist_detail(
    State(state): State<DatabaseState>,
    mut flashes: FlashJar,
    Path(id): Path<i32>,
) -> Page<PlaylistDetailView> {
    let txn = state.connection.begin().await?;
    let playlist = queries::get_playlist_by_id(&txn, id)
        .await?
        .ok_or_else(|| AppError::playlist_not_found(id))?;
    let songs = queries::get_playlist_songs(&txn, &playlist).await?;
    txn.commit().await?;

    let view = PlaylistDetailView {
        playlist: PlaylistResponse::from(playlist),
        songs: SongResponse::from_songs(songs),
        messages: flashes.take(),
    };
    Ok((flashes, Json(view)))
}

/// Renders an empty player for unknown ids unless lookups are strict.
pub async fn play_song(
    State(state): State<DatabaseState>,
    mut flashes: FlashJar,
    Path(id): Path<i32>,
) -> Page<PlayerView> {
    let txn = state.connection.begin().await?;
    let song = queries::get_song_by_id(&txn, id).await?;
    txn.commit().await?;

    match &song {
        Some(song) => info!("Playing song {} with id {}", song.display_title(), song.id),
        None if state.strict_lookups => return Err(AppError::song_not_found(id)),
        None => debug!("Nothing to play for id {}", id),
    }

    let view = PlayerView {
        current_song: song.map(SongResponse::from),
        messages: flashes.take(),
    };
    Ok((flashes, Json(view)))
}
