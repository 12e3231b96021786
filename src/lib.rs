use axum::extract::FromRef;
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::Key;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;

use crate::endpoint_handlers::{
    add_to_playlist, create_playlist, create_song, delete_song, edit_song, edit_song_form, index,
    list_songs, play_song, playlist_detail, remove_from_playlist,
};

pub mod config;
pub mod endpoint_handlers;
pub mod error;
pub mod flash;
pub mod forms;
pub mod responses;

#[derive(Clone)]
pub struct DatabaseState {
    pub connection: DatabaseConnection,
    pub strict_lookups: bool,
    /// Signs the flash cookie.
    pub key: Key,
}

impl FromRef<DatabaseState> for Key {
    fn from_ref(state: &DatabaseState) -> Self {
        state.key.clone()
    }
}

pub fn app(state: DatabaseState) -> Router {
    Router::new()
        // Songs
        .route("/", get(index).post(create_song))
        .route("/songs", get(list_songs))
        .route("/delete_song/:id", get(delete_song))
        .route("/edit_song/:id", get(edit_song_form).post(edit_song))
        .route("/play/:id", get(play_song))
        // Playlists
        .route("/create_playlist", post(create_playlist))
        .route("/playlist/:id", get(playlist_detail))
        .route("/add_to_playlist/:playlist_id/:song_id", get(add_to_playlist))
        .route(
            "/remove_from_playlist/:playlist_id/:song_id",
            get(remove_from_playlist),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
