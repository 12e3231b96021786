//! View models for the pages the catalog renders. Each one carries the
//! flash messages that were pending when it was rendered.

use serde::Serialize;

use crate::flash::Flash;
use crate::responses::playlist_response::PlaylistResponse;
use crate::responses::song_response::SongResponse;

/// Song listing, optionally filtered.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct IndexView {
    pub(crate) songs: Vec<SongResponse>,
    pub(crate) playlists: Vec<PlaylistResponse>,
    pub(crate) artist: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) messages: Vec<Flash>,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EditSongView {
    pub(crate) song: SongResponse,
    pub(crate) messages: Vec<Flash>,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDetailView {
    pub(crate) playlist: PlaylistResponse,
    pub(crate) songs: Vec<SongResponse>,
    pub(crate) messages: Vec<Flash>,
}

/// `currentSong` is null when the requested id matched nothing.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub(crate) current_song: Option<SongResponse>,
    pub(crate) messages: Vec<Flash>,
}
