use chrono::{NaiveDate, NaiveTime};
use entities::song;
use serde::Serialize;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SongResponse {
    pub(crate) id: i32,
    pub(crate) title: Option<String>,
    pub(crate) artist: Option<String>,
    pub(crate) album: Option<String>,
    pub(crate) year: Option<i32>,
    pub(crate) duration: Option<i32>,
    pub(crate) release_date: Option<NaiveDate>,
    pub(crate) release_time: Option<NaiveTime>,
    pub(crate) description: Option<String>,
    pub(crate) contact_email: Option<String>,
    pub(crate) active: bool,
}

impl From<song::Model> for SongResponse {
    fn from(song: song::Model) -> Self {
        SongResponse {
            id: song.id,
            title: song.title,
            artist: song.artist,
            album: song.album,
            year: song.year,
            duration: song.duration,
            release_date: song.release_date,
            release_time: song.release_time,
            description: song.description,
            contact_email: song.contact_email,
            active: song.active,
        }
    }
}

impl SongResponse {
    pub fn from_songs(songs: Vec<song::Model>) -> Vec<Self> {
        songs.into_iter().map(SongResponse::from).collect()
    }
}
