use entities::playlist;
use serde::Serialize;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistResponse {
    pub(crate) id: i32,
    pub(crate) name: String,
}

impl From<playlist::Model> for PlaylistResponse {
    fn from(playlist: playlist::Model) -> Self {
        PlaylistResponse {
            id: playlist.id,
            name: playlist.name,
        }
    }
}

impl PlaylistResponse {
    pub fn from_playlists(playlists: Vec<playlist::Model>) -> Vec<Self> {
        playlists.into_iter().map(PlaylistResponse::from).collect()
    }
}
