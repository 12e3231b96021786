pub mod prelude;

pub mod playlist;
pub mod playlist_song;
pub mod song;
pub mod song_local_model;
