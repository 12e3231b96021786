pub mod playlist_response;
pub mod responses;
pub mod song_response;
pub mod views;
