pub use super::playlist::Entity as Playlist;
pub use super::playlist_song::Entity as PlaylistSong;
pub use super::song::Entity as Song;
