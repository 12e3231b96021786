use crate::song::ActiveModel;
use sea_orm::prelude::{Date, Time};
use sea_orm::DeriveIntoActiveModel;

/// Every user-editable column of a song, already parsed into column types.
///
/// `None` on a release field leaves the column untouched, `Some(None)` clears it.
#[derive(DeriveIntoActiveModel, PartialEq, Eq, Clone, Debug, Default)]
pub struct SongModel {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<i32>,
    pub duration: Option<i32>,
    pub release_date: Option<Option<Date>>,
    pub release_time: Option<Option<Time>>,
    pub description: Option<String>,
    pub contact_email: Option<String>,
}
