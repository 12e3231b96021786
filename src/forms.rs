use chrono::{NaiveDate, NaiveTime};
use entities::song_local_model::SongModel;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const MAX_TEXT_LEN: usize = 100;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Raw song form as submitted by the create and edit pages.
///
/// The seven catalog fields must be present (they may be blank). The
/// release date and time may be left out entirely, which keeps whatever the
/// song already has; sending them blank clears them.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct SongForm {
    pub cancion: String,
    pub artista: String,
    pub album: String,
    pub anio: String,
    pub duracion: String,
    pub descripcion: String,
    pub email_contacto: String,
    #[serde(default)]
    pub fecha_lanzamiento: Option<String>,
    #[serde(default)]
    pub hora_estreno: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct PlaylistForm {
    pub nombre: String,
}

#[derive(Default)]
struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    fn fail(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn text(&mut self, field: &'static str, value: &str, max_len: Option<usize>) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if let Some(max_len) = max_len {
            if value.chars().count() > max_len {
                self.fail(field, format!("must be at most {} characters", max_len));
                return None;
            }
        }
        Some(value.to_string())
    }

    fn integer(&mut self, field: &'static str, value: &str) -> Option<i32> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        match value.parse::<i32>() {
            Ok(number) => Some(number),
            Err(_) => {
                self.fail(field, format!("\"{}\" is not a whole number", value));
                None
            }
        }
    }

    /// Outer `None` when the field was not submitted, inner `None` when it was blank.
    fn date(&mut self, field: &'static str, value: Option<&str>) -> Option<Option<NaiveDate>> {
        let value = value?.trim();
        if value.is_empty() {
            return Some(None);
        }
        match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) => Some(Some(date)),
            Err(_) => {
                self.fail(field, "expected a date formatted as YYYY-MM-DD");
                None
            }
        }
    }

    fn time(&mut self, field: &'static str, value: Option<&str>) -> Option<Option<NaiveTime>> {
        let value = value?.trim();
        if value.is_empty() {
            return Some(None);
        }
        let parsed = NaiveTime::parse_from_str(value, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"));
        match parsed {
            Ok(time) => Some(Some(time)),
            Err(_) => {
                self.fail(field, "expected a time formatted as HH:MM or HH:MM:SS");
                None
            }
        }
    }

    fn email(&mut self, field: &'static str, value: &str) -> Option<String> {
        let email = self.text(field, value, Some(MAX_TEXT_LEN))?;
        let well_formed = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !email.chars().any(char::is_whitespace)
            }
            None => false,
        };
        if !well_formed {
            self.fail(field, format!("\"{}\" is not an email address", email));
            return None;
        }
        Some(email)
    }

    fn finish<T>(self, value: T) -> Result<T, AppError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

impl SongForm {
    /// Parses every field into its column type. Blank fields become NULL,
    /// release fields that were not submitted are left untouched.
    pub fn validate(self) -> Result<SongModel, AppError> {
        let mut v = Validator::default();
        let model = SongModel {
            title: v.text("cancion", &self.cancion, Some(MAX_TEXT_LEN)),
            artist: v.text("artista", &self.artista, Some(MAX_TEXT_LEN)),
            album: v.text("album", &self.album, Some(MAX_TEXT_LEN)),
            year: v.integer("anio", &self.anio),
            duration: v.integer("duracion", &self.duracion),
            release_date: v.date("fecha_lanzamiento", self.fecha_lanzamiento.as_deref()),
            release_time: v.time("hora_estreno", self.hora_estreno.as_deref()),
            description: v.text("descripcion", &self.descripcion, None),
            contact_email: v.email("email_contacto", &self.email_contacto),
        };
        if matches!(model.duration, Some(seconds) if seconds < 0) {
            v.fail("duracion", "must not be negative");
        }
        v.finish(model)
    }
}

impl PlaylistForm {
    pub fn validate(self) -> Result<String, AppError> {
        let mut v = Validator::default();
        let name = v.text("nombre", &self.nombre, Some(MAX_TEXT_LEN));
        if name.is_none() && v.errors.is_empty() {
            v.fail("nombre", "is required");
        }
        let name = name.unwrap_or_default();
        v.finish(name)
    }
}
