use std::convert::Infallible;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponseParts, ResponseParts};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use log::debug;
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "flash";
/// Budget for the hex encoded payload, well under the 4 KB browsers keep per cookie
/// once the signature and attributes are added.
const MAX_PAYLOAD_LEN: usize = 3072;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Success,
    Warning,
}

/// One-shot message shown on the next rendered page.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Flash {
    pub category: Category,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash {
            category: Category::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Flash {
            category: Category::Warning,
            message: message.into(),
        }
    }
}

/// Pending flash messages, kept in the signed `flash` cookie.
///
/// Redirecting handlers `push` onto it, rendering handlers `take` from it.
/// Returning the jar as a response part rewrites or removes the cookie when
/// its contents changed. Cookies that fail the signature check are ignored.
#[derive(Clone, Debug)]
pub struct FlashJar {
    cookies: SignedCookieJar,
    pending: Vec<Flash>,
    had_cookie: bool,
    changed: bool,
}

impl FlashJar {
    pub fn from_cookies(cookies: SignedCookieJar) -> Self {
        let Some(cookie) = cookies.get(FLASH_COOKIE) else {
            return FlashJar {
                cookies,
                pending: Vec::new(),
                had_cookie: false,
                changed: false,
            };
        };
        let pending = decode(cookie.value()).unwrap_or_else(|| {
            debug!("Ignoring malformed flash cookie");
            Vec::new()
        });
        FlashJar {
            cookies,
            pending,
            had_cookie: true,
            changed: false,
        }
    }

    /// Appends a message, dropping the oldest ones once the cookie would outgrow its budget.
    pub fn push(mut self, flash: Flash) -> Self {
        self.pending.push(flash);
        while self.pending.len() > 1 && encode(&self.pending).len() > MAX_PAYLOAD_LEN {
            self.pending.remove(0);
        }
        self.changed = true;
        self
    }

    pub fn take(&mut self) -> Vec<Flash> {
        self.changed = true;
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[Flash] {
        &self.pending
    }

    fn into_cookies(self) -> SignedCookieJar {
        if !self.changed {
            return self.cookies;
        }
        if self.pending.is_empty() {
            if !self.had_cookie {
                return self.cookies;
            }
            return self
                .cookies
                .remove(Cookie::build(FLASH_COOKIE).path("/"));
        }
        let cookie = Cookie::build((FLASH_COOKIE, encode(&self.pending)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        self.cookies.add(cookie)
    }
}

fn encode(pending: &[Flash]) -> String {
    // Serializing plain strings and enums cannot fail
    hex::encode(serde_json::to_vec(pending).unwrap_or_default())
}

fn decode(raw: &str) -> Option<Vec<Flash>> {
    let bytes = hex::decode(raw).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[async_trait]
impl<S> FromRequestParts<S> for FlashJar
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = SignedCookieJar::<Key>::from_request_parts(parts, state).await?;
        Ok(FlashJar::from_cookies(cookies))
    }
}

impl IntoResponseParts for FlashJar {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.into_cookies().into_response_parts(res)
    }
}
