use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use axum_extra::extract::cookie::Key;
use pretty_assertions::assert_eq;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde_json::{json, Value};
use tower::ServiceExt;

use entities::prelude::PlaylistSong;
use queries::test_utils::init_test_database;
use songbook::{app, DatabaseState};

async fn setup(strict_lookups: bool) -> (Router, DatabaseConnection) {
    let connection = init_test_database().await.unwrap();
    let router = app(DatabaseState {
        connection: connection.clone(),
        strict_lookups,
        key: Key::generate(),
    });
    (router, connection)
}

async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn song_body(title: &str, artist: &str) -> String {
    format!(
        "cancion={}&artista={}&album=&anio=2001&duracion=200&descripcion=&email_contacto=",
        title.replace(' ', "+"),
        artist.replace(' ', "+")
    )
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[LOCATION].to_str().unwrap()
}

/// The `name=value` pair of the flash cookie a response sets, if any.
fn flash_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .map(|value| value.to_str().unwrap().split(';').next().unwrap().to_string())
}

async fn messages_after(router: &Router, redirect: &Response) -> Value {
    let cookie = flash_cookie(redirect).expect("redirect should set a flash cookie");
    let page = send(router, get_with_cookie("/", &cookie)).await;
    json_body(page).await["messages"].clone()
}

fn titles(songs: &Value) -> Vec<String> {
    songs
        .as_array()
        .unwrap()
        .iter()
        .map(|song| song["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_road_trip_end_to_end() {
    let (router, _db) = setup(false).await;

    let response = send(&router, post_form("/create_playlist", "nombre=Road+Trip")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = send(&router, post_form("/", &song_body("Song A", "Band"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = send(&router, get("/add_to_playlist/1/1")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        messages_after(&router, &response).await,
        json!([{"category": "success", "message": "Song \"Song A\" has been added to playlist \"Road Trip\"."}])
    );

    let detail = json_body(send(&router, get("/playlist/1")).await).await;
    assert_eq!(detail["playlist"], json!({"id": 1, "name": "Road Trip"}));
    assert_eq!(titles(&detail["songs"]), vec!["Song A"]);
}

#[tokio::test]
async fn test_create_song_flashes_and_lists() {
    let (router, _db) = setup(false).await;

    let response = send(
        &router,
        post_form(
            "/",
            "cancion=Yellow&artista=Coldplay&album=Parachutes&anio=2000&duracion=269\
             &descripcion=&email_contacto=band%40coldplay.com&fecha_lanzamiento=2000-06-26",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = flash_cookie(&response).unwrap();

    let page = send(&router, get_with_cookie("/", &cookie)).await;
    assert_eq!(page.status(), StatusCode::OK);
    assert_eq!(
        flash_cookie(&page).as_deref(),
        Some("flash="),
        "rendering consumes the pending messages"
    );
    let body = json_body(page).await;
    assert_eq!(
        body["messages"],
        json!([{"category": "success", "message": "Song \"Yellow\" has been added."}])
    );
    assert_eq!(
        body["songs"],
        json!([{
            "id": 1,
            "title": "Yellow",
            "artist": "Coldplay",
            "album": "Parachutes",
            "year": 2000,
            "duration": 269,
            "releaseDate": "2000-06-26",
            "releaseTime": null,
            "description": null,
            "contactEmail": "band@coldplay.com",
            "active": true
        }])
    );
    assert_eq!(body["playlists"], json!([]));
}

#[tokio::test]
async fn test_invalid_song_is_rejected() {
    let (router, db) = setup(false).await;

    let response = send(
        &router,
        post_form(
            "/",
            "cancion=X&artista=Y&album=&anio=nineteen&duracion=200&descripcion=&email_contacto=",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["errors"][0]["field"], "anio");

    let songs = queries::get_active_songs(&db, &Default::default())
        .await
        .unwrap();
    assert!(songs.is_empty());

    // fields must be present even when blank
    let response = send(&router, post_form("/", "cancion=X")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(&router, post_form("/create_playlist", "nombre=+")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_soft_delete_hides_song_but_keeps_membership() {
    let (router, db) = setup(false).await;
    send(&router, post_form("/create_playlist", "nombre=Mix")).await;
    send(&router, post_form("/", &song_body("Keep", "Artist"))).await;
    send(&router, post_form("/", &song_body("Drop", "Artist"))).await;
    send(&router, get("/add_to_playlist/1/2")).await;

    let response = send(&router, get("/delete_song/2")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        messages_after(&router, &response).await,
        json!([{"category": "warning", "message": "Song \"Drop\" has been deactivated."}])
    );

    let listing = json_body(send(&router, get("/")).await).await;
    assert_eq!(titles(&listing["songs"]), vec!["Keep"]);
    let filtered = json_body(send(&router, get("/songs?title=drop")).await).await;
    assert_eq!(titles(&filtered["songs"]), Vec::<String>::new());

    let detail = json_body(send(&router, get("/playlist/1")).await).await;
    assert_eq!(titles(&detail["songs"]), vec!["Drop"]);
    assert_eq!(detail["songs"][0]["active"], false);
    assert!(queries::is_playlist_member(&db, 1, 2).await.unwrap());

    let response = send(&router, get("/delete_song/99")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_filtering() {
    let (router, _db) = setup(false).await;
    send(&router, post_form("/", &song_body("Yellow", "Coldplay"))).await;
    send(&router, post_form("/", &song_body("Clocks", "Coldplay"))).await;
    send(&router, post_form("/", &song_body("Yellow Submarine", "The Beatles"))).await;

    let by_artist = json_body(send(&router, get("/songs?artist=COLDPLAY")).await).await;
    assert_eq!(titles(&by_artist["songs"]), vec!["Yellow", "Clocks"]);
    assert_eq!(by_artist["artist"], "COLDPLAY");
    assert_eq!(by_artist["title"], Value::Null);

    let both = json_body(send(&router, get("/songs?artist=cold&title=yell")).await).await;
    assert_eq!(titles(&both["songs"]), vec!["Yellow"]);

    let unfiltered = json_body(send(&router, get("/songs?artist=&title=")).await).await;
    assert_eq!(titles(&unfiltered["songs"]).len(), 3);
}

#[tokio::test]
async fn test_edit_song_overwrites_all_fields() {
    let (router, _db) = setup(false).await;
    send(
        &router,
        post_form(
            "/",
            "cancion=Old&artista=Someone&album=Record&anio=1990&duracion=100\
             &descripcion=notes&email_contacto=a%40b.c",
        ),
    )
    .await;

    let response = send(
        &router,
        post_form(
            "/edit_song/1",
            "cancion=New+Title&artista=&album=&anio=&duracion=&descripcion=&email_contacto=",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(
        messages_after(&router, &response).await,
        json!([{"category": "success", "message": "Song \"New Title\" has been updated."}])
    );

    let form = json_body(send(&router, get("/edit_song/1")).await).await;
    assert_eq!(form["song"]["title"], "New Title");
    assert_eq!(form["song"]["artist"], Value::Null);
    assert_eq!(form["song"]["album"], Value::Null);
    assert_eq!(form["song"]["year"], Value::Null);
    assert_eq!(form["song"]["duration"], Value::Null);
    assert_eq!(form["song"]["description"], Value::Null);
    assert_eq!(form["song"]["contactEmail"], Value::Null);
    assert_eq!(form["song"]["active"], true);

    assert_eq!(
        send(&router, get("/edit_song/7")).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        send(&router, post_form("/edit_song/7", &song_body("A", "B")))
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_edit_keeps_release_fields_it_was_not_sent() {
    let (router, _db) = setup(false).await;
    send(
        &router,
        post_form(
            "/",
            "cancion=Yellow&artista=Coldplay&album=Parachutes&anio=2000&duracion=269\
             &descripcion=&email_contacto=&fecha_lanzamiento=2000-06-26&hora_estreno=21:00",
        ),
    )
    .await;

    let response = send(&router, post_form("/edit_song/1", &song_body("Yellow", "Coldplay"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let form = json_body(send(&router, get("/edit_song/1")).await).await;
    assert_eq!(form["song"]["releaseDate"], "2000-06-26");
    assert_eq!(form["song"]["releaseTime"], "21:00:00");

    let cleared = format!(
        "{}&fecha_lanzamiento=&hora_estreno=+",
        song_body("Yellow", "Coldplay")
    );
    send(&router, post_form("/edit_song/1", &cleared)).await;
    let form = json_body(send(&router, get("/edit_song/1")).await).await;
    assert_eq!(form["song"]["releaseDate"], Value::Null);
    assert_eq!(form["song"]["releaseTime"], Value::Null);
}

#[tokio::test]
async fn test_adding_twice_keeps_one_membership() {
    let (router, db) = setup(false).await;
    send(&router, post_form("/create_playlist", "nombre=Mix")).await;
    send(&router, post_form("/", &song_body("Twice", "Artist"))).await;

    send(&router, get("/add_to_playlist/1/1")).await;
    let response = send(&router, get("/add_to_playlist/1/1")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        messages_after(&router, &response).await,
        json!([{"category": "warning", "message": "Song \"Twice\" is already in playlist \"Mix\"."}])
    );

    let memberships = PlaylistSong::find().all(&db).await.unwrap();
    assert_eq!(memberships.len(), 1);
}

#[tokio::test]
async fn test_adding_missing_entities_is_silent() {
    let (router, _db) = setup(false).await;
    send(&router, post_form("/create_playlist", "nombre=Mix")).await;

    let response = send(&router, get("/add_to_playlist/1/42")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(flash_cookie(&response), None);

    let response = send(&router, get("/add_to_playlist/42/1")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_strict_lookups() {
    let (router, _db) = setup(true).await;
    send(&router, post_form("/create_playlist", "nombre=Mix")).await;

    assert_eq!(
        send(&router, get("/add_to_playlist/1/42")).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        send(&router, get("/add_to_playlist/999/1")).await.status(),
        StatusCode::NOT_FOUND
    );
    let response = send(&router, get("/play/999")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"]["message"], "Song with id 999 does not exist");
}

#[tokio::test]
async fn test_remove_from_playlist() {
    let (router, _db) = setup(false).await;
    send(&router, post_form("/create_playlist", "nombre=Mix")).await;
    send(&router, post_form("/", &song_body("In", "Artist"))).await;
    send(&router, post_form("/", &song_body("Out", "Artist"))).await;
    send(&router, get("/add_to_playlist/1/1")).await;

    let response = send(&router, get("/remove_from_playlist/1/2")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/playlist/1");
    let cookie = flash_cookie(&response).unwrap();
    let detail = json_body(send(&router, get_with_cookie("/playlist/1", &cookie)).await).await;
    assert_eq!(
        detail["messages"],
        json!([{"category": "warning", "message": "The song is not in this playlist."}])
    );
    assert_eq!(titles(&detail["songs"]), vec!["In"]);

    let response = send(&router, get("/remove_from_playlist/1/1")).await;
    assert_eq!(location(&response), "/playlist/1");
    let detail = json_body(send(&router, get("/playlist/1")).await).await;
    assert_eq!(titles(&detail["songs"]), Vec::<String>::new());

    assert_eq!(
        send(&router, get("/remove_from_playlist/9/1")).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        send(&router, get("/remove_from_playlist/1/9")).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_play_song() {
    let (router, _db) = setup(false).await;
    send(&router, post_form("/", &song_body("Loud", "Artist"))).await;

    let playing = json_body(send(&router, get("/play/1")).await).await;
    assert_eq!(playing["currentSong"]["title"], "Loud");

    let response = send(&router, get("/play/999")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let nothing = json_body(response).await;
    assert_eq!(nothing["currentSong"], Value::Null);
}

#[tokio::test]
async fn test_unknown_playlist_and_bad_ids() {
    let (router, _db) = setup(false).await;

    assert_eq!(
        send(&router, get("/playlist/3")).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        send(&router, get("/delete_song/abc")).await.status(),
        StatusCode::BAD_REQUEST
    );
}
