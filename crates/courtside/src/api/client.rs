// HTTP client for the roster backend.
//
// `PlayerDirectory` is the seam the controllers depend on; `HttpDirectory`
// implements it over reqwest. Every response is decoded into a typed record at
// this boundary so malformed payloads surface as `ApiError::Decode` instead of
// leaking missing fields into the UI.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::roster::draft::TeamSubmission;
use crate::roster::player::{PlayerDetail, PlayerId, PlayerSummary, PositionPlayer};
use crate::roster::position::Position;

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Full roster list.
pub const ROSTER_PATH: &str = "/api/jugadores";
/// Players eligible for a position (position label appended).
pub const POSITION_PLAYERS_PATH: &str = "/api/jugadores_por_posicion";
/// Team creation.
pub const CREATE_TEAM_PATH: &str = "/api/crear_equipo";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status and no usable body.
    #[error("server returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response from {path}: {message}")]
    Decode { path: String, message: String },

    /// The server understood the request and refused it.
    #[error("{0}")]
    Rejected(String),

    /// The request could not be built (bad base URL, bad header value).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Raw body of `POST /api/crear_equipo`, both on success and on rejection.
#[derive(Debug, Clone, Deserialize)]
struct CreateTeamResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    equipo_id: Option<i64>,
}

/// Acknowledgement of a created team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamCreated {
    /// Backend id of the new team, when the server reports one.
    pub team_id: Option<i64>,
}

// ---------------------------------------------------------------------------
// PlayerDirectory
// ---------------------------------------------------------------------------

/// The backend operations the controllers need.
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    /// Players eligible for one position.
    async fn players_for_position(
        &self,
        position: Position,
    ) -> Result<Vec<PositionPlayer>, ApiError>;

    /// Submit a complete team.
    async fn create_team(&self, submission: &TeamSubmission) -> Result<TeamCreated, ApiError>;

    /// Roster rows from a list endpoint (normally [`ROSTER_PATH`]).
    async fn roster(&self, source: &str) -> Result<Vec<PlayerSummary>, ApiError>;

    /// One player's full record.
    async fn player_detail(&self, id: PlayerId) -> Result<PlayerDetail, ApiError>;
}

// ---------------------------------------------------------------------------
// HttpDirectory
// ---------------------------------------------------------------------------

/// `PlayerDirectory` backed by the real HTTP API.
pub struct HttpDirectory {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpDirectory {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// `session_cookie` is sent verbatim as the `Cookie` header on every
    /// request. `timeout` applies per request; `None` waits indefinitely.
    pub fn new(
        base_url: Url,
        session_cookie: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidRequest(format!(
                "base URL {base_url} cannot hold a path"
            )));
        }

        let mut builder =
            reqwest::Client::builder().default_headers(session_headers(session_cookie)?);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    /// Build an `HttpDirectory` from the application config.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.server.base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("base URL: {e}")))?;
        Self::new(
            base_url,
            config.credentials.session_cookie.as_deref(),
            config.server.request_timeout_secs.map(Duration::from_secs),
        )
    }

    /// Resolve an endpoint path plus extra segments against the base URL.
    /// Segments are percent-encoded (position labels contain accents).
    fn endpoint(&self, path: &str, extra: &[&str]) -> Result<Url, ApiError> {
        endpoint_url(&self.base_url, path, extra)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!("GET {}", url);
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                path: url.path().to_string(),
            });
        }
        let body = response.bytes().await?;
        decode(&body, url.path())
    }
}

#[async_trait]
impl PlayerDirectory for HttpDirectory {
    async fn players_for_position(
        &self,
        position: Position,
    ) -> Result<Vec<PositionPlayer>, ApiError> {
        let url = self.endpoint(POSITION_PLAYERS_PATH, &[position.label()])?;
        self.get_json(url).await
    }

    async fn create_team(&self, submission: &TeamSubmission) -> Result<TeamCreated, ApiError> {
        let url = self.endpoint(CREATE_TEAM_PATH, &[])?;
        debug!("POST {}", url);
        let response = self.http.post(url.clone()).json(submission).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        interpret_create_team(status.as_u16(), &body, url.path())
    }

    async fn roster(&self, source: &str) -> Result<Vec<PlayerSummary>, ApiError> {
        let url = self.endpoint(source, &[])?;
        self.get_json(url).await
    }

    async fn player_detail(&self, id: PlayerId) -> Result<PlayerDetail, ApiError> {
        let url = self.endpoint(ROSTER_PATH, &[&id.to_string()])?;
        self.get_json(url).await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Default headers carrying the session cookie. A blank cookie sends none.
fn session_headers(session_cookie: Option<&str>) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    if let Some(cookie) = session_cookie.map(str::trim).filter(|c| !c.is_empty()) {
        let value = HeaderValue::from_str(cookie)
            .map_err(|e| ApiError::InvalidRequest(format!("session cookie: {e}")))?;
        headers.insert(COOKIE, value);
    }
    Ok(headers)
}

fn endpoint_url(base: &Url, path: &str, extra: &[&str]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| ApiError::InvalidRequest(format!("base URL {base} cannot hold a path")))?;
        segments.pop_if_empty();
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        segments.extend(extra);
    }
    Ok(url)
}

fn decode<T: DeserializeOwned>(body: &[u8], path: &str) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Turn a team-creation response into an outcome.
///
/// The backend answers rejections with HTTP 400 and a JSON body carrying the
/// reason, so the body is decoded before the status is considered.
fn interpret_create_team(status: u16, body: &[u8], path: &str) -> Result<TeamCreated, ApiError> {
    let is_success = (200..300).contains(&status);
    match decode::<CreateTeamResponse>(body, path) {
        Ok(resp) if resp.success && is_success => Ok(TeamCreated {
            team_id: resp.equipo_id,
        }),
        Ok(resp) if !resp.success => Err(ApiError::Rejected(
            resp.error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "the server rejected the team".to_string()),
        )),
        Ok(_) => Err(ApiError::Status {
            status,
            path: path.to_string(),
        }),
        Err(_) if !is_success => Err(ApiError::Status {
            status,
            path: path.to_string(),
        }),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn endpoint_joins_paths_under_base() {
        let url = endpoint_url(&base("http://localhost:5000"), ROSTER_PATH, &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/jugadores");

        let url = endpoint_url(&base("http://host/app/"), ROSTER_PATH, &["42"]).unwrap();
        assert_eq!(url.as_str(), "http://host/app/api/jugadores/42");
    }

    #[test]
    fn endpoint_percent_encodes_position_labels() {
        let url = endpoint_url(
            &base("http://localhost:5000/"),
            POSITION_PLAYERS_PATH,
            &[Position::PowerForward.label()],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/jugadores_por_posicion/Ala-p%C3%ADvot"
        );
    }

    #[test]
    fn create_team_success() {
        let body = br#"{"success": true, "equipo_id": 12}"#;
        let result = interpret_create_team(200, body, CREATE_TEAM_PATH);
        assert_eq!(result, Ok(TeamCreated { team_id: Some(12) }));
    }

    #[test]
    fn create_team_rejection_carries_server_text() {
        let body = br#"{"success": false, "error": "jugador duplicado"}"#;
        let result = interpret_create_team(400, body, CREATE_TEAM_PATH);
        assert_eq!(result, Err(ApiError::Rejected("jugador duplicado".into())));
    }

    #[test]
    fn create_team_rejection_without_reason() {
        let body = br#"{"success": false}"#;
        match interpret_create_team(400, body, CREATE_TEAM_PATH) {
            Err(ApiError::Rejected(msg)) => assert!(!msg.is_empty()),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn create_team_html_error_page_is_status_error() {
        let body = b"<html>Internal Server Error</html>";
        let result = interpret_create_team(500, body, CREATE_TEAM_PATH);
        assert_eq!(
            result,
            Err(ApiError::Status {
                status: 500,
                path: CREATE_TEAM_PATH.into()
            })
        );
    }

    #[test]
    fn create_team_malformed_success_body_is_decode_error() {
        let result = interpret_create_team(200, b"{}", CREATE_TEAM_PATH);
        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }

    #[test]
    fn decode_position_players() {
        let body = br#"[
            {"id": 1, "nombre": "A", "equipo": "X", "posicion": "Base",
             "puntos_por_partido": 20.5, "rebotes_por_partido": 3.0,
             "asistencias_por_partido": 8.1},
            {"id": 2, "nombre": "B", "equipo": "Y", "puntos_por_partido": 11.0}
        ]"#;
        let players: Vec<PositionPlayer> = decode(body, POSITION_PLAYERS_PATH).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[1].rebounds_per_game, None);
    }

    #[test]
    fn decode_reports_path_on_failure() {
        let err = decode::<Vec<PlayerSummary>>(b"{\"oops\": 1}", ROSTER_PATH).unwrap_err();
        match err {
            ApiError::Decode { path, .. } => assert_eq!(path, ROSTER_PATH),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn blank_session_cookie_sends_no_header() {
        assert!(session_headers(None).unwrap().is_empty());
        assert!(session_headers(Some("")).unwrap().is_empty());
        assert!(session_headers(Some("   ")).unwrap().is_empty());

        let headers = session_headers(Some("session=abc")).unwrap();
        assert_eq!(headers.get(COOKIE).unwrap(), "session=abc");
    }

    #[test]
    fn rejects_cannot_be_a_base_url() {
        let result = HttpDirectory::new(base("mailto:someone@example.com"), None, None);
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }
}
