// Player records returned by the backend API.
//
// Field names follow the backend's JSON keys. Every column in the backend's
// player table is nullable, so only the id is required and everything else
// decodes to `None` when absent or null.

use serde::{Deserialize, Serialize};

/// Backend primary key of a player.
pub type PlayerId = i64;

/// Placeholder shown for absent values.
pub const PLACEHOLDER: &str = "-";

/// Text of an optional field, or the placeholder when it is absent or blank.
pub fn text_or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => PLACEHOLDER,
    }
}

/// A row of the full roster list (`GET /api/jugadores`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "equipo", default)]
    pub team: Option<String>,
    #[serde(rename = "posicion", default)]
    pub position: Option<String>,
    #[serde(rename = "edad", default)]
    pub age: Option<f64>,
    #[serde(rename = "altura", default)]
    pub height: Option<f64>,
    #[serde(rename = "puntos_por_partido", default)]
    pub points_per_game: Option<f64>,
}

/// An entry of a per-position eligibility list
/// (`GET /api/jugadores_por_posicion/{position}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionPlayer {
    pub id: PlayerId,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "equipo", default)]
    pub team: Option<String>,
    #[serde(rename = "puntos_por_partido", default)]
    pub points_per_game: Option<f64>,
    #[serde(rename = "rebotes_por_partido", default)]
    pub rebounds_per_game: Option<f64>,
    #[serde(rename = "asistencias_por_partido", default)]
    pub assists_per_game: Option<f64>,
}

impl PlayerSummary {
    pub fn display_name(&self) -> &str {
        text_or_placeholder(self.name.as_deref())
    }
}

impl PositionPlayer {
    pub fn display_name(&self) -> &str {
        text_or_placeholder(self.name.as_deref())
    }

    /// Option text for a position selector, e.g. "Luka Doncic (DAL) - PPG: 28.1".
    pub fn option_label(&self) -> String {
        format!(
            "{} ({}) - PPG: {}",
            self.display_name(),
            self.team.as_deref().unwrap_or(PLACEHOLDER),
            format_stat(self.points_per_game)
        )
    }
}

/// A full player record (`GET /api/jugadores/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDetail {
    pub id: PlayerId,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "equipo", default)]
    pub team: Option<String>,
    #[serde(rename = "posicion", default)]
    pub position: Option<String>,
    #[serde(rename = "edad", default)]
    pub age: Option<f64>,
    #[serde(rename = "altura", default)]
    pub height: Option<f64>,
    #[serde(rename = "universidad", default)]
    pub university: Option<String>,
    #[serde(rename = "pais", default)]
    pub country: Option<String>,
    #[serde(rename = "partidos_jugados", default)]
    pub games_played: Option<u32>,
    #[serde(rename = "puntos_por_partido", default)]
    pub points_per_game: Option<f64>,
    #[serde(rename = "rebotes_por_partido", default)]
    pub rebounds_per_game: Option<f64>,
    #[serde(rename = "asistencias_por_partido", default)]
    pub assists_per_game: Option<f64>,
}

/// Label/value layout of one player's full record, ready for a modal.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    pub player_id: PlayerId,
    pub title: String,
    pub rows: Vec<(&'static str, String)>,
}

impl DetailPanel {
    /// Build the fixed-field panel for a player. An empty or absent
    /// university is shown as the placeholder.
    pub fn from_detail(p: &PlayerDetail) -> Self {
        let text = |v: &Option<String>| text_or_placeholder(v.as_deref()).to_string();

        let rows = vec![
            ("Name", text(&p.name)),
            ("Team", text(&p.team)),
            ("Position", text(&p.position)),
            ("Age", format_stat(p.age)),
            ("Height", format_stat(p.height)),
            ("University", text(&p.university)),
            ("Country", text(&p.country)),
            (
                "Games Played",
                p.games_played
                    .map(|g| g.to_string())
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
            ),
            ("Points per Game", format_stat(p.points_per_game)),
            ("Rebounds per Game", format_stat(p.rebounds_per_game)),
            ("Assists per Game", format_stat(p.assists_per_game)),
        ];

        DetailPanel {
            player_id: p.id,
            title: text(&p.name),
            rows,
        }
    }

    /// Look up a row value by label.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }
}

/// Format an optional numeric column. Whole numbers print without a
/// fractional part; absent values print the placeholder.
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e9 => format!("{}", v as i64),
        Some(v) => format!("{v:.1}"),
        None => PLACEHOLDER.to_string(),
    }
}
