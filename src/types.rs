use serde::{Deserialize, Serialize};

#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub age: String,
    pub country: String,
}

impl Player {
    #[cfg(test)]
    pub fn new(name: &str, age: &str, country: &str) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            country: country.into(),
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub players: Vec<Player>,
}

#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TeamData {
    #[serde(default)]
    pub team: Team,
}

/// Body of `GET /teams/en/{id}.json`. Error responses omit `data` or send it
/// as `null`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TeamResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<TeamData>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TeamRecord {
    pub status: String,
    pub status_code: u16,
    pub message: String,
    pub team_name: String,
    pub players: Vec<Player>,
}

impl From<TeamResponse> for TeamRecord {
    fn from(resp: TeamResponse) -> Self {
        let team = resp.data.unwrap_or_default().team;
        Self {
            status: resp.status,
            status_code: resp.code,
            message: resp.message,
            team_name: team.name,
            players: team.players,
        }
    }
}
