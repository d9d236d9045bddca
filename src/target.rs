use std::collections::BTreeSet;

use crate::error::ConfigError;

pub const DEFAULT_TEAMS: [&str; 10] = [
    "Germany",
    "England",
    "France",
    "Spain",
    "Manchester Utd",
    "Arsenal",
    "Chelsea",
    "Barcelona",
    "Real Madrid",
    "FC Bayern Munich",
];

/// Allowlist of team names whose rosters are kept. Matching is exact and
/// case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetTeams(BTreeSet<String>);

impl TargetTeams {
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if set.is_empty() {
            return Err(ConfigError::new("teams", "target team list is empty"));
        }
        Ok(Self(set))
    }

    pub fn is_desired(&self, team_name: &str) -> bool {
        self.0.contains(team_name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for TargetTeams {
    fn default() -> Self {
        Self(DEFAULT_TEAMS.iter().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_exact_match_only() {
        let teams = TargetTeams::default();

        assert!(teams.is_desired("Arsenal"));
        assert!(teams.is_desired("FC Bayern Munich"));
        assert!(!teams.is_desired("arsenal"));
        assert!(!teams.is_desired("Arsenal "));
        assert!(!teams.is_desired("Bayern Munich"));
        assert!(!teams.is_desired(""));
    }

    #[test]
    fn test_duplicates_collapse() {
        let teams = TargetTeams::new(["Chelsea", "Chelsea", "Spain"]).unwrap();

        assert_eq!(teams.len(), 2);
        assert_eq!(teams.iter().collect::<Vec<_>>(), vec!["Chelsea", "Spain"]);
    }

    #[test]
    fn test_empty_is_rejected() {
        assert!(TargetTeams::new(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_default_has_ten_teams() {
        assert_eq!(TargetTeams::default().len(), 10);
    }
}
