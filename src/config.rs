use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, ValueEnum};

use crate::aggregator::PipelineSettings;
use crate::api_client::{ID_PLACEHOLDER, TEAM_URL};
use crate::error::{ConfigError, Error, IOError, JSONError};
use crate::policy::{AnyOf, CapacityPolicy, CountPolicy, MissStreakPolicy, TerminationPolicy};
use crate::target::TargetTeams;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    /// stop once every target team has been accepted
    Count,
    /// stop once `--capacity` results have been received
    Capacity,
}

// every flag can also come from the environment or a .env file
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// team URL template, `{id}` is replaced by the identifier
    #[arg(long, env = "ROSTER_BASE_URL", default_value = TEAM_URL)]
    pub base_url: String,

    /// comma separated target team names
    #[arg(long, env = "ROSTER_TEAMS", value_delimiter = ',')]
    pub teams: Vec<String>,

    /// JSON array of target team names, overrides --teams
    #[arg(long, env = "ROSTER_TEAMS_FILE")]
    pub teams_file: Option<PathBuf>,

    #[arg(long, env = "ROSTER_WORKERS", default_value_t = 10)]
    pub workers: usize,

    #[arg(long, env = "ROSTER_JOB_QUEUE", default_value_t = 3)]
    pub job_queue: usize,

    #[arg(long, env = "ROSTER_RESULT_QUEUE", default_value_t = 10)]
    pub result_queue: usize,

    /// per request timeout
    #[arg(long, env = "ROSTER_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    #[arg(long, env = "ROSTER_POLICY", value_enum, default_value_t = PolicyKind::Count)]
    pub policy: PolicyKind,

    /// results to collect under the capacity policy, defaults to --result-queue
    #[arg(long, env = "ROSTER_CAPACITY")]
    pub capacity: Option<usize>,

    /// also stop after this many not-found probes in a row
    #[arg(long, env = "ROSTER_MAX_MISSES")]
    pub max_misses: Option<usize>,

    #[arg(long, env = "ROSTER_START_ID", default_value_t = 1)]
    pub start_id: u32,

    /// never probe past this identifier
    #[arg(long, env = "ROSTER_MAX_ID")]
    pub max_id: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub targets: TargetTeams,
    pub pipeline: PipelineSettings,
    pub timeout: Duration,
    pub policy: PolicyKind,
    pub capacity: usize,
    pub max_misses: Option<usize>,
}

impl ConfigArgs {
    pub fn load(self) -> Result<Config, Error> {
        let targets = match &self.teams_file {
            Some(path) => TargetTeams::new(read_teams_file(path)?)?,
            None if self.teams.is_empty() => TargetTeams::default(),
            None => TargetTeams::new(
                self.teams
                    .iter()
                    .map(|t| t.trim())
                    .filter(|t| !t.is_empty())
                    .map(String::from),
            )?,
        };

        positive("workers", self.workers)?;
        positive("job-queue", self.job_queue)?;
        positive("result-queue", self.result_queue)?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::new("timeout-secs", "must be at least 1").into());
        }
        positive("start-id", self.start_id as usize)?;
        if let Some(capacity) = self.capacity {
            positive("capacity", capacity)?;
        }
        if let Some(misses) = self.max_misses {
            positive("max-misses", misses)?;
        }
        if let Some(max_id) = self.max_id {
            if max_id < self.start_id {
                return Err(ConfigError::new(
                    "max-id",
                    format!("{max_id} is below start id {}", self.start_id),
                )
                .into());
            }
        }
        if !self.base_url.contains(ID_PLACEHOLDER) {
            return Err(ConfigError::new(
                "base-url",
                format!("'{}' has no {ID_PLACEHOLDER} placeholder", self.base_url),
            )
            .into());
        }

        Ok(Config {
            base_url: self.base_url,
            targets,
            pipeline: PipelineSettings {
                workers: self.workers,
                job_queue: self.job_queue,
                result_queue: self.result_queue,
                start_id: self.start_id,
                max_id: self.max_id,
            },
            timeout: Duration::from_secs(self.timeout_secs),
            policy: self.policy,
            capacity: self.capacity.unwrap_or(self.result_queue),
            max_misses: self.max_misses,
        })
    }
}

impl Config {
    pub fn termination_policy(&self) -> Box<dyn TerminationPolicy> {
        let primary: Box<dyn TerminationPolicy> = match self.policy {
            PolicyKind::Count => Box::new(CountPolicy::new(self.targets.len())),
            PolicyKind::Capacity => Box::new(CapacityPolicy::new(self.capacity)),
        };
        match self.max_misses {
            Some(limit) => Box::new(AnyOf::new(vec![
                primary,
                Box::new(MissStreakPolicy::new(limit)),
            ])),
            None => primary,
        }
    }
}

fn positive(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::new(field, "must be at least 1"));
    }
    Ok(())
}

fn read_teams_file(path: &Path) -> Result<Vec<String>, Error> {
    let raw = fs::read_to_string(path).map_err(|e| IOError::new(path.to_path_buf(), e))?;
    Ok(serde_json::from_str(&raw).map_err(|e| JSONError::new(Some(path.to_path_buf()), e))?)
}
