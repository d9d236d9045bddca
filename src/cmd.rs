use std::sync::Arc;

use clap::Subcommand;
use tracing::warn;

use crate::aggregator::Aggregator;
use crate::api_client::TeamApiClient;
use crate::client::{Client, Lookup};
use crate::config::Config;
use crate::target::TargetTeams;
use crate::types::Player;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    /// probe the API and print the deduplicated roster of the target teams
    Roster,
    /// fetch a single team identifier
    Probe { id: u32 },
    /// print the target team names
    Teams,
}

pub fn player_line(player: &Player) -> String {
    format!("{}; {}; {}", player.name, player.age, player.country)
}

async fn roster(config: Config) -> anyhow::Result<()> {
    let client = TeamApiClient::new(&config.base_url, config.timeout)?;
    let mut policy = config.termination_policy();
    let aggregator = Aggregator::new(Arc::new(client), config.targets, config.pipeline);

    let roster = aggregator.run(policy.as_mut()).await;
    if roster.players.is_empty() {
        warn!("no players collected after {} probes", roster.stats.issued);
    }

    for player in &roster.players {
        println!("{}", player_line(player));
    }
    Ok(())
}

fn lookup_lines(id: u32, lookup: &Lookup, targets: &TargetTeams) -> Vec<String> {
    match lookup {
        Lookup::NotFound => vec![format!("team {id}: not found")],
        Lookup::Found(record) => {
            let target = if targets.is_desired(&record.team_name) {
                "target"
            } else {
                "not a target"
            };
            std::iter::once(format!("team {id}: {} ({target})", record.team_name))
                .chain(record.players.iter().map(player_line))
                .collect()
        }
    }
}

async fn probe(config: Config, id: u32) -> anyhow::Result<()> {
    let client = TeamApiClient::new(&config.base_url, config.timeout)?;

    let lookup = client.fetch_team(id).await?;
    for line in lookup_lines(id, &lookup, &config.targets) {
        println!("{line}");
    }
    Ok(())
}

impl Cmd {
    pub async fn run(self, config: Config) -> anyhow::Result<()> {
        match self {
            Cmd::Roster => roster(config).await?,
            Cmd::Probe { id } => probe(config, id).await?,
            Cmd::Teams => {
                for team in config.targets.iter() {
                    println!("{team}");
                }
            }
        }

        Ok(())
    }
}
