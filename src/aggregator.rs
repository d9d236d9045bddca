use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::client::Client;
use crate::policy::{TerminationPolicy, Verdict};
use crate::pool::{Outcome, Pool, Probe};
use crate::registry::PlayerRegistry;
use crate::target::TargetTeams;
use crate::types::Player;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineSettings {
    pub workers: usize,
    pub job_queue: usize,
    pub result_queue: usize,
    pub start_id: u32,
    pub max_id: Option<u32>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            workers: 10,
            job_queue: 3,
            result_queue: 10,
            start_id: 1,
            max_id: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Dispatching,
    Draining,
    Done,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub issued: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub not_found: usize,
    /// Issued identifiers that produced no probe.
    pub failed: usize,
    pub players: usize,
    pub duplicates: usize,
}

#[derive(Debug)]
pub struct Roster {
    pub players: Vec<Player>,
    pub stats: RunStats,
}

/// Issues identifiers to the pool and folds the results into a
/// `PlayerRegistry`. The registry is only ever touched from `run`.
pub struct Aggregator {
    client: Arc<dyn Client>,
    targets: Arc<TargetTeams>,
    settings: PipelineSettings,
}

impl Aggregator {
    pub fn new(client: Arc<dyn Client>, targets: TargetTeams, settings: PipelineSettings) -> Self {
        Self {
            client,
            targets: Arc::new(targets),
            settings,
        }
    }

    pub async fn run(&self, policy: &mut dyn TerminationPolicy) -> Roster {
        let (job_tx, job_rx) = mpsc::channel(self.settings.job_queue);
        let (result_tx, mut result_rx) = mpsc::channel(self.settings.result_queue);
        let pool = Pool::spawn(
            self.settings.workers,
            self.client.clone(),
            self.targets.clone(),
            job_rx,
            result_tx,
        );

        let mut jobs = Some(job_tx);
        let mut next_id = Some(self.settings.start_id);
        let mut phase = Phase::Dispatching;
        let mut registry = PlayerRegistry::new();
        let mut stats = RunStats::default();

        info!(
            workers = self.settings.workers,
            targets = self.targets.len(),
            "dispatching from team {}",
            self.settings.start_id
        );

        while phase != Phase::Done {
            tokio::select! {
                biased;

                probe = result_rx.recv() => match probe {
                    Some(probe) => {
                        let verdict = policy.observe(&probe);
                        self.record(probe, &mut registry, &mut stats);
                        if phase == Phase::Dispatching && verdict == Verdict::Drain {
                            phase = drain(&mut jobs, "termination policy satisfied");
                        }
                    }
                    None => {
                        phase = Phase::Done;
                    }
                },

                permit = reserve(jobs.clone()), if phase == Phase::Dispatching => match (permit, next_id) {
                    (Some(permit), Some(id)) => {
                        permit.send(id);
                        stats.issued += 1;
                        next_id = id
                            .checked_add(1)
                            .filter(|next| self.settings.max_id.map_or(true, |max| *next <= max));
                        if next_id.is_none() {
                            phase = drain(&mut jobs, "identifier ceiling reached");
                        }
                    }
                    _ => {
                        phase = drain(&mut jobs, "no workers left");
                    }
                },
            }
        }

        pool.join().await;

        stats.failed = stats.issued - (stats.accepted + stats.rejected + stats.not_found);
        stats.players = registry.len();
        info!(
            issued = stats.issued,
            accepted = stats.accepted,
            rejected = stats.rejected,
            not_found = stats.not_found,
            failed = stats.failed,
            players = stats.players,
            duplicates = stats.duplicates,
            "done"
        );

        Roster {
            players: registry.into_sorted(),
            stats,
        }
    }

    fn record(&self, probe: Probe, registry: &mut PlayerRegistry, stats: &mut RunStats) {
        match probe.outcome {
            Outcome::Accepted { team, players } => {
                let offered = players.len();
                let inserted = registry.merge(players);
                stats.accepted += 1;
                stats.duplicates += offered - inserted;
                info!(id = probe.id, team = %team, players = offered, new = inserted, "accepted");
            }
            Outcome::Rejected { team } => {
                stats.rejected += 1;
                debug!(id = probe.id, team = %team, "not a target");
            }
            Outcome::NotFound => {
                stats.not_found += 1;
            }
        }
    }
}

fn drain(jobs: &mut Option<mpsc::Sender<u32>>, reason: &str) -> Phase {
    info!("draining: {reason}");
    *jobs = None;
    Phase::Draining
}

async fn reserve(jobs: Option<mpsc::Sender<u32>>) -> Option<mpsc::OwnedPermit<u32>> {
    match jobs {
        Some(tx) => tx.reserve_owned().await.ok(),
        None => std::future::pending().await,
    }
}
