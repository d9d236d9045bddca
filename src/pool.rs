use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::{Client, Lookup};
use crate::target::TargetTeams;
use crate::types::Player;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Accepted { team: String, players: Vec<Player> },
    /// A real team that is not in the target set.
    Rejected { team: String },
    NotFound,
}

/// A completed probe. Failed fetches produce no `Probe`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Probe {
    pub id: u32,
    pub outcome: Outcome,
}

pub struct Pool {
    workers: Vec<JoinHandle<()>>,
}

impl Pool {
    /// Spawns `size` workers reading identifiers from `jobs` until it is closed
    /// and drained. Each worker holds a clone of `results`; the channel closes
    /// once the last worker exits.
    pub fn spawn(
        size: usize,
        client: Arc<dyn Client>,
        targets: Arc<TargetTeams>,
        jobs: mpsc::Receiver<u32>,
        results: mpsc::Sender<Probe>,
    ) -> Self {
        let jobs = Arc::new(Mutex::new(jobs));
        let workers = (1..=size)
            .map(|worker| {
                tokio::spawn(work(
                    worker,
                    client.clone(),
                    targets.clone(),
                    jobs.clone(),
                    results.clone(),
                ))
            })
            .collect();

        Self { workers }
    }

    pub async fn join(self) {
        for (i, handle) in self.workers.into_iter().enumerate() {
            if let Err(e) = handle.await {
                warn!(worker = i + 1, "worker ended abnormally: {e}");
            }
        }
    }
}

async fn work(
    worker: usize,
    client: Arc<dyn Client>,
    targets: Arc<TargetTeams>,
    jobs: Arc<Mutex<mpsc::Receiver<u32>>>,
    results: mpsc::Sender<Probe>,
) {
    loop {
        // lock is released before the fetch so other workers can pull
        let next = jobs.lock().await.recv().await;
        let Some(id) = next else {
            debug!(worker, "job queue closed");
            break;
        };

        let outcome = match client.fetch_team(id).await {
            Ok(Lookup::NotFound) => {
                debug!(worker, id, "team not found");
                Outcome::NotFound
            }
            Ok(Lookup::Found(record)) if targets.is_desired(&record.team_name) => {
                Outcome::Accepted {
                    team: record.team_name,
                    players: record.players,
                }
            }
            Ok(Lookup::Found(record)) => Outcome::Rejected {
                team: record.team_name,
            },
            Err(e) => {
                warn!(worker, id = e.id(), "skipping: {e}");
                continue;
            }
        };

        if results.send(Probe { id, outcome }).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::mpsc;

    use super::*;
    use crate::client::stub::StubClient;

    async fn run_pool(client: Arc<StubClient>, size: usize, ids: Vec<u32>) -> Vec<Probe> {
        let targets = Arc::new(TargetTeams::new(["Arsenal", "Chelsea"]).unwrap());
        let (job_tx, job_rx) = mpsc::channel(2);
        let (result_tx, mut result_rx) = mpsc::channel(4);
        let pool = Pool::spawn(size, client, targets, job_rx, result_tx);

        let feeder = tokio::spawn(async move {
            for id in ids {
                job_tx.send(id).await.unwrap();
            }
        });

        let mut probes = Vec::new();
        while let Some(probe) = result_rx.recv().await {
            probes.push(probe);
        }
        feeder.await.unwrap();
        pool.join().await;
        probes.sort_by_key(|p| p.id);
        probes
    }

    #[tokio::test]
    async fn test_outcomes_per_identifier() {
        let client = Arc::new(
            StubClient::new()
                .team(1, "Arsenal", vec![Player::new("Bukayo Saka", "21", "England")])
                .team(2, "Fulham", vec![Player::new("Bernd Leno", "31", "Germany")])
                .decode_error(3)
                .transport_error(4),
        );

        let probes = run_pool(client.clone(), 3, vec![1, 2, 3, 4, 5]).await;

        assert_eq!(
            probes,
            vec![
                Probe {
                    id: 1,
                    outcome: Outcome::Accepted {
                        team: "Arsenal".into(),
                        players: vec![Player::new("Bukayo Saka", "21", "England")],
                    },
                },
                Probe {
                    id: 2,
                    outcome: Outcome::Rejected {
                        team: "Fulham".into()
                    },
                },
                Probe {
                    id: 5,
                    outcome: Outcome::NotFound,
                },
            ]
        );
        assert_eq!(client.calls(), 5);
    }

    #[tokio::test]
    async fn test_in_flight_bounded_by_pool_size() {
        let client = Arc::new(StubClient::new().delay(Duration::from_millis(15)));

        let probes = run_pool(client.clone(), 3, (1..=30).collect()).await;

        assert_eq!(probes.len(), 30);
        assert!(client.peak_in_flight() <= 3);
        assert!(client.peak_in_flight() >= 2);
    }

    #[tokio::test]
    async fn test_workers_exit_on_closed_queue() {
        let client = Arc::new(StubClient::new());

        let probes = run_pool(client.clone(), 5, vec![]).await;

        assert!(probes.is_empty());
        assert_eq!(client.calls(), 0);
    }
}
