//! Simulated change feed for local development and tests.
//!
//! Fabricates the same wire shapes the real backend delivers, but from
//! a small in-process simulation: a worker wanders near the safety
//! line, the fuzzy risk engine scores each step, and the resulting
//! status/action rows are pushed on the notification channel. The
//! original dashboard mock emitted uniformly random payloads on a 3 s
//! timer; only its cadence and payload shape are kept -- the content
//! here follows plausible physics so the dashboard behaves like a real
//! plant during demos.

use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tracing::{debug, info};

use serpiente_core::risk::{self, RiskInput};
use serpiente_types::{ActionKind, OperativeState};

use crate::notification::Notification;
use crate::subscription::Subscription;

/// Cadence of the original dashboard mock.
const DEFAULT_PERIOD: Duration = Duration::from_secs(3);

/// Timer-driven synthetic change feed.
#[derive(Debug, Clone)]
pub struct SimulatedFeed {
    period: Duration,
    seed: Option<u64>,
}

impl Default for SimulatedFeed {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            seed: None,
        }
    }
}

impl SimulatedFeed {
    /// Create a feed with the default 3 s cadence and OS-seeded
    /// randomness.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the emission period. Must be non-zero.
    #[must_use]
    pub const fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Seed the simulation for a deterministic payload sequence.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start the delivery task.
    ///
    /// Every period, one machine-status row is emitted, plus an action
    /// row whenever the risk engine decides one is warranted.
    pub fn subscribe(self, tx: mpsc::Sender<Notification>) -> Subscription {
        let mut sim = WorkerSim::new(self.seed);
        let period = self.period;
        info!(?period, "starting simulated change feed");

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let (status, action) = sim.step();
                if tx.send(Notification::status(status)).await.is_err() {
                    debug!("ingest receiver dropped, stopping simulated feed");
                    return;
                }
                if let Some(payload) = action {
                    if tx.send(Notification::action(payload)).await.is_err() {
                        debug!("ingest receiver dropped, stopping simulated feed");
                        return;
                    }
                }
            }
        });

        Subscription::new(vec![task])
    }
}

/// Random walk of a worker near the safety line, scored by the fuzzy
/// risk engine each step.
struct WorkerSim {
    rng: StdRng,
    /// Distance to the safety line in px; negative once crossed.
    distance_px: f64,
    /// Approach velocity derived from the last step.
    velocity_px_s: f64,
    maintenance: bool,
    stopped: bool,
    next_id: i64,
}

impl WorkerSim {
    fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            rng,
            distance_px: 300.0,
            velocity_px_s: 0.0,
            maintenance: false,
            stopped: false,
            next_id: 1,
        }
    }

    /// Advance the simulation one step and render the resulting row
    /// images: always a status row, sometimes an action row.
    fn step(&mut self) -> (serde_json::Value, Option<serde_json::Value>) {
        // Wander, drifting away from the line while the plant is
        // stopped (the worker clears the area) and slightly toward it
        // otherwise.
        let drift = if self.stopped { 25.0 } else { -10.0 };
        let step = self.rng.random_range(-60.0..60.0) + drift;
        let previous = self.distance_px;
        self.distance_px = (self.distance_px + step).clamp(-120.0, 600.0);
        self.velocity_px_s = previous - self.distance_px;

        // Occasionally a technician toggles maintenance mode.
        if self.rng.random_bool(0.03) {
            self.maintenance = !self.maintenance;
        }

        let phone_detected = self.rng.random_bool(0.2);
        let risk_value = risk::infer_risk(&RiskInput {
            distance_px: self.distance_px,
            velocity_px_s: self.velocity_px_s,
            phone_detected,
        });

        let action = risk::decide_action(risk_value, phone_detected).map(|(kind, reason)| {
            let id = self.next_id;
            self.next_id = self.next_id.saturating_add(1);
            if kind == ActionKind::TotalStop {
                self.stopped = true;
            }
            serde_json::json!({
                "id": id,
                "accion": kind.label(),
                "motivo": reason,
                "created_at": Utc::now().to_rfc3339(),
                "riesgo": risk_value,
            })
        });

        // The plant restarts once the worker is clear again.
        if self.stopped && risk_value < risk::WARNING_THRESHOLD {
            self.stopped = false;
        }

        let operative_state = if self.stopped || self.maintenance {
            OperativeState::Stop
        } else {
            OperativeState::Run
        };
        let status = serde_json::json!({
            "estado_operativo": operative_state.label(),
            "modo_mantenimiento": self.maintenance,
        });

        (status, action)
    }
}
