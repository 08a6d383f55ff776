use async_trait::async_trait;
use log::{debug, info};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

/// A unit of work driven by [`run_forever`].
#[async_trait]
pub trait ScheduledTask: Send {
    fn name(&self) -> String;

    async fn run_once(&mut self);
}

/// Runs `task` every `period`, starting immediately, until the process ends.
///
/// Each run completes before the next one starts. Ticks missed while a run
/// overran the period are coalesced rather than fired back to back.
pub async fn run_forever<T: ScheduledTask + ?Sized>(period: Duration, task: &mut T) {
    run_ticks(period, task, None).await
}

pub(crate) async fn run_ticks<T: ScheduledTask + ?Sized>(
    period: Duration,
    task: &mut T,
    max_ticks: Option<usize>,
) {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("Scheduling {} every {:?}", task.name(), period);

    let mut completed = 0usize;
    loop {
        if max_ticks.is_some_and(|max| completed >= max) {
            break;
        }

        timer.tick().await;
        debug!("Tick {} for {}", completed + 1, task.name());
        task.run_once().await;
        completed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    struct CountingTask {
        runs: Vec<Instant>,
        work: Duration,
    }

    #[async_trait]
    impl ScheduledTask for CountingTask {
        fn name(&self) -> String {
            "counting_task".to_string()
        }

        async fn run_once(&mut self) {
            self.runs.push(Instant::now());
            sleep(self.work).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_is_immediate_then_periodic() {
        let start = Instant::now();
        let mut task = CountingTask {
            runs: Vec::new(),
            work: Duration::ZERO,
        };

        run_ticks(Duration::from_secs(300), &mut task, Some(3)).await;

        assert_eq!(task.runs.len(), 3);
        assert_eq!(task.runs[0] - start, Duration::ZERO);
        assert_eq!(task.runs[1] - start, Duration::from_secs(300));
        assert_eq!(task.runs[2] - start, Duration::from_secs(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overrunning_tick_is_not_reentered() {
        let start = Instant::now();
        let mut task = CountingTask {
            runs: Vec::new(),
            work: Duration::from_secs(700),
        };

        run_ticks(Duration::from_secs(300), &mut task, Some(2)).await;

        // The second run waits for the first to finish, and the missed ticks
        // at 300s and 600s collapse into a single run.
        assert_eq!(task.runs.len(), 2);
        assert!(task.runs[1] - start >= Duration::from_secs(700));
    }
}
