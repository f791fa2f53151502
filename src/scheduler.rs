use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Handle to a background task that runs a job on a fixed cadence.
///
/// The first run happens immediately. `stop` cancels the job in flight and
/// guarantees no further runs; dropping the handle aborts the task.
pub struct TaskHandle {
    name: &'static str,
    shutdown: watch::Sender<bool>,
    join: Option<JoinHandle<()>>,
}

impl TaskHandle {
    pub fn spawn_interval<F, Fut>(name: &'static str, period: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown, mut stop_rx) = watch::channel(false);
        let join = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = stop_rx.changed() => break,
                    _ = ticker.tick() => {
                        // a hung job must not hold up shutdown
                        tokio::select! {
                            biased;
                            _ = stop_rx.changed() => break,
                            _ = job() => {}
                        }
                    }
                }
            }
            tracing::debug!("Task {} stopped", name);
        });

        tracing::debug!("Task {} started (every {:?})", name, period);
        Self {
            name,
            shutdown,
            join: Some(join),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().map_or(true, |join| join.is_finished())
    }

    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(join) = self.join.take() {
            if let Err(e) = join.await {
                if !e.is_cancelled() {
                    tracing::error!("Task {} ended abnormally: {}", self.name, e);
                }
            }
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            join.abort();
        }
    }
}

/// Stop every handle and wait for all of them.
pub async fn stop_all(handles: Vec<TaskHandle>) {
    let names: Vec<_> = handles.iter().map(TaskHandle::name).collect();
    futures_util::future::join_all(handles.into_iter().map(TaskHandle::stop)).await;
    tracing::info!("Stopped background tasks: {}", names.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_task(period: Duration) -> (TaskHandle, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let handle = TaskHandle::spawn_interval("counter", period, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        (handle, count)
    }

    #[tokio::test]
    async fn runs_immediately_and_repeats() {
        let (handle, count) = counting_task(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(count.load(Ordering::SeqCst) >= 2);
        assert!(!handle.is_finished());
        handle.stop().await;
    }

    #[tokio::test]
    async fn stop_prevents_further_runs() {
        let (handle, count) = counting_task(Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.stop().await;

        let after_stop = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test]
    async fn stop_cancels_a_job_in_flight() {
        let handle = TaskHandle::spawn_interval("hung", Duration::from_secs(60), || async {
            tokio::time::sleep(Duration::from_secs(30)).await;
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        tokio::time::timeout(Duration::from_secs(1), handle.stop())
            .await
            .expect("stop should not wait for the hung job");
    }

    #[tokio::test]
    async fn dropping_handle_aborts_task() {
        let (handle, count) = counting_task(Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(handle);
        tokio::task::yield_now().await;

        let after_drop = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }

    #[tokio::test]
    async fn stop_all_waits_for_every_task() {
        let (first, first_count) = counting_task(Duration::from_millis(5));
        let (second, second_count) = counting_task(Duration::from_millis(7));
        tokio::time::sleep(Duration::from_millis(20)).await;
        stop_all(vec![first, second]).await;

        let snapshot = (
            first_count.load(Ordering::SeqCst),
            second_count.load(Ordering::SeqCst),
        );
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(
            snapshot,
            (
                first_count.load(Ordering::SeqCst),
                second_count.load(Ordering::SeqCst)
            )
        );
    }
}
