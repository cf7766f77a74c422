// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence::{RateLimiter, TokioRateLimiter};
use cadence_runtime::TokioTimer;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::unbounded_channel;
use tokio::time::timeout;

const TASKS: usize = 8;
const TRIGGERS_PER_TASK: usize = 50;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_tasks_debounce_to_one_run() -> anyhow::Result<()> {
    // Arrange
    let limiter: Arc<TokioRateLimiter<(usize, usize)>> =
        Arc::new(RateLimiter::debouncer(TokioTimer::current()?));
    let (tx, mut rx) = unbounded_channel();

    // Act
    let tasks: Vec<_> = (0..TASKS)
        .map(|task_id| {
            let limiter = limiter.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                for k in 0..TRIGGERS_PER_TASK {
                    let tx = tx.clone();
                    let _ = limiter.trigger(
                        Duration::from_millis(250),
                        move |payload| {
                            let _ = tx.send(payload);
                        },
                        (task_id, k),
                        None,
                    );
                }
            })
        })
        .collect();
    for task in tasks {
        task.await?;
    }
    drop(tx);

    // Assert
    let winner = timeout(Duration::from_secs(5), rx.recv())
        .await?
        .expect("one action ran");
    assert_eq!(winner.1, TRIGGERS_PER_TASK - 1);
    let extra = timeout(Duration::from_millis(500), rx.recv()).await;
    assert!(
        matches!(extra, Err(_) | Ok(None)),
        "a second action ran: {extra:?}"
    );
    Ok(())
}
