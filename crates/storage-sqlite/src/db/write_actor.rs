//! Single-writer actor: all writes funnel through one dedicated connection,
//! each job wrapped in an immediate transaction.

use std::any::Any;
use std::sync::Arc;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use kakeibo_core::errors::Result;

use super::{get_connection, DbPool};
use crate::errors::StorageError;

// A write job: a closure run against the writer's connection. The return
// type is erased so one channel carries every job shape.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Handle for submitting write jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Runs `job` inside an immediate transaction on the writer's
    /// connection. A job error rolls the transaction back.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("writer actor channel closed");

        ret_rx
            .await
            .expect("writer actor dropped the reply sender")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer actor result had an unexpected type"))
            })
    }
}

/// Spawns the writer actor. It owns one pooled connection for its lifetime
/// and processes jobs strictly in arrival order.
pub fn spawn_writer(pool: Arc<DbPool>) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = get_connection(&pool).expect("writer actor could not get a connection");

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            // The receiver may have been cancelled; that is not our problem.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
