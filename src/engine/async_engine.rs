use crate::aggregator::Aggregator;
use crate::config::EngineConfig;
use crate::engine::completion::CompletionBarrier;
use crate::engine::rate_gate::RateGate;
use crate::engine::report::Report;
use crate::gateway::PaymentGateway;
use crate::source::RecordSource;
use crate::workers::DonationWorker;
use std::io::{Read, Seek};
use std::sync::Arc;
use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error, info};

/// Rate-limited donation pipeline.
///
/// Records are read on a blocking thread, then dispatched one per interval to
/// concurrently running workers. The report is built once every worker has
/// settled.
pub struct DonationEngine<G: PaymentGateway> {
    worker: DonationWorker<G>,
    config: EngineConfig
}

impl<G: PaymentGateway> DonationEngine<G> {
    pub fn new(gateway: Arc<G>, config: EngineConfig) -> Self {
        Self {
            worker: DonationWorker::new(gateway, config.currency.clone()),
            config
        }
    }

    /// Processes every record in `source` and summarizes the batch.
    pub async fn run<R>(&self, mut source: RecordSource<R>) -> anyhow::Result<Report>
    where
        R: Read + Seek + Send + 'static,
    {
        match source.count_lines() {
            Ok(lines) => info!("Input holds [{lines}] lines including the header"),
            Err(error) => error!("{error}")
        }

        let (sender, receiver) = mpsc::channel::<String>(self.config.backpressure);
        let reader_handle = self.spawn_record_reader(source, sender);
        let aggregator = Arc::new(Aggregator::new());
        let mut barrier = CompletionBarrier::new();

        let dispatch_result = self.dispatch(receiver, &aggregator, &mut barrier).await;

        if let Err(error) = reader_handle.await {
            error!("Record reader failed: {error}");
        }

        let state = barrier.wait(&aggregator, |state| {
            info!("All [{}] dispatched donations settled, [{}] faulty", state.processed, state.faulty);
        }).await;

        debug!("Completion barrier is {:?}", barrier.state());

        dispatch_result?;

        Ok(Report::summarize(&state, &self.config.currency))
    }

    fn spawn_record_reader<R>(&self, mut source: RecordSource<R>, sender: mpsc::Sender<String>) -> JoinHandle<()>
    where
        R: Read + Seek + Send + 'static,
    {
        spawn_blocking(move || {
            let records = match source.records() {
                Ok(records) => records,
                Err(error) => {
                    error!("{error}");
                    return;
                }
            };

            for result in records {
                match result {
                    Ok(line) => {
                        if sender.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(error) => {
                        error!("Record read error, remaining input skipped: {error}");
                        break;
                    }
                }
            }
        })
    }

    async fn dispatch(&self, mut receiver: mpsc::Receiver<String>, aggregator: &Arc<Aggregator>, barrier: &mut CompletionBarrier) -> anyhow::Result<()> {
        let mut gate = RateGate::new(self.config.dispatch_interval);

        while let Some(line) = receiver.recv().await {
            gate.pass().await;

            let guard = barrier.register()?;
            let worker = self.worker.clone();
            let aggregator = aggregator.clone();

            debug!("Dispatching donation record [{}] with [{}] still in flight", barrier.registered(), barrier.in_flight());

            spawn(async move {
                worker.donate(&line, &aggregator).await;
                drop(guard);
            });
        }

        Ok(())
    }
}
