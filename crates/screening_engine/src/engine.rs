use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_error, engine_info};
use screening_core::{PollSettings, ScreeningRequest};

use crate::api::{ReqwestScreeningApi, ScreeningApi};
use crate::screener::Screener;
use crate::settings::{ClientSettings, CredentialProvider, SettingsError};
use crate::types::{ChannelProgressSink, EngineEvent, ProgressSink};

enum EngineCommand {
    Submit(ScreeningRequest),
    RequestSummary,
    Cancel,
}

/// Runs a `Screener` on a background tokio runtime and reports `EngineEvent`s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(
        settings: ClientSettings,
        credential: Arc<dyn CredentialProvider>,
    ) -> Result<Self, SettingsError> {
        let api = ReqwestScreeningApi::new(&settings, credential)?;
        engine_info!("Screening service at {}", settings.base_url);
        Ok(Self::with_api(Arc::new(api), settings.poll))
    }

    pub fn with_api(api: Arc<dyn ScreeningApi>, poll: PollSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start screening runtime: {}", err);
                    return;
                }
            };
            let sink: Arc<dyn ProgressSink> = Arc::new(ChannelProgressSink::new(event_tx));
            let mut screener = Screener::new(api, poll, sink.clone());

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Submit(request) => {
                        runtime.block_on(screener.submit(&request));
                    }
                    EngineCommand::RequestSummary => {
                        let result = runtime.block_on(screener.request_summary());
                        sink.emit(EngineEvent::Summary(result));
                    }
                    EngineCommand::Cancel => screener.cancel_active(),
                }
            }
            screener.cancel_active();
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, request: ScreeningRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit(request));
    }

    pub fn request_summary(&self) {
        let _ = self.cmd_tx.send(EngineCommand::RequestSummary);
    }

    /// Stops polling the current job, if any.
    pub fn cancel(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel);
    }

    /// Blocks for the next event. `None` on timeout or once the engine stopped.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
