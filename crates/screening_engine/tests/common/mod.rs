#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use screening_core::{PollSettings, ScreeningRequest};
use screening_engine::{
    ClientSettings, EngineEvent, ProgressSink, ReqwestScreeningApi, ScreeningApi,
    StaticCredential,
};
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";
pub const AUTH_HEADER: &str = "Bearer test-token";

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

#[derive(Default, Clone)]
pub struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Polls until an event matching `pred` shows up or two seconds pass.
    pub async fn wait_for(&self, pred: impl Fn(&EngineEvent) -> bool) -> bool {
        for _ in 0..200 {
            if self.snapshot().iter().any(&pred) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn settings_for(server: &MockServer, poll: PollSettings) -> ClientSettings {
    ClientSettings {
        poll,
        ..ClientSettings::with_base_url(&server.uri()).unwrap()
    }
}

pub fn api_for(server: &MockServer) -> Arc<dyn ScreeningApi> {
    let settings = ClientSettings::with_base_url(&server.uri()).unwrap();
    Arc::new(ReqwestScreeningApi::new(&settings, Arc::new(StaticCredential::new(TOKEN))).unwrap())
}

pub fn fast_poll(max_attempts: u32) -> PollSettings {
    PollSettings {
        interval: Duration::from_millis(1),
        max_attempts,
    }
}

pub fn tle_request() -> ScreeningRequest {
    ScreeningRequest::new(
        "fleet.tle",
        "ISS (ZARYA)\n1 25544U 98067A   26292.51782528  .00016717  00000-0  10270-3 0  9005\n2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.49815330 13520\n",
    )
}
