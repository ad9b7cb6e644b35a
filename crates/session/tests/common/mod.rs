use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use marquee_core::{Character, CharacterId};
use marquee_events::EventBus;
use marquee_gateway::{CatalogGateway, GatewayError};
use marquee_session::{Session, SessionConfig, SessionHandle};
use tokio::sync::oneshot;

/// Generous upper bound for a view to settle in tests.
pub const SETTLE: Duration = Duration::from_secs(5);

/// Three characters per page with ids derived from the page number, so a
/// window can be traced back to the page that produced it.
pub fn page_fixture(page: u32) -> Vec<Character> {
    let base = i64::from(page) * 100;
    vec![
        Character::new(base + 1, "Elsa")
            .with_films(["Frozen"])
            .with_allies(["Anna"])
            .with_enemies(["Hans"]),
        Character::new(base + 2, "Scar")
            .with_films(["The Lion King"])
            .with_enemies(["Simba"]),
        Character::new(base + 3, "Ariel")
            .with_films(["The Little Mermaid"])
            .with_allies(["Flounder"]),
    ]
}

/// In-memory catalog whose page fetches can be held open and released in
/// any order, or made to fail.
#[derive(Default)]
pub struct ScriptedGateway {
    held: Mutex<HashMap<u32, oneshot::Receiver<()>>>,
    failing: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Hold the next fetch of `page` until the returned sender fires.
    pub fn hold_page(&self, page: u32) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.held.lock().unwrap().insert(page, rx);
        tx
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every gateway call so far, e.g. `page:2` or `query:elsa`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_failing(&self) -> Result<(), GatewayError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::Status {
                status: 503,
                body: "unavailable".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogGateway for ScriptedGateway {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Character>, GatewayError> {
        self.record(format!("page:{page}"));
        let gate = self.held.lock().unwrap().remove(&page);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.check_failing()?;
        Ok(page_fixture(page))
    }

    async fn fetch_by_query(&self, text: &str) -> Result<Vec<Character>, GatewayError> {
        self.record(format!("query:{text}"));
        self.check_failing()?;
        let needle = text.to_lowercase();
        Ok(page_fixture(1)
            .into_iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect())
    }

    async fn fetch_by_id(&self, id: CharacterId) -> Result<Option<Character>, GatewayError> {
        self.record(format!("id:{id}"));
        self.check_failing()?;
        Ok(page_fixture(1).into_iter().find(|c| c.id == id))
    }
}

/// Spawn a session over `gateway` at `location` with a fresh bus.
pub fn spawn_session(gateway: &Arc<ScriptedGateway>, location: &str) -> (SessionHandle, Arc<EventBus>) {
    let bus = Arc::new(EventBus::default());
    let handle = Session::spawn(
        location,
        Arc::clone(gateway) as Arc<dyn CatalogGateway>,
        Arc::clone(&bus),
        SessionConfig::default(),
    );
    (handle, bus)
}

pub fn ids(characters: &[Character]) -> Vec<CharacterId> {
    characters.iter().map(|c| c.id).collect()
}
