use std::{thread, time::Duration};

use anyhow::Result;
use guardian_orchestrator::{GuardianConfig, GuardianSystem, SystemClock};

const TICK_INTERVAL_MS: u64 = 1_000;

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let fatigue_test = std::env::args().any(|arg| arg == "--fatigue-test");
    let mut system = GuardianSystem::new(GuardianConfig::default(), SystemClock::new());
    if fatigue_test {
        system.toggle_fatigue_test();
    }

    loop {
        let snapshot = system.tick();
        println!("{}", serde_json::to_string(&snapshot)?);
        if let Some(message) = &snapshot.outbound_message {
            tracing::info!(%message, "outbound notification");
        }
        thread::sleep(Duration::from_millis(TICK_INTERVAL_MS));
    }
}
