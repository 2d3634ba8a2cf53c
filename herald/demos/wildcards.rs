//! Shows which listeners fire for a handful of topic names.

use herald::prelude::*;
use std::error::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let emitter = MemoryEmitter::<String>::new();

    for pattern in ["user.created", "user.*", "user.**", "**.error", "**"] {
        emitter.on(pattern, move |event| {
            info!(pattern, topic = event.topic(), payload = event.payload().as_str(), "matched");
            Ok(())
        })?;
    }

    for topic in [
        "user.created",
        "user.profile.updated",
        "user",
        "db.conn.error",
        "audit",
    ] {
        info!(topic, "emitting");
        for err in emitter.emit_sync(topic, format!("payload for {topic}")) {
            info!(%err, "listener failed");
        }
    }

    emitter.close()?;
    Ok(())
}
