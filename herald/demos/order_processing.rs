//! An order pipeline: validation runs first and aborts bad orders, later
//! listeners enrich and persist the rest.

use futures::StreamExt;
use herald::prelude::*;
use std::error::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
struct Order {
    id: u32,
    amount_cents: u64,
    discount_cents: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let emitter = MemoryEmitter::<Order>::builder()
        .error_handler(ErrorHandler::new(|event: &Event<Order>, err| {
            Some(format!("order {}: {err}", event.payload().id).into())
        }))
        .error_buffer_size(4)
        .build();

    emitter.on_with_priority(
        "order.*",
        |event| {
            if event.payload().amount_cents == 0 {
                event.set_aborted(true);
                return Err("empty order".into());
            }
            Ok(())
        },
        Priority::HIGHEST,
    )?;

    emitter.on_with_priority(
        "order.created",
        |event| {
            event.update_payload(|order| {
                if order.amount_cents >= 10_000 {
                    order.discount_cents = order.amount_cents / 10;
                }
            });
            Ok(())
        },
        Priority::NORMAL,
    )?;

    emitter.on_with_priority(
        "order.created",
        |event| {
            let order = event.payload();
            info!(
                id = order.id,
                total = order.amount_cents - order.discount_cents,
                "order stored"
            );
            Ok(())
        },
        Priority::LOW,
    )?;

    let orders = [
        Order { id: 1, amount_cents: 2_500, discount_cents: 0 },
        Order { id: 2, amount_cents: 0, discount_cents: 0 },
        Order { id: 3, amount_cents: 25_000, discount_cents: 0 },
    ];

    for order in orders {
        let mut errors = emitter.emit("order.created", order);
        while let Some(err) = errors.next().await {
            warn!(%err, "order rejected");
        }
    }

    emitter.close()?;
    Ok(())
}
