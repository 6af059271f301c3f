//! Movement example — integrates positions from velocities over a few ticks.
//!
//! Demonstrates the intended usage pattern: spawn entities, attach
//! components through the registry, mutate one store in place with
//! `each_mut`, and read conjunctions back with `view`.

use sparse_ecs::{Entity, Registry};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Debug, Clone, Copy)]
struct Velocity {
    dx: f32,
    dy: f32,
}

/// Drag applied to every velocity once per tick.
const DAMPING: f32 = 0.9;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut registry = Registry::new();

    // Five entities with positions; only the odd ones move.
    for i in 0..5 {
        let e = registry.spawn();
        registry.add_component(
            e,
            Position {
                x: i as f32,
                y: 0.0,
            },
        );
        if i % 2 == 1 {
            registry.add_component(
                e,
                Velocity {
                    dx: 1.0,
                    dy: 0.5 * i as f32,
                },
            );
        }
    }

    for tick in 0..3u32 {
        // Multi-component reads go through a view; the per-entity writes go
        // back through `get_mut`.
        let moving: Vec<(Entity, Velocity)> = registry
            .view::<(Position, Velocity)>()
            .map(|(e, (_, vel))| (e, *vel))
            .collect();
        for (e, vel) in moving {
            if let Ok(pos) = registry.get_mut::<Position>(e) {
                pos.x += vel.dx;
                pos.y += vel.dy;
            }
        }

        // Single-store mutation happens in place.
        for (_, vel) in registry.each_mut::<Velocity>() {
            vel.dx *= DAMPING;
            vel.dy *= DAMPING;
        }

        info!(tick, "integrated positions");
    }

    for (entity, (pos, vel)) in registry.view::<(Position, Velocity)>() {
        info!(%entity, ?pos, ?vel, "moving entity");
    }
    for (entity, pos) in registry.each::<Position>() {
        info!(%entity, ?pos, "final position");
    }
}
