//! Fixed timestep simulation tick
//!
//! Core game loop that advances a run deterministically. Pipeline order
//! within a running tick is fixed: player physics, world scroll, spawning,
//! obstacle advance/cull, completion check, collision sweep, score.

use super::state::{Run, RunEvent, RunPhase};

/// Advance the run by one fixed tick
pub fn tick(run: &mut Run) {
    if run.is_stopped() {
        return;
    }

    match run.phase {
        RunPhase::GameOver | RunPhase::LevelComplete => return,
        RunPhase::Dying => {
            run.time_ticks += 1;
            tick_dying(run);
            return;
        }
        RunPhase::Running => {}
    }

    run.time_ticks += 1;

    run.player.update();

    run.world_distance += run.config.world_speed;

    let distance = run.world_distance;
    let due = run.scheduler_mut().pass(distance);
    for record in &due {
        run.spawn_obstacle(record);
    }

    for obstacle in &mut run.obstacles {
        obstacle.advance();
    }
    run.obstacles.retain(|o| !o.should_remove());

    if run.scheduler().is_dormant() && run.obstacles.is_empty() {
        run.phase = RunPhase::LevelComplete;
        log::info!(
            "Level complete! score {} at distance {}",
            run.score,
            run.world_distance
        );
        run.push_event(RunEvent::LevelComplete { score: run.score });
        return;
    }

    // Spawn order; first fatal contact wins and ends the sweep
    let mut fatal = None;
    for obstacle in &mut run.obstacles {
        if obstacle.collide(&mut run.player).is_fatal() {
            fatal = Some((obstacle.id, obstacle.kind()));
            break;
        }
    }

    if let Some((id, kind)) = fatal {
        run.phase = RunPhase::Dying;
        run.death_ticks_remaining = run.config.death_animation_ticks;
        log::info!(
            "Hit {} #{} at distance {} (score {})",
            kind.as_str(),
            id,
            run.world_distance,
            run.score
        );
        run.push_event(RunEvent::Hit { id, kind });
        return;
    }

    run.score += 1;
}

/// Everything is frozen; only the death animation counts down
fn tick_dying(run: &mut Run) {
    run.death_ticks_remaining = run.death_ticks_remaining.saturating_sub(1);
    if run.death_ticks_remaining == 0 {
        run.phase = RunPhase::GameOver;
        log::info!("Game over with score {}", run.score);
        run.push_event(RunEvent::GameOver { score: run.score });
    }
}
