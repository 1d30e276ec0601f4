//! Scoring and session control
//!
//! Ties launches, rim engagement, sensor contacts and out-of-bounds checks
//! to the session score. Runs only while the phase is `Playing`.

use glam::Vec2;
use rand::Rng;

use super::impulse::flick_impulse;
use super::phase::{GamePhase, Transition};
use super::physics::ContactEvent;
use super::scene::SceneContext;
use super::state::ZOrder;
use crate::audio::SoundEffect;
use crate::consts::BALL_REST_HEIGHT;
use crate::error::GestureError;
use crate::settings::ScoringTrigger;

/// Launch the ball for a drag from `start` to `end`
///
/// Degenerate drags are rejected before anything touches the world.
pub fn launch(start: Vec2, end: Vec2, ctx: &mut SceneContext<'_>) -> Result<Vec2, GestureError> {
    let impulse = flick_impulse(start, end, &ctx.settings.flick)?;

    ctx.world.set_affected_by_gravity(ctx.ball, true);
    ctx.world.apply_impulse(ctx.ball, impulse);
    ctx.world
        .run_scale(ctx.ball, ctx.settings.shrink_scale, ctx.settings.shrink_duration);
    ctx.session.clear_shot();

    log::debug!("Launched ball with impulse {impulse}");
    Ok(impulse)
}

/// Per-tick rim gating and out-of-bounds handling
pub fn update(ctx: &mut SceneContext<'_>) -> Transition {
    let ball = ctx.world.ball_state(ctx.ball);

    // Engage the hoop once the ball is above it; stays engaged for the flight
    if !ctx.basket.is_enabled() && ball.position.y > ctx.basket.apex_y(ctx.settings.apex_margin) {
        ctx.basket.set_enabled(ctx.world, true);
        ctx.world.set_z_order(ctx.ball, ZOrder::BehindRim);
        log::debug!("Basket engaged at y={:.1}", ball.position.y);
    }

    let out_of_play = !ctx.world.frame(ctx.ball).intersects(&ctx.world.playfield());
    if !(out_of_play && ball.position.y < 0.0) {
        return Transition::Stay;
    }

    if ctx.session.has_scored_current_shot {
        let randomize = ctx.settings.randomize_reset_x;
        reset_ball(ctx, randomize);
        log::debug!("Ball reset for next shot");
        Transition::Stay
    } else {
        log::info!("Missed shot, final score {}", ctx.session.score);
        Transition::To(GamePhase::GameOver)
    }
}

/// Score a made shot from a sensor contact
pub fn handle_contact(event: ContactEvent, ctx: &mut SceneContext<'_>) {
    if !ctx.basket.is_sensor_contact(&event, ctx.ball) {
        return;
    }

    let triggered = matches!(
        (ctx.settings.scoring_trigger, event),
        (ScoringTrigger::OnEnter, ContactEvent::Begin(..))
            | (ScoringTrigger::OnExit, ContactEvent::End(..))
    );
    if !triggered {
        return;
    }

    // Stale event from before a reset
    if !ctx.basket.is_enabled() {
        log::trace!("Ignoring sensor contact while basket is disengaged");
        return;
    }
    if ctx.session.has_scored_current_shot {
        log::trace!("Ignoring repeat sensor contact for a scored flight");
        return;
    }

    ctx.session.record_score();
    ctx.presentation.play(SoundEffect::Swish);
    ctx.presentation.on_score_changed(ctx.session);
    log::info!("Made shot! Score {}", ctx.session.score);
}

/// Put the ball back at rest and disengage the basket
///
/// With `randomize_x` the ball lands at a random spot across the playfield,
/// otherwise centered.
pub fn reset_ball(ctx: &mut SceneContext<'_>, randomize_x: bool) {
    ctx.world.set_affected_by_gravity(ctx.ball, false);
    ctx.world.reset_motion(ctx.ball);
    ctx.world.set_z_order(ctx.ball, ZOrder::InFrontOfRim);

    let field = ctx.world.playfield();
    let half = ctx.world.frame(ctx.ball).height() * 0.5;
    let (lo, hi) = (field.min.x + half, field.max.x - half);
    let x = if randomize_x && hi > lo {
        ctx.rng.random_range(lo..=hi)
    } else {
        field.center().x
    };
    ctx.world
        .set_position(ctx.ball, Vec2::new(x, field.min.y + half + BALL_REST_HEIGHT));

    ctx.basket.set_enabled(ctx.world, false);
    ctx.session.clear_shot();
}
