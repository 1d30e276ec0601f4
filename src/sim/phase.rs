//! Game state machine
//!
//! Each phase handles its own input and per-tick work and answers with a
//! `Transition`; the scene applies it. Phases own only their own data (the
//! pending drag), everything else comes in through `SceneContext`.

use glam::Vec2;

use super::physics::ContactEvent;
use super::scene::SceneContext;
use super::scoring;
use crate::audio::SoundEffect;
use crate::settings::StartMode;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GamePhase {
    /// Ball idle, waiting for the first tap
    WaitingForTap,
    /// Active gameplay; `drag_start` is set while a flick is in progress
    Playing { drag_start: Option<Vec2> },
    /// Run ended on a miss
    GameOver,
}

/// What the scene should do after a phase handled something
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Stay,
    To(GamePhase),
    /// Throw the session away and start a fresh one
    NewSession,
}

impl GamePhase {
    /// First phase of a fresh session
    pub fn initial(mode: StartMode) -> Self {
        match mode {
            StartMode::Live => Self::playing(),
            StartMode::WaitForTap => GamePhase::WaitingForTap,
        }
    }

    pub fn playing() -> Self {
        GamePhase::Playing { drag_start: None }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GamePhase::WaitingForTap => "WaitingForTap",
            GamePhase::Playing { .. } => "Playing",
            GamePhase::GameOver => "GameOver",
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, GamePhase::Playing { .. })
    }

    /// Legal in-session transitions
    ///
    /// Leaving `GameOver` is never a transition; it always starts a new session.
    pub fn can_transition_to(&self, next: &GamePhase) -> bool {
        matches!(
            (self, next),
            (GamePhase::WaitingForTap, GamePhase::Playing { .. })
                | (GamePhase::Playing { .. }, GamePhase::GameOver)
        )
    }

    /// Entry hook
    pub fn enter(&self, ctx: &mut SceneContext<'_>) {
        match self {
            GamePhase::WaitingForTap => {
                ctx.world.set_affected_by_gravity(ctx.ball, false);
            }
            GamePhase::Playing { .. } => {
                ctx.presentation.play(SoundEffect::Whistle);
            }
            GamePhase::GameOver => {
                ctx.session.is_game_over = true;
                ctx.presentation.play(SoundEffect::GameOver);
                ctx.presentation.on_game_over(ctx.session);
            }
        }
    }

    pub fn on_touch_began(&mut self, point: Vec2, ctx: &mut SceneContext<'_>) -> Transition {
        match self {
            GamePhase::WaitingForTap => {
                ctx.presentation.on_request_expand();
                ctx.presentation.on_score_changed(ctx.session);
                Transition::To(Self::playing())
            }
            GamePhase::Playing { drag_start } => {
                ctx.presentation.on_score_changed(ctx.session);
                // Only a touch that lands on the ball starts a flick
                if drag_start.is_none() && ctx.world.body_at(point) == Some(ctx.ball) {
                    *drag_start = Some(point);
                }
                Transition::Stay
            }
            GamePhase::GameOver => Transition::NewSession,
        }
    }

    pub fn on_touch_ended(&mut self, point: Vec2, ctx: &mut SceneContext<'_>) -> Transition {
        if let GamePhase::Playing { drag_start } = self
            && let Some(start) = drag_start.take()
            && let Err(err) = scoring::launch(start, point, ctx)
        {
            log::debug!("Dropped gesture: {err}");
        }
        Transition::Stay
    }

    /// Contact events only matter while the ball is live
    pub fn on_contact(&self, event: ContactEvent, ctx: &mut SceneContext<'_>) {
        if self.is_playing() {
            scoring::handle_contact(event, ctx);
        }
    }

    /// Per-tick update
    pub fn update(&mut self, ctx: &mut SceneContext<'_>) -> Transition {
        match self {
            GamePhase::Playing { .. } => scoring::update(ctx),
            GamePhase::WaitingForTap | GamePhase::GameOver => Transition::Stay,
        }
    }
}
