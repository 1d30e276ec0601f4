//! Scene: one running game
//!
//! Owns the physics world, the presentation, the session and the state
//! machine, and drives them in a fixed order every tick:
//! queued input, physics step, contact delivery, phase update.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::basket::Basket;
use super::phase::{GamePhase, Transition};
use super::physics::{BodyId, Category, CollisionMasks, ContactEvent, PhysicsWorld};
use super::scoring;
use super::state::GameSession;
use crate::consts::{BACKBOARD_NODE, BACKBOARD_OFFSET, BALL_NODE};
use crate::error::SceneError;
use crate::input::{InputQueue, TouchEvent};
use crate::presentation::Presentation;
use crate::settings::Settings;

/// Everything a phase or the scoring controller may touch during one call
pub struct SceneContext<'a> {
    pub world: &'a mut dyn PhysicsWorld,
    pub presentation: &'a mut dyn Presentation,
    pub session: &'a mut GameSession,
    pub basket: &'a mut Basket,
    pub ball: BodyId,
    pub settings: &'a Settings,
    pub rng: &'a mut Pcg32,
}

/// A running game bound to a physics world and a presentation
pub struct Scene<W: PhysicsWorld, P: Presentation> {
    world: W,
    presentation: P,
    settings: Settings,
    session: GameSession,
    basket: Basket,
    ball: BodyId,
    phase: GamePhase,
    input: InputQueue,
    rng: Pcg32,
    /// Reused contact buffer
    contacts: Vec<ContactEvent>,
    time_ticks: u64,
}

impl<W: PhysicsWorld, P: Presentation> Scene<W, P> {
    /// Set up the court in `world` and enter the first phase
    ///
    /// The world must already contain the `ball` and `backboard` nodes.
    pub fn new(mut world: W, presentation: P, settings: Settings) -> Result<Self, SceneError> {
        settings.validate()?;

        let ball = world
            .find_body(BALL_NODE)
            .ok_or_else(|| SceneError::MissingNode(BALL_NODE.to_string()))?;
        let backboard = world
            .find_body(BACKBOARD_NODE)
            .ok_or_else(|| SceneError::MissingNode(BACKBOARD_NODE.to_string()))?;

        // Backboard centered at two thirds height, hoop hanging off its bottom edge
        let field = world.playfield();
        world.set_position(
            backboard,
            Vec2::new(
                field.center().x,
                field.min.y + field.height() * 2.0 / 3.0 + BACKBOARD_OFFSET,
            ),
        );
        let board = world.frame(backboard);
        let basket_pos = Vec2::new(field.center().x - settings.basket.width / 2.0, board.min.y);
        let basket = Basket::spawn(&mut world, basket_pos, settings.basket);

        world.set_masks(
            ball,
            CollisionMasks {
                category: Category::BALL,
                collision: Category::BASKET,
                contact_test: Category::NONE,
            },
        );

        let mut scene = Self {
            world,
            presentation,
            rng: Pcg32::seed_from_u64(settings.seed),
            phase: GamePhase::initial(settings.start_mode),
            settings,
            session: GameSession::new(),
            basket,
            ball,
            input: InputQueue::new(),
            contacts: Vec::new(),
            time_ticks: 0,
        };
        scene.start_session();
        log::info!("Scene ready, starting in {}", scene.phase.name());
        Ok(scene)
    }

    /// Queue a touch-down for the next tick
    pub fn touch_began(&mut self, point: Vec2) {
        self.push_input(TouchEvent::Began(point));
    }

    /// Queue a touch-up for the next tick
    pub fn touch_ended(&mut self, point: Vec2) {
        self.push_input(TouchEvent::Ended(point));
    }

    /// Queue a raw touch event for the next tick
    pub fn push_input(&mut self, event: TouchEvent) {
        self.input.push(event);
    }

    /// Advance one fixed step
    pub fn tick(&mut self, dt: f32) {
        self.time_ticks += 1;

        for event in self.input.drain() {
            let transition = {
                let (phase, mut ctx) = self.split();
                match event {
                    TouchEvent::Began(p) => phase.on_touch_began(p, &mut ctx),
                    TouchEvent::Ended(p) => phase.on_touch_ended(p, &mut ctx),
                }
            };
            self.apply(transition);
        }

        let mut contacts = std::mem::take(&mut self.contacts);
        contacts.clear();
        self.world.step(dt, &mut contacts);
        for event in &contacts {
            self.handle_contact(*event);
        }
        self.contacts = contacts;

        let transition = {
            let (phase, mut ctx) = self.split();
            phase.update(&mut ctx)
        };
        self.apply(transition);
    }

    /// Deliver one contact event to the current phase
    pub fn handle_contact(&mut self, event: ContactEvent) {
        let (phase, mut ctx) = self.split();
        phase.on_contact(event, &mut ctx);
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::To(next) => {
                if !self.phase.can_transition_to(&next) {
                    log::warn!(
                        "Ignoring illegal transition {} -> {}",
                        self.phase.name(),
                        next.name()
                    );
                    return;
                }
                log::info!("{} -> {}", self.phase.name(), next.name());
                let (phase, mut ctx) = self.split();
                *phase = next;
                phase.enter(&mut ctx);
            }
            Transition::NewSession => self.reset_session(),
        }
    }

    /// Replace the finished session with a fresh one
    fn reset_session(&mut self) {
        log::info!("Starting new session");
        self.start_session();
        self.presentation.on_scene_reset(&self.session);
    }

    fn start_session(&mut self) {
        self.session = GameSession::new();
        let initial = GamePhase::initial(self.settings.start_mode);
        let (phase, mut ctx) = self.split();
        scoring::reset_ball(&mut ctx, false);
        *phase = initial;
        phase.enter(&mut ctx);
    }

    fn split(&mut self) -> (&mut GamePhase, SceneContext<'_>) {
        let Self {
            world,
            presentation,
            settings,
            session,
            basket,
            ball,
            phase,
            rng,
            ..
        } = self;
        (
            phase,
            SceneContext {
                world,
                presentation,
                session,
                basket,
                ball: *ball,
                settings,
                rng,
            },
        )
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn ball(&self) -> BodyId {
        self.ball
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::consts::SIM_DT;
    use crate::presentation::{PresentationEvent, RecordingPresentation};
    use crate::settings::{ScoringTrigger, Variant};
    use crate::sim::world::SimWorld;

    type TestScene = Scene<SimWorld, RecordingPresentation>;

    fn scene_with(settings: Settings) -> TestScene {
        let world = SimWorld::court(&settings.world);
        Scene::new(world, RecordingPresentation::new(), settings).unwrap()
    }

    fn ball_pos(scene: &TestScene) -> Vec2 {
        scene.world().position(scene.ball())
    }

    fn flick_up(scene: &mut TestScene) {
        let start = ball_pos(scene);
        scene.touch_began(start);
        scene.touch_ended(start + Vec2::new(0.0, 300.0));
    }

    #[test]
    fn test_missing_nodes_are_fatal() {
        let empty = SimWorld::new(Vec2::new(400.0, 600.0));
        let result = Scene::new(empty, RecordingPresentation::new(), Settings::default());
        assert!(matches!(result, Err(SceneError::MissingNode(ref n)) if n == "ball"));

        let mut ball_only = SimWorld::new(Vec2::new(400.0, 600.0));
        ball_only.add_ball(BALL_NODE, Vec2::new(200.0, 80.0), 30.0, 1.0);
        let result = Scene::new(ball_only, RecordingPresentation::new(), Settings::default());
        assert!(matches!(result, Err(SceneError::MissingNode(ref n)) if n == "backboard"));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = Settings::default();
        settings.flick.horizontal_damping = 0.0;
        let world = SimWorld::court(&settings.world);
        let result = Scene::new(world, RecordingPresentation::new(), settings);
        assert!(matches!(result, Err(SceneError::Settings(_))));
    }

    #[test]
    fn test_negative_apex_margin_rejected() {
        let mut settings = Settings::default();
        settings.apex_margin = -300.0;
        let world = SimWorld::court(&settings.world);
        let result = Scene::new(world, RecordingPresentation::new(), settings);
        assert!(matches!(result, Err(SceneError::Settings(_))));
    }

    #[test]
    fn test_live_start_plays_whistle() {
        let scene = scene_with(Settings::default());
        assert!(scene.phase().is_playing());
        assert!(!scene.basket().is_enabled());
        assert_eq!(
            scene.presentation().events,
            vec![PresentationEvent::Sound(SoundEffect::Whistle)]
        );
        // Ball rests centered, gravity off
        let state = scene.world().ball_state(scene.ball());
        assert_eq!(state.position, Vec2::new(200.0, 80.0));
        assert!(!state.affected_by_gravity);
    }

    #[test]
    fn test_tap_while_waiting_starts_play() {
        let mut scene = scene_with(Settings::from_variant(Variant::Solid));
        assert_eq!(*scene.phase(), GamePhase::WaitingForTap);

        // Anywhere on the board counts
        scene.touch_began(Vec2::new(10.0, 590.0));
        scene.touch_ended(Vec2::new(10.0, 590.0));
        scene.tick(SIM_DT);

        assert!(scene.phase().is_playing());
        let p = scene.presentation();
        assert_eq!(p.count(&PresentationEvent::RequestExpand), 1);
        assert_eq!(p.count(&PresentationEvent::ScoreChanged(0)), 1);
        assert_eq!(p.count(&PresentationEvent::Sound(SoundEffect::Whistle)), 1);

        // A second tap is just a touch off the ball now
        scene.touch_began(Vec2::new(10.0, 590.0));
        scene.tick(SIM_DT);
        assert_eq!(scene.presentation().count(&PresentationEvent::RequestExpand), 1);
    }

    #[test]
    fn test_touch_while_playing_refreshes_score() {
        let mut scene = scene_with(Settings::default());
        scene.presentation_mut().clear();

        // Off the ball still refreshes, and no drag starts
        scene.touch_began(Vec2::new(20.0, 300.0));
        scene.tick(SIM_DT);
        assert_eq!(scene.presentation().last_score(), Some(0));
        assert_eq!(*scene.phase(), GamePhase::playing());

        let p = ball_pos(&scene);
        scene.touch_began(p);
        scene.tick(SIM_DT);
        assert_eq!(
            scene.presentation().count(&PresentationEvent::ScoreChanged(0)),
            2
        );
    }

    #[test]
    fn test_ball_idle_until_flicked() {
        let mut scene = scene_with(Settings::default());
        let before = ball_pos(&scene);
        for _ in 0..30 {
            scene.tick(SIM_DT);
        }
        assert_eq!(ball_pos(&scene), before);
    }

    #[test]
    fn test_touch_off_ball_does_not_launch() {
        let mut scene = scene_with(Settings::default());
        scene.touch_began(Vec2::new(20.0, 300.0));
        scene.touch_ended(Vec2::new(20.0, 500.0));
        scene.tick(SIM_DT);

        let state = scene.world().ball_state(scene.ball());
        assert_eq!(state.velocity, Vec2::ZERO);
        assert!(!state.affected_by_gravity);
    }

    #[test]
    fn test_degenerate_flick_is_dropped() {
        let mut scene = scene_with(Settings::default());
        let p = ball_pos(&scene);
        scene.touch_began(p);
        scene.touch_ended(p);
        scene.tick(SIM_DT);

        let state = scene.world().ball_state(scene.ball());
        assert_eq!(state.velocity, Vec2::ZERO);
        assert!(!state.affected_by_gravity);
        assert!(scene.phase().is_playing());
        assert!(state.position.is_finite());
    }

    #[test]
    fn test_flick_launches_and_shrinks() {
        let mut scene = scene_with(Settings::default());
        flick_up(&mut scene);
        scene.tick(SIM_DT);

        let state = scene.world().ball_state(scene.ball());
        assert!(state.affected_by_gravity);
        assert!(state.velocity.y > 900.0);
        assert!(state.velocity.x.abs() < 1e-3);
        assert!(state.scale < 1.0);
    }

    #[test]
    fn test_straight_shot_scores_once_and_resets() {
        let mut settings = Settings::default();
        settings.randomize_reset_x = false;
        let mut scene = scene_with(settings);
        let rest = ball_pos(&scene);
        let apex = scene.basket().apex_y(scene.settings().apex_margin);

        flick_up(&mut scene);
        let mut engaged_at = None;
        for i in 0..600 {
            scene.tick(SIM_DT);
            if engaged_at.is_none() && scene.basket().is_enabled() {
                engaged_at = Some(i);
                // Engages only after the ball clears the apex margin
                assert!(ball_pos(&scene).y > apex);
            }
        }

        assert!(engaged_at.is_some());
        assert_eq!(scene.score(), 1);
        assert!(scene.phase().is_playing());
        assert!(!scene.session().is_game_over);
        assert!(!scene.basket().is_enabled());

        let state = scene.world().ball_state(scene.ball());
        assert_eq!(state.position, rest);
        assert_eq!(state.velocity, Vec2::ZERO);
        assert_eq!(state.angular_velocity, 0.0);
        assert_eq!(state.scale, 1.0);
        assert!(!state.affected_by_gravity);

        let p = scene.presentation();
        assert_eq!(p.count(&PresentationEvent::ScoreChanged(1)), 1);
        assert_eq!(p.count(&PresentationEvent::Sound(SoundEffect::Swish)), 1);
        assert_eq!(p.game_over_count(), 0);
    }

    #[test]
    fn test_two_made_shots_in_a_row() {
        let mut settings = Settings::default();
        settings.randomize_reset_x = false;
        let mut scene = scene_with(settings);

        for expected in 1..=2 {
            flick_up(&mut scene);
            for _ in 0..600 {
                scene.tick(SIM_DT);
            }
            assert_eq!(scene.score(), expected);
        }
        assert!(scene.phase().is_playing());
    }

    #[test]
    fn test_miss_ends_game_once() {
        let mut scene = scene_with(Settings::default());
        let start = ball_pos(&scene);
        // Flat flick to the side never reaches the hoop
        scene.touch_began(start);
        scene.touch_ended(start + Vec2::new(300.0, 10.0));

        for _ in 0..600 {
            scene.tick(SIM_DT);
        }

        assert_eq!(*scene.phase(), GamePhase::GameOver);
        assert!(scene.session().is_game_over);
        assert_eq!(scene.score(), 0);
        let p = scene.presentation();
        assert_eq!(p.game_over_count(), 1);
        assert_eq!(p.count(&PresentationEvent::Sound(SoundEffect::GameOver)), 1);
    }

    #[test]
    fn test_game_over_ignores_flicks_and_contacts() {
        let mut scene = scene_with(Settings::default());
        let start = ball_pos(&scene);
        scene.touch_ended(start);
        let ball = scene.ball();
        scene.world_mut().set_affected_by_gravity(ball, true);
        for _ in 0..300 {
            scene.tick(SIM_DT);
        }
        assert_eq!(*scene.phase(), GamePhase::GameOver);

        let (ball, sensor) = (scene.ball(), scene.basket().sensor);
        scene.handle_contact(ContactEvent::End(ball, sensor));
        scene.touch_ended(Vec2::new(100.0, 100.0));
        scene.tick(SIM_DT);

        assert_eq!(scene.score(), 0);
        assert_eq!(*scene.phase(), GamePhase::GameOver);
        assert_eq!(scene.presentation().game_over_count(), 1);
    }

    #[test]
    fn test_tap_after_game_over_starts_fresh_session() {
        let mut scene = scene_with(Settings::default());
        let ball = scene.ball();
        scene.world_mut().set_affected_by_gravity(ball, true);
        for _ in 0..300 {
            scene.tick(SIM_DT);
        }
        assert_eq!(*scene.phase(), GamePhase::GameOver);

        scene.presentation_mut().clear();
        scene.touch_began(Vec2::new(200.0, 300.0));
        scene.touch_ended(Vec2::new(200.0, 300.0));
        scene.tick(SIM_DT);

        assert!(scene.phase().is_playing());
        assert_eq!(*scene.session(), GameSession::new());
        assert_eq!(ball_pos(&scene), Vec2::new(200.0, 80.0));
        let p = scene.presentation();
        assert_eq!(p.count(&PresentationEvent::SceneReset(0)), 1);
        assert_eq!(p.count(&PresentationEvent::Sound(SoundEffect::Whistle)), 1);
    }

    #[test]
    fn test_wait_for_tap_session_restarts_waiting() {
        let mut scene = scene_with(Settings::from_variant(Variant::Solid));
        scene.touch_began(Vec2::new(5.0, 5.0));
        scene.tick(SIM_DT);
        let ball = scene.ball();
        scene.world_mut().set_affected_by_gravity(ball, true);
        for _ in 0..300 {
            scene.tick(SIM_DT);
        }
        assert_eq!(*scene.phase(), GamePhase::GameOver);

        scene.touch_began(Vec2::new(5.0, 5.0));
        scene.tick(SIM_DT);
        assert_eq!(*scene.phase(), GamePhase::WaitingForTap);
        assert!(!scene.world().ball_state(scene.ball()).affected_by_gravity);
    }

    #[test]
    fn test_on_enter_trigger_scores_straight_shot() {
        let mut settings = Settings::default();
        settings.scoring_trigger = ScoringTrigger::OnEnter;
        settings.randomize_reset_x = false;
        let mut scene = scene_with(settings);

        flick_up(&mut scene);
        for _ in 0..600 {
            scene.tick(SIM_DT);
        }
        assert_eq!(scene.score(), 1);
        assert!(scene.phase().is_playing());
    }

    #[test]
    fn test_randomized_reset_stays_on_court() {
        let mut scene = scene_with(Settings::default());
        for _ in 0..3 {
            flick_up(&mut scene);
            for _ in 0..600 {
                scene.tick(SIM_DT);
            }
            if !scene.phase().is_playing() {
                break;
            }
            let x = ball_pos(&scene).x;
            assert!((30.0..=370.0).contains(&x));
        }
        assert!(scene.score() >= 1);
    }

    #[test]
    fn test_same_seed_same_game() {
        let run = || {
            let mut scene = scene_with(Settings::default());
            flick_up(&mut scene);
            for _ in 0..600 {
                scene.tick(SIM_DT);
            }
            (scene.score(), ball_pos(&scene), scene.time_ticks())
        };
        assert_eq!(run(), run());
    }
}
