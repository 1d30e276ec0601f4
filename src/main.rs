//! Hoop Shot entry point
//!
//! Runs a headless session against the bundled physics world: one made
//! shot, one miss, then a tap to start over. Pass a settings JSON path or a
//! variant name (`sensor`, `solid`) as the first argument.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;

    use glam::Vec2;
    use hoop_shot::consts::{MAX_SUBSTEPS, SIM_DT};
    use hoop_shot::sim::{PhysicsWorld, Scene, SimWorld};
    use hoop_shot::{RecordingPresentation, Settings, SettingsError, Variant};

    type DemoScene = Scene<SimWorld, RecordingPresentation>;

    /// Frame-rate independent driver around the fixed-step scene
    struct Runner {
        scene: DemoScene,
        accumulator: f32,
    }

    impl Runner {
        fn new(scene: DemoScene) -> Self {
            Self {
                scene,
                accumulator: 0.0,
            }
        }

        /// Advance by one host frame of `dt` seconds
        fn frame(&mut self, dt: f32) {
            self.accumulator += dt.min(0.1);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.scene.tick(SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Run 60 Hz frames until `done` holds or `max_frames` pass
        fn run_until(&mut self, max_frames: usize, done: impl Fn(&DemoScene) -> bool) -> bool {
            for _ in 0..max_frames {
                self.frame(1.0 / 60.0);
                if done(&self.scene) {
                    return true;
                }
            }
            false
        }

        fn flick(&mut self, delta: Vec2) {
            let start = self.scene.world().position(self.scene.ball());
            self.scene.touch_began(start);
            self.scene.touch_ended(start + delta);
        }
    }

    fn load_settings(arg: Option<&str>) -> Result<Settings, SettingsError> {
        match arg {
            None => Ok(Settings::default()),
            Some(name) => match Variant::from_str(name) {
                Some(variant) => Ok(Settings::from_variant(variant)),
                None => Settings::load(Path::new(name)),
            },
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let arg = std::env::args().nth(1);
        let mut settings = load_settings(arg.as_deref())?;
        // Straight shots are easier to follow from a fixed spot
        settings.randomize_reset_x = false;

        let world = SimWorld::court(&settings.world);
        let scene = Scene::new(world, RecordingPresentation::new(), settings)?;
        let mut runner = Runner::new(scene);
        log::info!("Starting in {}", runner.scene.phase().name());

        if !runner.scene.phase().is_playing() {
            runner.scene.touch_began(Vec2::ZERO);
            runner.frame(SIM_DT);
        }

        runner.flick(Vec2::new(0.0, 120.0));
        let scored = runner.run_until(600, |s| s.score() == 1 && !s.basket().is_enabled());
        log::info!("Straight shot scored: {scored} (score {})", runner.scene.score());

        runner.flick(Vec2::new(120.0, 20.0));
        let over = runner.run_until(600, |s| s.session().is_game_over);
        log::info!("Wide shot ended the game: {over} (score {})", runner.scene.score());

        runner.scene.touch_began(Vec2::ZERO);
        runner.frame(SIM_DT);
        log::info!(
            "After tap: {} with score {}",
            runner.scene.phase().name(),
            runner.scene.score()
        );

        for event in &runner.scene.presentation().events {
            log::debug!("Presentation event: {event:?}");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hoop Shot (native, headless) starting...");

    if let Err(err) = native::run() {
        log::error!("Demo failed: {err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web
}
