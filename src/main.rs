//! Dino Dash entry point
//!
//! Headless driver: loads a level, runs the fixed-step loop at a simulated
//! render rate and reports the outcome. Drawing and audio belong to separate
//! presenters that read the same `Snapshot`.
//!
//! ```text
//! dino-dash [level1|level2|PATH] [--config FILE] [--fps N] [--autopilot] [--json]
//! ```

mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, bail};

    use dino_dash::consts::*;
    use dino_dash::level::LevelScript;
    use dino_dash::settings::{LevelPreset, RunConfig};
    use dino_dash::sim::{Locomotion, ObstacleKind, Run, RunEvent, RunPhase};

    /// Upper bound on simulated ticks so a run that never ends still exits
    const MAX_TICKS: u64 = 60 * 60 * 10;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Options {
        pub level: String,
        pub config: Option<PathBuf>,
        pub fps: f32,
        pub autopilot: bool,
        pub json: bool,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                level: LevelPreset::Level1.as_str().to_owned(),
                config: None,
                fps: SIM_HZ as f32,
                autopilot: false,
                json: false,
            }
        }
    }

    pub fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Options> {
        let mut options = Options::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--autopilot" => options.autopilot = true,
                "--json" => options.json = true,
                "--config" => {
                    let path = args.next().context("--config needs a file")?;
                    options.config = Some(PathBuf::from(path));
                }
                "--fps" => {
                    let fps = args.next().context("--fps needs a number")?;
                    options.fps = fps.parse().with_context(|| format!("invalid --fps '{fps}'"))?;
                    if !options.fps.is_finite() || options.fps <= 0.0 {
                        bail!("--fps must be positive");
                    }
                }
                flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
                level => options.level = level.to_owned(),
            }
        }
        Ok(options)
    }

    /// Fixed-step accumulator: converts render frame time into whole sim ticks
    #[derive(Debug, Default)]
    pub struct FrameClock {
        accumulator: f32,
    }

    impl FrameClock {
        /// Number of ticks to run for a frame of `dt` seconds
        pub fn advance(&mut self, dt: f32) -> u32 {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            // Drop backlog past the substep cap rather than spiral
            if substeps == MAX_SUBSTEPS {
                self.accumulator = self.accumulator.min(SIM_DT);
            }
            substeps
        }

        /// Fraction of a tick left over, for render interpolation
        pub fn alpha(&self) -> f32 {
            self.accumulator / SIM_DT
        }
    }

    /// Demo mode: decide whether the jump button should be held this tick
    pub fn autopilot(run: &Run) -> bool {
        let player = run.player.rect();
        let speed = run.config.world_speed;

        let threats = run.obstacles.iter().filter(|o| match o.kind() {
            ObstacleKind::Solid => o.rect.right() >= player.left(),
            ObstacleKind::TimedHazard => o.armed() == Some(false),
            ObstacleKind::Platform => false,
        });

        match run.player.locomotion() {
            Locomotion::Jumper => threats
                .filter(|o| o.kind() == ObstacleKind::Solid)
                .any(|o| {
                    let gap = o.rect.left() - player.right();
                    gap >= 0.0 && gap <= speed * 8.0 && o.rect.bottom() > player.top()
                }),
            Locomotion::Floater => {
                let middle = run.config.ground_y() / 2.0;
                // Head away from whichever half the nearest threat occupies
                threats
                    .filter(|o| o.rect.left() - player.right() <= speed * 20.0)
                    .min_by(|a, b| a.rect.left().total_cmp(&b.rect.left()))
                    .map(|o| (o.rect.top() + o.rect.bottom()) / 2.0 > middle)
                    .unwrap_or(false)
            }
        }
    }

    fn load(options: &Options) -> anyhow::Result<Run> {
        let (mut config, path) = match LevelPreset::from_str(&options.level) {
            Some(preset) => (preset.config(), PathBuf::from(preset.script_path())),
            None => (RunConfig::default(), PathBuf::from(&options.level)),
        };
        // File fields layer over the preset's
        if let Some(config_path) = &options.config {
            config = config.load_over(config_path)?;
        }

        let script = LevelScript::load_or_empty(&path);
        if let Some(track) = &script.track {
            log::info!("Level track: {track}");
        }
        Ok(Run::new(config, script))
    }

    pub fn run(options: Options) -> anyhow::Result<()> {
        let mut run = load(&options)?;
        let mut clock = FrameClock::default();
        let frame_dt = 1.0 / options.fps;
        let mut held = false;

        while !run.phase.is_finished() && run.time_ticks < MAX_TICKS {
            for _ in 0..clock.advance(frame_dt) {
                if options.autopilot && run.phase == RunPhase::Running {
                    let want = autopilot(&run);
                    if want && !held {
                        run.jump_pressed();
                    } else if !want && held {
                        run.jump_released();
                    }
                    held = want;
                }
                run.tick();
            }

            for event in run.drain_events() {
                match event {
                    RunEvent::Spawned { .. } => {}
                    RunEvent::Hit { id, kind } => {
                        log::info!("Crashed into {} #{id}", kind.as_str())
                    }
                    RunEvent::GameOver { score } => log::info!("GAME OVER - score {score}"),
                    RunEvent::LevelComplete { score } => {
                        log::info!("LEVEL COMPLETE - score {score}")
                    }
                }
            }
        }

        if !run.phase.is_finished() {
            log::warn!("Stopped after {} ticks without finishing", run.time_ticks);
        }

        let snapshot = run.snapshot();
        if options.json {
            println!("{}", snapshot.to_json()?);
        } else {
            println!(
                "{:?}: score {}, completion {:.1}%",
                snapshot.phase, snapshot.score, snapshot.completion
            );
        }
        Ok(())
    }

}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Dino Dash (headless) starting...");

    let result = headless::parse_args(std::env::args().skip(1)).and_then(headless::run);
    if let Err(err) = result {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
