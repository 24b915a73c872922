//! Chrono-Bird entry point
//!
//! Native: a headless runner that lets the autopilot play a few levels and
//! prints how each attempt went. The web build is driven from JS through
//! `platform::web::WebGame`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::{Context, Result, bail};

    use chrono_bird::consts::FRAME_DT;
    use chrono_bird::persistence::{JsonFileStore, MemoryStore};
    use chrono_bird::sim::autopilot::should_flap;
    use chrono_bird::sim::{NoEvents, Outcome, TickStatus, run_until_stopped};
    use chrono_bird::{Campaign, Progress, Screen, Tuning, platform};

    /// Five minutes of frames at 60 Hz
    const MAX_FRAMES_PER_ATTEMPT: u32 = 60 * 60 * 5;

    #[derive(Debug)]
    struct Args {
        level: Option<u32>,
        attempts: u32,
        seed: Option<u64>,
        save: Option<String>,
        tuning: Option<String>,
    }

    fn parse_args() -> Result<Args> {
        let mut args = Args {
            level: None,
            attempts: 5,
            seed: None,
            save: None,
            tuning: None,
        };

        let mut iter = std::env::args().skip(1);
        while let Some(flag) = iter.next() {
            let mut value = || iter.next().with_context(|| format!("{flag} needs a value"));
            match flag.as_str() {
                "--level" => args.level = Some(value()?.parse().context("--level")?),
                "--attempts" => args.attempts = value()?.parse().context("--attempts")?,
                "--seed" => args.seed = Some(value()?.parse().context("--seed")?),
                "--save" => args.save = Some(value()?),
                "--tuning" => args.tuning = Some(value()?),
                "-h" | "--help" => {
                    println!(
                        "usage: chrono-bird [--level N] [--attempts N] [--seed N] [--save FILE] [--tuning FILE]"
                    );
                    std::process::exit(0);
                }
                other => bail!("unknown argument: {other}"),
            }
        }
        Ok(args)
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        log::info!("Chrono-Bird (native) starting...");

        let args = parse_args()?;
        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path).with_context(|| format!("loading tuning from {path}"))?,
            None => Tuning::default(),
        };

        let mut campaign = match (&args.save, args.level) {
            (Some(path), _) => Campaign::new(tuning, JsonFileStore::new(path)),
            (None, level) => Campaign::new(
                tuning,
                MemoryStore::with_progress(level.map(Progress::new)),
            ),
        };

        let mut seed = args.seed.unwrap_or_else(platform::clock_seed);
        campaign.start();

        for attempt in 1..=args.attempts {
            let mut session = campaign.session(seed, NoEvents);
            session.start_now();
            let tuning = session.tuning().clone();

            let summary = run_until_stopped(&mut session, FRAME_DT, MAX_FRAMES_PER_ATTEMPT, |render| {
                should_flap(render, &tuning)
            });
            let render = &summary.last.render;
            println!(
                "attempt {attempt}: level {} ({}) -> {:?} after {} ticks, {}/{} obstacles",
                render.level,
                render.era,
                summary.last.status,
                render.tick_count,
                render.score,
                render.obstacle_count
            );

            match summary.last.status {
                TickStatus::GameOver => campaign.finish(Outcome::GameOver),
                TickStatus::LevelComplete => campaign.finish(Outcome::LevelComplete),
                TickStatus::Continue | TickStatus::Cancelled => {
                    session.cancel();
                    println!("attempt {attempt}: gave up after {} frames", summary.frames);
                }
            }

            match campaign.screen() {
                Screen::LevelComplete => {
                    campaign.next_level();
                }
                Screen::GameOver => {
                    campaign.retry_from_checkpoint();
                }
                Screen::MainMenu | Screen::Playing => {}
            }
            seed = seed.wrapping_add(1);
        }

        println!("highest level reached: {}", campaign.highest_level());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
