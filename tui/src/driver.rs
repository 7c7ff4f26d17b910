//! The simulation loop.

use anyhow::{Context, Result};
use lifewatch_lib::{Catalog, StabilityTracker, World, ALIVE_CHAR, DEAD_CHAR};
use log::{info, warn};
use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// How long a paused frontend waits for a key before checking again.
const PAUSED_POLL: Duration = Duration::from_millis(500);

/// Commands from the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Replaces the world with the board file.
    Load,
    /// Writes the world to the save file.
    Save,
    /// Pauses or resumes.
    Pause,
    /// Advances one generation while paused.
    Step,
    Quit,
}

/// What a frontend shows for one generation.
pub(crate) struct Frame<'a> {
    pub(crate) world: &'a World,
    /// Count of each pattern of the catalog.
    pub(crate) census: Vec<(&'a str, usize)>,
    /// The period of the cycle the world is in, if one is detected.
    pub(crate) period: Option<usize>,
    pub(crate) paused: bool,
    /// A message for the user, e.g. the result of the last command.
    pub(crate) message: Option<&'a str>,
}

impl Frame<'_> {
    /// The lines under the world: generation, cell count, census and state.
    pub(crate) fn status(&self) -> String {
        let mut str = String::new();
        writeln!(str, "Generation: {}", self.world.generation()).unwrap();
        writeln!(str, "Cells: {}", self.world.cell_count()).unwrap();
        for (name, count) in &self.census {
            writeln!(str, "{}: {}", name, count).unwrap();
        }
        if let Some(period) = self.period {
            writeln!(str, "Stable (period {})", period).unwrap();
        }
        if self.paused {
            str.push_str("Paused. Press [space] to resume, [n] for the next generation.\n");
        }
        if let Some(message) = self.message {
            writeln!(str, "{}", message).unwrap();
        }
        str
    }
}

/// Shows frames and reads commands.
pub(crate) trait Frontend {
    /// Shows a frame.
    fn render(&mut self, frame: &Frame<'_>) -> Result<()>;

    /// Waits at most `timeout` for a command.
    fn poll(&mut self, timeout: Duration) -> Result<Option<Command>>;
}

/// Where boards are loaded from and saved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Persistence {
    pub(crate) load_path: PathBuf,
    pub(crate) save_path: PathBuf,
    /// Character written for dead cells when saving.
    ///
    /// Loading reads any character other than [`ALIVE_CHAR`] as dead.
    pub(crate) dead_char: char,
}

impl Default for Persistence {
    fn default() -> Self {
        Persistence {
            load_path: PathBuf::from("board.txt"),
            save_path: PathBuf::from("save.txt"),
            dead_char: DEAD_CHAR,
        }
    }
}

impl Persistence {
    /// Reads a plain text board from `path`.
    pub(crate) fn read(path: &Path) -> Result<World> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        World::from_plaintext(&text, ALIVE_CHAR)
            .with_context(|| format!("Failed to load a board from {}", path.display()))
    }

    pub(crate) fn load(&self) -> Result<World> {
        Persistence::read(&self.load_path)
    }

    pub(crate) fn save(&self, world: &World) -> Result<()> {
        fs::write(&self.save_path, world.to_plaintext(ALIVE_CHAR, self.dead_char))
            .with_context(|| format!("Failed to write {}", self.save_path.display()))
    }
}

/// When to stop and how fast to go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Options {
    /// Time between two generations.
    pub(crate) delay: Duration,
    /// Stops at this generation.
    pub(crate) max_generations: Option<u64>,
    /// Stops when a cycle is detected.
    pub(crate) stop_when_stable: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            delay: Duration::from_millis(100),
            max_generations: None,
            stop_when_stable: true,
        }
    }
}

/// Why the simulation stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The world is in a cycle of this period.
    Stable(usize),
    /// The generation limit is reached.
    Limit,
    /// The user quit.
    Quit,
}

/// Runs a world until it is stable, reaches the generation limit, or the user quits.
pub(crate) struct Driver<F: Frontend> {
    world: World,
    tracker: StabilityTracker,
    catalog: Catalog,
    persistence: Persistence,
    options: Options,
    frontend: F,
    paused: bool,
    message: Option<String>,
}

impl<F: Frontend> Driver<F> {
    pub(crate) fn new(world: World, frontend: F) -> Self {
        Driver {
            world,
            tracker: StabilityTracker::new(),
            catalog: Catalog::still_lifes(),
            persistence: Persistence::default(),
            options: Options::default(),
            frontend,
            paused: false,
            message: None,
        }
    }

    pub(crate) fn set_persistence(mut self, persistence: Persistence) -> Self {
        self.persistence = persistence;
        self
    }

    pub(crate) fn set_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub(crate) fn into_world(self) -> World {
        self.world
    }

    #[cfg(test)]
    fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    fn frontend(&self) -> &F {
        &self.frontend
    }

    fn render(&mut self) -> Result<()> {
        let frame = Frame {
            world: &self.world,
            census: self.catalog.census(&self.world),
            period: self.tracker.period(),
            paused: self.paused,
            message: self.message.as_deref(),
        };
        self.frontend.render(&frame)
    }

    /// Applies a command. Returns `true` if the world should advance now.
    fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Load => match self.persistence.load() {
                Ok(world) => {
                    info!(
                        "Loaded a {}x{} board from {}",
                        world.columns(),
                        world.rows(),
                        self.persistence.load_path.display()
                    );
                    self.world = world;
                    self.tracker.clear();
                    self.message = Some(format!(
                        "Loaded {}",
                        self.persistence.load_path.display()
                    ));
                }
                Err(e) => {
                    warn!("{:#}", e);
                    self.message = Some(format!("{:#}", e));
                }
            },
            Command::Save => match self.persistence.save(&self.world) {
                Ok(()) => {
                    info!(
                        "Saved generation {} to {}",
                        self.world.generation(),
                        self.persistence.save_path.display()
                    );
                    self.message = Some(format!(
                        "Saved {}",
                        self.persistence.save_path.display()
                    ));
                }
                Err(e) => {
                    warn!("{:#}", e);
                    self.message = Some(format!("{:#}", e));
                }
            },
            Command::Pause => self.paused = !self.paused,
            Command::Step => return self.paused,
            Command::Quit => {}
        }
        false
    }

    /// Runs the loop. Returns why it stopped.
    pub(crate) fn run(&mut self) -> Result<Outcome> {
        loop {
            self.render()?;
            if let Some(max) = self.options.max_generations {
                if self.world.generation() >= max {
                    return Ok(Outcome::Limit);
                }
            }
            let timeout = if self.paused {
                PAUSED_POLL
            } else {
                self.options.delay
            };
            let step = match self.frontend.poll(timeout)? {
                Some(Command::Quit) => return Ok(Outcome::Quit),
                Some(command) => self.apply(command),
                None => false,
            };
            if self.paused && !step {
                continue;
            }
            self.world.advance();
            if self.tracker.observe(&self.world) && self.options.stop_when_stable {
                self.render()?;
                // `observe` only returns true with a period.
                let period = self.tracker.period().unwrap_or(1);
                info!(
                    "Stable at generation {} with period {}",
                    self.world.generation(),
                    period
                );
                return Ok(Outcome::Stable(period));
            }
        }
    }
}

/// A frontend printing to stdout and reading no commands.
pub(crate) struct Headless {
    /// Prints every frame instead of none.
    pub(crate) verbose: bool,
}

impl Frontend for Headless {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        if self.verbose {
            print!("{}{}", frame.world, frame.status());
            println!();
        }
        Ok(())
    }

    fn poll(&mut self, _timeout: Duration) -> Result<Option<Command>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a list of commands, one per poll, and records the frames.
    #[derive(Default)]
    struct Scripted {
        commands: VecDeque<Option<Command>>,
        generations: Vec<u64>,
        messages: Vec<String>,
    }

    impl Scripted {
        fn new<I: IntoIterator<Item = Option<Command>>>(commands: I) -> Self {
            Scripted {
                commands: commands.into_iter().collect(),
                ..Scripted::default()
            }
        }
    }

    impl Frontend for Scripted {
        fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
            self.generations.push(frame.world.generation());
            if let Some(message) = frame.message {
                if self.messages.last().map(String::as_str) != Some(message) {
                    self.messages.push(message.to_string());
                }
            }
            Ok(())
        }

        fn poll(&mut self, _timeout: Duration) -> Result<Option<Command>> {
            Ok(self.commands.pop_front().flatten())
        }
    }

    fn blinker() -> World {
        World::from_plaintext(".....\n.....\n.***.\n.....\n.....\n", '*').unwrap()
    }

    fn fast() -> Options {
        Options {
            delay: Duration::ZERO,
            ..Options::default()
        }
    }

    #[test]
    fn stops_when_stable() -> Result<()> {
        let mut driver = Driver::new(blinker(), Scripted::default()).set_options(fast());
        assert_eq!(driver.run()?, Outcome::Stable(2));
        assert_eq!(driver.world().generation(), 3);
        Ok(())
    }

    #[test]
    fn stops_at_limit() -> Result<()> {
        let options = Options {
            max_generations: Some(10),
            stop_when_stable: false,
            ..fast()
        };
        let mut driver = Driver::new(blinker(), Scripted::default()).set_options(options);
        assert_eq!(driver.run()?, Outcome::Limit);
        assert_eq!(driver.world().generation(), 10);
        assert_eq!(driver.frontend().generations, (0..=10).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn pause_and_step() -> Result<()> {
        let commands = [
            Some(Command::Pause),
            None,
            Some(Command::Step),
            None,
            Some(Command::Quit),
        ];
        let mut driver = Driver::new(blinker(), Scripted::new(commands)).set_options(fast());
        assert_eq!(driver.run()?, Outcome::Quit);
        assert_eq!(driver.world().generation(), 1);
        Ok(())
    }

    #[test]
    fn save_then_load() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("lifewatch-driver-{}", std::process::id()));
        fs::create_dir_all(&dir)?;
        let path = dir.join("board.txt");
        let persistence = Persistence {
            load_path: path.clone(),
            save_path: path,
            ..Persistence::default()
        };
        let commands = [Some(Command::Save), Some(Command::Load), Some(Command::Quit)];
        let options = Options {
            stop_when_stable: false,
            ..fast()
        };
        let mut driver = Driver::new(blinker(), Scripted::new(commands))
            .set_persistence(persistence)
            .set_options(options);
        assert_eq!(driver.run()?, Outcome::Quit);
        // Saved at generation 0, then loaded back and advanced once.
        let mut expected = blinker();
        expected.advance();
        assert_eq!(driver.world(), &expected);
        assert_eq!(driver.frontend().messages.len(), 2);
        fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[test]
    fn save_with_blank_dead_cells() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("lifewatch-blank-{}", std::process::id()));
        fs::create_dir_all(&dir)?;
        let path = dir.join("save.txt");
        let persistence = Persistence {
            load_path: path.clone(),
            save_path: path.clone(),
            dead_char: ' ',
        };
        persistence.save(&blinker())?;
        assert_eq!(
            fs::read_to_string(&path)?,
            "     \n     \n *** \n     \n     \n"
        );
        assert_eq!(persistence.load()?, blinker());
        fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[test]
    fn missing_board_is_reported() -> Result<()> {
        let persistence = Persistence {
            load_path: PathBuf::from("/nonexistent/lifewatch/board.txt"),
            ..Persistence::default()
        };
        let commands = [Some(Command::Load), Some(Command::Quit)];
        let mut driver = Driver::new(blinker(), Scripted::new(commands))
            .set_persistence(persistence)
            .set_options(fast());
        assert_eq!(driver.run()?, Outcome::Quit);
        assert!(driver.frontend().messages[0].starts_with("Failed to read"));
        Ok(())
    }

    #[test]
    fn status_lines() {
        let world = blinker();
        let frame = Frame {
            world: &world,
            census: vec![("Block", 0)],
            period: Some(2),
            paused: false,
            message: None,
        };
        assert_eq!(
            frame.status(),
            "Generation: 0\nCells: 3\nBlock: 0\nStable (period 2)\n"
        );
    }
}
