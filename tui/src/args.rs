//! Parsing command-line arguments.

use crate::{
    driver::{Options, Persistence},
    research::Sweep,
    settings,
};
use anyhow::Result;
use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use lifewatch_lib::{Config, DEAD_CHAR};
use log::LevelFilter;
use std::{path::PathBuf, time::Duration};

fn density(s: &str) -> Result<f64, String> {
    let d: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if (0.0..=1.0).contains(&d) {
        Ok(d)
    } else {
        Err(String::from("density must be between 0 and 1"))
    }
}

fn positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err(String::from("must be a positive integer")),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn single_char(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(String::from("must be a single character")),
    }
}

/// Arguments describing the initial random world, shared by all subcommands.
fn world_args() -> [Arg; 6] {
    [
        Arg::new("SETTINGS")
            .help("Settings file (.json, .yaml or .toml)")
            .long_help(
                "Settings file (.json, .yaml or .toml)\n\
                 It may contain `width`, `height`, `cell_size`, `live_density` and `seed`. \
                 Missing fields take default values, and the options below \
                 override the file.",
            )
            .short('c')
            .long("settings")
            .value_parser(value_parser!(PathBuf)),
        Arg::new("WIDTH")
            .help("Number of columns [default: 100]")
            .short('x')
            .long("width")
            .value_parser(positive),
        Arg::new("HEIGHT")
            .help("Number of rows [default: 20]")
            .short('y')
            .long("height")
            .value_parser(positive),
        Arg::new("CELLSIZE")
            .help("Size of a cell on the screen [default: 1]")
            .long("cell-size")
            .value_parser(positive),
        Arg::new("DENSITY")
            .help("Probability for a cell to be alive at first [default: 0.5]")
            .short('d')
            .long("density")
            .value_parser(density),
        Arg::new("SEED")
            .help("Seed of the random number generator")
            .long_help(
                "Seed of the random number generator\n\
                 Without a seed, every run starts from a different world.",
            )
            .short('s')
            .long("seed")
            .value_parser(value_parser!(u64)),
    ]
}

fn app() -> Command {
    let run = Command::new("run")
        .about("Runs a world until it is stable")
        .args(world_args())
        .arg(
            Arg::new("BOARD")
                .help("Starts from a plain text board instead of a random world")
                .long_help(
                    "Starts from a plain text board instead of a random world\n\
                     `*` is a living cell; any other character is a dead cell. \
                     Lines are truncated to the shortest one.",
                )
                .short('b')
                .long("board")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("LOAD")
                .help("Board file loaded by [l]")
                .long("load")
                .default_value("board.txt")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("SAVE")
                .help("File written by [s]")
                .long("save")
                .default_value("save.txt")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("DEADCHAR")
                .help("Character for dead cells in saved boards")
                .long_help(
                    "Character for dead cells in saved boards\n\
                     Boards are always loaded with `*` as the only living cell, \
                     so any other character works, including a space.",
                )
                .long("dead-char")
                .default_value(".")
                .value_parser(single_char),
        )
        .arg(
            Arg::new("DELAY")
                .help("Milliseconds between two generations")
                .long("delay")
                .default_value("100")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("MAX")
                .help("Stops at this generation")
                .long_help(
                    "Stops at this generation\n\
                     If this value is set to 0, it means there is no limitation.",
                )
                .short('m')
                .long("max")
                .default_value("0")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("FRAMES")
                .help("Prints every generation when running without the terminal UI")
                .short('p')
                .long("print-frames")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("KEEPGOING")
                .help("Keeps running after a cycle is detected")
                .long("keep-going")
                .action(ArgAction::SetTrue),
        );

    #[cfg(feature = "tui")]
    let run = run.arg(
        Arg::new("NOTUI")
            .help("Runs without the terminal UI, printing only the final world")
            .short('n')
            .long("no-tui")
            .action(ArgAction::SetTrue),
    );

    let research = Command::new("research")
        .about("Sweeps the initial density, printing one JSON line per run")
        .args(world_args())
        .arg(
            Arg::new("FROM")
                .help("Lowest density")
                .long("from")
                .default_value("0.1")
                .value_parser(density),
        )
        .arg(
            Arg::new("TO")
                .help("Highest density")
                .long("to")
                .default_value("0.9")
                .value_parser(density),
        )
        .arg(
            Arg::new("STEP")
                .help("Density step")
                .long("step")
                .default_value("0.1")
                .value_parser(density),
        )
        .arg(
            Arg::new("TRIALS")
                .help("Runs per density")
                .short('t')
                .long("trials")
                .default_value("3")
                .value_parser(positive),
        )
        .arg(
            Arg::new("MAX")
                .help("Generation limit of each run")
                .short('m')
                .long("max")
                .default_value("1000")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("SERIES")
                .help("Records the population at every generation")
                .long("series")
                .action(ArgAction::SetTrue),
        );

    command!()
        .long_about(
            "Conway's Game of Life on a torus\n\
             \n\
             The world wraps around at its edges. At every generation the program \
             counts the small still lifes (block, beehive, loaf, boat, ship and tub) \
             and stops once the world repeats one of its last four states.\n\
             \n\
             Boards are plain text: `*` is a living cell, `.` a dead cell.",
        )
        .arg(
            Arg::new("VERBOSE")
                .help("Logs more; repeat for even more")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(run)
        .subcommand(research)
}

/// How to start the world in `run`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Start {
    Random(Config),
    Board(PathBuf),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Mode {
    Run {
        start: Start,
        persistence: Persistence,
        options: Options,
        no_tui: bool,
        print_frames: bool,
    },
    Research {
        config: Config,
        sweep: Sweep,
    },
}

/// A struct to store the parse results.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Args {
    pub(crate) log_level: LevelFilter,
    pub(crate) mode: Mode,
}

/// Reads the settings file if any, then applies the options on top of it.
fn config(matches: &ArgMatches) -> Result<Config> {
    let mut config = match matches.get_one::<PathBuf>("SETTINGS") {
        Some(path) => settings::load(path)?,
        None => Config::default(),
    };
    if let Some(&width) = matches.get_one::<usize>("WIDTH") {
        config.width = width;
    }
    if let Some(&height) = matches.get_one::<usize>("HEIGHT") {
        config.height = height;
    }
    if let Some(&cell_size) = matches.get_one::<usize>("CELLSIZE") {
        config.cell_size = cell_size;
    }
    if let Some(&live_density) = matches.get_one::<f64>("DENSITY") {
        config.live_density = live_density;
    }
    if let Some(&seed) = matches.get_one::<u64>("SEED") {
        config.seed = Some(seed);
    }
    config.validate()?;
    Ok(config)
}

fn path(matches: &ArgMatches, id: &str) -> PathBuf {
    matches.get_one::<PathBuf>(id).cloned().unwrap_or_default()
}

impl Args {
    /// Parses the command-line arguments.
    ///
    /// Exits with a usage message if they are malformed.
    pub(crate) fn parse() -> Result<Self> {
        let matches = app().try_get_matches().unwrap_or_else(|e| e.exit());
        Args::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let log_level = match matches.get_count("VERBOSE") {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        let mode = match matches.subcommand() {
            Some(("research", sub)) => Mode::Research {
                config: config(sub)?,
                sweep: Sweep {
                    from: sub.get_one::<f64>("FROM").copied().unwrap_or(0.1),
                    to: sub.get_one::<f64>("TO").copied().unwrap_or(0.9),
                    step: sub.get_one::<f64>("STEP").copied().unwrap_or(0.1),
                    trials: sub.get_one::<usize>("TRIALS").copied().unwrap_or(3),
                    max_generations: sub.get_one::<u64>("MAX").copied().unwrap_or(1000),
                    series: sub.get_flag("SERIES"),
                },
            },
            Some((_, sub)) => {
                let start = match sub.get_one::<PathBuf>("BOARD") {
                    Some(board) => Start::Board(board.clone()),
                    None => Start::Random(config(sub)?),
                };
                let max = sub.get_one::<u64>("MAX").copied().unwrap_or(0);
                #[cfg(feature = "tui")]
                let no_tui = sub.get_flag("NOTUI");
                #[cfg(not(feature = "tui"))]
                let no_tui = true;
                Mode::Run {
                    start,
                    persistence: Persistence {
                        load_path: path(sub, "LOAD"),
                        save_path: path(sub, "SAVE"),
                        dead_char: sub.get_one::<char>("DEADCHAR").copied().unwrap_or(DEAD_CHAR),
                    },
                    options: Options {
                        delay: Duration::from_millis(
                            sub.get_one::<u64>("DELAY").copied().unwrap_or(100),
                        ),
                        max_generations: if max == 0 { None } else { Some(max) },
                        stop_when_stable: !sub.get_flag("KEEPGOING"),
                    },
                    no_tui,
                    print_frames: sub.get_flag("FRAMES"),
                }
            }
            None => unreachable!("a subcommand is required"),
        };
        Ok(Args { log_level, mode })
    }
}
