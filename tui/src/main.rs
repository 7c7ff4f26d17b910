mod args;
mod driver;
mod research;
mod settings;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use args::{Args, Mode, Start};
use driver::{Driver, Frontend, Headless, Outcome, Persistence};
use lifewatch_lib::{Catalog, World};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::io::{self, Write};

fn main() -> Result<()> {
    let args = Args::parse()?;
    let interactive = matches!(args.mode, Mode::Run { no_tui: false, .. });
    // The terminal UI owns the screen; logs would only garble it.
    let log_level = if interactive {
        LevelFilter::Off
    } else {
        args.log_level
    };
    SimpleLogger::new().with_level(log_level).init()?;
    info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match args.mode {
        Mode::Run {
            start,
            persistence,
            options,
            no_tui,
            print_frames,
        } => {
            let world = match start {
                Start::Random(config) => config.world()?,
                Start::Board(path) => Persistence::read(&path)?,
            };
            if no_tui {
                let frontend = Headless {
                    verbose: print_frames,
                };
                run(world, frontend, persistence, options)
            } else {
                #[cfg(feature = "tui")]
                {
                    run(world, tui::Terminal::new()?, persistence, options)
                }
                #[cfg(not(feature = "tui"))]
                {
                    unreachable!("--no-tui is implied without the tui feature")
                }
            }
        }
        Mode::Research { config, sweep } => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            sweep.run(&config, |record| {
                serde_json::to_writer(&mut out, record)?;
                writeln!(out)?;
                Ok(())
            })
        }
    }
}

/// Runs the driver, then prints the last world and why it stopped.
fn run<F: Frontend>(
    world: World,
    frontend: F,
    persistence: Persistence,
    options: driver::Options,
) -> Result<()> {
    let mut driver = Driver::new(world, frontend)
        .set_persistence(persistence)
        .set_options(options);
    let outcome = driver.run()?;
    // Drops the frontend, which restores the terminal.
    let world = driver.into_world();

    print!("{}", world);
    for (name, count) in Catalog::still_lifes().census(&world) {
        println!("{}: {}", name, count);
    }
    match outcome {
        Outcome::Stable(period) => println!(
            "Stable at generation {} (period {}), {} cells",
            world.generation(),
            period,
            world.cell_count()
        ),
        Outcome::Limit => println!(
            "Stopped at generation {}, {} cells",
            world.generation(),
            world.cell_count()
        ),
        Outcome::Quit => println!("Quit at generation {}", world.generation()),
    }
    Ok(())
}
