use std::{path::PathBuf, thread};

use clap::Parser;
use log::info;

use mazestep::{
    display, logging,
    settings::{LogLevel, Settings},
    speed::Speed,
    Error, MazeSession, Phase,
};

#[derive(Parser, Debug)]
#[clap(version, about, name = "mazestep")]
struct Args {
    #[clap(short, long, help = "Maze width in cells")]
    cols: Option<usize>,
    #[clap(short, long, help = "Maze height in cells")]
    rows: Option<usize>,
    #[clap(short, long, help = "Seed for reproducible mazes")]
    seed: Option<u64>,
    #[clap(long, action, help = "Only generate the maze, don't solve it")]
    no_solve: bool,
    #[clap(long, action, help = "Show dead ends found while solving")]
    dead_ends: bool,
    #[clap(short, long, action, help = "Draw every frame while building and solving")]
    animate: bool,
    #[clap(long, help = "Animation speed in steps per second")]
    speed: Option<u32>,
    #[clap(long, help = "Use this settings file instead of the default one")]
    config: Option<PathBuf>,
    #[clap(short, long, action, help = "Log algorithm progress")]
    verbose: bool,
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, action, help = "Show config in debug format and quit")]
    debug_config: bool,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    let settings_path = args.config.clone().unwrap_or_else(Settings::default_path);

    if args.reset_config {
        return Settings::reset_config(settings_path);
    }

    if args.show_config_path {
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    let settings = Settings::load(settings_path)?;

    if args.debug_config {
        println!("{:#?}", settings);
        return Ok(());
    }

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        settings.get_log_level()
    };
    logging::init(level.into());

    let (default_cols, default_rows) = settings.get_size();
    let cols = args.cols.unwrap_or(default_cols);
    let rows = args.rows.unwrap_or(default_rows);
    let mut session = MazeSession::new(cols, rows, args.seed.or(settings.get_seed()))?;

    let speed = args.speed.map(Speed::new).unwrap_or(settings.get_speed());
    if args.animate {
        info!("animating at {} steps per second", speed.rate());
        animate(&mut session, speed, args.dead_ends)?;
        if !args.no_solve {
            session.start_solve()?;
            animate(&mut session, speed, args.dead_ends)?;
        }
        println!("seed: {}", session.seed());
        return Ok(());
    }

    let build_steps = session.skip()?;
    info!("built {}x{} maze in {} steps", cols, rows, build_steps);

    if args.no_solve {
        println!(
            "{}",
            display::render_text(session.grid(), &[], None, false)
        );
    } else {
        session.start_solve()?;
        let solve_steps = session.skip()?;
        let route = session.solution().unwrap_or_default();
        info!(
            "solved in {} steps, route of {} cells",
            solve_steps,
            route.len()
        );

        println!(
            "{}",
            display::render_text(session.grid(), &route, None, args.dead_ends)
        );
    }

    println!("seed: {}", session.seed());
    Ok(())
}

/// Redraws the active phase every tick until it finishes.
fn animate(session: &mut MazeSession, speed: Speed, show_blocked: bool) -> Result<(), Error> {
    loop {
        let done = session.tick(speed)?.done;

        let (current, trail) = session.cursor();
        let frame = display::render_text(session.grid(), trail, Some(current), show_blocked);
        let status = match session.phase() {
            Phase::Building => format!(
                "building {:.0}%",
                session.builder().progress().percent() * 100.0
            ),
            Phase::Built => "built".to_string(),
            Phase::Solving => format!("solving, trail of {} cells", trail.len()),
            Phase::Solved => "solved".to_string(),
        };
        println!("\x1B[2J\x1B[H{}{}", frame, status);

        if done {
            return Ok(());
        }
        thread::sleep(speed.tick_interval());
    }
}
