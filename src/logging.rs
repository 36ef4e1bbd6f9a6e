//! Console logger for the simulator.
//!
//! The library itself only talks to the `log` facade; this installs a
//! `fern` dispatcher with coloured level tags.  Generic FSM engine
//! transitions are chatty, so they need one more `-v` than everything else.

use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

fn level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn setup_logger(verbosity: u8) -> Result<(), fern::InitError> {
    let colors_line = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Cyan)
        .debug(Color::Green)
        .trace(Color::Magenta);

    fern::Dispatch::new()
        .level(level(verbosity))
        .level_for("lockgame::fsm", level(verbosity.saturating_sub(1)))
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{color_line}[{target}:{level}] {message}\x1B[0m",
                color_line = format_args!(
                    "\x1B[{}m",
                    colors_line.get_color(&record.level()).to_fg_str()
                ),
                target = record.target(),
                level = record.level(),
                message = message
            ));
        })
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}
