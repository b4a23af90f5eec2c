use std::{io::Write as _, time::SystemTime};

use anstyle::{AnsiColor, Effects, Style};
use env_logger::Env;
use log::Level;

fn level_style(level: Level) -> Style {
    match level {
        Level::Error => AnsiColor::Red.on_default().effects(Effects::BOLD),
        Level::Warn => AnsiColor::Yellow.on_default(),
        Level::Info => AnsiColor::Green.on_default(),
        Level::Debug => AnsiColor::Blue.on_default(),
        Level::Trace => AnsiColor::Cyan.on_default(),
    }
}

pub fn init() {
    let subtle = AnsiColor::BrightBlack.on_default();
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(move |buf, record| {
            write!(buf, "{subtle}[{subtle:#}").expect("logging buffer should be writable");
            if let Ok(now) = jiff::Timestamp::try_from(SystemTime::now()) {
                write!(buf, "{now:.3} ").expect("logging buffer should be writable");
            } else {
                write!(buf, "timestamp_error ").expect("logging buffer should be writable");
            }
            let style = level_style(record.level());
            write!(
                buf,
                "{style}{}{style:#} {}",
                record.level(),
                record.target(),
            )
            .expect("logging buffer should be writable");
            if let Some(line) = record.line() {
                write!(buf, ":{line}").expect("logging buffer should be writable");
            }
            write!(buf, "{subtle}]{subtle:#} ").expect("logging buffer should be writable");
            writeln!(buf, "{}", record.args())
        })
        .init();
}
