//! soundy - play the computer keyboard like a piano
//!
//! Run with: cargo run -- [bell|harmonica|saw]
//!
//! Logs go to stderr; redirect them (`2>soundy.log`) to keep the UI clean.

mod app;
mod ui;

use app::Soundy;
use soundy::instruments::InstrumentKind;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let instrument = match std::env::args().nth(1) {
        Some(name) => name.parse::<InstrumentKind>()?,
        None => InstrumentKind::Bell,
    };

    Soundy::new().instrument(instrument).run()
}
