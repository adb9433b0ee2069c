use std::io;

use env_logger::Env;
use jiff::Zoned;
use privat_eur_usd::{App, Error, parse_args};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let days = match parse_args(std::env::args_os()) {
        Ok(days) => days,
        Err(Error::Clap(e)) => e.exit(),
        Err(e) => {
            println!("{e}");
            return;
        }
    };

    let app: App = App::default();
    let today = Zoned::now().date();
    if let Err(e) = app.run(days, today, &mut io::stdout().lock()) {
        log::error!("failed to write output: {e}");
    }
}
