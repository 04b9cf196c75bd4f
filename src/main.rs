use std::io;
use std::process::ExitCode;

use dotenvy::dotenv;
use laundry_orders::Config;

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let result = Config::from_env().and_then(|config| {
        log::debug!("configuration: {:?}", config);
        laundry_orders::run(&config, io::stdin().lock(), io::stdout())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
