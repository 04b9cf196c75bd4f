pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;

use std::io::{BufRead, Write};

use application::order_store::OrderStore;
use domain::ports::{Clock, KeyValueStore};
use handlers::orders::OrderForm;
use infrastructure::clock::SystemClock;
use infrastructure::file_storage::FileStorage;
use infrastructure::memory_storage::MemoryStorage;

pub use config::{Config, StorageBackend};
pub use errors::AppError;

/// Load the store for `config` and run the order form until the input ends.
pub fn run<R: BufRead, W: Write>(config: &Config, input: R, output: W) -> Result<(), AppError> {
    match config.storage {
        StorageBackend::File => {
            log::info!("using order file under {}", config.data_dir.display());
            run_with(config, FileStorage::new(&config.data_dir), SystemClock, input, output)
        }
        StorageBackend::Memory => {
            log::warn!("using in-memory storage, orders will not be kept");
            run_with(config, MemoryStorage::new(), SystemClock, input, output)
        }
    }
}

pub fn run_with<S, C, R, W>(
    config: &Config,
    storage: S,
    clock: C,
    input: R,
    output: W,
) -> Result<(), AppError>
where
    S: KeyValueStore,
    C: Clock,
    R: BufRead,
    W: Write,
{
    let mut store = OrderStore::new(storage, clock)
        .with_key(config.storage_key.as_str())
        .with_date_format(config.date_format.as_str());
    store.load()?;

    OrderForm::new(&mut store, config.currency.as_str(), input, output).run()
}
