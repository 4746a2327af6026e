mod args;
mod charts;
mod config;
mod entry;
mod error;
mod fetch;
mod metrics;
mod system;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
