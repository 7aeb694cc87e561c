//! Entry point for the pay calculator binary.
//!
//! Running this binary starts an HTTP server exposing the salary
//! calculation API.  The bind address and default DA rate are taken
//! from `PAYCALC_BIND_ADDR` and `PAYCALC_DEFAULT_DA_PERCENT`; log
//! verbosity follows `RUST_LOG` (default `info`).

use paycalc::config::Config;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(2);
        }
    };
    if let Err(err) = paycalc::api::serve(config).await {
        log::error!("Error running server: {err:#}");
        std::process::exit(1);
    }
}
