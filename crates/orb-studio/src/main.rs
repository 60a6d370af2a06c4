use anyhow::Result;

use orb_engine::config::Config;
use orb_engine::device::GpuInit;
use orb_engine::experience::Experience;
use orb_engine::logging::{init_logging, LoggingConfig};
use orb_engine::window::{LogicalSize, Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = Config::from_env(std::env::args());
    log::info!("orb starting (debug: {})", config.debug);

    let runtime = RuntimeConfig {
        initial_size: LogicalSize::new(config.width as f64, config.height as f64),
        ..RuntimeConfig::default()
    };

    Runtime::run(runtime, GpuInit::default(), move |window| {
        Experience::for_window(config, window)
    })
}
