use std::env;

use catalog_scraper::{HttpSource, Pipeline, ScrapeConfig};
use tokio::runtime;

fn main() -> anyhow::Result<()> {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "catalog_scraper=info");
    }
    env_logger::init();

    let config = ScrapeConfig::default();
    let source = HttpSource::new(&config.user_agent);
    let pipeline = Pipeline::new(config, source)?;

    let rt = runtime::Builder::new_current_thread().enable_all().build()?;
    rt.block_on(pipeline.run())
}
