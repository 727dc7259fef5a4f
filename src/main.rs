use gryphon_acs::adapters::outbound::{init_combined_logger, FilesystemGraphSource};
use gryphon_acs::application::PathSearchService;
use gryphon_acs::domains::logger::parse_level;
use gryphon_acs::domains::path_search::{Coord, PathSearchRequest};
use gryphon_acs::Config;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: gryphon-acs <map.geojson> <source-x> <source-y> <destination-x> <destination-y>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("GRYPHON_ACS_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = Config::load(&config_path)?;

    // fast_log claims the `log` facade first; tracing then only installs its subscriber
    let logger = init_combined_logger(config.logging.file.as_deref(), parse_level(&config.logging.level));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [map, sx, sy, dx, dy] = args.as_slice() else {
        anyhow::bail!(USAGE);
    };
    let source = Coord::new(sx.parse()?, sy.parse()?);
    let destination = Coord::new(dx.parse()?, dy.parse()?);

    let graphs = Arc::new(FilesystemGraphSource::new(config.data.dir.clone()));
    info!("Loading maps from {}", graphs.base().display());
    let service = PathSearchService::new(graphs, config.search.clone(), logger)?;

    let mut request = PathSearchRequest::new(map.as_str(), source, destination);
    if let Some(seed) = config.seed {
        request = request.with_seed(seed);
    }

    let mut replies = service.search_many(vec![request]).await;
    match replies.pop() {
        Some(Ok(reply)) => {
            println!("{}", serde_json::to_string_pretty(&reply)?);
            Ok(())
        }
        Some(Err(e)) => {
            error!("Search failed: {}", e);
            Err(e.into())
        }
        None => anyhow::bail!("search produced no reply"),
    }
}
