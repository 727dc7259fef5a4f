// Path Search Service - runs colony searches against maps from a GraphSource
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::common::{ApplicationError, ApplicationResult, DomainError};
use crate::domains::logger::DynLogger;
use crate::domains::path_search::{
    AcsConfig, AntColonySearch, Coord, GraphSource, PathOutcome, PathSearchRequest, SearchReport,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSearchReply {
    pub request_id: String,
    pub graph: String,
    pub report: SearchReport<Coord>,
    pub elapsed_ms: u64,
    pub completed_at: DateTime<Utc>,
}

pub struct PathSearchService<S: GraphSource> {
    source: Arc<S>,
    search: AntColonySearch,
    logger: DynLogger,
}

impl<S: GraphSource + 'static> PathSearchService<S> {
    pub fn new(source: Arc<S>, config: AcsConfig, logger: DynLogger) -> ApplicationResult<Self> {
        let search = AntColonySearch::new(config).map_err(|e| DomainError::Search(e.into()))?;
        Ok(Self { source, search, logger })
    }

    pub fn config(&self) -> &AcsConfig {
        self.search.config()
    }

    /// Run one request on the calling thread.
    pub fn search(&self, request: &PathSearchRequest) -> ApplicationResult<PathSearchReply> {
        execute(self.source.as_ref(), &self.search, &self.logger, request)
    }

    /// Run independent requests concurrently on the blocking pool. Each
    /// request loads its own graph, so colonies never share pheromone state.
    /// Replies come back in request order.
    pub async fn search_many(
        &self,
        requests: Vec<PathSearchRequest>,
    ) -> Vec<ApplicationResult<PathSearchReply>> {
        let handles: Vec<_> = requests
            .into_iter()
            .map(|request| {
                let source = Arc::clone(&self.source);
                let search = self.search.clone();
                let logger = self.logger.clone();
                tokio::task::spawn_blocking(move || execute(source.as_ref(), &search, &logger, &request))
            })
            .collect();

        let mut replies = Vec::with_capacity(handles.len());
        for handle in handles {
            replies.push(match handle.await {
                Ok(reply) => reply,
                Err(e) => Err(ApplicationError::Task(e.to_string())),
            });
        }
        replies
    }
}

fn execute<S: GraphSource>(
    source: &S,
    search: &AntColonySearch,
    logger: &DynLogger,
    request: &PathSearchRequest,
) -> ApplicationResult<PathSearchReply> {
    let started = Instant::now();
    let mut graph = source.load_graph(&request.graph)?;
    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let report = match search.find_path(&mut graph, &request.source, &request.destination, &mut rng) {
        Ok(report) => report,
        Err(e) => {
            logger.error(&format!("request {} on '{}' failed: {}", request.request_id, request.graph, e));
            return Err(DomainError::Search(e).into());
        }
    };

    match &report.outcome {
        PathOutcome::Found { length, .. } => logger.info(&format!(
            "request {}: {} -> {} in {} steps after {} iterations ({:?})",
            request.request_id, request.source, request.destination, length, report.iterations, report.termination
        )),
        PathOutcome::NotFound => logger.warn(&format!(
            "request {}: no path {} -> {} after {} iterations",
            request.request_id, request.source, request.destination, report.iterations
        )),
    }
    if report.degenerate_choices > 0 {
        logger.warn(&format!(
            "request {}: {} degenerate roulette draws",
            request.request_id, report.degenerate_choices
        ));
    }

    Ok(PathSearchReply {
        request_id: request.request_id.clone(),
        graph: request.graph.clone(),
        report,
        elapsed_ms: started.elapsed().as_millis() as u64,
        completed_at: Utc::now(),
    })
}
