use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use geojson::{GeoJson, Geometry, Value};

use super::pheromone_map::PheromoneMap;
use crate::common::{DomainError, DomainResult};
use crate::domains::path_search::{Coord, GraphSource};

pub const DATA_DIR_ENV: &str = "ACS_DATA_DIR";

/// Resolve the map data directory.
/// Precedence: ACS_DATA_DIR env var -> ./resources/path_search -> /usr/share/gryphon-acs/path_search
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(v) = env::var(DATA_DIR_ENV) {
        return PathBuf::from(v);
    }
    let cwd_default = Path::new("resources/path_search");
    if cwd_default.exists() {
        return cwd_default.to_path_buf();
    }
    PathBuf::from("/usr/share/gryphon-acs/path_search")
}

/// Reads GeoJSON line networks from `<base>/geojson/<name>`.
pub struct FilesystemGraphSource {
    base: PathBuf,
}

impl FilesystemGraphSource {
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base: base.unwrap_or_else(resolve_data_dir) }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn load_geojson(&self, name: &str) -> DomainResult<String> {
        let mut p = self.base.clone();
        p.push("geojson");
        p.push(name);
        fs::read_to_string(&p)
            .map_err(|e| DomainError::InfrastructureError(format!("{}: {}", p.display(), e)))
    }
}

/// Build an undirected road graph: every consecutive pair of a LineString is
/// an edge, Points become isolated nodes, areas are ignored.
pub fn build_graph(geojson: &str) -> DomainResult<PheromoneMap<Coord>> {
    let parsed: GeoJson = geojson
        .parse()
        .map_err(|e| DomainError::InfrastructureError(format!("invalid GeoJSON: {}", e)))?;
    let mut map = PheromoneMap::new();
    match parsed {
        GeoJson::FeatureCollection(collection) => {
            for feature in collection.features {
                if let Some(geometry) = feature.geometry {
                    add_geometry(&mut map, &geometry)?;
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geometry) = feature.geometry {
                add_geometry(&mut map, &geometry)?;
            }
        }
        GeoJson::Geometry(geometry) => add_geometry(&mut map, &geometry)?,
    }
    Ok(map)
}

fn add_geometry(map: &mut PheromoneMap<Coord>, geometry: &Geometry) -> DomainResult<()> {
    match &geometry.value {
        Value::Point(position) => {
            map.add_node(coord(position)?);
        }
        Value::MultiPoint(positions) => {
            for position in positions {
                map.add_node(coord(position)?);
            }
        }
        Value::LineString(line) => add_line(map, line)?,
        Value::MultiLineString(lines) => {
            for line in lines {
                add_line(map, line)?;
            }
        }
        Value::GeometryCollection(geometries) => {
            for inner in geometries {
                add_geometry(map, inner)?;
            }
        }
        Value::Polygon(_) | Value::MultiPolygon(_) => {}
    }
    Ok(())
}

fn add_line(map: &mut PheromoneMap<Coord>, line: &[Vec<f64>]) -> DomainResult<()> {
    let mut previous: Option<Coord> = None;
    for position in line {
        let current = coord(position)?;
        match previous {
            Some(prev) if prev != current => map.add_undirected_edge(prev, current),
            Some(_) => {}
            None => {
                map.add_node(current);
            }
        }
        previous = Some(current);
    }
    Ok(())
}

fn coord(position: &[f64]) -> DomainResult<Coord> {
    match position {
        [x, y, ..] => Ok(Coord::new(*x, *y)),
        _ => Err(DomainError::InvalidCommand {
            reason: format!("position needs two coordinates, got {}", position.len()),
        }),
    }
}

impl GraphSource for FilesystemGraphSource {
    type Graph = PheromoneMap<Coord>;

    fn load_graph(&self, name: &str) -> DomainResult<PheromoneMap<Coord>> {
        let geojson = self.load_geojson(name)?;
        build_graph(&geojson)
    }
}

/// Named graphs held in memory; each load returns an independent copy.
#[derive(Default)]
pub struct InMemoryGraphSource {
    graphs: HashMap<String, PheromoneMap<Coord>>,
}

impl InMemoryGraphSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_graph(mut self, name: impl Into<String>, graph: PheromoneMap<Coord>) -> Self {
        self.graphs.insert(name.into(), graph);
        self
    }
}

impl GraphSource for InMemoryGraphSource {
    type Graph = PheromoneMap<Coord>;

    fn load_graph(&self, name: &str) -> DomainResult<PheromoneMap<Coord>> {
        self.graphs.get(name).cloned().ok_or_else(|| DomainError::InvalidCommand {
            reason: format!("Unknown graph: {}", name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linestring_becomes_a_chain_of_undirected_edges() {
        let map = build_graph(
            r#"{ "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [2.0, 0.0]] }"#,
        )
        .unwrap();
        assert_eq!(map.node_count(), 3);
        assert_eq!(map.edge_count(), 4);
        assert!(map.pheromone_between(&Coord::new(1.0, 0.0), &Coord::new(0.0, 0.0)).is_some());
    }

    #[test]
    fn test_shared_vertices_join_lines() {
        let map = build_graph(
            r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "properties": {}, "geometry": { "type": "LineString", "coordinates": [[0.0,0.0],[5.0,0.0]] } },
    { "type": "Feature", "properties": {}, "geometry": { "type": "MultiLineString", "coordinates": [[[5.0,0.0],[5.0,5.0]], [[5.0,0.0],[9.0,0.0]]] } },
    { "type": "Feature", "properties": {}, "geometry": { "type": "Polygon", "coordinates": [[[0.0,0.0],[1.0,1.0],[1.0,0.0],[0.0,0.0]]] } }
  ]
}"#,
        )
        .unwrap();
        assert_eq!(map.node_count(), 4);
        assert_eq!(map.edge_count(), 6);
    }

    #[test]
    fn test_malformed_json_is_an_infrastructure_error() {
        assert!(matches!(build_graph("{ not json"), Err(DomainError::InfrastructureError(_))));
    }

    #[test]
    fn test_in_memory_source_hands_out_copies() {
        let graph = PheromoneMap::from_undirected_edges([(Coord::new(0.0, 0.0), Coord::new(1.0, 0.0))]);
        let source = InMemoryGraphSource::new().with_graph("tiny", graph);
        let mut first = source.load_graph("tiny").unwrap();
        first.reset_pheromone(5.0);
        let second = source.load_graph("tiny").unwrap();
        assert_eq!(second.total_pheromone(), 0.0);
        assert!(source.load_graph("missing").is_err());
    }
}
