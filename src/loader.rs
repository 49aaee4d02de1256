use crate::error::PipelineError;
use crate::types::{DemandRecord, NodeRecord, RawDemandRow, RawNodeRow};
use crate::util::{parse_f64_safe, parse_i32_safe, parse_u32_safe};
use chrono::Weekday;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// File name of the pre-generated CVRP route map for the fixed scenario.
pub const ROUTE_MAP_FILE: &str = "cvrp_geojson_visualization_final.html";

/// Scenario key the route map was generated for.
pub const ROUTE_MAP_SCENARIO: &str = "2030년 4월 월요일";

/// Which source column supplied the demand quantity. Decided once from the
/// header row; precedence is `Daily_Demand_Kg`, then `Daily_Demand`, then a
/// constant zero column. A fallback is reported, never treated as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityColumn {
    Kg,
    Legacy,
    Absent,
}

impl QuantityColumn {
    pub fn describe(&self) -> &'static str {
        match self {
            QuantityColumn::Kg => "Daily_Demand_Kg",
            QuantityColumn::Legacy => "Daily_Demand (fallback)",
            QuantityColumn::Absent => "none found, defaulting to 0",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    pub parse_errors: usize,
    pub quantity_column: QuantityColumn,
}

pub fn load_demand(path: &str) -> Result<(Vec<DemandRecord>, LoadReport), PipelineError> {
    let file = File::open(path)?;
    load_demand_from_reader(file)
}

pub fn load_demand_from_reader<R: Read>(
    rdr: R,
) -> Result<(Vec<DemandRecord>, LoadReport), PipelineError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(rdr);

    // Schema normalization happens exactly once, against the header row.
    let headers = rdr.headers()?.clone();
    let quantity_column = if headers.iter().any(|h| h == "Daily_Demand_Kg") {
        QuantityColumn::Kg
    } else if headers.iter().any(|h| h == "Daily_Demand") {
        QuantityColumn::Legacy
    } else {
        QuantityColumn::Absent
    };

    let mut total_rows = 0usize;
    let mut parse_errors = 0usize;
    let mut records: Vec<DemandRecord> = Vec::new();

    for result in rdr.deserialize::<RawDemandRow>() {
        total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => {
                parse_errors += 1;
                continue;
            }
        };

        let year = match parse_i32_safe(row.year.as_deref()) {
            Some(y) => y,
            None => {
                parse_errors += 1;
                continue;
            }
        };
        let month = match parse_u32_safe(row.month.as_deref()) {
            Some(m) if (1..=12).contains(&m) => m,
            _ => {
                parse_errors += 1;
                continue;
            }
        };
        let weekday: Weekday = match row.weekday.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => match s.parse() {
                Ok(w) => w,
                Err(_) => {
                    parse_errors += 1;
                    continue;
                }
            },
            _ => {
                parse_errors += 1;
                continue;
            }
        };

        // An absent quantity cell loads as 0; a present but negative or
        // unparseable value invalidates the row.
        let raw_quantity = match quantity_column {
            QuantityColumn::Kg => row.daily_demand_kg.as_deref(),
            QuantityColumn::Legacy => row.daily_demand.as_deref(),
            QuantityColumn::Absent => None,
        };
        let quantity_kg = match raw_quantity {
            None => 0.0,
            Some(s) if s.trim().is_empty() => 0.0,
            Some(s) => match parse_f64_safe(Some(s)) {
                Some(v) if v >= 0.0 => v,
                _ => {
                    parse_errors += 1;
                    continue;
                }
            },
        };

        let province = row
            .province
            .unwrap_or_else(|| "미상".to_string())
            .trim()
            .to_string();
        let district = row
            .district
            .unwrap_or_else(|| "미상".to_string())
            .trim()
            .to_string();

        records.push(DemandRecord {
            year,
            month,
            weekday,
            province,
            district,
            quantity_kg,
        });
    }

    let kept_rows = records.len();
    let report = LoadReport {
        total_rows,
        kept_rows,
        parse_errors,
        quantity_column,
    };
    Ok((records, report))
}

/// Load the optional coordinate table. A missing file is not an error (the
/// district report simply renders without coordinates); depot rows are
/// dropped before the join.
pub fn load_nodes(path: &str) -> Result<Vec<NodeRecord>, PipelineError> {
    if !Path::new(path).exists() {
        return Ok(Vec::new());
    }
    let file = File::open(path)?;
    load_nodes_from_reader(file)
}

pub fn load_nodes_from_reader<R: Read>(rdr: R) -> Result<Vec<NodeRecord>, PipelineError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(rdr);
    let mut nodes: Vec<NodeRecord> = Vec::new();
    for result in rdr.deserialize::<RawNodeRow>() {
        let row = match result {
            Ok(r) => r,
            Err(_) => continue,
        };
        if row.node_type.as_deref().map(str::trim) == Some("Depot") {
            continue;
        }
        let name = match row.name {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => continue,
        };
        let (lat, lng) = match (
            parse_f64_safe(row.lat.as_deref()),
            parse_f64_safe(row.lng.as_deref()),
        ) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => continue,
        };
        nodes.push(NodeRecord { name, lat, lng });
    }
    Ok(nodes)
}

/// Locate the pre-generated CVRP route map under `data_dir`. `None` means
/// "unavailable", which callers report as a warning rather than an error.
pub fn route_map_path(data_dir: &str) -> Option<PathBuf> {
    let path = Path::new(data_dir).join(ROUTE_MAP_FILE);
    if path.exists() {
        Some(path)
    } else {
        None
    }
}
