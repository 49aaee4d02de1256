use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Display order for the seven weekday codes used in the dataset.
pub const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// One raw row of `cvrp_master_db.csv`. Headers are the Korean source
/// columns; both demand column variants are declared so the loader can pick
/// whichever the file carries.
#[derive(Debug, Deserialize)]
pub struct RawDemandRow {
    #[serde(rename = "연도")]
    pub year: Option<String>,
    #[serde(rename = "월")]
    pub month: Option<String>,
    #[serde(rename = "요일")]
    pub weekday: Option<String>,
    #[serde(rename = "시도")]
    pub province: Option<String>,
    #[serde(rename = "시군구")]
    pub district: Option<String>,
    #[serde(rename = "Daily_Demand_Kg")]
    pub daily_demand_kg: Option<String>,
    #[serde(rename = "Daily_Demand")]
    pub daily_demand: Option<String>,
}

/// One raw row of `all_nodes.csv`.
#[derive(Debug, Deserialize)]
pub struct RawNodeRow {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Lat")]
    pub lat: Option<String>,
    #[serde(rename = "Lng")]
    pub lng: Option<String>,
    #[serde(rename = "Type")]
    pub node_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DemandRecord {
    pub year: i32,
    pub month: u32,
    pub weekday: Weekday,
    pub province: String,
    pub district: String,
    /// Always >= 0; a missing source cell is loaded as 0.
    pub quantity_kg: f64,
}

/// Coordinate row joined to district aggregates by `name`
/// ("{province} {district}"). Depot rows are dropped at load time.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// User-selected filter sets. An empty vec on any dimension means "no
/// constraint on that dimension", never "match nothing".
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub years: Vec<i32>,
    pub months: Vec<u32>,
    pub weekdays: Vec<Weekday>,
    pub provinces: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMode {
    Sum,
    Mean,
}

impl AggregationMode {
    pub fn label(&self) -> &'static str {
        match self {
            AggregationMode::Sum => "Total",
            AggregationMode::Mean => "Mean",
        }
    }
}

/// Per-province aggregate. `total_kg` is always the plain sum and is the
/// only basis for ranking and share metrics; `display_kg` follows the
/// selected aggregation mode and is used for table cells only.
#[derive(Debug, Clone)]
pub struct RegionSummary {
    pub province: String,
    pub total_kg: f64,
    pub display_kg: f64,
}

/// Per-(province, district) aggregate under the selected mode. `name` is the
/// join key against the node table.
#[derive(Debug, Clone)]
pub struct DistrictDemand {
    pub province: String,
    pub district: String,
    pub name: String,
    pub demand_kg: f64,
}

/// Mean demand split into Mon-Fri vs Sat-Sun. `None` marks a mean that is
/// undefined for the current filtered set (no rows in that partition) and is
/// distinct from a computed zero.
#[derive(Debug, Clone, Copy)]
pub struct WeekdayMeans {
    pub weekday: Option<f64>,
    pub weekend: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthMean {
    pub month: u32,
    pub mean_kg: f64,
}

/// Everything the aggregator derives from one filtered set.
#[derive(Debug, Clone)]
pub struct DemandSummary {
    pub record_count: usize,
    pub total_kg: f64,
    pub mean_kg: f64,
    /// Sorted by descending `total_kg`, then ascending province name.
    pub per_region: Vec<RegionSummary>,
    pub top3_share_pct: f64,
    pub weekday_means: WeekdayMeans,
    pub monthly_mean: Vec<MonthMean>,
}

impl DemandSummary {
    pub fn top_region(&self) -> Option<&RegionSummary> {
        self.per_region.first()
    }

    pub fn top3_provinces(&self) -> Vec<&str> {
        self.per_region
            .iter()
            .take(3)
            .map(|r| r.province.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterLabel {
    HighRisk,
    General,
}

impl ClusterLabel {
    /// Korean display label for the cohort.
    pub fn display(&self) -> &'static str {
        match self {
            ClusterLabel::HighRisk => "고위험군(서울·경기·부산)",
            ClusterLabel::General => "일반지역",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClusterSummary {
    pub label: ClusterLabel,
    pub total_kg: f64,
    pub province_count: usize,
    /// `None` when the cluster has zero member provinces in the filtered set.
    pub avg_kg_per_province: Option<f64>,
    pub share_pct: f64,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RegionRankingRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Province")]
    #[tabled(rename = "Province")]
    pub province: String,
    #[serde(rename = "DemandKg")]
    #[tabled(rename = "DemandKg")]
    pub demand_kg: String,
    #[serde(rename = "TotalKg")]
    #[tabled(rename = "TotalKg")]
    pub total_kg: String,
    #[serde(rename = "SharePct")]
    #[tabled(rename = "SharePct")]
    pub share_pct: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DistrictDemandRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Province")]
    #[tabled(rename = "Province")]
    pub province: String,
    #[serde(rename = "District")]
    #[tabled(rename = "District")]
    pub district: String,
    #[serde(rename = "DemandKg")]
    #[tabled(rename = "DemandKg")]
    pub demand_kg: String,
    #[serde(rename = "Lat")]
    #[tabled(rename = "Lat")]
    pub lat: String,
    #[serde(rename = "Lng")]
    #[tabled(rename = "Lng")]
    pub lng: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ClusterComparisonRow {
    #[serde(rename = "Cluster")]
    #[tabled(rename = "Cluster")]
    pub cluster: String,
    #[serde(rename = "TotalKg")]
    #[tabled(rename = "TotalKg")]
    pub total_kg: String,
    #[serde(rename = "ProvinceCount")]
    #[tabled(rename = "ProvinceCount")]
    pub province_count: usize,
    #[serde(rename = "AvgKgPerProvince")]
    #[tabled(rename = "AvgKgPerProvince")]
    pub avg_kg_per_province: String,
    #[serde(rename = "SharePct")]
    #[tabled(rename = "SharePct")]
    pub share_pct: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub record_count: usize,
    pub total_kg: f64,
    pub mean_kg: f64,
    pub top_region: String,
    pub top_region_kg: f64,
    pub top3_provinces: Vec<String>,
    pub top3_share_pct: f64,
    pub weekday_mean_kg: Option<f64>,
    pub weekend_mean_kg: Option<f64>,
    pub monthly_mean: Vec<MonthMean>,
    pub insights: Vec<String>,
}
