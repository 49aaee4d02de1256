use crate::types::{
    ClusterComparisonRow, ClusterSummary, DemandSummary, DistrictDemand, DistrictDemandRow,
    NodeRecord, RegionRankingRow, SummaryStats,
};
use crate::util::format_number;
use std::collections::HashMap;

/// Per-province ranking rows. Rank and share come from the sum-based
/// `total_kg`; the demand cell shows the mode-dependent value.
pub fn region_ranking(summary: &DemandSummary) -> Vec<RegionRankingRow> {
    summary
        .per_region
        .iter()
        .enumerate()
        .map(|(idx, region)| {
            let share = if summary.total_kg > 0.0 {
                region.total_kg / summary.total_kg * 100.0
            } else {
                0.0
            };
            RegionRankingRow {
                rank: idx + 1,
                province: region.province.clone(),
                demand_kg: format_number(region.display_kg, 0),
                total_kg: format_number(region.total_kg, 0),
                share_pct: format!("{:.1}", share),
            }
        })
        .collect()
}

/// District rows joined to the coordinate table by name. Districts without a
/// matching node keep blank coordinate cells; the map is a presentation
/// concern and must not swallow demand rows.
pub fn district_demand(
    districts: &[DistrictDemand],
    nodes: &[NodeRecord],
) -> Vec<DistrictDemandRow> {
    let by_name: HashMap<&str, &NodeRecord> =
        nodes.iter().map(|n| (n.name.as_str(), n)).collect();
    districts
        .iter()
        .enumerate()
        .map(|(idx, d)| {
            let node = by_name.get(d.name.as_str());
            DistrictDemandRow {
                rank: idx + 1,
                province: d.province.clone(),
                district: d.district.clone(),
                demand_kg: format_number(d.demand_kg, 0),
                lat: node.map(|n| format!("{:.4}", n.lat)).unwrap_or_default(),
                lng: node.map(|n| format!("{:.4}", n.lng)).unwrap_or_default(),
            }
        })
        .collect()
}

pub fn cluster_comparison(clusters: &[ClusterSummary; 2]) -> Vec<ClusterComparisonRow> {
    clusters
        .iter()
        .map(|c| ClusterComparisonRow {
            cluster: c.label.display().to_string(),
            total_kg: format_number(c.total_kg, 0),
            province_count: c.province_count,
            avg_kg_per_province: c
                .avg_kg_per_province
                .map(|v| format_number(v, 0))
                .unwrap_or_else(|| "n/a".to_string()),
            share_pct: format!("{:.1}", c.share_pct),
        })
        .collect()
}

pub fn build_summary(summary: &DemandSummary, insights: Vec<String>) -> SummaryStats {
    let (top_region, top_region_kg) = summary
        .top_region()
        .map(|r| (r.province.clone(), r.total_kg))
        .unwrap_or_default();
    SummaryStats {
        record_count: summary.record_count,
        total_kg: summary.total_kg,
        mean_kg: summary.mean_kg,
        top_region,
        top_region_kg,
        top3_provinces: summary
            .top3_provinces()
            .into_iter()
            .map(str::to_string)
            .collect(),
        top3_share_pct: summary.top3_share_pct,
        weekday_mean_kg: summary.weekday_means.weekday,
        weekend_mean_kg: summary.weekday_means.weekend,
        monthly_mean: summary.monthly_mean.clone(),
        insights,
    }
}
