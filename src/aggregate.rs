use crate::types::{
    AggregationMode, DemandRecord, DemandSummary, DistrictDemand, MonthMean, RegionSummary,
    WeekdayMeans,
};
use crate::util::mean;
use chrono::Weekday;
use std::cmp::Ordering;
use std::collections::HashMap;

fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Compute all scalar and grouped statistics over one filtered set.
///
/// Precondition: `records` is non-empty; the filter engine rejects empty
/// results before this runs. Ranking, top-region, and top-3 share are always
/// sum-based regardless of `mode` so they stay comparable across filter
/// changes; `mode` only affects the per-region display value.
pub fn summarize(records: &[DemandRecord], mode: AggregationMode) -> DemandSummary {
    let total_kg: f64 = records.iter().map(|r| r.quantity_kg).sum();
    let mean_kg = total_kg / records.len() as f64;

    #[derive(Default)]
    struct Acc {
        sum: f64,
        count: usize,
    }

    let mut by_province: HashMap<String, Acc> = HashMap::new();
    for r in records {
        let e = by_province.entry(r.province.clone()).or_default();
        e.sum += r.quantity_kg;
        e.count += 1;
    }
    let mut per_region: Vec<RegionSummary> = by_province
        .into_iter()
        .map(|(province, acc)| {
            let display_kg = match mode {
                AggregationMode::Sum => acc.sum,
                AggregationMode::Mean => acc.sum / acc.count as f64,
            };
            RegionSummary {
                province,
                total_kg: acc.sum,
                display_kg,
            }
        })
        .collect();
    per_region.sort_by(|a, b| {
        b.total_kg
            .partial_cmp(&a.total_kg)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.province.cmp(&b.province))
    });

    let top3_sum: f64 = per_region.iter().take(3).map(|r| r.total_kg).sum();
    let top3_share_pct = if total_kg > 0.0 {
        top3_sum / total_kg * 100.0
    } else {
        0.0
    };

    let weekday_qty: Vec<f64> = records
        .iter()
        .filter(|r| !is_weekend(r.weekday))
        .map(|r| r.quantity_kg)
        .collect();
    let weekend_qty: Vec<f64> = records
        .iter()
        .filter(|r| is_weekend(r.weekday))
        .map(|r| r.quantity_kg)
        .collect();
    let weekday_means = WeekdayMeans {
        weekday: mean(&weekday_qty),
        weekend: mean(&weekend_qty),
    };

    let mut by_month: HashMap<u32, Acc> = HashMap::new();
    for r in records {
        let e = by_month.entry(r.month).or_default();
        e.sum += r.quantity_kg;
        e.count += 1;
    }
    let mut monthly_mean: Vec<MonthMean> = by_month
        .into_iter()
        .map(|(month, acc)| MonthMean {
            month,
            mean_kg: acc.sum / acc.count as f64,
        })
        .collect();
    monthly_mean.sort_by_key(|m| m.month);

    DemandSummary {
        record_count: records.len(),
        total_kg,
        mean_kg,
        per_region,
        top3_share_pct,
        weekday_means,
        monthly_mean,
    }
}

/// Group by (province, district) under the selected mode, sorted by
/// descending demand then ascending name. The `name` field is the
/// "{province} {district}" join key used against the coordinate table.
pub fn by_district(records: &[DemandRecord], mode: AggregationMode) -> Vec<DistrictDemand> {
    #[derive(Default)]
    struct Acc {
        sum: f64,
        count: usize,
    }

    let mut map: HashMap<(String, String), Acc> = HashMap::new();
    for r in records {
        let e = map
            .entry((r.province.clone(), r.district.clone()))
            .or_default();
        e.sum += r.quantity_kg;
        e.count += 1;
    }
    let mut rows: Vec<DistrictDemand> = map
        .into_iter()
        .map(|((province, district), acc)| {
            let demand_kg = match mode {
                AggregationMode::Sum => acc.sum,
                AggregationMode::Mean => acc.sum / acc.count as f64,
            };
            let name = format!("{} {}", province, district);
            DistrictDemand {
                province,
                district,
                name,
                demand_kg,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        b.demand_kg
            .partial_cmp(&a.demand_kg)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(province: &str, district: &str, weekday: Weekday, qty: f64) -> DemandRecord {
        DemandRecord {
            year: 2030,
            month: 4,
            weekday,
            province: province.to_string(),
            district: district.to_string(),
            quantity_kg: qty,
        }
    }

    fn scenario() -> Vec<DemandRecord> {
        vec![
            record("서울", "강남구", Weekday::Mon, 100.0),
            record("경기", "수원시", Weekday::Tue, 50.0),
            record("부산", "해운대구", Weekday::Wed, 30.0),
            record("강원", "춘천시", Weekday::Thu, 20.0),
        ]
    }

    #[test]
    fn scenario_totals_and_ranking() {
        let summary = summarize(&scenario(), AggregationMode::Sum);
        assert_eq!(summary.total_kg, 200.0);
        assert_eq!(summary.mean_kg, 50.0);
        let top = summary.top_region().unwrap();
        assert_eq!(top.province, "서울");
        assert_eq!(top.total_kg, 100.0);
        assert!((summary.top3_share_pct - 90.0).abs() < 1e-9);
        assert_eq!(summary.top3_provinces(), vec!["서울", "경기", "부산"]);
    }

    #[test]
    fn region_totals_reconcile_with_grand_total() {
        for mode in [AggregationMode::Sum, AggregationMode::Mean] {
            let summary = summarize(&scenario(), mode);
            let region_sum: f64 = summary.per_region.iter().map(|r| r.total_kg).sum();
            assert!((region_sum - summary.total_kg).abs() < 1e-9);
        }
    }

    #[test]
    fn ranking_ignores_aggregation_mode() {
        let mut data = scenario();
        // Two extra low-quantity Seoul rows drag its mean below Gyeonggi's
        // while leaving its sum on top.
        data.push(record("서울", "강남구", Weekday::Fri, 1.0));
        data.push(record("서울", "강남구", Weekday::Fri, 1.0));
        let summary = summarize(&data, AggregationMode::Mean);
        let top = summary.top_region().unwrap();
        assert_eq!(top.province, "서울");
        assert_eq!(top.total_kg, 102.0);
        assert!(top.display_kg < 50.0);
    }

    #[test]
    fn tie_break_is_deterministic_by_name() {
        let data = vec![
            record("부산", "중구", Weekday::Mon, 40.0),
            record("경기", "수원시", Weekday::Mon, 40.0),
        ];
        let summary = summarize(&data, AggregationMode::Sum);
        assert_eq!(summary.top_region().unwrap().province, "경기");
    }

    #[test]
    fn fewer_than_three_regions_use_all() {
        let data = vec![
            record("서울", "강남구", Weekday::Mon, 60.0),
            record("경기", "수원시", Weekday::Tue, 40.0),
        ];
        let summary = summarize(&data, AggregationMode::Sum);
        assert!((summary.top3_share_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn weekend_only_input_leaves_weekday_mean_undefined() {
        let data = vec![
            record("서울", "강남구", Weekday::Sat, 80.0),
            record("서울", "강남구", Weekday::Sun, 40.0),
        ];
        let summary = summarize(&data, AggregationMode::Sum);
        assert_eq!(summary.weekday_means.weekday, None);
        assert_eq!(summary.weekday_means.weekend, Some(60.0));
    }

    #[test]
    fn missing_weekend_rows_leave_weekend_mean_undefined() {
        let summary = summarize(&scenario(), AggregationMode::Sum);
        assert_eq!(summary.weekday_means.weekend, None);
        assert_eq!(summary.weekday_means.weekday, Some(50.0));
    }

    #[test]
    fn monthly_means_are_sorted_by_month() {
        let mut data = scenario();
        data.push(DemandRecord {
            month: 1,
            ..record("서울", "강남구", Weekday::Mon, 10.0)
        });
        let summary = summarize(&data, AggregationMode::Sum);
        let months: Vec<u32> = summary.monthly_mean.iter().map(|m| m.month).collect();
        assert_eq!(months, vec![1, 4]);
        assert_eq!(summary.monthly_mean[0].mean_kg, 10.0);
    }

    #[test]
    fn district_grouping_builds_join_keys() {
        let data = vec![
            record("서울", "강남구", Weekday::Mon, 30.0),
            record("서울", "강남구", Weekday::Tue, 10.0),
            record("서울", "송파구", Weekday::Mon, 25.0),
        ];
        let sums = by_district(&data, AggregationMode::Sum);
        assert_eq!(sums[0].name, "서울 강남구");
        assert_eq!(sums[0].demand_kg, 40.0);
        assert_eq!(sums[1].name, "서울 송파구");

        let means = by_district(&data, AggregationMode::Mean);
        assert_eq!(means[0].name, "서울 송파구");
        assert_eq!(means[0].demand_kg, 25.0);
    }
}
