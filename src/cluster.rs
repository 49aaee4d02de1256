use crate::types::{ClusterLabel, ClusterSummary, RegionSummary};

/// Provinces forming the fixed high-risk cohort. Static configuration, not
/// user-editable.
pub const HIGH_RISK_PROVINCES: [&str; 3] = ["서울", "경기", "부산"];

/// Split the per-region sums into the high-risk cohort and everyone else.
///
/// Both labels are always returned, in `[HighRisk, General]` order, so the
/// display shape is stable even when a cohort has no members in the current
/// filtered set. An empty cohort reports `total_kg = 0`,
/// `province_count = 0`, and an undefined per-province average. Shares are
/// computed against the two-cluster grand total and sum to ~100 whenever
/// that total is non-zero.
pub fn classify(per_region: &[RegionSummary]) -> [ClusterSummary; 2] {
    let mut high = (0.0f64, 0usize);
    let mut general = (0.0f64, 0usize);
    for region in per_region {
        let is_high_risk = HIGH_RISK_PROVINCES
            .iter()
            .any(|p| *p == region.province.as_str());
        let slot = if is_high_risk { &mut high } else { &mut general };
        slot.0 += region.total_kg;
        slot.1 += 1;
    }

    let grand_total = high.0 + general.0;
    let build = |label: ClusterLabel, (total_kg, province_count): (f64, usize)| {
        let avg_kg_per_province = if province_count > 0 {
            Some(total_kg / province_count as f64)
        } else {
            None
        };
        let share_pct = if grand_total > 0.0 {
            total_kg / grand_total * 100.0
        } else {
            0.0
        };
        ClusterSummary {
            label,
            total_kg,
            province_count,
            avg_kg_per_province,
            share_pct,
        }
    };

    [
        build(ClusterLabel::HighRisk, high),
        build(ClusterLabel::General, general),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(province: &str, total_kg: f64) -> RegionSummary {
        RegionSummary {
            province: province.to_string(),
            total_kg,
            display_kg: total_kg,
        }
    }

    fn scenario() -> Vec<RegionSummary> {
        vec![
            region("서울", 100.0),
            region("경기", 50.0),
            region("부산", 30.0),
            region("강원", 20.0),
        ]
    }

    #[test]
    fn scenario_split_matches_expected_shares() {
        let [high, general] = classify(&scenario());
        assert_eq!(high.label, ClusterLabel::HighRisk);
        assert_eq!(high.total_kg, 180.0);
        assert_eq!(high.province_count, 3);
        assert_eq!(high.avg_kg_per_province, Some(60.0));
        assert!((high.share_pct - 90.0).abs() < 1e-9);

        assert_eq!(general.label, ClusterLabel::General);
        assert_eq!(general.total_kg, 20.0);
        assert_eq!(general.province_count, 1);
        assert!((general.share_pct - 10.0).abs() < 1e-9);
    }

    #[test]
    fn shares_sum_to_one_hundred_when_both_populated() {
        let [high, general] = classify(&scenario());
        assert!((high.share_pct + general.share_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_cohort_reports_undefined_average() {
        let [high, general] = classify(&[region("강원", 20.0)]);
        assert_eq!(high.province_count, 0);
        assert_eq!(high.total_kg, 0.0);
        assert_eq!(high.avg_kg_per_province, None);
        assert_eq!(general.avg_kg_per_province, Some(20.0));
        assert!((general.share_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_demand_everywhere_yields_zero_shares() {
        let [high, general] = classify(&[region("서울", 0.0), region("강원", 0.0)]);
        assert_eq!(high.share_pct, 0.0);
        assert_eq!(general.share_pct, 0.0);
        assert_eq!(high.avg_kg_per_province, Some(0.0));
    }

    #[test]
    fn no_regions_at_all_keeps_both_rows() {
        let [high, general] = classify(&[]);
        assert_eq!(high.province_count, 0);
        assert_eq!(general.province_count, 0);
        assert_eq!(high.avg_kg_per_province, None);
        assert_eq!(general.avg_kg_per_province, None);
    }
}
