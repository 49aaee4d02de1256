use crate::types::{ClusterSummary, WeekdayMeans};
use crate::util::format_number;

/// Derive the human-readable insight lines from the cluster comparison and
/// the weekday/weekend means.
///
/// Each line has its own precondition and is built by an independent pure
/// formatter; the formatters run in a fixed order and a `None` from one
/// never suppresses the others. An empty result is valid; the caller owns
/// the fallback message. Rounding is part of the contract here: ratios and
/// percentages to one decimal, kg values to one decimal with thousands
/// separators, because consumers embed these strings directly.
pub fn generate(clusters: &[ClusterSummary; 2], means: &WeekdayMeans) -> Vec<String> {
    [
        share_insight(clusters),
        ratio_insight(clusters),
        weekday_insight(means),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// High-risk share of nationwide demand. Needs both cohorts populated.
fn share_insight(clusters: &[ClusterSummary; 2]) -> Option<String> {
    let [high, general] = clusters;
    if high.province_count == 0 || general.province_count == 0 {
        return None;
    }
    Some(format!(
        "고위험군(서울·경기·부산)은 전체 시도의 일부({}개)에 불과하지만, \
         전국 의료폐기물 수요의 약 {:.1}%를 차지합니다.",
        high.province_count, high.share_pct
    ))
}

/// High-risk vs general avg-per-province ratio. Omitted when either average
/// is undefined or the general average is zero (the ratio would divide by
/// zero).
fn ratio_insight(clusters: &[ClusterSummary; 2]) -> Option<String> {
    let [high, general] = clusters;
    let high_avg = high.avg_kg_per_province?;
    let general_avg = general.avg_kg_per_province?;
    if general_avg == 0.0 {
        return None;
    }
    Some(format!(
        "시도당 평균 수요 기준으로 보면, 고위험군은 일반지역 대비 약 {:.1}배 높은 수준입니다.",
        high_avg / general_avg
    ))
}

/// Weekday vs weekend comparison. Omitted unless both means are defined.
fn weekday_insight(means: &WeekdayMeans) -> Option<String> {
    let weekday = means.weekday?;
    let weekend = means.weekend?;
    let diff = weekday - weekend;
    let direction = if diff > 0.0 { "높습니다" } else { "낮습니다" };
    Some(format!(
        "평일 평균 수요는 {} kg, 주말은 {} kg로, 평일이 주말보다 약 {} kg {}.",
        format_number(weekday, 1),
        format_number(weekend, 1),
        format_number(diff.abs(), 1),
        direction
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClusterLabel;

    fn cluster(
        label: ClusterLabel,
        total_kg: f64,
        province_count: usize,
        share_pct: f64,
    ) -> ClusterSummary {
        let avg_kg_per_province = if province_count > 0 {
            Some(total_kg / province_count as f64)
        } else {
            None
        };
        ClusterSummary {
            label,
            total_kg,
            province_count,
            avg_kg_per_province,
            share_pct,
        }
    }

    fn populated_clusters() -> [ClusterSummary; 2] {
        [
            cluster(ClusterLabel::HighRisk, 180.0, 3, 90.0),
            cluster(ClusterLabel::General, 20.0, 1, 10.0),
        ]
    }

    #[test]
    fn all_three_insights_when_preconditions_hold() {
        let means = WeekdayMeans {
            weekday: Some(1500.5),
            weekend: Some(1200.0),
        };
        let insights = generate(&populated_clusters(), &means);
        assert_eq!(insights.len(), 3);
        assert!(insights[0].contains("약 90.0%"));
        assert!(insights[1].contains("약 3.0배"));
        assert!(insights[2].contains("1,500.5 kg"));
        assert!(insights[2].contains("약 300.5 kg 높습니다"));
    }

    #[test]
    fn weekday_insight_omitted_when_weekend_undefined() {
        let means = WeekdayMeans {
            weekday: Some(1500.0),
            weekend: None,
        };
        let insights = generate(&populated_clusters(), &means);
        assert_eq!(insights.len(), 2);
        assert!(insights.iter().all(|s| !s.contains("주말")));
    }

    #[test]
    fn ratio_insight_omitted_when_high_risk_cohort_empty() {
        let clusters = [
            cluster(ClusterLabel::HighRisk, 0.0, 0, 0.0),
            cluster(ClusterLabel::General, 20.0, 1, 100.0),
        ];
        let means = WeekdayMeans {
            weekday: Some(10.0),
            weekend: Some(5.0),
        };
        let insights = generate(&clusters, &means);
        // Share and ratio both need the high-risk cohort; the weekday line
        // must still come through on its own.
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("평일"));
    }

    #[test]
    fn ratio_insight_omitted_when_general_average_is_zero() {
        let clusters = [
            cluster(ClusterLabel::HighRisk, 180.0, 3, 100.0),
            cluster(ClusterLabel::General, 0.0, 2, 0.0),
        ];
        let means = WeekdayMeans {
            weekday: None,
            weekend: None,
        };
        let insights = generate(&clusters, &means);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("의료폐기물 수요의 약 100.0%"));
    }

    #[test]
    fn no_qualifying_insights_yields_empty_sequence() {
        let clusters = [
            cluster(ClusterLabel::HighRisk, 0.0, 0, 0.0),
            cluster(ClusterLabel::General, 0.0, 0, 0.0),
        ];
        let means = WeekdayMeans {
            weekday: None,
            weekend: None,
        };
        assert!(generate(&clusters, &means).is_empty());
    }

    #[test]
    fn weekday_lower_than_weekend_flips_direction() {
        let means = WeekdayMeans {
            weekday: Some(100.0),
            weekend: Some(250.0),
        };
        let insights = generate(&populated_clusters(), &means);
        let line = insights.last().unwrap();
        assert!(line.contains("약 150.0 kg 낮습니다"));
    }
}
