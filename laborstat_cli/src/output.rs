use anyhow::Result;
use laborstat_lib::{CareerOutlook, MarketSnapshot, RegionalComparison, WageDistribution};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled, Serialize)]
struct LadderRow {
    #[tabled(rename = "Measure")]
    #[serde(rename = "Measure")]
    measure: String,
    #[tabled(rename = "Annual")]
    #[serde(rename = "Annual")]
    annual: String,
    #[tabled(rename = "Hourly")]
    #[serde(rename = "Hourly")]
    hourly: String,
}

#[derive(Tabled, Serialize)]
struct SnapshotRow {
    #[tabled(rename = "Indicator")]
    #[serde(rename = "Indicator")]
    indicator: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct RegionRow {
    #[tabled(rename = "Region")]
    #[serde(rename = "Region")]
    region: String,
    #[tabled(rename = "Median annual")]
    #[serde(rename = "Median annual")]
    median: String,
    #[tabled(rename = "Difference")]
    #[serde(rename = "Difference")]
    difference: String,
    #[tabled(rename = "Percent")]
    #[serde(rename = "Percent")]
    percent: String,
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.0}", v),
        None => "-".to_string(),
    }
}

fn fmt_opt_hourly(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_wages_table(dist: &WageDistribution) {
    let year = dist
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    println!(
        "Occupation {} ({}), reference year {}",
        dist.occupation, dist.area, year
    );
    let rows = vec![
        LadderRow {
            measure: "10th percentile".to_string(),
            annual: fmt_opt(dist.annual.p10),
            hourly: fmt_opt_hourly(dist.hourly.p10),
        },
        LadderRow {
            measure: "25th percentile".to_string(),
            annual: fmt_opt(dist.annual.p25),
            hourly: fmt_opt_hourly(dist.hourly.p25),
        },
        LadderRow {
            measure: "Median".to_string(),
            annual: fmt_opt(dist.annual.median),
            hourly: fmt_opt_hourly(dist.hourly.median),
        },
        LadderRow {
            measure: "75th percentile".to_string(),
            annual: fmt_opt(dist.annual.p75),
            hourly: fmt_opt_hourly(dist.hourly.p75),
        },
        LadderRow {
            measure: "90th percentile".to_string(),
            annual: fmt_opt(dist.annual.p90),
            hourly: fmt_opt_hourly(dist.hourly.p90),
        },
        LadderRow {
            measure: "Mean".to_string(),
            annual: fmt_opt(dist.annual.mean),
            hourly: fmt_opt_hourly(dist.hourly.mean),
        },
    ];
    println!("{}", Table::new(rows).with(Style::rounded()));
}

pub fn print_snapshot_table(snapshot: &MarketSnapshot) {
    let rows = vec![
        SnapshotRow {
            indicator: "Unemployment rate".to_string(),
            value: format!(
                "{:.1}% ({:+.1} MoM)",
                snapshot.unemployment_rate, snapshot.unemployment_rate_delta
            ),
        },
        SnapshotRow {
            indicator: "Total employment".to_string(),
            value: format!(
                "{:.0}k ({:+.0}k MoM)",
                snapshot.total_employment, snapshot.employment_delta
            ),
        },
        SnapshotRow {
            indicator: "Participation rate".to_string(),
            value: format!("{:.1}%", snapshot.participation_rate),
        },
        SnapshotRow {
            indicator: "Job openings".to_string(),
            value: format!("{:.0}k", snapshot.job_openings),
        },
        SnapshotRow {
            indicator: "Quits rate".to_string(),
            value: format!("{:.1}%", snapshot.quits_rate),
        },
        SnapshotRow {
            indicator: "Inflation (YoY)".to_string(),
            value: format!("{:.1}%", snapshot.inflation_yoy),
        },
        SnapshotRow {
            indicator: "Market temperature".to_string(),
            value: snapshot.temperature.to_string(),
        },
    ];
    println!("{}", Table::new(rows).with(Style::rounded()));
}

pub fn print_comparison_table(comparison: &RegionalComparison) {
    println!(
        "Occupation {}, base region {} (median {:.0})",
        comparison.occupation, comparison.base.area, comparison.base.median_annual
    );
    let mut rows: Vec<RegionRow> = comparison
        .comparisons
        .iter()
        .map(|delta| RegionRow {
            region: delta.area.to_string(),
            median: format!("{:.0}", delta.median_annual),
            difference: format!("{:+.0}", delta.difference),
            percent: format!("{:+.1}%", delta.percent_difference),
        })
        .collect();
    if let Some(national) = comparison.national_median {
        rows.push(RegionRow {
            region: "national average".to_string(),
            median: format!("{:.0}", national),
            difference: format!("{:+.0}", national - comparison.base.median_annual),
            percent: String::new(),
        });
    }
    println!("{}", Table::new(rows).with(Style::rounded()));
}

pub fn print_outlook(outlook: &CareerOutlook) {
    println!(
        "Occupation {}: outlook {} (score {}/100)",
        outlook.occupation, outlook.rating, outlook.score
    );
    println!(
        "  median annual wage: {}",
        fmt_opt(outlook.median_annual_wage)
    );
    println!("  employment: {}", fmt_opt(outlook.employment));
}
