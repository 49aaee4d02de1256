// Entry point and high-level CLI flow.
//
// The binary drives the demand monitoring pipeline as a console tool:
// - Option [1] loads the demand and node CSVs, printing diagnostics.
// - Option [2] asks for filter selections, runs the full pipeline once
//   (filter -> aggregate -> cluster -> insights), prints previews of the
//   three reports plus the insight lines, and exports CSV/JSON files.
// - After generating reports, the user can go back to the menu or exit.
mod aggregate;
mod cluster;
mod error;
mod filter;
mod insight;
mod loader;
mod output;
mod reports;
mod types;
mod util;

use error::PipelineError;
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;
use types::{AggregationMode, DemandRecord, FilterCriteria, NodeRecord, WEEKDAY_ORDER};

const DATA_DIR: &str = "data";
const DEMAND_FILE: &str = "data/cvrp_master_db.csv";
const NODES_FILE: &str = "data/all_nodes.csv";

// Simple in-memory app state so we only load the CSVs once but can generate
// reports (under different filters) multiple times in a single run. Derived
// results are never cached here; every report cycle recomputes from the raw
// table.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| {
    Mutex::new(AppState {
        data: None,
        nodes: Vec::new(),
    })
});

struct AppState {
    data: Option<Vec<DemandRecord>>,
    nodes: Vec<NodeRecord>,
}

/// Read a single line of input after printing the common "Enter choice:" prompt.
fn read_choice() -> String {
    read_line("Enter choice: ")
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask the user whether to go back to the report selection menu after
/// generating reports.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        match read_line("Back to Report Menu (Y/N): ").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load the demand table and the optional node table.
fn handle_load() {
    match loader::load_demand(DEMAND_FILE) {
        Ok((data, report)) => {
            println!(
                "Processing dataset... ({} rows loaded, {} kept)",
                util::format_int(report.total_rows as i64),
                util::format_int(report.kept_rows as i64)
            );
            println!(
                "Note: {} rows skipped due to parse/validation errors.",
                util::format_int(report.parse_errors as i64)
            );
            if report.quantity_column != loader::QuantityColumn::Kg {
                println!("Info: demand column: {}.", report.quantity_column.describe());
            }
            let nodes = match loader::load_nodes(NODES_FILE) {
                Ok(nodes) => {
                    if nodes.is_empty() {
                        println!("Info: no coordinate table; district report will have blank coordinates.");
                    } else {
                        println!(
                            "Info: {} coordinate nodes loaded.",
                            util::format_int(nodes.len() as i64)
                        );
                    }
                    nodes
                }
                Err(e) => {
                    eprintln!("Warning: failed to read node table: {}", e);
                    Vec::new()
                }
            };
            println!("");
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some(data);
            state.nodes = nodes;
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Collect the filter selections for one report cycle. Blank answers mean
/// "no constraint on that dimension".
fn prompt_criteria() -> FilterCriteria {
    println!("Filter selections (comma-separated, blank = all):");
    let years = util::split_list(&read_line("  Years: "))
        .iter()
        .filter_map(|s| s.parse::<i32>().ok())
        .collect();
    let months = util::split_list(&read_line("  Months (1-12): "))
        .iter()
        .filter_map(|s| s.parse::<u32>().ok())
        .filter(|m| (1..=12).contains(m))
        .collect();
    let weekday_prompt = format!(
        "  Weekdays ({}): ",
        WEEKDAY_ORDER.map(|d| d.to_string()).join("/")
    );
    let weekdays = util::split_list(&read_line(&weekday_prompt))
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();
    let provinces = util::split_list(&read_line("  Provinces: "));
    FilterCriteria {
        years,
        months,
        weekdays,
        provinces,
    }
}

fn prompt_mode() -> AggregationMode {
    loop {
        match read_line("Aggregation [1] Total (sum)  [2] Mean (default 1): ").as_str() {
            "" | "1" => return AggregationMode::Sum,
            "2" => return AggregationMode::Mean,
            _ => println!("Invalid choice. Please enter 1 or 2."),
        }
    }
}

/// Handle option [2]: run the pipeline once and emit all reports.
///
/// This function is intentionally side-effectful:
/// - writes three CSV files,
/// - writes a JSON summary,
/// - and prints Markdown previews plus the insight lines to the console.
fn handle_generate_reports() {
    let (data, nodes) = {
        let state = APP_STATE.lock().unwrap();
        (state.data.clone(), state.nodes.clone())
    };
    let Some(data) = data else {
        println!("Error: No data loaded. Please load the CSV files first (option 1).\n");
        return;
    };

    let criteria = prompt_criteria();
    let mode = prompt_mode();

    let filtered = match filter::apply(&data, &criteria) {
        Ok(rows) => rows,
        Err(PipelineError::EmptyResult) => {
            println!("\nNo data matches the current filters. Adjust the selections and retry.\n");
            return;
        }
        Err(e) => {
            eprintln!("Pipeline error: {}\n", e);
            return;
        }
    };

    let summary = aggregate::summarize(&filtered, mode);
    let districts = aggregate::by_district(&filtered, mode);
    let clusters = cluster::classify(&summary.per_region);
    let insights = insight::generate(&clusters, &summary.weekday_means);

    println!("\nGenerating reports...");
    println!("Outputs saved to individual files...\n");

    println!("Headline metrics:");
    println!(
        "  Records: {}   Total demand: {} kg   Top province: {} ({} kg)",
        util::format_int(summary.record_count as i64),
        util::format_number(summary.total_kg, 0),
        summary
            .top_region()
            .map(|r| r.province.as_str())
            .unwrap_or("-"),
        util::format_number(summary.top_region().map(|r| r.total_kg).unwrap_or(0.0), 0)
    );
    println!(
        "  Top-3 provinces ({}) hold {:.1}% of demand.\n",
        summary.top3_provinces().join(", "),
        summary.top3_share_pct
    );

    let r1 = reports::region_ranking(&summary);
    let file1 = "report1_region_ranking.csv";
    if let Err(e) = output::write_csv(file1, &r1) {
        eprintln!("Write error: {}", e);
    }
    println!("Report 1: Provincial Demand Ranking ({})", mode.label());
    output::preview_table_rows(&r1, 5);
    println!("(Full table exported to {})\n", file1);

    let r2 = reports::district_demand(&districts, &nodes);
    let file2 = "report2_district_demand.csv";
    if let Err(e) = output::write_csv(file2, &r2) {
        eprintln!("Write error: {}", e);
    }
    println!("Report 2: District Demand Top 10 ({})", mode.label());
    output::preview_table_rows(&r2, 10);
    println!("(Full table exported to {})\n", file2);

    let r3 = reports::cluster_comparison(&clusters);
    let file3 = "report3_cluster_comparison.csv";
    if let Err(e) = output::write_csv(file3, &r3) {
        eprintln!("Write error: {}", e);
    }
    println!("Report 3: High-Risk vs General Cluster Comparison");
    output::preview_table_rows(&r3, 2);
    println!("(Full table exported to {})\n", file3);

    let stats = reports::build_summary(&summary, insights);
    if let Err(e) = output::write_json("summary.json", &stats) {
        eprintln!("Write error: {}", e);
    }
    println!("Insights (summary.json):");
    if stats.insights.is_empty() {
        println!("  요약할 인사이트를 찾지 못했습니다.");
    } else {
        for line in &stats.insights {
            println!("  - {}", line);
        }
    }
    println!("");

    match loader::route_map_path(DATA_DIR) {
        Some(path) => println!(
            "CVRP route map ({}): {} (open in a browser)\n",
            loader::ROUTE_MAP_SCENARIO,
            path.display()
        ),
        None => println!(
            "CVRP route map unavailable ('{}' not found under {}/).\n",
            loader::ROUTE_MAP_FILE,
            DATA_DIR
        ),
    }
}

fn main() {
    loop {
        println!("Medical-Waste Demand Monitoring");
        println!("[1] Load the data files");
        println!("[2] Generate Reports\n");
        match read_choice().as_str() {
            "1" => {
                handle_load();
            }
            "2" => {
                handle_generate_reports();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}
