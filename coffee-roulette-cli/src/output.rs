/// Output formatting: announcement lines, status table and JSON.
use coffee_roulette_core::{Pairing, RoundReport, Status};
use serde::Serialize;

#[derive(Serialize)]
struct JsonRound<'a> {
    pairings: &'a [Pairing],
    sat_out: Option<&'a str>,
    unpaired: &'a [usize],
    starter_pool_exhausted: bool,
}

/// One announcement line per pair.
pub fn format_pairing(p: &Pairing) -> String {
    match &p.starter {
        Some(starter) => format!(
            "- @{} will have coffee with @{}. Suggested conversation starter: {}",
            p.first_name, p.second_name, starter.text
        ),
        None => format!("- @{} will have coffee with @{}", p.first_name, p.second_name),
    }
}

/// Announcement lines for a round, sit-out notice last.
pub fn format_round(report: &RoundReport) -> Vec<String> {
    let mut lines: Vec<String> = report.pairings.iter().map(format_pairing).collect();
    if let Some(ref sat_out) = report.sat_out {
        lines.push(format!("{} was not paired with anyone this time!", sat_out.name));
    }
    lines
}

pub fn print_round(report: &RoundReport) {
    for line in format_round(report) {
        println!("{line}");
    }
}

pub fn print_round_json(report: &RoundReport, exhausted: bool) {
    let output = JsonRound {
        pairings: &report.pairings,
        sat_out: report.sat_out.as_ref().map(|s| s.name.as_str()),
        unpaired: &report.unpaired,
        starter_pool_exhausted: exhausted,
    };
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

/// Print participants as a terminal table.
pub fn print_status(status: &Status) {
    let name_width = status.active.iter()
        .map(|p| p.name.len())
        .chain(status.removed.iter().map(|r| r.name.len()))
        .max()
        .unwrap_or(4)
        .max(4); // at least "Name"

    println!("  ID | {:<name_width$} | Starters used", "Name");
    println!("-----|-{}-|--------------", "-".repeat(name_width));
    for p in &status.active {
        println!("{:>4} | {:<name_width$} | {:>13}", p.id, p.name, p.starter_history.len());
    }

    println!("\n{} active participants", status.active.len());
    if !status.removed.is_empty() {
        let names: Vec<&str> = status.removed.iter().map(|r| r.name.as_str()).collect();
        println!("Removed: {}", names.join(", "));
    }
}

pub fn print_status_json(status: &Status) {
    println!("{}", serde_json::to_string_pretty(status).unwrap());
}
