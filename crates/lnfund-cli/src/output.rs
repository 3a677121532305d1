//! Human and JSON rendering of scan results.

use anyhow::Result;
use colored::*;
use lnfund_core::{Funding, FundingRecord, FundingSource, ScanReport};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_lightning(report: &ScanReport) {
    if report.lightning.is_empty() {
        println!("{}", "No lightning funding found.".yellow());
    } else {
        println!("{}", "⚡ Lightning funding".bold());
        let width = name_width(report.lightning.keys());
        for (package, address) in &report.lightning {
            println!("  {}  {}", pad(package, width).bold(), address.green());
        }
    }
    print_summary(report);
}

pub fn print_funding(report: &ScanReport) {
    if report.funding.is_empty() {
        println!("{}", "No packages were scanned.".yellow());
    } else {
        let width = name_width(report.funding.keys());
        for (package, funding) in &report.funding {
            println!(
                "  {}  {}",
                pad(package, width).bold(),
                describe_funding(funding.as_ref())
            );
        }
    }
    print_summary(report);
}

fn print_summary(report: &ScanReport) {
    eprintln!("{}", summary_line(report).dimmed());
}

fn summary_line(report: &ScanReport) -> String {
    let stats = &report.stats;
    let mut summary = format!(
        "Scanned {} packages with {} lookups",
        report.funding.len(),
        stats.lookups
    );
    if stats.failures > 0 {
        summary.push_str(&format!(", {} failed", stats.failures));
    }
    if stats.skipped_revisits > 0 {
        summary.push_str(&format!(", {} revisits skipped", stats.skipped_revisits));
    }
    summary
}

fn name_width<'a>(names: impl Iterator<Item = &'a String>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0)
}

fn pad(name: &str, width: usize) -> String {
    format!("{:<width$}", name, width = width)
}

/// One-line summary of a funding declaration
pub fn describe_funding(funding: Option<&Funding>) -> String {
    match funding {
        None => "-".to_string(),
        Some(Funding::Text(url)) => url.clone(),
        Some(Funding::Single(record)) => describe_record(record),
        Some(Funding::Many(sources)) => sources
            .iter()
            .map(|source| match source {
                FundingSource::Url(url) => url.clone(),
                FundingSource::Record(record) => describe_record(record),
                FundingSource::Other(value) => value.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(Funding::Other(value)) => value.to_string(),
    }
}

fn describe_record(record: &FundingRecord) -> String {
    match (record.kind.as_deref(), record.url.as_deref()) {
        (Some(kind), Some(url)) => format!("{} {}", kind, url),
        (None, Some(url)) => url.to_string(),
        (Some(kind), None) => kind.to_string(),
        (None, None) => "?".to_string(),
    }
}
