//! Text and JSON rendering of run results.

use atty::Stream;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use dslab_disk_sched::benchmark::BenchmarkSummary;
use dslab_disk_sched::metrics::Metrics;
use dslab_disk_sched::trace::ResultTrace;

fn highlight(s: String, enabled: bool) -> ColoredString {
    if enabled && atty::is(Stream::Stdout) {
        s.green().bold()
    } else {
        s.normal()
    }
}

/// Movement overhead relative to the best run, in percent.
pub fn percent_vs_best(movement: u64, best: u64) -> f64 {
    if best == 0 {
        return 0.;
    }
    movement.saturating_sub(best) as f64 / best as f64 * 100.
}

pub fn print_comparison(traces: &[ResultTrace]) {
    let best_movement = traces.iter().map(|t| t.total_movement()).min().unwrap_or(0);
    let best_fairness = traces
        .iter()
        .map(|t| t.metrics().fairness_index)
        .fold(f64::NEG_INFINITY, f64::max);
    let timed = traces.iter().any(|t| t.is_time_based());

    println!(
        "{:<20} {:>10} {:>10} {:>10} {:>12} {:>9} {:>9}",
        "Algorithm", "Movement", "Avg seek", "Max seek", "Avg latency", "Fairness", "vs best"
    );
    println!("{}", "-".repeat(86));
    for trace in traces {
        let metrics = trace.metrics();
        let movement = format!("{:>10}", metrics.total_movement);
        let fairness = format!("{:>9.3}", metrics.fairness_index);
        let latency = if timed {
            format!("{:>12.2}", metrics.avg_latency)
        } else {
            format!("{:>12}", "-")
        };
        println!(
            "{:<20} {} {:>10.2} {:>10} {} {} {:>8.1}%",
            trace.algorithm_name(),
            highlight(movement, metrics.total_movement == best_movement),
            metrics.avg_seek,
            metrics.max_seek,
            latency,
            highlight(fairness, timed && metrics.fairness_index == best_fairness),
            percent_vs_best(metrics.total_movement, best_movement),
        );
    }
}

/// Head path on one line, serviced positions marked with `*`.
pub fn format_timeline(trace: &ResultTrace) -> String {
    let mut parts = Vec::with_capacity(trace.head_path().len());
    for (i, position) in trace.head_path().iter().enumerate() {
        if i == 0 {
            parts.push(position.to_string());
        } else {
            parts.push(format!("{}*", position));
        }
    }
    format!("{}  [Total: {}]", parts.join(" → "), trace.total_movement())
}

pub fn print_timelines(traces: &[ResultTrace]) {
    for trace in traces {
        println!("{:<20} {}", trace.algorithm_name(), format_timeline(trace));
    }
}

pub fn print_benchmark_summary(rows: &[BenchmarkSummary]) {
    let mut last_size = None;
    for row in rows {
        if last_size != Some(row.size) {
            println!();
            println!("Size {}", row.size);
            println!(
                "{:<20} {:>12} {:>10} {:>12} {:>9} {:>12}",
                "Algorithm", "Movement", "Avg seek", "Avg latency", "Fairness", "Time (us)"
            );
            last_size = Some(row.size);
        }
        println!(
            "{:<20} {:>12.1} {:>10.2} {:>12.2} {:>9.3} {:>12.1}",
            row.algorithm, row.avg_movement, row.avg_seek, row.avg_latency, row.avg_fairness, row.avg_execution_time_us
        );
    }
}

#[derive(Serialize)]
pub struct RunReport<'a> {
    #[serde(flatten)]
    pub trace: &'a ResultTrace,
    pub metrics: &'a Metrics,
}

pub fn run_reports(traces: &[ResultTrace]) -> Vec<RunReport<'_>> {
    traces
        .iter()
        .map(|trace| RunReport {
            trace,
            metrics: trace.metrics(),
        })
        .collect()
}
