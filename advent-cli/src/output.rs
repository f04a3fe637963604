//! Output formatting for challenge results
//!
//! Answers go to stdout; failures are logged through `tracing` on stderr.

use crate::executor::SolverResult;
use chrono::TimeDelta;

/// Output formatter for challenge results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        match &result.answer {
            Ok(answer) if self.quiet => println!("{}", answer),
            Ok(answer) => println!("{}", format_answer(result, answer)),
            Err(e) => tracing::error!(
                year = result.year,
                day = result.day,
                part = result.part,
                "{}: {}",
                result.name,
                e
            ),
        }
    }

    /// Print a summary after all results
    /// Shows both total solve time (sum of durations) and actual elapsed wall-clock time
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let total = results.len();
        let successes = results.iter().filter(|r| r.answer.is_ok()).count();
        let failures = total - successes;

        let total_parse_time: TimeDelta = results.iter().filter_map(|r| r.parse_duration).sum();
        let total_solve_time: TimeDelta = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .map(|r| r.solve_duration)
            .sum();
        let total_compute_time = total_parse_time + total_solve_time;
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("Parts: {} solved, {} failed", successes, failures);
        println!("Total parse time: {}", format_duration(total_parse_time));
        println!("Total solve time: {}", format_duration(total_solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let total_compute_secs =
                total_compute_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            let speedup = total_compute_secs / elapsed_time.as_secs_f64();
            println!("Speedup factor: {:.2}x", speedup);
        }
    }
}

/// `2022/08 Treetop Tree House, part 1: 21 (parse: .., solve: ..)`
///
/// Multi-line answers such as a rendered screen start on their own line.
fn format_answer(result: &SolverResult, answer: &str) -> String {
    let parse_timing = result
        .parse_duration
        .map(|d| format!("parse: {}, ", format_duration(d)))
        .unwrap_or_default();
    let timing = format!("({}solve: {})", parse_timing, format_duration(result.solve_duration));
    let prefix = format!(
        "{}/{:02} {}, part {}",
        result.year, result.day, result.name, result.part
    );

    if answer.contains('\n') {
        format!("{}: {}\n{}", prefix, timing, answer)
    } else {
        format!("{}: {} {}", prefix, answer, timing)
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    match TimeDelta::from_std(d) {
        Ok(delta) => format_duration(delta),
        Err(_) => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(answer: &str) -> SolverResult {
        SolverResult {
            year: 2022,
            day: 8,
            part: 1,
            name: "Treetop Tree House",
            answer: Ok(answer.to_string()),
            solve_duration: TimeDelta::microseconds(250),
            parse_duration: None,
        }
    }

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-5)), "-5µs");
        assert_eq!(format_std_duration(std::time::Duration::from_millis(3)), "3.00ms");
    }

    #[test]
    fn test_single_line_answer() {
        let r = result("21");
        assert_eq!(
            format_answer(&r, "21"),
            "2022/08 Treetop Tree House, part 1: 21 (solve: 250µs)"
        );
    }

    #[test]
    fn test_multi_line_answer_starts_on_new_line() {
        let mut r = result("##.\n.##");
        r.parse_duration = Some(TimeDelta::microseconds(10));
        assert_eq!(
            format_answer(&r, "##.\n.##"),
            "2022/08 Treetop Tree House, part 1: (parse: 10µs, solve: 250µs)\n##.\n.##"
        );
    }
}
