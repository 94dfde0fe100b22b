//! Fixed textual layouts for reports.
//!
//! Numbers in the statistics line follow printf conventions: exponents carry
//! a sign and at least two digits, and `%g` style values drop trailing zeros.

use std::fmt::Write;

use ndarray::{Array2, ArrayView1};

use crate::JadeReport;
use crate::aggregate::RunStatistics;
use crate::ranking::FitnessRanking;

/// One line per ranked individual, best first:
/// `fitness:slot||` followed by every component.
pub fn population_dump(population: &Array2<f64>, ranking: &FitnessRanking) -> String {
    let mut out = String::new();
    for record in ranking.records() {
        let slot = format!(" {}", record.index);
        let _ = write!(out, "{:6.2}:{:>3}||", record.fitness, slot);
        if record.index < population.nrows() {
            for c in population.row(record.index) {
                let _ = write!(out, " {:+7.2} ", c);
            }
        }
        out.push('\n');
    }
    out
}

/// `slot:fitness` pairs in rank order on a single line
pub fn ranking_line(ranking: &FitnessRanking) -> String {
    ranking.records().iter().map(|r| format!("{}:{:4.2}  ", r.index, r.fitness)).collect()
}

/// Components of one individual
pub fn vector_line(x: ArrayView1<f64>) -> String {
    x.iter().map(|c| format!("{:5.2} ", c)).collect()
}

/// Run parameters as a `#`-prefixed header line
pub fn parameter_banner(
    comment: &str,
    dimension: usize,
    popsize: usize,
    best_fraction: f64,
    adaptation_rate: f64,
    generations: usize,
) -> String {
    format!(
        "#{} dim={} NP={} p={:4.2} c={:4.2} generation={}",
        comment, dimension, popsize, best_fraction, adaptation_rate, generations
    )
}

/// Gathered best-fitness statistics
pub fn statistics_line(comment: &str, generations: usize, stats: &RunStatistics) -> String {
    format!(
        "{} gen{}, mean {} (stddev {} = {} %) runs({})",
        comment,
        generations,
        exp_notation(stats.mean, 4, 1),
        exp_notation(stats.std_dev, 4, 1),
        general_notation(stats.rel_std_percent, 3, 2),
        stats.runs
    )
}

/// Final result of one instance: best and worst individuals, then the
/// population dump and the statistics line when present.
pub fn run_summary(
    comment: &str,
    report: &JadeReport,
    generations: usize,
    stats: Option<&RunStatistics>,
    dump_population: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}: {}", comment, report.message);
    let _ = writeln!(out, "best  {:.6e}: {}", report.fun, vector_line(report.x.view()));
    let _ = writeln!(out, "worst {:.6e}: {}", report.worst_fun, vector_line(report.worst_x.view()));
    if dump_population {
        out.push('\n');
        out.push_str(&population_dump(&report.population, &report.ranking));
    }
    if let Some(s) = stats {
        let _ = writeln!(out, "{}", statistics_line(comment, generations, s));
    }
    out
}

/// printf `%{width}.{precision}e`
fn exp_notation(v: f64, width: usize, precision: usize) -> String {
    let text = if v.is_finite() {
        let raw = format!("{:.*e}", precision, v);
        match raw.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => raw,
        }
    } else {
        non_finite(v)
    };
    format!("{:>width$}", text, width = width)
}

/// printf `%{width}.{precision}g`
fn general_notation(v: f64, width: usize, precision: usize) -> String {
    let precision = precision.max(1);
    let text = if !v.is_finite() {
        non_finite(v)
    } else if v == 0.0 {
        "0".to_string()
    } else {
        // exponent after rounding to `precision` significant digits
        let rounded = format!("{:.*e}", precision - 1, v);
        let exp: i32 = rounded.split_once('e').and_then(|(_, e)| e.parse().ok()).unwrap_or(0);
        if exp < -4 || exp >= precision as i32 {
            let mut s = exp_notation(v, 0, precision - 1);
            if let Some(pos) = s.find('e') {
                let (mantissa, tail) = s.split_at(pos);
                s = format!("{}{}", strip_zeros(mantissa), tail);
            }
            s
        } else {
            let decimals = (precision as i32 - 1 - exp).max(0) as usize;
            strip_zeros(&format!("{:.*}", decimals, v)).to_string()
        }
    };
    format!("{:>width$}", text, width = width)
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { s }
}

fn non_finite(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mode, Phase};
    use ndarray::array;

    #[test]
    fn test_population_dump_layout() {
        let pop = array![[1.0, -2.5], [0.25, 3.0]];
        let ranking = FitnessRanking::from_fitness(&[7.25, 1.5], Mode::Minimize);
        let dump = population_dump(&pop, &ranking);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "  1.50:  1||   +0.25    +3.00 ");
        assert_eq!(lines[1], "  7.25:  0||   +1.00    -2.50 ");
    }

    #[test]
    fn test_population_dump_wide_slot_keeps_space() {
        let fitness: Vec<f64> = (0..101).map(|i| i as f64).collect();
        let pop = Array2::<f64>::zeros((101, 1));
        let ranking = FitnessRanking::from_fitness(&fitness, Mode::Maximize);
        let dump = population_dump(&pop, &ranking);
        assert!(dump.starts_with("100.00: 100||"));
    }

    #[test]
    fn test_ranking_and_vector_lines() {
        let ranking = FitnessRanking::from_fitness(&[2.0, 0.5], Mode::Minimize);
        assert_eq!(ranking_line(&ranking), "1:0.50  0:2.00  ");
        assert_eq!(vector_line(array![1.0, -0.5].view()), " 1.00 -0.50 ");
    }

    #[test]
    fn test_banner_and_statistics() {
        assert_eq!(
            parameter_banner("sphere", 2, 10, 0.1, 0.1, 200),
            "#sphere dim=2 NP=10 p=0.10 c=0.10 generation=200"
        );
        let stats = RunStatistics { mean: 0.5, std_dev: 0.25, rel_std_percent: 50.0, runs: 4 };
        assert_eq!(
            statistics_line("sphere", 200, &stats),
            "sphere gen200, mean 5.0e-01 (stddev 2.5e-01 =  50 %) runs(4)"
        );
        let single = RunStatistics { mean: 0.091, std_dev: 0.0, rel_std_percent: 0.0, runs: 1 };
        assert_eq!(
            statistics_line("sphere", 20, &single),
            "sphere gen20, mean 9.1e-02 (stddev 0.0e+00 =   0 %) runs(1)"
        );
    }

    #[test]
    fn test_printf_style_numbers() {
        assert_eq!(exp_notation(1234.0, 4, 1), "1.2e+03");
        assert_eq!(exp_notation(-0.000126, 4, 1), "-1.3e-04");
        assert_eq!(exp_notation(1.0e-120, 4, 1), "1.0e-120");
        assert_eq!(general_notation(12.345, 3, 2), " 12");
        assert_eq!(general_notation(-33.3, 3, 2), "-33");
        assert_eq!(general_notation(0.123, 3, 2), "0.12");
        assert_eq!(general_notation(0.5, 3, 2), "0.5");
        assert_eq!(general_notation(0.0001234, 3, 2), "0.00012");
        assert_eq!(general_notation(0.00001234, 3, 2), "1.2e-05");
        assert_eq!(general_notation(123.0, 3, 2), "1.2e+02");
        assert_eq!(general_notation(99.6, 3, 2), "1e+02");
        assert_eq!(general_notation(f64::NAN, 3, 2), "nan");
    }

    #[test]
    fn test_run_summary_prints_statistics_once() {
        let pop = array![[0.5, 0.0], [1.0, 1.0]];
        let ranking = FitnessRanking::from_fitness(&[0.25, 2.0], Mode::Minimize);
        let report = JadeReport {
            x: array![0.5, 0.0],
            fun: 0.25,
            worst_x: array![1.0, 1.0],
            worst_fun: 2.0,
            success: true,
            message: "Completed 20 generations".to_string(),
            nit: 20,
            nfev: 42,
            population: pop,
            ranking,
            mu_f: 0.5,
            mu_cr: 0.5,
            archive_size: 0,
            phase: Phase::Converged,
            error: None,
        };
        let stats = RunStatistics { mean: 0.25, std_dev: 0.0, rel_std_percent: 0.0, runs: 1 };
        let text = run_summary("sphere", &report, 20, Some(&stats), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "# sphere: Completed 20 generations");
        assert_eq!(lines.iter().filter(|l| l.starts_with("sphere gen20,")).count(), 1);
        assert_eq!(lines.iter().filter(|l| l.starts_with('#')).count(), 1);

        let dumped = run_summary("sphere", &report, 20, None, true);
        assert_eq!(dumped.lines().count(), 6);
        assert!(!dumped.contains("gen20"));
    }
}
