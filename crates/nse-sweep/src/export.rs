//! CSV and JSON export of sweep results.

use crate::error::SweepError;
use crate::executor::SweepResult;
use std::io::Write;

const CSV_COLUMNS: [&str; 10] = [
    "x_p",
    "x_n",
    "x_alpha",
    "mu_p_mev",
    "mu_n_mev",
    "mu_alpha_mev",
    "iterations",
    "residual_norm",
    "status",
    "error",
];

/// One row per sweep point, failed points included with empty values.
pub fn write_csv<W: Write>(result: &SweepResult, mut out: W) -> Result<(), SweepError> {
    writeln!(
        out,
        "index,{},{}",
        result.variable.label(),
        CSV_COLUMNS.join(",")
    )?;

    let mut failures = result.failures.iter().peekable();
    for (index, (value, solution)) in result
        .independent_values
        .iter()
        .zip(&result.solutions)
        .enumerate()
    {
        match solution {
            Some(s) => {
                let x = &s.mass_fractions;
                let mu = &s.potentials;
                writeln!(
                    out,
                    "{},{:e},{:e},{:e},{:e},{:e},{:e},{:e},{},{:e},ok,",
                    index,
                    value,
                    x.proton,
                    x.neutron,
                    x.alpha,
                    mu.proton,
                    mu.neutron,
                    mu.alpha,
                    s.iterations,
                    s.residual_norm
                )?;
            }
            None => {
                let message = failures
                    .next_if(|f| f.index == index)
                    .map(|f| f.error.as_str())
                    .unwrap_or("");
                writeln!(
                    out,
                    "{},{:e},,,,,,,,,failed,{}",
                    index,
                    value,
                    quote(message)
                )?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Pretty-printed JSON of the full result.
pub fn write_json<W: Write>(result: &SweepResult, mut out: W) -> Result<(), SweepError> {
    serde_json::to_writer_pretty(&mut out, result)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::SweepVariable;
    use crate::executor::PointFailure;
    use nse_core::StatePoint;
    use nse_solver::{ChemicalPotentials, EquilibriumSolution, GuessStrategy, MassFractions};

    fn result() -> SweepResult {
        let state = StatePoint::new(1e11, 3.0, 0.5).unwrap();
        let solution = EquilibriumSolution {
            state,
            mass_fractions: MassFractions::new(0.3, 0.3, 0.4),
            potentials: ChemicalPotentials::new(-10.0, -10.0, -11.7),
            strategy: Some(GuessStrategy::FreeNucleon),
            iterations: 6,
            residual_norm: 1e-13,
        };
        SweepResult {
            variable: SweepVariable::Temperature,
            independent_values: vec![3.0, 4.0],
            solutions: vec![Some(solution), None],
            failures: vec![PointFailure {
                index: 1,
                value: 4.0,
                error: "Convergence failed: maximum iterations 1 reached, residual = 1e0".into(),
            }],
            num_successful: 1,
            num_failed: 1,
            num_warm_started: 0,
        }
    }

    #[test]
    fn csv_has_one_row_per_point() {
        let mut buf = Vec::new();
        write_csv(&result(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("index,temperature_mev,x_p,x_n,x_alpha"));
        let header_fields = lines[0].split(',').count();
        assert!(lines[1].starts_with("0,3e0,3e-1,3e-1,4e-1"));
        assert!(lines[1].ends_with(",ok,"));
        assert_eq!(lines[1].split(',').count(), header_fields);
        assert!(lines[2].starts_with("1,4e0,"));
        assert!(lines[2].contains(",failed,\"Convergence failed: maximum iterations 1 reached"));
    }

    #[test]
    fn json_export_parses_back() {
        let mut buf = Vec::new();
        write_json(&result(), &mut buf).unwrap();
        let back: SweepResult = serde_json::from_slice(&buf).unwrap();
        assert_eq!(back.num_failed, 1);
        assert_eq!(back.solutions[0].as_ref().unwrap().iterations, 6);
        assert_eq!(back.alpha_mass_fraction(), vec![0.4]);
    }

    #[test]
    fn quoting() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote("a,b"), "\"a,b\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
