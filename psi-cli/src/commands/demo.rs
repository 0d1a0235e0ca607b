// psi-cli/src/commands/demo.rs
//! The `demo` command: reference scenarios on built-in data.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::info;
use std::io::{self, Write};

use psi_core::{BinningMode, Bins, PsiEngine, PsiOptions, SampleInput};

use crate::ui::frequency_table::print_frequency_table;
use crate::ui::output_format::{print_header, print_summary};
use crate::ui::theme::ThemeMap;

/// One named comparison.
pub struct Scenario {
    pub title: &'static str,
    pub expected: Vec<Option<f64>>,
    pub actual: Vec<Option<f64>>,
    pub options: PsiOptions,
}

fn realistic_expected() -> Vec<Option<f64>> {
    let mut values: Vec<Option<f64>> = [1., 2., 3., 3., 5., 4., 2., 2., 3., 2., 3., 4., 2., 2., 2., 5., 4., 5., 7.]
        .into_iter()
        .map(Some)
        .collect();
    values.extend([None, Some(7.0)]);
    values
}

fn realistic_actual() -> Vec<Option<f64>> {
    vec![
        Some(1.), Some(2.), Some(2.), Some(3.), Some(5.), Some(4.), Some(2.), None, Some(3.), Some(2.),
        None, Some(4.), Some(2.), Some(2.), Some(2.), Some(5.), Some(3.), Some(5.), Some(6.), None,
    ]
}

fn repeated(pattern: [f64; 2], times: usize) -> Vec<Option<f64>> {
    pattern.repeat(times).into_iter().map(Some).collect()
}

/// The scenarios, in display order.
pub fn scenarios() -> Vec<Scenario> {
    let three_bins = PsiOptions::default().with_bins(Bins::Count(3));
    vec![
        Scenario {
            title: "Realistic integers, equidistant bins",
            expected: realistic_expected(),
            actual: realistic_actual(),
            options: three_bins.clone(),
        },
        Scenario {
            title: "Realistic integers, quantile bins",
            expected: realistic_expected(),
            actual: realistic_actual(),
            options: three_bins.clone().with_mode(Some(BinningMode::Quantile)),
        },
        Scenario {
            title: "Realistic integers, categorical",
            expected: realistic_expected(),
            actual: realistic_actual(),
            options: PsiOptions::default().categorical(),
        },
        Scenario {
            title: "Identical data",
            expected: realistic_expected(),
            actual: realistic_expected(),
            options: three_bins.clone(),
        },
        Scenario {
            title: "Completely different data",
            expected: repeated([0.0, 0.1], 100),
            actual: repeated([1.0, 1.1], 120),
            options: three_bins,
        },
    ]
}

pub fn run_demo(theme_map: &ThemeMap) -> Result<()> {
    info!("Running PSI demo scenarios.");
    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();

    for scenario in scenarios() {
        let engine = PsiEngine::new(scenario.options.clone());
        let report = engine
            .evaluate(
                SampleInput::from(scenario.expected),
                SampleInput::from(scenario.actual),
            )
            .with_context(|| format!("Scenario '{}' failed", scenario.title))?;

        print_header(&mut writer, scenario.title, theme_map, supports_color)?;
        print_summary(&mut writer, &report, theme_map, supports_color)?;
        print_frequency_table(&mut writer, &report, scenario.options.regulariser, theme_map, supports_color)?;
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenarios_evaluate() {
        let results: Vec<f64> = scenarios()
            .into_iter()
            .map(|s| {
                PsiEngine::new(s.options)
                    .evaluate(s.expected, s.actual)
                    .unwrap()
                    .psi
            })
            .collect();
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|psi| *psi >= 0.0));
        assert_eq!(results[3], 0.0);
        assert!(results[4] > 10.0);
    }
}
