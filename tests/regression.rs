//! Shared code for the example regression tests.
//!
//! Each test runs a built-in example and checks that every CSV file it writes matches the copy
//! stored under `tests/data/<example>`.
use float_cmp::approx_eq;
use itertools::{EitherOrBoth, Itertools};
use mctnk::cli::OutputOpts;
use mctnk::cli::example::handle_example_run_command;
use mctnk::settings::Settings;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Largest relative difference allowed between numeric fields
const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Run the named example and compare its output with the stored results
#[allow(dead_code)] // not called when this file is built as its own test target
pub fn run_regression_test(example_name: &str) {
    unsafe { std::env::set_var("MCTNK_LOG_LEVEL", "off") };

    let output_dir = tempdir().unwrap();
    let opts = OutputOpts {
        output_dir: Some(output_dir.path().to_path_buf()),
        plot: false,
    };
    handle_example_run_command(example_name, &opts, Some(Settings::default())).unwrap();

    let expected_dir = Path::new("tests/data").join(example_name);
    let file_names = csv_file_names(&expected_dir);
    assert_eq!(csv_file_names(output_dir.path()), file_names);

    let mismatches = file_names
        .iter()
        .flat_map(|name| {
            diff_csv(
                name,
                &fs::read_to_string(output_dir.path().join(name)).unwrap(),
                &fs::read_to_string(expected_dir.join(name)).unwrap(),
            )
        })
        .collect_vec();
    assert!(
        mismatches.is_empty(),
        "Output differs from tests/data/{example_name}:\n  * {}",
        mismatches.join("\n  * ")
    );
}

/// Describe each line that differs between `actual` and `expected`
fn diff_csv(file_name: &str, actual: &str, expected: &str) -> Vec<String> {
    actual
        .lines()
        .zip_longest(expected.lines())
        .enumerate()
        .filter_map(|(num, pair)| match pair {
            EitherOrBoth::Both(a, e) if lines_match(a, e) => None,
            EitherOrBoth::Both(a, e) => Some(format!("{file_name}:{num}: \"{a}\" != \"{e}\"")),
            EitherOrBoth::Left(a) => Some(format!("{file_name}:{num}: unexpected \"{a}\"")),
            EitherOrBoth::Right(e) => Some(format!("{file_name}:{num}: missing \"{e}\"")),
        })
        .collect()
}

/// Whether two CSV lines have the same fields, comparing finite numbers with a tolerance
fn lines_match(actual: &str, expected: &str) -> bool {
    let actual = actual.split(',').collect_vec();
    let expected = expected.split(',').collect_vec();

    actual.len() == expected.len()
        && actual
            .into_iter()
            .zip(expected)
            .all(|(a, e)| match (parse_finite(a), parse_finite(e)) {
                (Some(a), Some(e)) => {
                    let scale = a.abs().max(e.abs()).max(1.0);
                    approx_eq!(f64, a, e, epsilon = RELATIVE_TOLERANCE * scale)
                }
                _ => a == e,
            })
}

fn parse_finite(field: &str) -> Option<f64> {
    field.parse().ok().filter(|value: &f64| value.is_finite())
}

/// Sorted names of the CSV files in `dir`
fn csv_file_names(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .filter(|name| name.ends_with(".csv"))
        .sorted()
        .collect()
}
