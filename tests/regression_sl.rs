//! A regression test for the "sl" example
mod regression;
use regression::run_regression_test;

#[test]
fn test_regression_sl() {
    run_regression_test("sl");
}
