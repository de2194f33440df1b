/// Asserts the verdict of a tick report.
#[macro_export]
macro_rules! assert_verdict {
    ($report:expr, $verdict:pat) => {
        let verdict = $report.verdict;
        assert!(
            matches!(verdict, Some($verdict)),
            "Unexpected verdict {:?}",
            verdict
        );
    };
}

/// Asserts that a tick played exactly the given stings.
#[macro_export]
macro_rules! assert_stings {
    ($report:expr, [$($pattern:expr),* $(,)?]) => {
        assert_eq!(
            $report.stings,
            vec![$($pattern),*],
            "Sting sequence mismatch"
        );
    };
}

/// Asserts the population of the current generation.
#[macro_export]
macro_rules! assert_population {
    ($life:expr, $count:expr) => {
        assert_eq!(
            $life.current().population(),
            $count,
            "Population count mismatch"
        );
    };
}
