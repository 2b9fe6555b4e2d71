/// Asserts two grids hold the same cells, printing both on failure.
#[macro_export]
macro_rules! assert_grids_equal {
    ($left:expr, $right:expr) => {
        let (left, right) = (&$left, &$right);
        assert!(
            left == right,
            "Grids differ in {} cells\nleft:\n{}\nright:\n{}",
            left.hamming_distance(right),
            left.to_string_art(),
            right.to_string_art()
        );
    };
}

/// Asserts the running fault totals respect `corrected <= 3 * detected`.
#[macro_export]
macro_rules! assert_fault_totals_consistent {
    ($engine:expr) => {
        let detected = $engine.total_faults_detected();
        let corrected = $engine.total_faults_corrected();
        assert!(
            corrected <= detected * 3,
            "Corrected {} exceeds three times detected {}",
            corrected,
            detected
        );
    };
}

/// Asserts all four cores currently hold identical grids.
#[macro_export]
macro_rules! assert_cores_identical {
    ($engine:expr) => {
        let cores = $engine.cores();
        for (i, core) in cores.iter().enumerate().skip(1) {
            assert!(
                core == &cores[0],
                "Core {} differs from core 0 in {} cells",
                i,
                core.hamming_distance(&cores[0])
            );
        }
    };
}
