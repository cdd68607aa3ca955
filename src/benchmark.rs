//! Industry reference values for lines of code per working day.

pub const SENIOR_DEV_LOC_PER_DAY: u32 = 20;
pub const AVERAGE_DEV_LOC_PER_DAY: u32 = 50;
pub const JUNIOR_DEV_LOC_PER_DAY: u32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub label: &'static str,
    pub benchmark: u32,
    pub multiplier: f64,
}

pub fn compare(loc_per_day: f64) -> Vec<Comparison> {
    [
        ("Senior Dev", SENIOR_DEV_LOC_PER_DAY),
        ("Industry Avg", AVERAGE_DEV_LOC_PER_DAY),
        ("Junior Dev", JUNIOR_DEV_LOC_PER_DAY),
    ]
    .into_iter()
    .map(|(label, benchmark)| Comparison {
        label,
        benchmark,
        multiplier: loc_per_day / f64::from(benchmark),
    })
    .collect()
}

/// Ratio of the after rate to the before rate; 0 when there is no before rate.
pub fn calculate_multiplier(before: f64, after: f64) -> f64 {
    if before <= 0.0 {
        return 0.0;
    }
    after / before
}
