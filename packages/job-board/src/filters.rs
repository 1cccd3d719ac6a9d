//! Filter dimensions and the state that holds them.
//!
//! Every dimension has a "no filter" sentinel: an empty string, `None`, or
//! the full salary range. Setters report whether anything actually changed so
//! the board only reschedules a fetch for real edits.

use jobs_client::{JobType, Location};

/// Lower bound of the salary slider, in lakhs per annum.
pub const GLOBAL_MIN_SALARY: u32 = 0;
/// Upper bound of the salary slider, in lakhs per annum.
pub const GLOBAL_MAX_SALARY: u32 = 100;

/// Inclusive salary range with `GLOBAL_MIN_SALARY <= min <= max <= GLOBAL_MAX_SALARY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SalaryRange {
    min: u32,
    max: u32,
}

impl SalaryRange {
    pub const FULL: SalaryRange = SalaryRange {
        min: GLOBAL_MIN_SALARY,
        max: GLOBAL_MAX_SALARY,
    };

    /// Clamp both bounds into the global range; bounds given in the wrong
    /// order are swapped.
    pub fn new(min: u32, max: u32) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min: lo.clamp(GLOBAL_MIN_SALARY, GLOBAL_MAX_SALARY),
            max: hi.clamp(GLOBAL_MIN_SALARY, GLOBAL_MAX_SALARY),
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }
}

impl Default for SalaryRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// Snapshot of every filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    /// Free-text title search; empty means no filter
    pub search: String,
    pub location: Option<Location>,
    pub job_type: Option<JobType>,
    /// Experience as typed; empty means no filter
    pub experience: String,
    pub salary: SalaryRange,
}

impl FilterCriteria {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Holds the live filter criteria for a session.
#[derive(Debug, Default)]
pub struct FilterState {
    criteria: FilterCriteria,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn snapshot(&self) -> FilterCriteria {
        self.criteria.clone()
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        replace(&mut self.criteria.search, search.into())
    }

    pub fn set_location(&mut self, location: Option<Location>) -> bool {
        replace(&mut self.criteria.location, location)
    }

    /// Text from a select box. Blank or unrecognised text clears the filter.
    pub fn set_location_text(&mut self, text: &str) -> bool {
        self.set_location(parse_choice(text))
    }

    pub fn set_job_type(&mut self, job_type: Option<JobType>) -> bool {
        replace(&mut self.criteria.job_type, job_type)
    }

    /// Text from a select box. Blank or unrecognised text clears the filter.
    pub fn set_job_type_text(&mut self, text: &str) -> bool {
        self.set_job_type(parse_choice(text))
    }

    pub fn set_experience(&mut self, experience: impl Into<String>) -> bool {
        replace(&mut self.criteria.experience, experience.into())
    }

    pub fn set_salary_range(&mut self, min: u32, max: u32) -> bool {
        replace(&mut self.criteria.salary, SalaryRange::new(min, max))
    }

    /// Move the lower handle; it can't pass the upper one.
    pub fn set_min_salary(&mut self, min: u32) -> bool {
        let current = self.criteria.salary;
        let min = min.min(current.max);
        self.set_salary_range(min, current.max)
    }

    /// Move the upper handle; it can't pass the lower one.
    pub fn set_max_salary(&mut self, max: u32) -> bool {
        let current = self.criteria.salary;
        let max = max.max(current.min);
        self.set_salary_range(current.min, max)
    }

    /// Numeric text input. Anything that isn't an integer unsets the bound.
    pub fn set_min_salary_text(&mut self, text: &str) -> bool {
        self.set_min_salary(parse_salary(text).unwrap_or(GLOBAL_MIN_SALARY))
    }

    /// Numeric text input. Anything that isn't an integer unsets the bound.
    pub fn set_max_salary_text(&mut self, text: &str) -> bool {
        self.set_max_salary(parse_salary(text).unwrap_or(GLOBAL_MAX_SALARY))
    }

    pub fn reset(&mut self) -> bool {
        replace(&mut self.criteria, FilterCriteria::default())
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn parse_choice<T: std::str::FromStr>(text: &str) -> Option<T> {
    if text.trim().is_empty() {
        return None;
    }
    match text.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!(text, "Unrecognised filter choice, clearing");
            None
        }
    }
}

/// Negative numbers clamp to zero; values past `u32` saturate.
fn parse_salary(text: &str) -> Option<u32> {
    let value: i64 = text.trim().parse().ok()?;
    Some(u32::try_from(value.max(0)).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_default_criteria() {
        let state = FilterState::new();
        assert!(state.criteria().is_default());
        assert!(state.criteria().salary.is_full());
    }

    #[test]
    fn setters_report_changes_only() {
        let mut state = FilterState::new();

        assert!(state.set_search("Engineer"));
        assert!(!state.set_search("Engineer"));
        assert!(state.set_location(Some(Location::Remote)));
        assert!(!state.set_location_text("remote"));
        assert!(state.set_job_type_text("Full-time"));
        assert!(state.set_experience("3"));
        assert!(!state.set_experience("3"));

        assert_eq!(state.criteria().job_type, Some(JobType::FullTime));
    }

    #[test]
    fn unknown_choice_clears_dimension() {
        let mut state = FilterState::new();
        state.set_location(Some(Location::Hybrid));

        assert!(state.set_location_text("moon base"));
        assert_eq!(state.criteria().location, None);
        assert!(!state.set_location_text(""));
    }

    #[test]
    fn salary_range_is_clamped_and_ordered() {
        let range = SalaryRange::new(150, 20);
        assert_eq!((range.min(), range.max()), (20, 100));

        let mut state = FilterState::new();
        state.set_salary_range(10, 50);

        // lower handle stops at the upper one and vice versa
        state.set_min_salary(80);
        assert_eq!(state.criteria().salary, SalaryRange::new(50, 50));
        state.set_max_salary(5);
        assert_eq!(state.criteria().salary, SalaryRange::new(50, 50));
    }

    #[test]
    fn invalid_numeric_text_unsets_bound() {
        let mut state = FilterState::new();
        state.set_salary_range(10, 40);

        assert!(state.set_min_salary_text("ten"));
        assert_eq!(state.criteria().salary.min(), GLOBAL_MIN_SALARY);

        assert!(state.set_max_salary_text(""));
        assert_eq!(state.criteria().salary.max(), GLOBAL_MAX_SALARY);

        assert!(state.set_min_salary_text(" 25 "));
        assert_eq!(state.criteria().salary.min(), 25);

        assert!(state.set_min_salary_text("-4"));
        assert_eq!(state.criteria().salary.min(), 0);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = FilterState::new();
        state.set_search("Rust");
        state.set_salary_range(5, 10);

        assert!(state.reset());
        assert!(state.criteria().is_default());
        assert!(!state.reset());
    }
}
