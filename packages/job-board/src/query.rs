//! Mapping from filter criteria to the listing query.

use std::fmt;

use url::form_urlencoded;

use crate::filters::{FilterCriteria, GLOBAL_MAX_SALARY, GLOBAL_MIN_SALARY};

/// Ordered key/value pairs sent as URL parameters on `GET /jobs`.
///
/// Keys always appear in the order `title`, `location`, `jobType`,
/// `experience`, `minSalary`, `maxSalary`, so equal criteria give
/// byte-identical queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `application/x-www-form-urlencoded` form, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }

    fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.pairs.push((key, value.into()));
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Build the query for `criteria`, leaving out every dimension that is at
/// its "no filter" default.
pub fn build_query(criteria: &FilterCriteria) -> QueryParams {
    let mut query = QueryParams::default();

    if !criteria.search.is_empty() {
        query.push("title", criteria.search.as_str());
    }
    if let Some(location) = criteria.location {
        query.push("location", location.as_str());
    }
    if let Some(job_type) = criteria.job_type {
        query.push("jobType", job_type.as_str());
    }
    if !criteria.experience.is_empty() {
        query.push("experience", criteria.experience.as_str());
    }
    if criteria.salary.min() > GLOBAL_MIN_SALARY {
        query.push("minSalary", criteria.salary.min().to_string());
    }
    if criteria.salary.max() < GLOBAL_MAX_SALARY {
        query.push("maxSalary", criteria.salary.max().to_string());
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::SalaryRange;
    use jobs_client::{JobType, Location};

    fn everything() -> FilterCriteria {
        FilterCriteria {
            search: "Rust Engineer".into(),
            location: Some(Location::Remote),
            job_type: Some(JobType::FullTime),
            experience: "3".into(),
            salary: SalaryRange::new(10, 60),
        }
    }

    #[test]
    fn default_criteria_give_empty_query() {
        let query = build_query(&FilterCriteria::default());
        assert!(query.is_empty());
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn keys_follow_fixed_order() {
        let query = build_query(&everything());
        let keys: Vec<&str> = query.pairs().iter().map(|(k, _)| *k).collect();

        assert_eq!(
            keys,
            ["title", "location", "jobType", "experience", "minSalary", "maxSalary"]
        );
        assert_eq!(
            query.to_query_string(),
            "title=Rust+Engineer&location=Remote&jobType=Full-time&experience=3&minSalary=10&maxSalary=60"
        );
    }

    #[test]
    fn equal_criteria_give_identical_queries() {
        assert_eq!(build_query(&everything()), build_query(&everything()));
        assert_eq!(
            build_query(&everything()).to_string(),
            build_query(&everything().clone()).to_string()
        );
    }

    #[test]
    fn search_only_maps_to_title() {
        let criteria = FilterCriteria {
            search: "Engineer".into(),
            ..Default::default()
        };
        let query = build_query(&criteria);

        assert_eq!(query.pairs(), &[("title", "Engineer".to_string())]);
    }

    #[test]
    fn salary_bounds_at_global_limits_are_omitted() {
        let criteria = FilterCriteria {
            salary: SalaryRange::new(GLOBAL_MIN_SALARY, GLOBAL_MAX_SALARY),
            ..Default::default()
        };
        let query = build_query(&criteria);

        assert_eq!(query.get("minSalary"), None);
        assert_eq!(query.get("maxSalary"), None);
    }

    #[test]
    fn salary_bound_just_inside_limit_is_sent() {
        let criteria = FilterCriteria {
            salary: SalaryRange::new(GLOBAL_MIN_SALARY + 1, GLOBAL_MAX_SALARY),
            ..Default::default()
        };
        let query = build_query(&criteria);

        assert_eq!(query.get("minSalary"), Some("1"));
        assert_eq!(query.get("maxSalary"), None);

        let criteria = FilterCriteria {
            salary: SalaryRange::new(GLOBAL_MIN_SALARY, GLOBAL_MAX_SALARY - 1),
            ..Default::default()
        };
        assert_eq!(build_query(&criteria).get("maxSalary"), Some("99"));
    }

    #[test]
    fn search_text_is_sent_verbatim() {
        let criteria = FilterCriteria {
            search: " C++ & Go ".into(),
            ..Default::default()
        };
        let query = build_query(&criteria);

        assert_eq!(query.get("title"), Some(" C++ & Go "));
        assert_eq!(query.to_query_string(), "title=+C%2B%2B+%26+Go+");
    }
}
