use crate::models::job::Job;
use crate::utils::normalization::normalize;

/// A reviewer's territory. An empty list on either dimension means no
/// restriction on that dimension, not "match nothing".
#[derive(Debug, Clone, Default)]
pub struct ReviewerScope {
    states: Vec<String>,
    cities: Vec<String>,
}

impl ReviewerScope {
    pub fn new(states: &[String], cities: &[String]) -> Self {
        Self {
            states: states.iter().map(|s| normalize(s)).collect(),
            cities: cities.iter().map(|c| normalize(c)).collect(),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.states.is_empty() && self.cities.is_empty()
    }

    /// Stable cache-key component for this scope.
    pub fn fingerprint(&self) -> String {
        if self.is_unrestricted() {
            return "all".to_string();
        }
        format!("{}|{}", self.states.join(","), self.cities.join(","))
    }

    pub fn allows(&self, state: Option<&str>, city: Option<&str>) -> bool {
        let state_ok = self.states.is_empty()
            || state.map_or(false, |s| self.states.contains(&normalize(s)));
        let city_ok = self.cities.is_empty()
            || city.map_or(false, |c| self.cities.contains(&normalize(c)));
        state_ok && city_ok
    }
}

/// Narrows a job list to the reviewer's territory.
pub fn scope_jobs(jobs: Vec<Job>, scope: &ReviewerScope) -> Vec<Job> {
    if scope.is_unrestricted() {
        return jobs;
    }
    jobs.into_iter()
        .filter(|j| scope.allows(j.state.as_deref(), j.city.as_deref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(states: &[&str], cities: &[&str]) -> ReviewerScope {
        ReviewerScope::new(
            &states.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            &cities.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
        )
    }

    #[test]
    fn state_only_scope_ignores_city() {
        let scope = scope(&["SP"], &[]);
        assert!(scope.allows(Some("SP"), Some("Campinas")));
        assert!(scope.allows(Some("sp"), None));
        assert!(!scope.allows(Some("RJ"), Some("Campinas")));
    }

    #[test]
    fn state_and_city_scope_intersects() {
        let scope = scope(&["SP"], &["São Paulo"]);
        assert!(scope.allows(Some("SP"), Some("Sao Paulo")));
        assert!(!scope.allows(Some("SP"), Some("Campinas")));
        assert!(!scope.allows(Some("RJ"), Some("São Paulo")));
    }

    #[test]
    fn empty_scope_is_unrestricted() {
        let scope = scope(&[], &[]);
        assert!(scope.is_unrestricted());
        assert!(scope.allows(None, None));
    }

    #[test]
    fn comparison_is_accent_insensitive() {
        let scope = scope(&["sp"], &["sao paulo"]);
        assert!(scope.allows(Some("SP"), Some("SÃO PAULO")));
    }

    #[test]
    fn missing_location_fails_restricted_dimension() {
        let scope = scope(&["SP"], &[]);
        assert!(!scope.allows(None, Some("São Paulo")));
    }
}
