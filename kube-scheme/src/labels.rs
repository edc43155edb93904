//! Label selector evaluation for controllers consuming internal objects.
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, LabelSelectorRequirement};
use std::collections::{BTreeMap, BTreeSet};

type Map = BTreeMap<String, String>;

/// A single selector requirement
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    /// Label value is one of the set
    In(String, BTreeSet<String>),
    /// Label is absent, or its value is none of the set
    NotIn(String, BTreeSet<String>),
    /// Label has exactly this value
    Equal(String, String),
    /// Label is present
    Exists(String),
    /// Label is absent
    DoesNotExist(String),
    /// An unknown operator or a missing value list; never matches
    Invalid,
}

impl Expression {
    fn matches(&self, labels: &Map) -> bool {
        match self {
            Expression::In(key, values) => labels.get(key).is_some_and(|v| values.contains(v)),
            Expression::NotIn(key, values) => labels.get(key).map_or(true, |v| !values.contains(v)),
            Expression::Equal(key, value) => labels.get(key) == Some(value),
            Expression::Exists(key) => labels.contains_key(key),
            Expression::DoesNotExist(key) => !labels.contains_key(key),
            Expression::Invalid => false,
        }
    }
}

impl From<&LabelSelectorRequirement> for Expression {
    fn from(requirement: &LabelSelectorRequirement) -> Self {
        let key = requirement.key.clone();
        let values = requirement
            .values
            .as_ref()
            .map(|values| values.iter().cloned().collect::<BTreeSet<_>>());
        match (requirement.operator.as_str(), values) {
            ("In", Some(values)) => Expression::In(key, values),
            ("NotIn", Some(values)) => Expression::NotIn(key, values),
            ("Exists", _) => Expression::Exists(key),
            ("DoesNotExist", _) => Expression::DoesNotExist(key),
            _ => Expression::Invalid,
        }
    }
}

/// A conjunction of expressions evaluated against a label set
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct Selector(Vec<Expression>);

impl Selector {
    /// Whether the selector places no constraint at all
    pub fn selects_all(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every expression holds for `labels`
    pub fn matches(&self, labels: &Map) -> bool {
        self.0.iter().all(|expr| expr.matches(labels))
    }
}

impl From<&LabelSelector> for Selector {
    fn from(selector: &LabelSelector) -> Self {
        let equality = selector
            .match_labels
            .iter()
            .flatten()
            .map(|(k, v)| Expression::Equal(k.clone(), v.clone()));
        let expressions = selector.match_expressions.iter().flatten().map(Expression::from);
        Self(equality.chain(expressions).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> Map {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn match_labels_are_a_conjunction() {
        let selector = Selector::from(&LabelSelector {
            match_labels: Some(labels(&[("app", "web"), ("tier", "front")])),
            match_expressions: None,
        });
        assert!(selector.matches(&labels(&[("app", "web"), ("tier", "front"), ("x", "y")])));
        assert!(!selector.matches(&labels(&[("app", "web")])));
    }

    #[test]
    fn expressions_evaluate() {
        let selector = Selector::from(&LabelSelector {
            match_labels: None,
            match_expressions: Some(vec![
                LabelSelectorRequirement {
                    key: "env".into(),
                    operator: "In".into(),
                    values: Some(vec!["prod".into(), "staging".into()]),
                },
                LabelSelectorRequirement {
                    key: "canary".into(),
                    operator: "DoesNotExist".into(),
                    values: None,
                },
            ]),
        });
        assert!(selector.matches(&labels(&[("env", "prod")])));
        assert!(!selector.matches(&labels(&[("env", "dev")])));
        assert!(!selector.matches(&labels(&[("env", "prod"), ("canary", "true")])));
    }

    #[test]
    fn unknown_operator_never_matches() {
        let selector = Selector::from(&LabelSelector {
            match_labels: None,
            match_expressions: Some(vec![LabelSelectorRequirement {
                key: "env".into(),
                operator: "Near".into(),
                values: None,
            }]),
        });
        assert!(!selector.matches(&labels(&[("env", "prod")])));
    }

    #[test]
    fn empty_selector_selects_all() {
        let selector = Selector::from(&LabelSelector::default());
        assert!(selector.selects_all());
        assert!(selector.matches(&Map::new()));
    }
}
