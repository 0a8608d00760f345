use super::element::UiElement;
use super::value::UiValue;
use crate::provider::{ProviderError, ProviderErrorKind};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// How many matches a query expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Exactly one match; zero matches is an error.
    One,
    /// Zero or one match.
    OptionalOne,
    /// Any number of matches in document order.
    Many,
}

/// Which part of the tree a query searches, relative to its scope element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum QueryScope {
    /// All descendants (the scope element itself excluded), pre-order depth first.
    #[default]
    Descendants,
    /// Direct children only.
    Children,
}

/// What to do when a single-valued query matches more than one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    First,
}

/// Typed element query: a type name plus attribute constraints.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementQuery {
    type_name: Arc<str>,
    constraints: BTreeMap<String, UiValue>,
    cardinality: Cardinality,
    scope: QueryScope,
}

impl ElementQuery {
    pub fn new(type_name: impl Into<Arc<str>>, cardinality: Cardinality) -> Self {
        Self {
            type_name: type_name.into(),
            constraints: BTreeMap::new(),
            cardinality,
            scope: QueryScope::Descendants,
        }
    }

    pub fn single(type_name: impl Into<Arc<str>>) -> Self {
        Self::new(type_name, Cardinality::One)
    }

    pub fn optional(type_name: impl Into<Arc<str>>) -> Self {
        Self::new(type_name, Cardinality::OptionalOne)
    }

    pub fn many(type_name: impl Into<Arc<str>>) -> Self {
        Self::new(type_name, Cardinality::Many)
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<UiValue>) -> Self {
        self.constraints.insert(name.into(), value.into());
        self
    }

    pub fn with_object_name(self, object_name: &str) -> Self {
        self.with(super::attribute_names::OBJECT_NAME, object_name)
    }

    pub fn visible(self) -> Self {
        self.with(super::attribute_names::VISIBLE, true)
    }

    /// Restricts the query to direct children of the scope element.
    pub fn children(mut self) -> Self {
        self.scope = QueryScope::Children;
        self
    }

    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn constraints(&self) -> &BTreeMap<String, UiValue> {
        &self.constraints
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn scope(&self) -> QueryScope {
        self.scope
    }

    pub fn matches(&self, element: &dyn UiElement) -> bool {
        element.type_name() == self.type_name.as_ref()
            && self.constraints.iter().all(|(name, expected)| {
                element.property(name).is_some_and(|actual| actual.matches(expected))
            })
    }
}

impl Display for ElementQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let axis = match self.scope {
            QueryScope::Descendants => "//",
            QueryScope::Children => "./",
        };
        write!(f, "{axis}{}", self.type_name)?;
        if !self.constraints.is_empty() {
            let rendered: Vec<String> =
                self.constraints.iter().map(|(name, value)| format!("@{name}={value}")).collect();
            write!(f, "[{}]", rendered.join(" and "))?;
        }
        Ok(())
    }
}

/// Outcome of a query, shaped by its [`Cardinality`].
#[derive(Clone)]
pub enum QueryResult {
    One(Arc<dyn UiElement>),
    OptionalOne(Option<Arc<dyn UiElement>>),
    Many(Vec<Arc<dyn UiElement>>),
}

impl QueryResult {
    pub fn len(&self) -> usize {
        match self {
            QueryResult::One(_) => 1,
            QueryResult::OptionalOne(item) => usize::from(item.is_some()),
            QueryResult::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_single(self) -> Result<Arc<dyn UiElement>, ProviderError> {
        match self {
            QueryResult::One(element) | QueryResult::OptionalOne(Some(element)) => Ok(element),
            QueryResult::OptionalOne(None) => {
                Err(ProviderError::new(ProviderErrorKind::NotFound, "query returned no element"))
            }
            QueryResult::Many(mut items) => match items.len() {
                1 => Ok(items.remove(0)),
                0 => Err(ProviderError::new(
                    ProviderErrorKind::NotFound,
                    "query returned no element",
                )),
                count => Err(ProviderError::new(
                    ProviderErrorKind::Ambiguous,
                    format!("query returned {count} elements where one was expected"),
                )),
            },
        }
    }

    pub fn into_optional(self) -> Option<Arc<dyn UiElement>> {
        match self {
            QueryResult::One(element) => Some(element),
            QueryResult::OptionalOne(element) => element,
            QueryResult::Many(items) => items.into_iter().next(),
        }
    }

    pub fn into_many(self) -> Vec<Arc<dyn UiElement>> {
        match self {
            QueryResult::One(element) => vec![element],
            QueryResult::OptionalOne(element) => element.into_iter().collect(),
            QueryResult::Many(items) => items,
        }
    }
}

impl std::fmt::Debug for QueryResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let described: Vec<String> = match self {
            QueryResult::One(element) => vec![element.describe()],
            QueryResult::OptionalOne(element) => element.iter().map(|e| e.describe()).collect(),
            QueryResult::Many(items) => items.iter().map(|e| e.describe()).collect(),
        };
        f.debug_tuple("QueryResult").field(&described).finish()
    }
}

/// Evaluates `query` below `scope` and shapes the matches according to its cardinality.
pub fn evaluate(
    scope: &Arc<dyn UiElement>,
    query: &ElementQuery,
    duplicates: DuplicatePolicy,
) -> Result<QueryResult, ProviderError> {
    let matches = collect_matches(scope, query);
    shape(query, matches, duplicates)
}

fn collect_matches(scope: &Arc<dyn UiElement>, query: &ElementQuery) -> Vec<Arc<dyn UiElement>> {
    match query.scope {
        QueryScope::Children => {
            scope.children().into_iter().filter(|child| query.matches(child.as_ref())).collect()
        }
        QueryScope::Descendants => {
            let mut found = Vec::new();
            let mut stack: Vec<Arc<dyn UiElement>> = scope.children().into_iter().rev().collect();
            while let Some(node) = stack.pop() {
                if query.matches(node.as_ref()) {
                    found.push(Arc::clone(&node));
                }
                stack.extend(node.children().into_iter().rev());
            }
            found
        }
    }
}

fn shape(
    query: &ElementQuery,
    mut matches: Vec<Arc<dyn UiElement>>,
    duplicates: DuplicatePolicy,
) -> Result<QueryResult, ProviderError> {
    if query.cardinality == Cardinality::Many {
        return Ok(QueryResult::Many(matches));
    }

    if matches.len() > 1 && duplicates == DuplicatePolicy::Reject {
        return Err(ProviderError::new(
            ProviderErrorKind::Ambiguous,
            format!("{query} matched {} elements where one was expected", matches.len()),
        ));
    }

    let first = if matches.is_empty() { None } else { Some(matches.swap_remove(0)) };
    match (query.cardinality, first) {
        (Cardinality::One, Some(element)) => Ok(QueryResult::One(element)),
        (Cardinality::One, None) => {
            Err(ProviderError::new(ProviderErrorKind::NotFound, format!("{query} matched nothing")))
        }
        (_, element) => Ok(QueryResult::OptionalOne(element)),
    }
}
