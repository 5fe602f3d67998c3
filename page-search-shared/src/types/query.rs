//! Query model for the search backend.
//!
//! This module defines the boolean query clauses as a tagged sum type. Each
//! variant knows how to serialize itself into the JSON clause shape the
//! backend expects, which gives compile-time exhaustiveness when composing
//! boolean queries instead of stringly-typed discriminators.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Full-text match of a query string against a single field.
///
/// Serializes to `{"match": {<field>: {"query": <text>}}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchQuery {
    /// The field to match against.
    pub field: String,
    /// The query text.
    pub query: String,
}

impl MatchQuery {
    /// Create a new match query.
    pub fn new(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            query: query.into(),
        }
    }
}

/// Membership test of one or more terms against a single field.
///
/// Serializes to `{"terms": {<field>: [..], "minimum_should_match": n}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TermsQuery {
    /// The field to test.
    pub field: String,
    /// The candidate terms.
    pub terms: Vec<String>,
    /// How many of the terms must match. Defaults to 1.
    pub minimum_should_match: u32,
}

impl TermsQuery {
    /// Create a new terms query with `minimum_should_match` of 1.
    pub fn new(field: impl Into<String>, terms: Vec<String>) -> Self {
        Self {
            field: field.into(),
            terms,
            minimum_should_match: 1,
        }
    }

    /// Set how many of the terms must match.
    pub fn with_minimum_should_match(mut self, minimum_should_match: u32) -> Self {
        self.minimum_should_match = minimum_should_match;
        self
    }
}

/// Nested boolean combination of clauses.
///
/// Serializes to `{"bool": {"must": [..], "should": [..], "must_not": [..]}}`
/// with all three clause arrays always present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BoolQuery {
    pub must: Vec<Query>,
    pub should: Vec<Query>,
    pub must_not: Vec<Query>,
}

impl BoolQuery {
    /// Create an empty boolean query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause documents must satisfy.
    pub fn must(mut self, query: Query) -> Self {
        self.must.push(query);
        self
    }

    /// Append a clause documents should satisfy (scored, not required).
    pub fn should(mut self, query: Query) -> Self {
        self.should.push(query);
        self
    }

    /// Append a clause documents must not satisfy.
    pub fn must_not(mut self, query: Query) -> Self {
        self.must_not.push(query);
        self
    }
}

/// Wrapper marking an inner query as a filter context clause.
///
/// Holds an optional inner query which may be absent at construction and set
/// exactly once later. Pure data holder: no validation, no side effects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Filter {
    query: Option<Box<Query>>,
}

impl Filter {
    /// Create a filter, optionally wrapping an inner query.
    pub fn new(query: Option<Query>) -> Self {
        Self {
            query: query.map(Box::new),
        }
    }

    /// The wrapped query, if one has been set.
    pub fn query(&self) -> Option<&Query> {
        self.query.as_deref()
    }

    /// Set the wrapped query.
    pub fn set_query(&mut self, query: Query) {
        self.query = Some(Box::new(query));
    }
}

/// A single query clause.
///
/// The variant is the query kind; `kind()` exposes the constant tag string
/// each kind carries on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    Match(MatchQuery),
    Terms(TermsQuery),
    Bool(BoolQuery),
    Filter(Filter),
}

impl Query {
    /// The constant type tag for this query kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Query::Match(_) => "match",
            Query::Terms(_) => "terms",
            Query::Bool(_) => "bool",
            Query::Filter(_) => "filter",
        }
    }

    /// Serialize this clause into the JSON shape the backend expects.
    pub fn to_value(&self) -> Value {
        match self {
            Query::Match(m) => {
                let mut inner = Map::new();
                inner.insert(m.field.clone(), json!({ "query": m.query }));
                json!({ "match": inner })
            }
            Query::Terms(t) => {
                let mut inner = Map::new();
                inner.insert(t.field.clone(), json!(t.terms));
                inner.insert(
                    "minimum_should_match".to_string(),
                    json!(t.minimum_should_match),
                );
                json!({ "terms": inner })
            }
            Query::Bool(b) => json!({
                "bool": {
                    "must": b.must.iter().map(Query::to_value).collect::<Vec<_>>(),
                    "should": b.should.iter().map(Query::to_value).collect::<Vec<_>>(),
                    "must_not": b.must_not.iter().map(Query::to_value).collect::<Vec<_>>()
                }
            }),
            Query::Filter(f) => match f.query() {
                Some(inner) => json!({ "filter": inner.to_value() }),
                None => json!({ "filter": {} }),
            },
        }
    }
}
