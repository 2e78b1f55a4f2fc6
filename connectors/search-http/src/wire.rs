use serde::{Deserialize, Serialize};
use shoppe_core::RawHit;
use shoppe_query::CompiledQuery;

/// Body of `POST /1/indexes/*/queries`. We always send exactly one request.
#[derive(Debug, Serialize)]
pub(crate) struct MultiQueryRequest<'a> {
    pub requests: [QueryParams<'a>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryParams<'a> {
    pub index_name: &'a str,
    pub query: &'a str,
    pub facet_filters: Vec<Vec<String>>,
    pub numeric_filters: Vec<String>,
}

impl<'a> From<&'a CompiledQuery> for MultiQueryRequest<'a> {
    fn from(query: &'a CompiledQuery) -> Self {
        MultiQueryRequest {
            requests: [QueryParams {
                index_name: &query.index_selector,
                query: &query.search_term,
                facet_filters: query.facet_filters(),
                numeric_filters: query.numeric_filters(),
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MultiQueryResponse {
    pub results: Vec<QueryResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryResult {
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

impl MultiQueryResponse {
    pub fn into_hits(self) -> Option<Vec<RawHit>> { self.results.into_iter().next().map(|result| result.hits) }
}
