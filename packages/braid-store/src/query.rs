use serde_json::{Map, Value, json};

use crate::{SearchQuery, Sort, TsRange};

/// Match clauses for a filter on the selected channels; the caller decides
/// how they combine.
pub fn channel_filters(channels: &[String]) -> Vec<Value> {
	channels.iter().map(|channel| json!({ "match": { "channel": channel } })).collect()
}

fn range_clause(range: &TsRange) -> Value {
	let mut bounds = Map::new();

	if let Some(gt) = range.gt {
		bounds.insert("gt".to_string(), json!(gt));
	}
	if let Some(gte) = range.gte {
		bounds.insert("gte".to_string(), json!(gte));
	}
	if let Some(lte) = range.lte {
		bounds.insert("lte".to_string(), json!(lte));
	}

	json!({ "range": { "ts": bounds } })
}

fn sort_clause(sort: Sort) -> Value {
	let order = match sort {
		Sort::Ascending => "asc",
		Sort::Descending => "desc",
	};

	json!([{ "ts": { "order": order } }])
}

/// Renders the full `_search` request body for a query.
pub fn render(query: &SearchQuery) -> Value {
	let mut must = Vec::new();

	if let Some(text) = query.text.as_deref() {
		must.push(json!({ "match": { "text": text } }));
	}
	if let Some(range) = query.ts_range.as_ref() {
		must.push(range_clause(range));
	}
	if !query.channels.is_empty() {
		must.push(json!({ "bool": { "should": channel_filters(&query.channels) } }));
	}

	let mut body = Map::new();

	body.insert("query".to_string(), json!({ "bool": { "must": must } }));
	body.insert("sort".to_string(), sort_clause(query.sort));
	body.insert("from".to_string(), json!(query.from));
	body.insert("size".to_string(), json!(query.size));

	if query.track_scores {
		body.insert("track_scores".to_string(), json!(true));
	}

	Value::Object(body)
}
