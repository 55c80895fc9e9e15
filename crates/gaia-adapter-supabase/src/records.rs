//! Record access over the REST interface.
//!
//! Filters are sent as `column=op.value` query parameters and the sort as
//! `order=column.asc|desc`. Writes ask for the affected rows back with
//! `Prefer: return=representation`.

use crate::client::{SupabaseClient, read_json, transport};
use async_trait::async_trait;
use gaia_scheduling::{Filter, RecordStore, SelectQuery, UpstreamError};
use reqwest::Method;
use serde_json::{Map, Value};

const RETURN_REPRESENTATION: &str = "return=representation";

/// Query parameters for a select.
pub(crate) fn encode_select(query: &SelectQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), query.columns.clone())];
    params.extend(encode_filters(&query.filters));
    if let Some(order) = &query.order {
        let direction = if order.ascending { "asc" } else { "desc" };
        params.push(("order".to_string(), format!("{}.{}", order.column, direction)));
    }
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    params
}

fn encode_filters(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|f| (f.column.clone(), format!("{}.{}", f.op.as_str(), f.value)))
        .collect()
}

fn into_rows(body: Value) -> Result<Vec<Value>, UpstreamError> {
    match body {
        Value::Array(rows) => Ok(rows),
        Value::Null => Ok(Vec::new()),
        other => Err(UpstreamError::Decode(format!(
            "expected a list of rows, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl RecordStore for SupabaseClient {
    async fn insert(&self, table: &str, row: Map<String, Value>) -> Result<Value, UpstreamError> {
        tracing::debug!(table, "Inserting record");

        let response = self
            .request(Method::POST, &self.rest_url(table))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&Value::Object(row))
            .send()
            .await
            .map_err(transport)?;

        match read_json(response).await? {
            Value::Object(record) => Ok(Value::Object(record)),
            body => into_rows(body)?
                .into_iter()
                .next()
                .ok_or_else(|| UpstreamError::Decode("insert returned no rows".to_string())),
        }
    }

    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>, UpstreamError> {
        tracing::debug!(table, filters = query.filters.len(), "Selecting records");

        let response = self
            .request(Method::GET, &self.rest_url(table))
            .query(&encode_select(query))
            .send()
            .await
            .map_err(transport)?;

        into_rows(read_json(response).await?)
    }

    async fn update(
        &self,
        table: &str,
        patch: Map<String, Value>,
        filters: &[Filter],
    ) -> Result<Vec<Value>, UpstreamError> {
        tracing::debug!(table, fields = patch.len(), "Updating records");

        let response = self
            .request(Method::PATCH, &self.rest_url(table))
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&encode_filters(filters))
            .json(&Value::Object(patch))
            .send()
            .await
            .map_err(transport)?;

        into_rows(read_json(response).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_select() {
        let query = SelectQuery::new("status,data_hora")
            .filter(Filter::eq("id", "a-1"))
            .filter(Filter::neq("status", "cancelado"))
            .order_by("data_hora", false)
            .limit(1);

        assert_eq!(
            encode_select(&query),
            vec![
                ("select".to_string(), "status,data_hora".to_string()),
                ("id".to_string(), "eq.a-1".to_string()),
                ("status".to_string(), "neq.cancelado".to_string()),
                ("order".to_string(), "data_hora.desc".to_string()),
                ("limit".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_into_rows_rejects_objects() {
        assert_eq!(into_rows(json!([{"id": 1}])).unwrap().len(), 1);
        assert!(into_rows(Value::Null).unwrap().is_empty());
        assert!(matches!(
            into_rows(json!({"message": "nope"})),
            Err(UpstreamError::Decode(msg)) if msg.contains("object")
        ));
    }
}
