use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Pagination block of a backend list response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
}

/// `{ data, meta?, message? }` as returned by the backend.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Option<Meta>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One page of a list, with `meta` filled in even when the backend sent none.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: Meta,
}

impl<T> Page<T> {
    pub fn from_envelope(envelope: Envelope<Vec<T>>, params: &ListParams) -> Self {
        let meta = envelope.meta.unwrap_or_else(|| Meta {
            total: envelope.data.len() as u64,
            page: params.page,
            limit: params.limit,
            total_pages: None,
        });
        Self {
            items: envelope.data,
            meta,
        }
    }
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// `page`/`limit` plus whitelisted filters for a list request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    pub filters: Vec<(String, String)>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            filters: Vec::new(),
        }
    }
}

impl ListParams {
    /// Keys outside `allowed` and empty values are dropped; filters keep the
    /// order of `allowed` so the forwarded query string is stable.
    pub fn from_query(raw: &HashMap<String, String>, allowed: &[&str]) -> Self {
        let page = raw
            .get("page")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_PAGE)
            .max(1);
        let limit = raw
            .get("limit")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);

        let filters = allowed
            .iter()
            .filter_map(|key| {
                raw.get(*key)
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .map(|v| (key.to_string(), v.to_string()))
            })
            .collect();

        Self {
            page,
            limit,
            filters,
        }
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        query.extend(self.filters.iter().cloned());
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn page_and_limit_are_clamped() {
        let params = ListParams::from_query(&raw(&[("page", "0"), ("limit", "500")]), &[]);
        assert_eq!((params.page, params.limit), (1, 100));

        let params = ListParams::from_query(&raw(&[("page", "abc"), ("limit", "0")]), &[]);
        assert_eq!((params.page, params.limit), (1, 1));

        let params = ListParams::from_query(&raw(&[]), &[]);
        assert_eq!((params.page, params.limit), (1, 10));
    }

    #[test]
    fn only_whitelisted_non_empty_filters_survive() {
        let params = ListParams::from_query(
            &raw(&[
                ("status", "tersedia"),
                ("search", " "),
                ("drop", "table"),
                ("jenisMobil", "Hiace"),
            ]),
            &["search", "jenisMobil", "status"],
        );
        assert_eq!(
            params.to_query(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("jenisMobil".to_string(), "Hiace".to_string()),
                ("status".to_string(), "tersedia".to_string()),
            ]
        );
    }

    #[test]
    fn page_meta_is_synthesised_when_missing() {
        let envelope = Envelope {
            data: vec![1, 2, 3],
            meta: None,
            message: None,
        };
        let page = Page::from_envelope(envelope, &ListParams::default());
        assert_eq!(page.meta.total, 3);
        assert_eq!(page.meta.limit, 10);
    }
}
