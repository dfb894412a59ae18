//! Ordered query-string builder for WordPress list endpoints.

use url::form_urlencoded;

/// Query parameters in insertion order.
///
/// Scalar values are form-urlencoded. Id lists are written as a bare
/// comma-joined list (`categories=3,7`), which WordPress reads as a set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &'static str, value: impl ToString) -> Self {
        let value = value.to_string();
        let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
        self.pairs.push((key, encoded));
        self
    }

    /// Adds `key=a,b,c`. `None` adds nothing.
    pub fn set_ids(mut self, key: &'static str, ids: Option<&[u64]>) -> Self {
        if let Some(ids) = ids {
            let joined = ids
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(",");
            self.pairs.push((key, joined));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `path?k=v&...`, or just `path` when there are no parameters.
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            return path.to_string();
        }
        let query = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{path}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let q = Query::new().set("page", 2).set("per_page", 5);
        assert_eq!(q.append_to("/posts"), "/posts?page=2&per_page=5");
    }

    #[test]
    fn ids_are_comma_joined_verbatim() {
        let q = Query::new().set_ids("categories", Some([3, 7].as_slice()));
        assert_eq!(q.append_to("/pages"), "/pages?categories=3,7");
    }

    #[test]
    fn absent_ids_add_no_parameter() {
        let q = Query::new().set("slug", "x").set_ids("tags", None);
        assert_eq!(q.append_to("/posts"), "/posts?slug=x");
    }

    #[test]
    fn empty_id_list_still_adds_parameter() {
        let q = Query::new().set_ids("tags", Some([].as_slice()));
        assert_eq!(q.append_to("/posts"), "/posts?tags=");
    }

    #[test]
    fn scalar_values_are_form_encoded() {
        let q = Query::new().set("slug", "café & bar");
        assert_eq!(q.append_to("/pages"), "/pages?slug=caf%C3%A9+%26+bar");
    }

    #[test]
    fn no_parameters_leaves_path_alone() {
        assert_eq!(Query::new().append_to("/llms.txt"), "/llms.txt");
    }
}
