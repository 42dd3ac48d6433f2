//! Request parameters attached to a record (GET, POST and the merged REQUEST view)

use std::collections::BTreeMap;

use anyhow::{Context, Result};

/// Ordered parameter map
pub type Params = BTreeMap<String, String>;

/// Query and body parameters of the request being served when the error happened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub get: Params,
    pub post: Params,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_get(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.get.insert(key.into(), value.into());
        self
    }

    pub fn with_post(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.post.insert(key.into(), value.into());
        self
    }

    /// Build a context from `key=value` strings
    pub fn from_pairs<G, P>(get: G, post: P) -> Result<Self>
    where
        G: IntoIterator,
        G::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        Ok(Self {
            get: parse_pairs(get).context("Invalid GET parameter")?,
            post: parse_pairs(post).context("Invalid POST parameter")?,
        })
    }

    /// GET merged with POST; POST wins on duplicate keys
    pub fn request(&self) -> Params {
        let mut merged = self.get.clone();
        merged.extend(self.post.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

fn parse_pairs<I>(pairs: I) -> Result<Params>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|pair| -> Result<(String, String)> {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .with_context(|| format!("Expected key=value, got '{}'", pair))?;
            if key.is_empty() {
                anyhow::bail!("Empty key in '{}'", pair);
            }
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Pretty-print a parameter map for the log file
pub fn render_params(params: &Params) -> String {
    format!("{:#?}", params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_merges_post_over_get() {
        let ctx = RequestContext::new()
            .with_get("page", "2")
            .with_get("id", "from-get")
            .with_post("id", "from-post");

        let merged = ctx.request();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["id"], "from-post");
        assert_eq!(merged["page"], "2");
    }

    #[test]
    fn test_from_pairs() {
        let ctx = RequestContext::from_pairs(["a=1", "b=x=y"], ["c="]).unwrap();
        assert_eq!(ctx.get["a"], "1");
        assert_eq!(ctx.get["b"], "x=y");
        assert_eq!(ctx.post["c"], "");
    }

    #[test]
    fn test_from_pairs_rejects_malformed() {
        assert!(RequestContext::from_pairs(["novalue"], Vec::<String>::new()).is_err());
        assert!(RequestContext::from_pairs(Vec::<String>::new(), ["=1"]).is_err());
    }

    #[test]
    fn test_render_params() {
        assert_eq!(render_params(&Params::new()), "{}");

        let ctx = RequestContext::new().with_get("q", "rust");
        let rendered = render_params(&ctx.get);
        assert!(rendered.contains("\"q\": \"rust\""));
    }
}
