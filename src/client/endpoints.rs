//! URL construction for every remote surface the exporter talks to

use crate::Result;
use url::Url;

/// Resolves endpoint URLs against the configured base URL
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Creates the endpoint set for `base_url`
    ///
    /// A trailing slash is added when missing so that a base with a path
    /// prefix keeps it when endpoints are joined onto it.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Structured query endpoint
    pub fn graphql(&self) -> Result<Url> {
        Ok(self.base.join("graphql")?)
    }

    /// Legacy list of all algorithm problems with per-account status
    pub fn problem_list(&self) -> Result<Url> {
        Ok(self.base.join("api/problems/algorithms/")?)
    }

    /// One page of the legacy submissions dump for a problem
    pub fn submissions(
        &self,
        slug: &str,
        offset: usize,
        limit: u32,
        last_key: Option<&str>,
    ) -> Result<Url> {
        let mut url = self.base.join(&format!("api/submissions/{}/", slug))?;
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string())
            .append_pair("lastkey", last_key.unwrap_or(""));
        Ok(url)
    }

    /// Rendered problem page
    pub fn problem_page(&self, slug: &str) -> Result<Url> {
        Ok(self.base.join(&format!("problems/{}/", slug))?)
    }

    /// Rendered submission detail page
    pub fn submission_page(&self, submission_id: &str) -> Result<Url> {
        Ok(self
            .base
            .join(&format!("submissions/detail/{}/", submission_id))?)
    }
}
