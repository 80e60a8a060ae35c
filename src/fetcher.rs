use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use lazy_static::lazy_static;
use reqwest::header::USER_AGENT;
use reqwest::Url;
use scraper::{Html, Selector};

use crate::error::Unresolved;
use crate::field::Field;
use crate::record::Annotated;

lazy_static! {
    static ref HTTP_CLI: reqwest::Client = reqwest::ClientBuilder::new()
        .gzip(true)
        .deflate(true)
        .build()
        .expect("Couldn't build HTTP client");
}

/// Where page bodies come from
pub trait PageSource {
    fn get<'a>(&'a self, url: &'a Url) -> Pin<Box<dyn Future<Output = Result<String>> + 'a>>;
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    user_agent: String,
}

impl HttpSource {
    pub fn new(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
        }
    }
}

impl PageSource for HttpSource {
    fn get<'a>(&'a self, url: &'a Url) -> Pin<Box<dyn Future<Output = Result<String>> + 'a>> {
        Box::pin(download(&self.user_agent, url))
    }
}

async fn download(user_agent: &str, url: &Url) -> Result<String> {
    let resp = HTTP_CLI
        .get(url.clone())
        .header(USER_AGENT, user_agent)
        .send()
        .await
        .map_err(|e| {
            if is_dns_error(&e) {
                log::warn!("DNS lookup failed for {url} got: {e}");
                anyhow::Error::new(Unresolved {
                    host: url.host_str().unwrap_or_default().to_string(),
                })
            } else {
                anyhow::Error::new(e)
            }
        })?;

    Ok(resp.error_for_status()?.text().await?)
}

fn is_dns_error(e: &reqwest::Error) -> bool {
    if !e.is_connect() {
        return false;
    }
    let mut source = e.source();
    while let Some(cause) = source {
        if cause.to_string().contains("dns error") {
            return true;
        }
        source = cause.source();
    }
    false
}

pub fn parse_scope(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid scope selector {css:?}: {e}"))
}

pub fn capture_time() -> String {
    Local::now().format("%-I:%M:%S %p").to_string()
}

/// Downloads a page and extracts values from it
pub struct Fetcher<S> {
    source: S,
}

impl<S> Fetcher<S>
where
    S: PageSource,
{
    pub fn new(source: S) -> Self {
        Self { source }
    }

    async fn page(&self, url: &str) -> Result<(Url, Html)> {
        let url = Url::parse(url).with_context(|| format!("Invalid URL {url:?}"))?;
        log::debug!("GET {url}");
        let body = self.source.get(&url).await?;
        let html = Html::parse_document(&body);
        Ok((url, html))
    }

    /// The first value of `field` found within `scope`
    pub async fn fetch_one(&self, url: &str, scope: &Selector, field: &Field) -> Result<String> {
        let (url, html) = self.page(url).await?;
        html.select(scope)
            .find_map(|elem| field.extract(elem, &url))
            .ok_or_else(|| anyhow!("No match for {field:?} in {url}"))
    }

    /// The value of `field` for every `scope` match, in document order
    pub async fn fetch_list(
        &self,
        url: &str,
        scope: &Selector,
        field: &Field,
    ) -> Result<Vec<String>> {
        let (url, html) = self.page(url).await?;
        Ok(html
            .select(scope)
            .filter_map(|elem| field.extract(elem, &url))
            .collect())
    }

    /// One annotated record per `scope` match, in document order. Fields
    /// without a match are left empty.
    pub async fn fetch_records(
        &self,
        url: &str,
        scope: &Selector,
        fields: &[(String, Field)],
    ) -> Result<Vec<Annotated>> {
        let (page_url, html) = self.page(url).await?;
        let time = capture_time();
        Ok(html
            .select(scope)
            .map(|elem| Annotated {
                fields: fields
                    .iter()
                    .map(|(name, field)| {
                        let value = field.extract(elem, &page_url).unwrap_or_default();
                        (name.clone(), value)
                    })
                    .collect(),
                url: url.to_string(),
                time: time.clone(),
            })
            .collect())
    }
}
