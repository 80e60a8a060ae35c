use anyhow::{Context, Result};
use futures::{future, join};
use scraper::Selector;

use crate::config::ScrapeConfig;
use crate::error::{ErrorLog, Failure};
use crate::fetcher::{parse_scope, Fetcher, PageSource};
use crate::field::Field;
use crate::record::ProductRecord;
use crate::sink;

/// Catalog page → category link → product links → product records → CSV
pub struct Pipeline<S> {
    config: ScrapeConfig,
    fetcher: Fetcher<S>,
    error_log: ErrorLog,
    navigation: (Selector, Field),
    listing: (Selector, Field),
    detail: (Selector, Vec<(String, Field)>),
}

impl<S> Pipeline<S>
where
    S: PageSource,
{
    pub fn new(config: ScrapeConfig, source: S) -> Result<Self> {
        let navigation = (
            parse_scope(&config.navigation.scope)?,
            config.navigation.field.parse::<Field>()?,
        );
        let listing = (
            parse_scope(&config.listing.scope)?,
            config.listing.field.parse::<Field>()?,
        );
        let detail_fields = config
            .detail
            .fields
            .iter()
            .map(|(name, descriptor)| Ok((name.clone(), descriptor.parse::<Field>()?)))
            .collect::<Result<Vec<(String, Field)>>>()?;
        let detail = (parse_scope(&config.detail.scope)?, detail_fields);

        Ok(Self {
            error_log: ErrorLog::new(&config.error_log),
            fetcher: Fetcher::new(source),
            config,
            navigation,
            listing,
            detail,
        })
    }

    /// The category page linked from the root page navigation
    pub async fn catalog_stage(&self) -> Result<String> {
        let (scope, field) = &self.navigation;
        let catalog_url = self
            .fetcher
            .fetch_one(&self.config.root_url, scope, field)
            .await?;
        log::info!("Catalog page: {catalog_url}");
        Ok(catalog_url)
    }

    pub async fn listing_stage(&self, catalog_url: &str) -> Result<Vec<String>> {
        let (scope, field) = &self.listing;
        let product_urls = self.fetcher.fetch_list(catalog_url, scope, field).await?;
        log::info!("Found {} product pages", product_urls.len());
        Ok(product_urls)
    }

    /// Fetches every product page at once. Groups come back in the order of
    /// `product_urls`, and a single failure fails the whole stage.
    pub async fn detail_stage(&self, product_urls: &[String]) -> Result<Vec<Vec<ProductRecord>>> {
        let (scope, fields) = &self.detail;
        let fetches = product_urls.iter().map(|url| async move {
            let group = self
                .fetcher
                .fetch_records(url, scope, fields)
                .await
                .with_context(|| format!("Couldn't scrap product page {url}"))?;
            Ok::<_, anyhow::Error>(
                group
                    .into_iter()
                    .map(ProductRecord::from)
                    .collect::<Vec<_>>(),
            )
        });
        future::try_join_all(fetches).await
    }

    pub async fn scrape(&self) -> Result<Vec<ProductRecord>> {
        let catalog_url = self.catalog_stage().await.context("Catalog stage failed")?;
        let product_urls = self
            .listing_stage(&catalog_url)
            .await
            .context("Listing stage failed")?;
        let groups = self
            .detail_stage(&product_urls)
            .await
            .context("Detail stage failed")?;
        Ok(sink::flatten(groups))
    }

    /// Scrapes while making sure the data directory exists, then writes the
    /// CSV file. A failed scrape writes one line to the error log and no CSV.
    /// Only I/O failures on the CSV or the error log are returned.
    pub async fn run(&self) -> Result<()> {
        let (dir, scraped) = join!(
            sink::ensure_dir(&self.config.data_dir, &self.error_log),
            self.scrape()
        );
        dir?;

        match scraped {
            Ok(records) => {
                let path = sink::write_csv(&records, &self.config.data_dir)?;
                log::info!("Wrote {} products to {}", records.len(), path.display());
            }
            Err(e) => {
                log::error!("Scraping {} failed: {e:?}", self.config.root_url);
                let failure = Failure::classify(&e, &self.config.root_url);
                self.error_log.append(&failure)?;
            }
        }

        Ok(())
    }
}
