#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;

use catalog_scraper::anyhow::{anyhow, Result};
use catalog_scraper::{PageSource, ScrapeConfig, Unresolved};
use reqwest::Url;

pub const ROOT: &str = "http://shop.test";

/// In-memory site, pages are keyed by normalized URL
#[derive(Debug, Default)]
pub struct MockSite {
    pages: HashMap<String, (String, Duration)>,
    unresolved: bool,
}

impl MockSite {
    pub fn unresolved() -> Self {
        Self {
            unresolved: true,
            ..Default::default()
        }
    }

    pub fn page(self, url: &str, body: &str) -> Self {
        self.slow_page(url, body, Duration::ZERO)
    }

    pub fn slow_page(mut self, url: &str, body: &str, delay: Duration) -> Self {
        let url = Url::parse(url).unwrap().to_string();
        self.pages.insert(url, (body.to_string(), delay));
        self
    }

    pub fn without(mut self, url: &str) -> Self {
        let url = Url::parse(url).unwrap().to_string();
        self.pages.remove(&url);
        self
    }
}

impl PageSource for MockSite {
    fn get<'a>(&'a self, url: &'a Url) -> Pin<Box<dyn Future<Output = Result<String>> + 'a>> {
        Box::pin(async move {
            if self.unresolved {
                return Err(Unresolved {
                    host: url.host_str().unwrap_or_default().to_string(),
                }
                .into());
            }
            let (body, delay) = self
                .pages
                .get(url.as_str())
                .ok_or_else(|| anyhow!("HTTP status client error (404 Not Found) for url ({url})"))?;
            if !delay.is_zero() {
                tokio::time::sleep(*delay).await;
            }
            Ok(body.clone())
        })
    }
}

pub fn root_page() -> String {
    r#"<html><body>
        <ul class="nav">
            <li class="shirts"><a href="shirts.php">Shirts</a></li>
            <li class="contact"><a href="contact.php">Contact</a></li>
        </ul>
    </body></html>"#
        .to_string()
}

pub fn catalog_page(ids: &[u32]) -> String {
    let items = ids
        .iter()
        .map(|id| format!(r#"<li><a href="shirt.php?id={id}"><img src="/img/{id}.jpg"></a></li>"#))
        .collect::<String>();
    format!(r#"<html><body><ul class="products">{items}</ul></body></html>"#)
}

pub fn product_page(title: &str, price: &str, image: &str) -> String {
    format!(
        r#"<html><body>
        <div class="section page">
            <div class="shirt-picture"><span><img src="{image}" alt="{title}"></span></div>
            <div class="shirt-details">
                <h1><span class="price">{price}</span> {title}</h1>
            </div>
        </div>
    </body></html>"#
    )
}

pub fn product_url(id: u32) -> String {
    format!("{ROOT}/shirt.php?id={id}")
}

/// Root, catalog and one product page per `(id, title, price, image)`
pub fn site(products: &[(u32, &str, &str, &str)]) -> MockSite {
    let ids = products.iter().map(|p| p.0).collect::<Vec<_>>();
    products.iter().fold(
        MockSite::default()
            .page(ROOT, &root_page())
            .page(&format!("{ROOT}/shirts.php"), &catalog_page(&ids)),
        |site, (id, title, price, image)| {
            site.page(&product_url(*id), &product_page(title, price, image))
        },
    )
}

pub fn config(dir: &Path) -> ScrapeConfig {
    ScrapeConfig {
        root_url: ROOT.to_string(),
        data_dir: dir.join("data"),
        error_log: dir.join("scraper-error.log"),
        ..Default::default()
    }
}

pub fn csv_files(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map_or(false, |ext| ext == "csv"))
            .collect(),
        Err(_) => vec![],
    }
}

pub fn log_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|s| s.lines().map(String::from).collect())
        .unwrap_or_default()
}
