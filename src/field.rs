//! Field descriptors: `[css][@attr] [| filter: args]*`.
//!
//! A descriptor picks the first element matching `css` below a scope element
//! (or the scope element itself when `css` is empty) and reads either its
//! trimmed text or the given attribute. `href` and `src` attributes are
//! resolved against the page URL. Filters then post-process the value.

use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use reqwest::Url;
use scraper::{ElementRef, Selector};

const URL_ATTRS: [&str; 2] = ["href", "src"];

#[derive(Debug, Clone)]
pub struct Field {
    css: Option<Selector>,
    attr: Option<String>,
    filters: Vec<Filter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Character range with `String.prototype.slice` semantics
    Slice(i64, Option<i64>),
}

impl Field {
    pub fn extract(&self, scope: ElementRef, page_url: &Url) -> Option<String> {
        let elem = match &self.css {
            Some(css) => scope.select(css).next()?,
            None => scope,
        };

        let value = match &self.attr {
            Some(attr) => {
                let raw = elem.value().attr(attr)?;
                if URL_ATTRS.contains(&attr.as_str()) {
                    page_url
                        .join(raw)
                        .map(|u| u.to_string())
                        .unwrap_or_else(|_| raw.to_string())
                } else {
                    raw.to_string()
                }
            }
            None => elem.text().collect::<String>().trim().to_string(),
        };

        Some(self.filters.iter().fold(value, |v, f| f.apply(&v)))
    }
}

impl FromStr for Field {
    type Err = anyhow::Error;

    fn from_str(descriptor: &str) -> Result<Self> {
        let mut parts = descriptor.split('|');
        let target = parts.next().unwrap_or_default().trim();

        let (css, attr) = match target.rsplit_once('@') {
            Some((css, attr)) if !attr.trim().is_empty() => (css.trim(), Some(attr.trim())),
            Some(_) => bail!("Missing attribute name in {descriptor:?}"),
            None => (target, None),
        };

        let css = if css.is_empty() {
            None
        } else {
            let sel = Selector::parse(css)
                .map_err(|e| anyhow!("Invalid selector {css:?} in {descriptor:?}: {e}"))?;
            Some(sel)
        };

        let filters = parts
            .map(|f| f.parse::<Filter>())
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            css,
            attr: attr.map(String::from),
            filters,
        })
    }
}

impl Filter {
    pub fn apply(&self, value: &str) -> String {
        match *self {
            Self::Slice(start, end) => slice(value, start, end),
        }
    }
}

impl FromStr for Filter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, args) = match s.split_once(':') {
            Some((name, args)) => (name.trim(), args.trim()),
            None => (s.trim(), ""),
        };

        let args = args
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(|a| {
                a.parse::<i64>()
                    .map_err(|e| anyhow!("Invalid argument {a:?} for filter {name}: {e}"))
            })
            .collect::<Result<Vec<_>>>()?;

        match (name, args.as_slice()) {
            ("slice", [start]) => Ok(Self::Slice(*start, None)),
            ("slice", [start, end]) => Ok(Self::Slice(*start, Some(*end))),
            ("slice", _) => bail!("Filter slice expects 1 or 2 arguments, got: {s:?}"),
            _ => bail!("Unknown filter: {name:?}"),
        }
    }
}

fn slice(value: &str, start: i64, end: Option<i64>) -> String {
    let len = value.chars().count() as i64;
    let clamp = |i: i64| if i < 0 { (len + i).max(0) } else { i.min(len) };

    let from = clamp(start);
    let to = end.map(clamp).unwrap_or(len);
    if from >= to {
        return String::new();
    }

    value
        .chars()
        .skip(from as usize)
        .take((to - from) as usize)
        .collect()
}
