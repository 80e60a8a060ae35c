use std::path::PathBuf;

/// A scope selector and the field to pull out of it
#[derive(Debug, Clone)]
pub struct Extract {
    pub scope: String,
    pub field: String,
}

impl Extract {
    pub fn new(scope: &str, field: &str) -> Self {
        Self {
            scope: scope.to_string(),
            field: field.to_string(),
        }
    }
}

/// A scope selector and the named fields of one record
#[derive(Debug, Clone)]
pub struct DetailExtract {
    pub scope: String,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub root_url: String,
    pub navigation: Extract,
    pub listing: Extract,
    pub detail: DetailExtract,
    pub data_dir: PathBuf,
    pub error_log: PathBuf,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
            navigation: Extract::new(".nav .shirts", "a@href"),
            listing: Extract::new(".products li", "a@href"),
            detail: default_detail(),
            data_dir: PathBuf::from("./data"),
            error_log: PathBuf::from("scraper-error.log"),
            user_agent: default_user_agent(),
        }
    }
}

fn default_root_url() -> String {
    String::from("http://shirts4mike.com")
}

fn default_detail() -> DetailExtract {
    DetailExtract {
        scope: String::from(".section"),
        fields: vec![
            ("Title".into(), ".shirt-details h1 | slice: 4".into()),
            ("Price".into(), ".shirt-details .price".into()),
            ("ImageUrl".into(), ".shirt-picture img@src".into()),
        ],
    }
}

fn default_user_agent() -> String {
    String::from("Mozilla/5.0 (X11; Linux x86_64; rv:78.0) Gecko/20100101 Firefox/78.0")
}
