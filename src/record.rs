use serde::{Deserialize, Serialize};

/// Named field values extracted from one scope match, tagged with where and
/// when they were captured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotated {
    pub fields: Vec<(String, String)>,
    pub url: String,
    pub time: String,
}

impl Annotated {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductRecord {
    pub title: String,
    pub price: String,
    pub image_url: String,
    pub url: String,
    pub time: String,
}

impl From<Annotated> for ProductRecord {
    fn from(a: Annotated) -> Self {
        let field = |name| a.get(name).unwrap_or_default().to_string();
        Self {
            title: field("Title"),
            price: field("Price"),
            image_url: field("ImageUrl"),
            url: a.url.clone(),
            time: a.time.clone(),
        }
    }
}
