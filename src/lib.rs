mod config;
mod error;
mod fetcher;
mod field;
mod pipeline;
mod record;
mod sink;

pub use config::{DetailExtract, Extract, ScrapeConfig};
pub use error::{ErrorLog, Failure, Unresolved};
pub use fetcher::{capture_time, parse_scope, Fetcher, HttpSource, PageSource};
pub use field::{Field, Filter};
pub use pipeline::Pipeline;
pub use record::{Annotated, ProductRecord};
pub use sink::{csv_file_name, ensure_dir, flatten, write_csv, PRODUCT_HEADERS};

pub use anyhow;
