//! JSON artifacts exchanged with the serving layer.
//!
//! # Output Structure
//!
//! ```text
//! data_dir/
//! ├── raw_news.json               # every crawled item
//! ├── raw_news_thời_sự.json       # one file per category
//! ├── raw_news_thế_giới.json
//! └── processed_news.json         # every item with its summary
//! ```

pub mod json;
