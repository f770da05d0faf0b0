//! Types for HTTP requests

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct YoteQuery {
    pub username: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AccountQuery {
    pub username: Option<String>,
}
