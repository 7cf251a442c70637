use serde::{Deserialize, Serialize};
use std::fmt;

/// One property listing as returned by the Mars real-estate service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarsProperty {
    pub id: String,
    #[serde(rename = "img_src")]
    pub image_url: String,
    #[serde(rename = "type")]
    pub category: String,
    pub price: f64,
}

/// View state of the most recent fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarsApiStatus {
    #[default]
    Loading,
    Error,
    Done,
}

impl MarsApiStatus {
    pub fn is_settled(self) -> bool {
        !matches!(self, MarsApiStatus::Loading)
    }
}

impl fmt::Display for MarsApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MarsApiStatus::Loading => "LOADING",
            MarsApiStatus::Error => "ERROR",
            MarsApiStatus::Done => "DONE",
        };
        f.write_str(label)
    }
}
