pub mod overview;

pub use crate::domain::model::{MarsApiStatus, MarsProperty};
pub use crate::domain::ports::{ConfigProvider, ListingSource};
pub use crate::utils::error::Result;
