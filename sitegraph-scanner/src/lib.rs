pub mod crawler;
pub mod error;
pub mod fetcher;
pub mod inspect;
pub mod normalize;
pub mod result;
pub mod state;

pub use crawler::{Crawler, ProgressCallback};
pub use error::ScanError;
pub use fetcher::PageFetcher;
pub use result::{Edge, LinkClass, LinkMap};
