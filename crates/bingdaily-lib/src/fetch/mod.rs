mod page;

pub use page::PageFetcher;
