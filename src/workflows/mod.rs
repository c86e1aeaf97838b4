pub mod downloader;
pub mod episodes;
pub mod filter;
pub mod sync;

#[cfg(test)]
pub mod mock;
