pub mod dataset;
pub mod explore;
pub mod feed;
pub mod installations;
pub mod projections;
