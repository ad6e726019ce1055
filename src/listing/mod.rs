// Listing module - Funding requests, credibility votes and donations

mod model;
mod registry;

pub use model::{Listing, Vote};
pub use registry::ListingRegistry;
