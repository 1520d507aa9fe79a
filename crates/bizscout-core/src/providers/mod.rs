pub mod yelp;

pub use yelp::YelpProvider;
