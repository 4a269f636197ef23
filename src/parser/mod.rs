pub mod detail;
pub mod ingredients;
pub mod listing;

pub use detail::parse_detail;
pub use listing::parse_listing;
