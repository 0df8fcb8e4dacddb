//! Paging through trip search results.
//!
//! OJP has no server-side paging for trips: each page is a fresh search
//! anchored at a time. [`PaginatedTripLoader`] moves that anchor to the
//! edges of what has been shown and filters out trips seen before.

mod cursor;


pub use cursor::PaginatedTripLoader;
