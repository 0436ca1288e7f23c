pub mod favourites_queries;
pub mod memory_favourites;
pub mod product_queries;
