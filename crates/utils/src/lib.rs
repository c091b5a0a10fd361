pub mod casing;
pub mod pagination;
pub mod response;
