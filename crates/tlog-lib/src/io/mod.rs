pub mod data;
pub mod header;
pub mod table;
pub mod timestamps;
