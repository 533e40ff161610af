pub mod downsize;
pub mod mosaic;
