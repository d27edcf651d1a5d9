pub mod config;
pub mod consts;
pub mod error;
pub mod gallery;
pub mod identity;
pub mod media;
pub mod raster;
pub mod render;
pub mod store;
pub mod transform;
pub mod upload;
pub mod viewport;
