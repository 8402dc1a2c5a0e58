pub mod color_averager;
pub mod grid_manager;
pub mod histogram;
pub mod pattern;
pub mod pixel;
pub mod pixel_source;
pub mod region;
pub mod spiral;
pub mod utils;
