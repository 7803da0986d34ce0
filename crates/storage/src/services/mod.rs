pub mod approval;
pub mod category_resolution;
pub mod championship;
pub mod ranking;
pub mod scoring;
