pub mod app;
pub mod synoptic;
pub mod theme;
