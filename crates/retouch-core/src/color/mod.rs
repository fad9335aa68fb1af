pub mod hsv;
pub mod lab;
pub mod luma;
