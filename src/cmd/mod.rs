pub mod play;
pub mod review;
