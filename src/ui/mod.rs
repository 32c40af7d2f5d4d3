pub mod lens;
pub mod plots;
pub mod viewdata;
pub mod windows;
