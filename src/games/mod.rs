pub mod ppt;
