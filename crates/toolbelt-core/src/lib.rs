pub mod config;
pub mod logging;

pub mod iotools;
pub mod strings;
pub mod typext;
pub mod web;
