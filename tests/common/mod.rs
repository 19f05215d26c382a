#![allow(dead_code)]


pub use fixtures::*;
