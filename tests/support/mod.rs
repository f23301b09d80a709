#![allow(dead_code)]

pub mod slip;
pub mod temp_db;
