//! Route tables

pub mod recipes;
