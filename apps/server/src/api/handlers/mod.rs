//! HTTP request handlers

pub mod recipes;
