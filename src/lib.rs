// lib.rs - Library exports for integration tests

pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod rates;
pub mod web;
