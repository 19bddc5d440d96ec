// src/test_support.rs

pub mod in_memory_backend;
