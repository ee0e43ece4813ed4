//! Configuration Tests
