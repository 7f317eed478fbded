//! Cache module for Redis-based revocation
//!
//! This module provides the Redis client with connect and command retries,
//! and the TTL-native revocation store built on it.

pub mod redis_client;
pub mod revocation_cache;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use revocation_cache::{RedisRevocationStore, DEFAULT_KEY_PREFIX};
