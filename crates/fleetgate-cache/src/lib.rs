//! # fleetgate-cache
//!
//! In-memory implementation of the [`fleetgate_core::traits::CacheProvider`]
//! trait, backed by `moka`. Used for bounded-staleness caching of
//! role/permission unions; revocation state is never cached here.

pub mod memory;

pub use memory::MemoryCacheProvider;
