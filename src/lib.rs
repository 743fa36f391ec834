//! Meeting app shell precache and cache-first fetch
//!
//! A service-worker-style cache shim for the meeting app: `install`
//! pre-caches a fixed list of app shell resources from an origin server into
//! a named durable cache, and `handle_fetch` answers requests from that
//! cache when possible, falling back to a single live network fetch on a
//! miss. The cache store and the network are injected capabilities so both
//! operations can be exercised in tests with in-memory substitutes.

pub mod cache;
pub mod cli;
pub mod net;
pub mod worker;
