//! # SceneKit Test Suite
//!
//! Unified test crate for behavior that spans more than one crate.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── scene_benchmarks.rs   # create / describe / normalize throughput
//! │
//! └── src/integration/
//!     ├── round_trip.rs         # create -> export -> compare, property based
//!     ├── factory_flows.rs      # batches, name uniqueness, conflict policy
//!     ├── modify_flows.rs       # minimal patches seen through the exporter
//!     └── replay.rs             # export to disk, replay into a fresh scene
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sk-tests
//!
//! # By category
//! cargo test -p sk-tests integration::round_trip::
//! cargo test -p sk-tests integration::replay::
//!
//! # Benchmarks
//! cargo bench -p sk-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
