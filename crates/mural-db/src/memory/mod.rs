//! In-process store implementing every repository trait
//!
//! All tables live behind one mutex, so each trait method is atomic just like
//! its PostgreSQL counterpart. Intended for tests and local tooling.

mod store;

pub use store::MemoryStore;
