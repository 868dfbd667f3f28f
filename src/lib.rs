//! chained-hashmap: a single-threaded, string-keyed hash map built on
//! separate chaining, with load-factor-driven resizing and an explicit
//! cursor over its entries.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the classic chained table honest and inspectable: byte-wise
//!   FNV placement, per-bucket ordered chains, whole-table rehash when the
//!   load factor crosses a configured threshold, and a two-level cursor
//!   that walks buckets then chain entries.
//! - Layers:
//!   - Chain<T> (with VecChain<T> as the default): the ordered-sequence
//!     collaborator each bucket delegates to. Tail insertion,
//!     position-based reads, position-based removal; nothing more.
//!   - ChainTable<V, C>: the table proper. Owns the bucket array, the
//!     entry count, and the resizing policy; computes placement from the
//!     FNV fold reduced modulo the current capacity.
//!   - Cursor / Keys: an explicit current_key/advance/is_finished state
//!     machine over (bucket index, chain position), plus a standard
//!     `Iterator` adapter on top of it.
//!
//! Constraints
//! - Single-threaded: no atomics, no locks; a caller sharing a table
//!   across threads must synchronize externally.
//! - Keys are always textual (`String` storage, `&str` queries) and unique
//!   by equality; inserting an existing key replaces its value in place.
//! - Keys are immutable post-insert; there is no `key_mut`.
//! - `len` always equals the number of entries physically present across
//!   all chains, and capacity never falls below the configured initial
//!   capacity.
//!
//! Ownership
//! - The table owns every key string and every stored value. Replacing a
//!   value drops the displaced one in place; `remove` hands the value back
//!   to the caller undropped; dropping the table drops everything left.
//!
//! Resizing
//! - Checked only after a successful new insertion (grow) or a successful
//!   removal (shrink), on the true floating-point ratio of `len` to
//!   capacity. Growth multiplies capacity by the resize factor; shrink
//!   divides it, and only while the result stays strictly above the
//!   initial capacity. A rehash moves every entry to its new bucket in old
//!   bucket-then-chain order; entries are never cloned.
//!
//! Iteration order
//! - Ascending bucket index, chain-insertion order within a bucket. The
//!   order has no relation to whole-table insertion order and is not
//!   stable across a resize, since rehashing redistributes entries.
//! - A live `Cursor`/`Keys` borrows the table immutably, so the borrow
//!   checker rejects structural mutation during iteration at compile time.
//!
//! Notes and non-goals
//! - Not thread-safe, by design.
//! - No ordered or insertion-ordered iteration.
//! - No non-string keys.
//! - No persistence; the table is purely in-memory.
//! - Absent keys are signaled with `Option`/`bool`, never a panic.

mod chain;
pub mod config;
pub mod fnv;
mod table;
mod table_proptest;

// Public surface
pub use chain::{Chain, VecChain};
pub use config::TableConfig;
pub use table::{ChainTable, Cursor, Entry, Keys};
