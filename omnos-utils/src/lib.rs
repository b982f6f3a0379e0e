//! # omnos utilities
//!
//! A handful of independent helpers, each usable on its own:
//!
//! - [`memo`](mod@memo) — async result memoization with in-flight call sharing
//! - [`color`] — ANSI terminal styles (`colors::red("hi")`)
//! - [`shuffle`](mod@shuffle) — in-place Fisher–Yates shuffle
//! - [`delay`](mod@delay) — cooperative sleep
//! - [`merge`](mod@merge) — shallow merge of sequences or mappings
//! - [`text`] — [`capitalize`]
//! - [`timing`] — elapsed-milliseconds measurement
//!
//! Ambient pieces: [`config`] (TOML), [`telemetry`] (`tracing` subscriber
//! setup) and [`error`].

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod config;
pub mod delay;
pub mod error;
pub mod memo;
pub mod merge;
pub mod shuffle;
pub mod telemetry;
pub mod text;
pub mod timing;

pub use color::{Palette, Style, colors};
pub use config::UtilsConfig;
pub use delay::delay;
pub use error::UtilError;
pub use memo::{Memo, MemoError, MemoStats, memo};
pub use merge::{Merge, merge, merge_values};
pub use shuffle::{shuffle, shuffle_with};
pub use text::capitalize;
pub use timing::{time, time_blocking, try_time, try_time_blocking};
