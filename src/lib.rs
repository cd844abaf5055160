//! Strain-based difficulty calculation for vertically scrolling keys
//! charts.
//!
//! A chart is a fixed amount of columns and a chronologically ordered
//! sequence of notes, each either a tap or a hold. The calculation runs
//! a bank of decaying filters over the sequence, one per column plus one
//! across all columns, weighting chords by their shape and hold notes by
//! how awkwardly they overlap and release. The result is the chart's
//! strain curve: the peak combined strain of each 400ms section, ready
//! to be aggregated into a difficulty rating by the caller.
//!
//! # Example
//!
//! ```
//! use keystrain::{Chart, Difficulty, Note};
//!
//! let chart = Chart::new(4, vec![
//!     Note::tap(0, 0.0),
//!     Note::tap(2, 0.0),
//!     Note::hold(1, 250.0, 1_000.0),
//!     Note::tap(3, 500.0),
//! ])?;
//!
//! let attrs = Difficulty::new().calculate(&chart);
//!
//! assert_eq!(attrs.n_notes, 4);
//! assert_eq!(attrs.n_hold_notes, 1);
//! assert!(attrs.strains.iter().all(|strain| strain.is_finite()));
//! # Ok::<(), keystrain::ChartError>(())
//! ```
//!
//! Processing a chart note by note is available through
//! [`GradualStrains`].
//!
//! # Features
//!
//! | Flag      | Description                                    | Dependencies |
//! | --------- | ---------------------------------------------- | ------------ |
//! | `default` | No features enabled                            |              |
//! | `serde`   | (De)serialization of public types              | [`serde`]    |
//! | `tracing` | Emit debug events while calculating            | [`tracing`]  |
//!
//! [`serde`]: https://docs.rs/serde
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links, rustdoc::missing_crate_level_docs)]

mod util;

pub mod difficulty;
pub mod model;

pub use self::{
    difficulty::{Difficulty, attributes::StrainAttributes, gradual::GradualStrains},
    model::{
        chart::{Chart, ChartError},
        note::Note,
    },
};
