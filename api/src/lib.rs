//! This crate provides the basic interfaces and data structures shared by the
//! Lodestone RDF parsers.
//!
//! It is currently used by the [`lodestone_xml`](https://docs.rs/lodestone_xml/) crate.
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]
#![doc(test(attr(deny(warnings))))]

pub mod model;
pub mod parser;
