#![forbid(unsafe_code)]

//! Core: geometry, drag physics, spring animation, and title helpers.
//!
//! Everything in this crate is pure math or pure string handling. Toolkit
//! plumbing (views, gestures, presentation) lives in `demokit`, which feeds
//! scalar inputs into these functions.

pub mod animation;
pub mod geometry;
pub mod physics;
pub mod text;

pub use geometry::{Point, Rect, Size, Vector};
