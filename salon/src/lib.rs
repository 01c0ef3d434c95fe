//! Rules engine for the nail art matching game.
//!
//! The player paints five fingernails and places stickers to match a
//! per-level reference design. This crate owns the rules that decide whether
//! a sticker placement counts as correct, whether a level is solved, and how
//! the level queue and per-level statistics move forward. Rendering, drag
//! gestures, and asset loading belong to the host; the host feeds named
//! [`event::Event`]s in and re-renders from the resulting state snapshot.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Immutable level definitions and catalog loading |
//! | [`geometry`] | Clamping and angular distance helpers |
//! | [`evaluate`] | Per-sticker correctness against target tolerances |
//! | [`completion`] | Whole-level completion check and progress summary |
//! | [`state`] | Session snapshot types (placements, nail colors, stats) |
//! | [`event`] | The closed set of transitions the machine accepts |
//! | [`machine`] | `apply(state, event) -> state` |
//! | [`progress`] | Level queue, statistics merge, level locking |
//! | [`storage`] | Persistence bridge trait and slot load/save helpers |
//! | [`session`] | Host-side controller: auto-completion and autosave |
//! | [`web`] | `wasm-bindgen` surface backed by browser `localStorage` |
//! | [`consts`] | Shared constants (tolerance defaults, palette, slot names) |

pub mod catalog;
pub mod completion;
pub mod consts;
pub mod evaluate;
pub mod event;
pub mod geometry;
pub mod machine;
pub mod progress;
pub mod session;
pub mod state;
pub mod storage;
pub mod web;
