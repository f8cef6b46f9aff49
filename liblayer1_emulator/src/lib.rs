//! # layer1_emulator
//!
//! layer1_emulator is a software emulation of the fixed-function encoding done
//! by the Layer-1 calorimeter-trigger front-end board, written in Rust. It
//! takes per-tower ECAL and HCAL readings, places each at its physical
//! (ieta, iphi) position, re-addresses that geometry into the board's
//! 72-link x 40-slot x 2-sub-tower optical-link layout, packs each tower
//! into its 16-bit hardware word, and renders the full link set as a
//! human-readable hex dump for offline comparison against captured hardware
//! output.
//!
//! ## Building & Install
//!
//! To build and install the CLI use `cargo install --path ./layer1_emulator_cli`
//! from the top level layer1_emulator repository.
//!
//! ## Configuration
//!
//! The CLI is driven by a YAML configuration file:
//!
//! ```yml
//! event_path: None
//! output_path: None
//! debug: false
//! ```
//!
//! - `event_path`: full path to the YAML event file to emulate
//! - `output_path`: full path the text dump is written to
//! - `debug`: when true, hits above a small energy threshold are echoed to
//!   the log as they are ingested
//!
//! A template can be generated with the CLI's `new` subcommand.
//!
//! ## Event file format
//!
//! The event file is a YAML list of events, each carrying its identifiers
//! and tower hits:
//!
//! ```yml
//! - run: 1
//!   lumi: 1
//!   event: 1
//!   hits:
//!     - detector: ecal
//!       ieta: 1
//!       iphi: 1
//!       energy: 10
//!       fine_grain: true
//! ```
//!
//! ## Output
//!
//! One block per event, matching the hardware-comparison tooling's expected
//! layout byte-for-byte:
//!
//! ```text
//! run: 1 lumi: 1 event: 1
//! Link 00: 800F0000 00000000 ... (40 words)
//! ...
//! Link 71: 00000000 ...
//! <blank line>
//! ```
//!
//! Each 8-digit word is the big-endian concatenation of a slot's 4 packed
//! bytes: sub-tower 1's 16-bit word in the high half, sub-tower 0's in the
//! low half.
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod link_address;
pub mod links;
pub mod process;
pub mod trigger_tower;
