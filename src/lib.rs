// Library root
// -----------
// This crate exposes the library surface for the bookshelf CLI. The binary
// (`main.rs`) wires these modules together into the interactive menu.
//
// Module responsibilities:
// - `book`: the fixed record shape and its JSON mapping.
// - `coerce`: turns raw prompt input into field values.
// - `storage`: whole-file load/save of the collection, plus an in-memory
//   backend for tests.
// - `repository`: collection operations and load-modify-save units.
// - `config`: environment-driven settings.
// - `ui`: the terminal menu flows.
pub mod book;
pub mod coerce;
pub mod config;
pub mod repository;
pub mod storage;
pub mod ui;
