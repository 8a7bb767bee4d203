// Library root
// -----------
// This crate walks through the freight-tendering API: check access, log
// in, read reference data, create a tender and read its status back.
// The binary (`main.rs`) wires configuration and logging around `flow::run`.
//
// Module responsibilities:
// - `api`: blocking HTTP client holding the session headers.
// - `models`: JSON records sent to and received from the server.
// - `schedule`: tender timestamps and their wire format.
// - `flow`: the five stages, in order.
// - `config`: flags, environment, config file and prompts.
// - `ui`: console output for each stage.
// - `error`: call and stage failures, with exit codes.
pub mod api;
pub mod config;
pub mod error;
pub mod flow;
pub mod models;
pub mod schedule;
pub mod ui;
