//! Record store for the people service.
//! - `storage`: generic JSON file-backed map with whole-file read-modify-write.
//! - `people`: the person record, key parsing and the repository trait.
//! - `file`: the file-backed repository used by the HTTP layer.
//! - `errors`: the error taxonomy every operation reports.

pub mod errors;
pub mod file;
pub mod people;
pub mod storage;
