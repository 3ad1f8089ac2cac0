//! er2sql Core Types and Definitions
//!
//! This crate provides the foundational types shared by every er2sql diagram
//! format. It includes:
//!
//! - **Schema**: the normalized table/column/key model produced by the format
//!   parsers ([`schema`] module)
//! - **DDL**: deterministic rendering of a schema into `CREATE TABLE` and
//!   `ALTER TABLE ... ADD FOREIGN KEY` statements ([`ddl`] module)

pub mod ddl;
pub mod schema;
