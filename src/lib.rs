//! # fnlang
//!
//! A source-to-source translator for a tiny typed-function language.
//!
//! The crate reads a single function definition such as
//!
//! ```text
//! function add(x: int, y: int): int { add(x, y); }
//! ```
//!
//! and renders it in a C-like target syntax, with the body tab-indented:
//!
//! ```text
//! int add(int x, int y){
//! 	add(x,y);
//! }
//! ```
//!
//! Pipeline
//!
//! ```text
//! source → lexing → tokens → parsing → AST → generation → text
//! ```
//!
//! Each stage lives in its own module under [`fnlang`] and fails with its own
//! error type. [`fnlang::pipeline`] wires them together and is what the
//! `fnlang` binary drives.

pub mod fnlang;
