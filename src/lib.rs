// Copyright 2019 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A recognizer for context-free grammars.
//!
//! Grammars are given as text rules, one per line:
//!
//! ```text
//! S -> S "+" M | M
//! M -> "1" | "2"
//! ```
//!
//! and sentences are whitespace separated tokens. Recognition uses the Earley
//! algorithm, so any context-free grammar is accepted, including left
//! recursive and ambiguous ones.
//!
//! ```
//! let g = cfgmatch::compile(&["S -> S \"+\" M | M", "M -> \"1\" | \"2\""])
//!   .unwrap();
//! assert!(cfgmatch::matches(&g, "1 + 2 + 1"));
//! assert!(!cfgmatch::matches(&g, "1 +"));
//! ```

#[macro_use]
extern crate derivative;

pub mod grammar;
pub mod matcher;
pub mod parsers;
pub mod start_grammar;
pub mod state;
pub mod utils;

pub use grammar::{
  compile, compile_with_root, CompileError, GrammarCompiler, TextGrammar,
};
pub use matcher::Matcher;

/// Returns true if `sentence` derives from the root of `grammar`.
///
/// Builds a fresh `Matcher` for the call. Use a `Matcher` directly to match
/// many sentences against the same grammar.
pub fn matches(grammar: &TextGrammar, sentence: &str) -> bool {
  Matcher::new(grammar).matches(sentence)
}
