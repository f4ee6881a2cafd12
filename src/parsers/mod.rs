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

use crate::grammar::Terminal;

pub mod earley;

/// A terminal type that can be compared against input tokens.
pub trait MatchesToken<Tok: ?Sized> {
  fn matches_token(&self, token: &Tok) -> bool;
}

impl MatchesToken<str> for Terminal {
  fn matches_token(&self, token: &str) -> bool {
    self.as_str() == token
  }
}

impl<'s> MatchesToken<&'s str> for Terminal {
  fn matches_token(&self, token: &&'s str) -> bool {
    self.as_str() == *token
  }
}

impl MatchesToken<String> for Terminal {
  fn matches_token(&self, token: &String) -> bool {
    self.as_str() == token
  }
}

impl MatchesToken<Terminal> for Terminal {
  fn matches_token(&self, token: &Terminal) -> bool {
    self == token
  }
}

/// Splits a sentence into tokens on runs of whitespace. Tokens are not
/// otherwise normalized.
pub fn tokenize(sentence: &str) -> Vec<&str> {
  sentence.split_whitespace().collect()
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_tokenize() {
    assert_eq!(tokenize("2 + 3 * 4"), vec!["2", "+", "3", "*", "4"]);
    assert_eq!(tokenize("  a\t\tb \n c  "), vec!["a", "b", "c"]);
    assert!(tokenize("   ").is_empty());
    assert_eq!(tokenize("Ab aB"), vec!["Ab", "aB"]);
  }

  #[test]
  fn test_terminal_matches_exactly() {
    let t = Terminal::new("a");
    assert!(t.matches_token("a"));
    assert!(!t.matches_token("A"));
    assert!(!t.matches_token("\"a\""));
    assert!(t.matches_token(&"a".to_string()));
    assert!(t.matches_token(&Terminal::new("a")));
  }
}
