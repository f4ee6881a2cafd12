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

//! Decides whether sentences match a grammar.

use {
  crate::{
    grammar::{nullable::Nullables, Grammar},
    parsers::{
      earley::{Chart, EarleyRecognizer},
      tokenize, MatchesToken,
    },
    start_grammar::{wrap_grammar_with_start, StartGrammar, StartNonTerminal},
    utils::ToDoc,
  },
  std::{fmt::Debug, hash::Hash},
};

/// A grammar prepared for recognition.
///
/// Building a matcher wraps the grammar with a synthetic start rule and
/// computes its nullable nonterminals. Both are reused for every sentence, and
/// a matcher can be shared between threads.
#[derive(Clone, Debug)]
pub struct Matcher<T, NT> {
  grammar: StartGrammar<T, NT>,
  nullables: Nullables<StartNonTerminal<NT>>,
  root: StartNonTerminal<NT>,
}

impl<T, NT> Matcher<T, NT>
where
  T: Clone + Eq + Hash + Debug + ToDoc,
  NT: Ord + Clone + Hash + Debug + ToDoc,
{
  pub fn new(grammar: &Grammar<T, NT>) -> Self {
    let root = StartNonTerminal::NTerm(grammar.start_nt().clone());
    let grammar = wrap_grammar_with_start(grammar)
      .expect("A checked grammar stays valid with a start rule.");
    let nullables = Nullables::of(&grammar);
    Matcher {
      grammar,
      nullables,
      root,
    }
  }

  /// Fills and returns the recognition chart for `tokens`.
  pub fn chart<Tok>(
    &self,
    tokens: &[Tok],
  ) -> Chart<'_, T, StartNonTerminal<NT>>
  where
    T: MatchesToken<Tok>,
  {
    let recognizer = EarleyRecognizer::new(&self.grammar, &self.nullables);
    match self.grammar.start_prod() {
      Some(start) => recognizer.recognize(start, tokens),
      None => Chart::new(tokens.len()),
    }
  }

  /// Returns true if the last set of `chart` holds a finished root
  /// production that started at index 0.
  pub fn accepts(&self, chart: &Chart<'_, T, StartNonTerminal<NT>>) -> bool {
    chart.last().states().any(|st| {
      st.is_finished() && st.origin() == 0 && st.head() == &self.root
    })
  }

  pub fn matches_tokens<Tok>(&self, tokens: &[Tok]) -> bool
  where
    T: MatchesToken<Tok>,
  {
    let chart = self.chart(tokens);
    let matched = self.accepts(&chart);
    log::debug!(
      "{} tokens, {} states: {}",
      tokens.len(),
      chart.num_states(),
      if matched { "matched" } else { "no match" }
    );
    matched
  }

  /// Tokenizes `sentence` on whitespace and matches the tokens.
  pub fn matches(&self, sentence: &str) -> bool
  where
    T: for<'s> MatchesToken<&'s str>,
  {
    self.matches_tokens(&tokenize(sentence))
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::{
    compile, compile_with_root, examples, NonTerminal, Terminal,
  };

  fn assert_send_sync<S: Send + Sync>() {}

  #[test]
  fn test_matcher_is_shareable() {
    assert_send_sync::<Matcher<Terminal, NonTerminal>>();
  }

  #[test]
  fn test_single_terminal() {
    let m = Matcher::new(&compile(&["P -> \"a\""]).unwrap());
    assert!(m.matches("a"));
    assert!(!m.matches("b"));
    assert!(!m.matches("a a"));
    assert!(!m.matches(""));
    assert!(!m.matches("A"));
  }

  #[test]
  fn test_alternatives_of_pairs() {
    let g = compile(&["R -> 0 0 | 1 1", "0 -> \"a\"", "1 -> \"b\""]).unwrap();
    let m = Matcher::new(&g);
    assert!(m.matches("a a"));
    assert!(m.matches("b b"));
    assert!(!m.matches("a b"));
    assert!(!m.matches("b a"));
    assert!(!m.matches("a"));
  }

  #[test]
  fn test_arithmetic() {
    let m = Matcher::new(&compile(examples::ARITHMETIC_RULES).unwrap());
    assert!(m.matches("2 + 3 * 4"));
    assert!(m.matches("1"));
    assert!(m.matches("1 * 2 * 3 + 4 + 1"));
    assert!(!m.matches("2 + * 4"));
    assert!(!m.matches("2 +"));
    assert!(!m.matches("5"));
    assert!(!m.matches("2+3"));
  }

  #[test]
  fn test_nested_recursion() {
    let m = Matcher::new(&compile(examples::NESTED_RULES).unwrap());
    assert!(m.matches("a a b"));
    assert!(m.matches("a a a b b"));
    assert!(m.matches("a a a a a b b"));
    assert!(!m.matches("a b"));
    assert!(!m.matches("a a b b"));
    assert!(!m.matches("b a b a b a"));
    assert!(!m.matches("a a b a b b b"));
  }

  #[test]
  fn test_sorted_rules_with_explicit_root() {
    let mut rules = examples::NESTED_RULES.to_vec();
    rules.sort();
    let g = compile_with_root(&rules, "0").unwrap();
    let m = Matcher::new(&g);
    assert!(m.matches("a a a b b"));
    assert!(!m.matches("b"));
  }

  #[test]
  fn test_built_grammar() {
    let m = Matcher::new(&examples::make_paren());
    assert!(m.matches("( x ( ) )"));
    assert!(!m.matches("( x"));
  }

  #[test]
  fn test_token_kinds() {
    let m = Matcher::new(&examples::make_simple());
    assert!(m.matches_tokens(&[Terminal::new("A")]));
    assert!(!m.matches_tokens(&[Terminal::new("A"), Terminal::new("B")]));
  }

  #[test]
  fn test_repeated_calls_agree() {
    let m = Matcher::new(&compile(examples::ARITHMETIC_RULES).unwrap());
    let first = m.matches("1 + 2 * 3");
    for _ in 0..5 {
      assert_eq!(m.matches("1 + 2 * 3"), first);
    }
    assert!(first);
  }

  #[test]
  fn test_chart_is_bounded_for_recursion() {
    let m = Matcher::new(&compile(&["8 -> \"x\" | \"x\" 8"]).unwrap());
    let sentence = vec!["x"; 40];
    let chart = m.chart(&sentence);
    assert_eq!(chart.size(), 41);
    assert!(m.accepts(&chart));
    // Right recursion completes one state per earlier origin, so each set
    // grows linearly with its index and no more.
    for (k, set) in chart.iter().enumerate() {
      assert!(set.len() <= k + 6, "S({}) has {} states", k, set.len());
    }
  }

  #[test]
  fn test_empty_alternative() {
    let m = Matcher::new(&compile(&["L -> \"(\" L \")\" L |"]).unwrap());
    assert!(m.matches(""));
    assert!(m.matches("( )"));
    assert!(m.matches("( ( ) ) ( )"));
    assert!(!m.matches("( ( )"));
    assert!(!m.matches(") ("));
  }
}
