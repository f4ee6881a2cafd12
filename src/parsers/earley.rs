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

//! An Earley recognizer for any grammar.
//!
//! The chart is filled index by index. At each index the state set's work
//! queue is drained, and each state is handed to the predictor, scanner or
//! completer depending on its next element. Predicted and completed states go
//! back into the current set, and are picked up by the same drain; scanned
//! states go into the next set. Because state sets deduplicate by value, the
//! drain always terminates, including on left-recursive and self-embedding
//! grammars.
//!
//! Empty productions are handled at prediction time: predicting a nullable
//! nonterminal also advances the predicting state past it.

pub mod state;

use {
  crate::{
    grammar::{nullable::Nullables, Elem, Grammar, Prod},
    parsers::MatchesToken,
    utils::{to_pretty_string, ToDoc},
  },
  std::hash::Hash,
};

pub use state::{Chart, EarleyState, StateSet};

pub struct EarleyRecognizer<'a, T, NT> {
  grammar: &'a Grammar<T, NT>,
  nullables: &'a Nullables<NT>,
}

impl<'a, T, NT> EarleyRecognizer<'a, T, NT>
where
  T: Eq + Hash + ToDoc,
  NT: Ord + Clone + Hash + ToDoc,
{
  pub fn new(grammar: &'a Grammar<T, NT>, nullables: &'a Nullables<NT>) -> Self {
    EarleyRecognizer { grammar, nullables }
  }

  /// Fills a chart for `tokens`, starting from `start` at index 0.
  pub fn recognize<Tok>(
    &self,
    start: Prod<'a, T, NT>,
    tokens: &[Tok],
  ) -> Chart<'a, T, NT>
  where
    T: MatchesToken<Tok>,
  {
    let mut chart = Chart::new(tokens.len());
    chart.add(0, EarleyState::from_prod_start(start, 0));

    for k in 0..chart.size() {
      self.process_index(&mut chart, k, tokens.get(k));

      if log::log_enabled!(log::Level::Trace) {
        if let Some(set) = chart.get(k) {
          log::trace!("S({}):\n{}", k, to_pretty_string(set, 100));
        }
      }
    }

    chart
  }

  fn process_index<Tok>(
    &self,
    chart: &mut Chart<'a, T, NT>,
    k: usize,
    token: Option<&Tok>,
  ) where
    T: MatchesToken<Tok>,
  {
    while let Some(state) = chart.pop_pending(k) {
      match state.next_elem() {
        Some(Elem::NonTerm(nt)) => self.predict(chart, k, &state, nt),
        Some(Elem::Term(t)) => self.scan(chart, k, &state, t, token),
        None => self.complete(chart, k, &state),
      }
    }
  }

  fn predict(
    &self,
    chart: &mut Chart<'a, T, NT>,
    k: usize,
    state: &EarleyState<'a, T, NT>,
    nt: &'a NT,
  ) {
    if let Some(rule) = self.grammar.try_get_rule(nt) {
      for prod in rule.prods() {
        let predicted = EarleyState::from_prod_start(prod, k);
        if chart.add(k, predicted) {
          log::trace!("S({}): predict {}", k, to_pretty_string(&predicted, 100));
        }
      }
    }

    if self.nullables.is_nullable(nt) {
      if let Some(next) = state.advance() {
        if chart.add(k, next) {
          log::trace!("S({}): skip nullable {}", k, to_pretty_string(&next, 100));
        }
      }
    }
  }

  fn scan<Tok>(
    &self,
    chart: &mut Chart<'a, T, NT>,
    k: usize,
    state: &EarleyState<'a, T, NT>,
    term: &T,
    token: Option<&Tok>,
  ) where
    T: MatchesToken<Tok>,
  {
    // No token at the last index; scanning never writes past the chart.
    let token = match token {
      Some(token) => token,
      None => return,
    };

    if term.matches_token(token) {
      if let Some(next) = state.advance() {
        if chart.add(k + 1, next) {
          log::trace!("S({}): scan {}", k + 1, to_pretty_string(&next, 100));
        }
      }
    }
  }

  fn complete(
    &self,
    chart: &mut Chart<'a, T, NT>,
    k: usize,
    state: &EarleyState<'a, T, NT>,
  ) {
    let head = state.head();
    let advanced: Vec<_> = match chart.get(state.origin()) {
      Some(origin_set) => origin_set
        .waiting_on(head)
        .filter_map(EarleyState::advance)
        .collect(),
      None => Vec::new(),
    };

    for next in advanced {
      if chart.add(k, next) {
        log::trace!("S({}): complete {}", k, to_pretty_string(&next, 100));
      }
    }
  }
}
