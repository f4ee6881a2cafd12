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

//! Provides base data structures to represent and work with Earley states.
//!
//! An Earley state is a production state together with the chart index at
//! which the production started matching. A state set holds the states at one
//! chart index, and the chart holds one state set per input position.

use {
  crate::{
    grammar::{Elem, Prod},
    state::ProdState,
    utils::{to_pretty_string, ToDoc},
  },
  std::{
    collections::{HashSet, VecDeque},
    hash::Hash,
  },
};

#[derive(Derivative)]
#[derivative(
  Copy(bound = ""),
  Clone(bound = ""),
  PartialEq(bound = "T: PartialEq, NT: PartialEq"),
  Eq(bound = "T: Eq, NT: Eq"),
  Hash(bound = "T: Hash, NT: Hash"),
  Debug(bound = "T: std::fmt::Debug, NT: std::fmt::Debug")
)]
pub struct EarleyState<'a, T, NT> {
  prod_state: ProdState<'a, T, NT>,
  origin: usize,
}

impl<'a, T, NT> EarleyState<'a, T, NT> {
  pub fn new(prod_state: ProdState<'a, T, NT>, origin: usize) -> Self {
    EarleyState { prod_state, origin }
  }

  pub fn from_prod_start(prod: Prod<'a, T, NT>, origin: usize) -> Self {
    EarleyState::new(ProdState::from_start(prod), origin)
  }

  /// The chart index at which this state's production started matching.
  pub fn origin(&self) -> usize {
    self.origin
  }

  pub fn head(&self) -> &'a NT {
    self.prod_state.head()
  }

  pub fn next_elem(&self) -> Option<&'a Elem<T, NT>> {
    self.prod_state.next_elem()
  }

  pub fn is_finished(&self) -> bool {
    self.prod_state.is_complete()
  }

  /// The same state with the dot moved past the next element, keeping the
  /// origin. Returns `None` if the state is finished.
  pub fn advance(&self) -> Option<Self> {
    self
      .prod_state
      .next_elem_state()
      .map(|(_, next)| EarleyState::new(next, self.origin))
  }
}

impl<'a, T, NT> ToDoc for EarleyState<'a, T, NT>
where
  T: ToDoc,
  NT: ToDoc,
{
  fn to_doc<'b, DA: pretty::DocAllocator<'b>>(
    &self,
    da: &'b DA,
  ) -> pretty::DocBuilder<'b, DA>
  where
    DA::Doc: Clone,
  {
    self
      .prod_state
      .to_doc(da)
      .append(da.text(format!(", {}", self.origin)))
      .brackets()
  }
}

/// The states at one chart index.
///
/// States are kept in insertion order and deduplicated by value. Every newly
/// added state is also queued, so a caller can drain the queue with
/// `pop_pending` while adding more states to the same set, and still see
/// each state exactly once.
#[derive(Derivative)]
#[derivative(
  Clone(bound = ""),
  Default(bound = ""),
  Debug(bound = "T: std::fmt::Debug, NT: std::fmt::Debug")
)]
pub struct StateSet<'a, T, NT> {
  states: Vec<EarleyState<'a, T, NT>>,
  #[derivative(Debug = "ignore")]
  index: HashSet<EarleyState<'a, T, NT>>,
  #[derivative(Debug = "ignore")]
  pending: VecDeque<EarleyState<'a, T, NT>>,
}

impl<'a, T, NT> StateSet<'a, T, NT> {
  pub fn new() -> Self {
    StateSet {
      states: Vec::new(),
      index: HashSet::new(),
      pending: VecDeque::new(),
    }
  }

  pub fn len(&self) -> usize {
    self.states.len()
  }

  pub fn is_empty(&self) -> bool {
    self.states.is_empty()
  }

  /// Iterates over the states in insertion order.
  pub fn states(&self) -> impl Iterator<Item = &EarleyState<'a, T, NT>> {
    self.states.iter()
  }

  /// Takes the next state that has been added but not yet processed.
  pub fn pop_pending(&mut self) -> Option<EarleyState<'a, T, NT>> {
    self.pending.pop_front()
  }

  pub fn has_pending(&self) -> bool {
    !self.pending.is_empty()
  }
}

impl<'a, T, NT> StateSet<'a, T, NT>
where
  T: Eq + Hash,
  NT: Eq + Hash,
{
  /// Adds a state if it is not already present. Returns true if the state
  /// was newly inserted.
  pub fn add(&mut self, state: EarleyState<'a, T, NT>) -> bool {
    if self.index.insert(state) {
      self.states.push(state);
      self.pending.push_back(state);
      true
    } else {
      false
    }
  }

  pub fn contains(&self, state: &EarleyState<'a, T, NT>) -> bool {
    self.index.contains(state)
  }

  /// Returns the states waiting for `nt` as their next element.
  pub fn waiting_on<'b>(
    &'b self,
    nt: &'b NT,
  ) -> impl Iterator<Item = &'b EarleyState<'a, T, NT>> + 'b {
    self
      .states
      .iter()
      .filter(move |st| st.next_elem().and_then(Elem::as_nonterm) == Some(nt))
  }
}

impl<'a, T, NT> ToDoc for StateSet<'a, T, NT>
where
  T: ToDoc,
  NT: ToDoc,
{
  fn to_doc<'b, DA: pretty::DocAllocator<'b>>(
    &self,
    da: &'b DA,
  ) -> pretty::DocBuilder<'b, DA>
  where
    DA::Doc: Clone,
  {
    da.intersperse(self.states.iter().map(|st| st.to_doc(da)), da.hardline())
  }
}

/// The array of state sets, one per input position from 0 to the number of
/// tokens inclusive.
#[derive(Derivative)]
#[derivative(Debug(bound = "T: std::fmt::Debug, NT: std::fmt::Debug"))]
pub struct Chart<'a, T, NT> {
  sets: Vec<StateSet<'a, T, NT>>,
}

impl<'a, T, NT> Chart<'a, T, NT> {
  /// Creates an empty chart for a sentence of `num_tokens` tokens.
  pub fn new(num_tokens: usize) -> Self {
    Chart {
      sets: (0..=num_tokens).map(|_| StateSet::new()).collect(),
    }
  }

  /// The number of state sets, which is one more than the number of tokens.
  pub fn size(&self) -> usize {
    self.sets.len()
  }

  pub fn num_tokens(&self) -> usize {
    self.sets.len() - 1
  }

  pub fn get(&self, k: usize) -> Option<&StateSet<'a, T, NT>> {
    self.sets.get(k)
  }

  /// The state set at the last index.
  pub fn last(&self) -> &StateSet<'a, T, NT> {
    &self.sets[self.sets.len() - 1]
  }

  pub fn iter(&self) -> impl Iterator<Item = &StateSet<'a, T, NT>> {
    self.sets.iter()
  }

  /// The total number of states across all state sets.
  pub fn num_states(&self) -> usize {
    self.sets.iter().map(StateSet::len).sum()
  }
}

impl<'a, T, NT> Chart<'a, T, NT>
where
  T: Eq + Hash,
  NT: Eq + Hash,
{
  /// Adds `state` to the set at index `k`. Returns true if the state was
  /// newly inserted. Indices past the end of the chart are never written.
  pub fn add(&mut self, k: usize, state: EarleyState<'a, T, NT>) -> bool {
    self.sets.get_mut(k).map_or(false, |set| set.add(state))
  }

  /// Takes the next unprocessed state at index `k`.
  pub fn pop_pending(&mut self, k: usize) -> Option<EarleyState<'a, T, NT>> {
    self.sets.get_mut(k).and_then(StateSet::pop_pending)
  }
}

impl<'a, T, NT> Chart<'a, T, NT>
where
  T: ToDoc,
  NT: ToDoc,
{
  pub fn to_pretty(&self) -> String {
    to_pretty_string(self, 80)
  }
}

impl<'a, T, NT> ToDoc for Chart<'a, T, NT>
where
  T: ToDoc,
  NT: ToDoc,
{
  fn to_doc<'b, DA: pretty::DocAllocator<'b>>(
    &self,
    da: &'b DA,
  ) -> pretty::DocBuilder<'b, DA>
  where
    DA::Doc: Clone,
  {
    da.intersperse(
      self.sets.iter().enumerate().map(|(k, set)| {
        da.text(format!("S({}):", k))
          .append(da.hardline().append(set.to_doc(da)).nest(2))
      }),
      da.hardline(),
    )
  }
}
