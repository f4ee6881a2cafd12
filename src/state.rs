// Copyright 2018 Google LLC
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

use crate::grammar::{Elem, Prod};
use crate::utils::ToDoc;

/// A state of a production within a parse state.
///
/// A production state keeps track of a particular production, the nonterminal
/// to which the production belongs, and an index into the production, which is
/// the current location of the parse state. For example:
///
/// ```text
/// A => a <b> . c
/// ```
///
/// This indicates that the head is A, the production is a <b> c, and the
/// current location is just before the final c.
///
/// Production states compare by value.
#[derive(Derivative)]
#[derivative(
  Copy(bound = ""),
  Clone(bound = ""),
  PartialEq(bound = "T: PartialEq, NT: PartialEq"),
  Eq(bound = "T: Eq, NT: Eq"),
  Hash(bound = "T: std::hash::Hash, NT: std::hash::Hash"),
  Debug(bound = "T: std::fmt::Debug, NT: std::fmt::Debug")
)]
pub struct ProdState<'a, T, NT> {
  /// The production this state is part of.
  prod: Prod<'a, T, NT>,

  /// The index of this production state. Must be in the range [0,
  /// self.prod.num_elements()].
  index: usize,
}

impl<'a, T, NT> ProdState<'a, T, NT> {
  /// Create a ProdState from a given Prod.
  ///
  /// This state's index will be at the start of the production.
  pub fn from_start(prod: Prod<'a, T, NT>) -> Self {
    ProdState { prod, index: 0 }
  }

  pub fn prod(&self) -> Prod<'a, T, NT> {
    self.prod
  }

  pub fn index(&self) -> usize {
    self.index
  }

  pub fn head(&self) -> &'a NT {
    self.prod.head()
  }

  /// Returns the next element after the current index. If it is at the
  /// end, then it returns `None`.
  pub fn next_elem(&self) -> Option<&'a Elem<T, NT>> {
    self.prod.element_at(self.index)
  }

  /// Returns the next element along with the state advanced past it, or
  /// `None` if this state is complete.
  pub fn next_elem_state(&self) -> Option<(&'a Elem<T, NT>, Self)> {
    self.next_elem().map(|elem| {
      (
        elem,
        ProdState {
          prod: self.prod,
          index: self.index + 1,
        },
      )
    })
  }

  pub fn is_complete(&self) -> bool {
    self.prod.num_elements() == self.index
  }
}

impl<'a, T, NT> ToDoc for ProdState<'a, T, NT>
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
    let (before, after) = self.prod.elements().split_at(self.index);
    let body = before
      .iter()
      .map(|e| e.to_doc(da))
      .chain(std::iter::once(da.text(".")))
      .chain(after.iter().map(|e| e.to_doc(da)));

    self
      .head()
      .to_doc(da)
      .append(da.text(" =>"))
      .append(da.text(" "))
      .append(da.intersperse(body, da.text(" ")))
  }
}
