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

//! Nullable nonterminal analysis.
//!
//! A nonterminal is nullable if it can derive the empty sequence. The
//! recognizer needs this to advance over nullable nonterminals at prediction
//! time.

use {
  crate::{
    grammar::{Elem, Grammar, Prod},
    utils::fixed_point,
  },
  std::collections::BTreeSet,
};

fn is_prod_nullable<T, NT>(nullables: &BTreeSet<&NT>, prod: &Prod<T, NT>) -> bool
where
  NT: Ord,
{
  prod.elements().iter().all(|elem| match elem {
    Elem::Term(_) => false,
    Elem::NonTerm(nt) => nullables.contains(nt),
  })
}

fn is_nullable_fp<'a, T, NT>(
  grammar: &'a Grammar<T, NT>,
  prev_nullables: &BTreeSet<&'a NT>,
) -> BTreeSet<&'a NT>
where
  NT: Ord,
{
  let mut curr_nullables = prev_nullables.clone();
  for rule in grammar.rules() {
    if rule.prods().any(|p| is_prod_nullable(prev_nullables, &p)) {
      curr_nullables.insert(rule.head());
    }
  }
  curr_nullables
}

/// The set of nullable nonterminals of a grammar.
#[derive(Clone, Debug)]
pub struct Nullables<NT>(BTreeSet<NT>);

impl<NT> Nullables<NT>
where
  NT: Ord + Clone,
{
  /// Computes the nullable nonterminals of `grammar`.
  pub fn of<T>(grammar: &Grammar<T, NT>) -> Self {
    let nullables =
      fixed_point(BTreeSet::new(), |prev| is_nullable_fp(grammar, prev));
    Nullables(nullables.into_iter().cloned().collect())
  }

  pub fn is_nullable(&self, nt: &NT) -> bool {
    self.0.contains(nt)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}
