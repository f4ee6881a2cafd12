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

use super::{
  Elem, Grammar, GrammarError, NonTerminal, ProdInner, RuleInner, Terminal,
};

/// A helper trait to allow builder methods to either take a type `T`, or a
/// reference to `T` if it is clonable.
pub trait BuilderInto<T> {
  /// Consumes self and produces a value of type `T`.
  fn builder_into(self) -> T;
}

impl<T> BuilderInto<T> for T {
  fn builder_into(self) -> T {
    self
  }
}

impl<'a, T> BuilderInto<T> for &'a T
where
  T: Clone,
{
  fn builder_into(self) -> T {
    self.clone()
  }
}

impl BuilderInto<Terminal> for &'_ str {
  fn builder_into(self) -> Terminal {
    Terminal::new(self)
  }
}

impl BuilderInto<NonTerminal> for &'_ str {
  fn builder_into(self) -> NonTerminal {
    NonTerminal::new(self)
  }
}

pub struct ProductionBuilder<T, NT> {
  elems: Vec<Elem<T, NT>>,
}

impl<T, NT> ProductionBuilder<T, NT> {
  fn new() -> Self {
    ProductionBuilder { elems: Vec::new() }
  }

  fn build(self) -> ProdInner<T, NT> {
    ProdInner::new(self.elems)
  }

  pub fn add_term(&mut self, term: impl BuilderInto<T>) -> &mut Self {
    self.elems.push(Elem::Term(term.builder_into()));
    self
  }

  pub fn add_nonterm(&mut self, nonterm: impl BuilderInto<NT>) -> &mut Self {
    self.elems.push(Elem::NonTerm(nonterm.builder_into()));
    self
  }
}

// ----------------

pub struct RuleBuilder<T, NT> {
  head: NT,
  prods: Vec<ProdInner<T, NT>>,
}

impl<T, NT> RuleBuilder<T, NT> {
  fn new(head: NT) -> Self {
    RuleBuilder {
      head,
      prods: Vec::new(),
    }
  }

  fn build(self) -> RuleInner<T, NT> {
    let RuleBuilder { head, prods } = self;
    RuleInner::new(head, prods)
  }

  pub fn add_prod(
    &mut self,
    build_fn: impl FnOnce(&mut ProductionBuilder<T, NT>),
  ) -> &mut Self {
    let mut builder = ProductionBuilder::new();
    build_fn(&mut builder);
    self.prods.push(builder.build());
    self
  }

  pub fn add_prod_with_elems(
    &mut self,
    elems: impl BuilderInto<Vec<Elem<T, NT>>>,
  ) -> &mut Self {
    self.prods.push(ProdInner::new(elems.builder_into()));
    self
  }
}

// ----------------

pub struct GrammarBuilder<T, NT> {
  start: NT,
  rules: Vec<RuleInner<T, NT>>,
}

impl<T, NT> GrammarBuilder<T, NT>
where
  NT: Ord + Clone,
{
  fn new(start: NT) -> Self {
    GrammarBuilder {
      start,
      rules: Vec::new(),
    }
  }

  fn build(self) -> Result<Grammar<T, NT>, GrammarError<NT>> {
    let GrammarBuilder { start, rules } = self;
    Grammar::new(start, rules)
  }

  pub fn add_rule<F>(
    &mut self,
    head: impl BuilderInto<NT>,
    build_fn: F,
  ) -> &mut Self
  where
    F: FnOnce(&mut RuleBuilder<T, NT>),
  {
    let mut rule_builder = RuleBuilder::new(head.builder_into());
    build_fn(&mut rule_builder);
    self.rules.push(rule_builder.build());
    self
  }
}

/// Builds a grammar using a builder function.
///
/// Example:
///
/// ```rust
/// # use cfgmatch::grammar::{Terminal, NonTerminal, Grammar};
/// let t_a = Terminal::new("A");
/// let nt_x = NonTerminal::new("x");
/// let g: Grammar<Terminal, NonTerminal> =
///   cfgmatch::grammar::build(&nt_x, |gb| {
///     gb.add_rule(&nt_x, |rb| {
///       rb.add_prod(|pb| {
///         pb.add_term(&t_a).add_nonterm(&nt_x).add_term(&t_a);
///       })
///       .add_prod(|_pb| {});
///     });
///   }).unwrap();
/// ```
///
/// Arguments that take a terminal or nonterminal can either take a
/// non-reference value, or a cloneable reference value. For the text element
/// types, a `&str` works as well.
///
/// Rules added more than once for the same head are merged. The grammar is
/// checked before it is returned: see `GrammarError`.
pub fn build<T, NT>(
  start: impl BuilderInto<NT>,
  build_fn: impl FnOnce(&mut GrammarBuilder<T, NT>),
) -> Result<Grammar<T, NT>, GrammarError<NT>>
where
  NT: Ord + Clone,
{
  let mut builder = GrammarBuilder::new(start.builder_into());
  build_fn(&mut builder);
  builder.build()
}
