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

pub mod builder;
mod element_types;

use {
  crate::utils::{to_pretty_string, ToDoc},
  std::collections::{btree_map, BTreeMap},
};

use std::fmt::Debug;

pub use element_types::{NonTerminal, Terminal};

/// A single element (terminal or non-terminal).
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Elem<T, NT> {
  Term(T),
  NonTerm(NT),
}

impl<T, NT> Elem<T, NT> {
  /// If this element is a terminal, returns a `Some` value containing a
  /// terminal datum. Returns `None` otherwise.
  pub fn as_term(&self) -> Option<&T> {
    match self {
      Elem::NonTerm(_) => None,
      Elem::Term(t) => Some(t),
    }
  }

  /// Gets an element as a nonterm. Returns a `None` value otherwise.
  pub fn as_nonterm(&self) -> Option<&NT> {
    match self {
      Elem::NonTerm(nt) => Some(nt),
      Elem::Term(_) => None,
    }
  }

  /// Maps the nonterminal datum of this element, keeping terminals as-is.
  pub fn map_nonterm<NT2>(self, f: impl FnOnce(NT) -> NT2) -> Elem<T, NT2> {
    match self {
      Elem::Term(t) => Elem::Term(t),
      Elem::NonTerm(nt) => Elem::NonTerm(f(nt)),
    }
  }
}

impl<T, NT> ToDoc for Elem<T, NT>
where
  T: ToDoc,
  NT: ToDoc,
{
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    match self {
      Elem::NonTerm(nt) => {
        da.text("<").append(nt.to_doc(da)).append(da.text(">"))
      }
      Elem::Term(t) => t.to_doc(da),
    }
  }
}

impl<T, NT> std::fmt::Debug for Elem<T, NT>
where
  T: Debug,
  NT: Debug,
{
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Elem::Term(term) => fmt.write_str(&format!("{:?}", term)),
      Elem::NonTerm(nt) => fmt.write_str(&format!("<{:?}>", nt)),
    }
  }
}

/// The owned body of a production, as stored inside a Grammar.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
struct ProdInner<T, NT> {
  elements: Vec<Elem<T, NT>>,
}

impl<T, NT> ProdInner<T, NT> {
  fn new(elements: Vec<Elem<T, NT>>) -> Self {
    ProdInner { elements }
  }
}

impl<T, NT> ToDoc for ProdInner<T, NT>
where
  T: ToDoc,
  NT: ToDoc,
{
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    if self.elements.is_empty() {
      da.text("ε")
    } else {
      da.intersperse(self.elements.iter().map(|e| e.to_doc(da)), da.softline())
    }
  }
}

/// A concrete raw rule value as stored inside a Grammar struct.
#[derive(Clone, Debug)]
struct RuleInner<T, NT> {
  head: NT,
  prods: Vec<ProdInner<T, NT>>,
}

impl<T, NT> RuleInner<T, NT> {
  fn new(head: NT, prods: Vec<ProdInner<T, NT>>) -> Self {
    RuleInner { head, prods }
  }
}

impl<T, NT> ToDoc for RuleInner<T, NT>
where
  T: ToDoc,
  NT: ToDoc,
{
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    self
      .head
      .to_doc(da)
      .append(da.text(" =>"))
      .append(da.softline())
      .append(da.intersperse(
        self.prods.iter().map(|prod| prod.to_doc(da)),
        da.text(" |").append(da.softline()),
      ))
  }
}

/// Structural faults found while constructing a grammar.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError<NT> {
  #[error("start nonterminal {0:?} has no rule")]
  MissingStartRule(NT),
  #[error("nonterminal {missing:?} referenced by rule {head:?} has no rule")]
  UnresolvedNonTerm { head: NT, missing: NT },
  #[error("rule {0:?} has no productions")]
  EmptyRule(NT),
}

/// A context-free language grammar.
///
/// This is a context-free grammar consisting of
///
/// - A start nonterminal
/// - A set of rules, each which consist of
///   - A head nonterminal
///   - A list of productions, where each production is a list of elements,
///     each either a terminal or a nonterminal.
///
/// Every nonterminal mentioned in a production has a rule; this is checked
/// when the grammar is built. Grammars are read-only, and the accessors use
/// the lifetime of the grammar object.
#[derive(Clone)]
pub struct Grammar<T, NT> {
  start_symbol: NT,
  rule_set: BTreeMap<NT, RuleInner<T, NT>>,
}

impl<T, NT> std::fmt::Debug for Grammar<T, NT>
where
  T: Debug,
  NT: Debug,
{
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    let mut dbg_struct = f.debug_struct("Grammar");
    dbg_struct.field("Start", &self.start_symbol);
    dbg_struct.field("Terms", &self.get_terminals().collect::<Vec<_>>());
    dbg_struct.field("Rules", &self.rules().collect::<Vec<_>>());
    dbg_struct.finish()
  }
}

impl<T, NT> Grammar<T, NT> {
  /// Returns the start nonterminal for this grammar.
  pub fn start_nt(&self) -> &NT {
    &self.start_symbol
  }

  fn get_elements(&self) -> impl Iterator<Item = &Elem<T, NT>> {
    self
      .rule_set
      .values()
      .flat_map(|r| &r.prods)
      .flat_map(|p| &p.elements)
  }

  fn get_terminals(&self) -> impl Iterator<Item = &T> {
    self.get_elements().filter_map(|e| e.as_term())
  }

  /// Returns an iterator over all of the rules for this grammar.
  pub fn rules(&self) -> impl Iterator<Item = Rule<T, NT>> {
    self.rule_set.values().map(Rule::new)
  }

  /// Gets an iterator over all productions in the grammar.
  pub fn prods(&self) -> impl Iterator<Item = Prod<T, NT>> {
    self.rules().flat_map(|rule| rule.prods())
  }
}

impl<T, NT> Grammar<T, NT>
where
  NT: Ord + Clone,
{
  /// Creates a grammar from a start nonterminal and a list of rules. Rules
  /// sharing a head are merged, keeping their productions in order.
  fn new(
    start: NT,
    rules: impl IntoIterator<Item = RuleInner<T, NT>>,
  ) -> Result<Self, GrammarError<NT>> {
    let mut rule_set: BTreeMap<NT, RuleInner<T, NT>> = BTreeMap::new();
    for rule in rules {
      match rule_set.entry(rule.head.clone()) {
        btree_map::Entry::Vacant(vac) => {
          vac.insert(rule);
        }
        btree_map::Entry::Occupied(mut occ) => {
          occ.get_mut().prods.extend(rule.prods);
        }
      }
    }

    let g = Grammar {
      start_symbol: start,
      rule_set,
    };

    g.check_grammar().map(|_| g)
  }

  /// Gets the rule that has the given nonterminal as a head.
  pub fn try_get_rule<'a>(&'a self, nt: &NT) -> Option<Rule<'a, T, NT>> {
    self.rule_set.get(nt).map(Rule::new)
  }

  fn check_grammar(&self) -> Result<(), GrammarError<NT>> {
    if !self.rule_set.contains_key(&self.start_symbol) {
      return Err(GrammarError::MissingStartRule(self.start_symbol.clone()));
    }

    for rule in self.rule_set.values() {
      if rule.prods.is_empty() {
        return Err(GrammarError::EmptyRule(rule.head.clone()));
      }

      let missing = rule
        .prods
        .iter()
        .flat_map(|p| &p.elements)
        .filter_map(Elem::as_nonterm)
        .find(|nt| !self.rule_set.contains_key(nt));

      if let Some(missing) = missing {
        return Err(GrammarError::UnresolvedNonTerm {
          head: rule.head.clone(),
          missing: missing.clone(),
        });
      }
    }

    Ok(())
  }
}

impl<T, NT> Grammar<T, NT>
where
  T: ToDoc,
  NT: ToDoc,
{
  pub fn to_pretty(&self) -> String {
    to_pretty_string(self, 80)
  }
}

impl<T, NT> ToDoc for Grammar<T, NT>
where
  T: ToDoc,
  NT: ToDoc,
{
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    let start_entry = da
      .text("Start =")
      .group()
      .append(da.softline())
      .append(self.start_nt().to_doc(da));
    let rules_entry = da.text("Rules ").append(
      da.softline()
        .append(
          da.concat(self.rule_set.iter().map(|rule| {
            rule.1.to_doc(da).append(da.text(";")).append(da.softline())
          }))
          .nest(2),
        )
        .braces(),
    );

    da.concat(
      vec![start_entry, rules_entry]
        .into_iter()
        .map(|doc| doc.append(da.text(",")).append(da.softline())),
    )
  }
}

// ------------

/// A rule within a grammar.
///
/// A rule consists of a head nonterminal, and one or more different possible
/// productions.
#[derive(Derivative)]
#[derivative(Copy(bound = ""), Clone(bound = ""))]
pub struct Rule<'a, T, NT> {
  rule: &'a RuleInner<T, NT>,
}

impl<'a, T, NT> Rule<'a, T, NT> {
  fn new(rule: &'a RuleInner<T, NT>) -> Self {
    Rule { rule }
  }

  /// Returns the head nonterminal.
  pub fn head(&self) -> &'a NT {
    &self.rule.head
  }

  /// Returns an iterator over the productions of this rule.
  pub fn prods(&self) -> impl Iterator<Item = Prod<'a, T, NT>> {
    let head = &self.rule.head;
    self.rule.prods.iter().map(move |prod| Prod::new(head, prod))
  }
}

impl<'a, T, NT> std::fmt::Debug for Rule<'a, T, NT>
where
  T: Debug,
  NT: Debug,
{
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    let mut dbg_struct = fmt.debug_struct("Rule");
    dbg_struct.field("head", self.head());
    dbg_struct.field("prods", &self.prods().collect::<Vec<_>>());
    dbg_struct.finish()
  }
}

// ------------

/// A single production in a grammar.
///
/// A production has a head, which is the nonterminal it reduces to, and a
/// sequence of elements forming its body. Productions compare by value: two
/// productions with the same head and body are equal no matter where they
/// are stored.
#[derive(Derivative)]
#[derivative(
  Copy(bound = ""),
  Clone(bound = ""),
  PartialEq(bound = "T: PartialEq, NT: PartialEq"),
  Eq(bound = "T: Eq, NT: Eq"),
  Hash(bound = "T: std::hash::Hash, NT: std::hash::Hash")
)]
pub struct Prod<'a, T, NT> {
  head: &'a NT,
  prod: &'a ProdInner<T, NT>,
}

impl<'a, T, NT> Prod<'a, T, NT> {
  fn new(head: &'a NT, prod: &'a ProdInner<T, NT>) -> Self {
    Prod { head, prod }
  }

  /// Returns the head of this production.
  pub fn head(&self) -> &'a NT {
    self.head
  }

  /// Returns the elements of this production.
  pub fn elements(&self) -> &'a [Elem<T, NT>] {
    &self.prod.elements
  }

  /// Returns the number of elements in this production.
  pub fn num_elements(&self) -> usize {
    self.prod.elements.len()
  }

  /// Returns the element at a given index, or `None` past the end.
  pub fn element_at(&self, index: usize) -> Option<&'a Elem<T, NT>> {
    self.prod.elements.get(index)
  }

  /// Returns true if this production derives the empty sequence directly.
  pub fn is_empty(&self) -> bool {
    self.prod.elements.is_empty()
  }
}

impl<'a, T, NT> std::fmt::Debug for Prod<'a, T, NT>
where
  T: Debug,
  NT: Debug,
{
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    let mut dbg_struct = fmt.debug_struct("Prod");
    dbg_struct.field("head", self.head());
    dbg_struct.field("elems", &self.elements());
    dbg_struct.finish()
  }
}

impl<'a, T, NT> ToDoc for Prod<'a, T, NT>
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
      .head
      .to_doc(da)
      .append(da.text(" =>"))
      .append(da.softline())
      .append(self.prod.to_doc(da))
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::build;

  #[test]
  fn test_prods_compare_by_value() {
    let g: Grammar<Terminal, NonTerminal> = build("x", |gb| {
      gb.add_rule("x", |rb| {
        rb.add_prod(|pb| {
          pb.add_term("a");
        })
        .add_prod(|pb| {
          pb.add_term("a");
        })
        .add_prod(|pb| {
          pb.add_term("b");
        });
      });
    })
    .unwrap();

    let prods: Vec<_> = g.prods().collect();
    assert_eq!(prods.len(), 3);
    assert!(!std::ptr::eq(prods[0].elements(), prods[1].elements()));
    assert_eq!(prods[0], prods[1]);
    assert_ne!(prods[0], prods[2]);
  }

  #[test]
  fn test_rules_with_same_head_merge() {
    let g: Grammar<Terminal, NonTerminal> = build("x", |gb| {
      gb.add_rule("x", |rb| {
        rb.add_prod(|pb| {
          pb.add_term("a");
        });
      })
      .add_rule("x", |rb| {
        rb.add_prod(|pb| {
          pb.add_term("b");
        });
      });
    })
    .unwrap();

    let rule = g.try_get_rule(&NonTerminal::new("x")).unwrap();
    let firsts: Vec<_> = rule
      .prods()
      .map(|p| p.element_at(0).and_then(Elem::as_term).cloned())
      .collect();
    assert_eq!(
      firsts,
      vec![Some(Terminal::new("a")), Some(Terminal::new("b"))]
    );
  }

  #[test]
  fn test_unresolved_nonterm_is_rejected() {
    let result: Result<Grammar<Terminal, NonTerminal>, _> =
      build("x", |gb| {
        gb.add_rule("x", |rb| {
          rb.add_prod(|pb| {
            pb.add_term("a").add_nonterm("y");
          });
        });
      });

    assert_eq!(
      result.unwrap_err(),
      GrammarError::UnresolvedNonTerm {
        head: NonTerminal::new("x"),
        missing: NonTerminal::new("y"),
      }
    );
  }

  #[test]
  fn test_missing_start_is_rejected() {
    let result: Result<Grammar<Terminal, NonTerminal>, _> =
      build("start", |gb| {
        gb.add_rule("x", |rb| {
          rb.add_prod(|pb| {
            pb.add_term("a");
          });
        });
      });

    assert_eq!(
      result.unwrap_err(),
      GrammarError::MissingStartRule(NonTerminal::new("start"))
    );
  }

  #[test]
  fn test_rule_without_prods_is_rejected() {
    let result: Result<Grammar<Terminal, NonTerminal>, _> =
      build("x", |gb| {
        gb.add_rule("x", |_| {});
      });

    assert_eq!(
      result.unwrap_err(),
      GrammarError::EmptyRule(NonTerminal::new("x"))
    );
  }

  #[test]
  fn test_grammar_print() {
    let g: Grammar<Terminal, NonTerminal> = build("x", |gb| {
      gb.add_rule("x", |rb| {
        rb.add_prod(|pb| {
          pb.add_term("A").add_nonterm("x").add_term("A");
        })
        .add_prod(|_| {});
      });
    })
    .unwrap();

    let text = to_pretty_string(&g, 200);
    assert!(text.contains("Start = x"), "{}", text);
    assert!(text.contains("x => \"A\" <x> \"A\" | ε;"), "{}", text);
  }
}
