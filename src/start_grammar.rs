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

//! Wraps a grammar with a synthetic start rule `<START> => <root>`.

use crate::grammar::{build, Elem, Grammar, GrammarError, Prod};
use crate::utils::{take_only, ToDoc};

#[derive(Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub enum StartNonTerminal<NT> {
  Start,
  NTerm(NT),
}

impl<NT> StartNonTerminal<NT> {
  pub fn as_base(&self) -> Option<&NT> {
    match self {
      StartNonTerminal::Start => None,
      StartNonTerminal::NTerm(nt) => Some(nt),
    }
  }
}

impl<NT> ToDoc for StartNonTerminal<NT>
where
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
      StartNonTerminal::Start => da.text("<START>"),
      StartNonTerminal::NTerm(nt) => nt.to_doc(da),
    }
  }
}

pub type StartGrammar<T, NT> = Grammar<T, StartNonTerminal<NT>>;

impl<T, NT> StartGrammar<T, NT>
where
  NT: Ord + Clone,
{
  /// The single production of the synthetic start rule.
  pub fn start_prod(&self) -> Option<Prod<'_, T, StartNonTerminal<NT>>> {
    self
      .try_get_rule(&StartNonTerminal::Start)
      .and_then(|rule| take_only(rule.prods()))
  }

  /// The root nonterminal of the wrapped grammar.
  pub fn root(&self) -> Option<&NT> {
    self
      .start_prod()
      .and_then(|prod| take_only(prod.elements().iter()))
      .and_then(Elem::as_nonterm)
      .and_then(StartNonTerminal::as_base)
  }
}

pub fn wrap_grammar_with_start<T, NT>(
  g: &Grammar<T, NT>,
) -> Result<StartGrammar<T, NT>, GrammarError<StartNonTerminal<NT>>>
where
  T: Clone,
  NT: Ord + Clone,
{
  build(StartNonTerminal::Start, |gb| {
    gb.add_rule(StartNonTerminal::Start, |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm(StartNonTerminal::NTerm(g.start_nt().clone()));
      });
    });

    for rule in g.rules() {
      gb.add_rule(StartNonTerminal::NTerm(rule.head().clone()), |rb| {
        for prod in rule.prods() {
          rb.add_prod_with_elems(
            prod
              .elements()
              .iter()
              .map(|e| e.clone().map_nonterm(StartNonTerminal::NTerm))
              .collect::<Vec<_>>(),
          );
        }
      });
    }
  })
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::{examples, NonTerminal};

  #[test]
  fn test_wrap_simple() {
    let g = examples::make_simple();
    let sg = wrap_grammar_with_start(&g).unwrap();
    assert_eq!(sg.start_nt(), &StartNonTerminal::Start);
    assert_eq!(sg.root(), Some(&NonTerminal::new("start")));
    assert_eq!(sg.rules().count(), g.rules().count() + 1);
    assert_eq!(sg.prods().count(), g.prods().count() + 1);
  }

  #[test]
  fn test_start_prints() {
    let g = examples::make_simple();
    let sg = wrap_grammar_with_start(&g).unwrap();
    let text = crate::utils::to_pretty_string(&sg, 200);
    assert!(text.contains("<START> => <start>;"), "{}", text);
  }
}
