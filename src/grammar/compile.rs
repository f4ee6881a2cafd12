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

//! Compiles textual rules into a grammar.
//!
//! Each rule has the form
//!
//! ```text
//! <id> -> <alt> | <alt> | ...
//! ```
//!
//! where each alternative is a whitespace separated list of symbols. A symbol
//! is either a bare identifier, naming a nonterminal, or a double quoted
//! literal, naming a terminal. Quoted literals may contain `|` and `->`.
//! An empty alternative is an empty production.

use crate::grammar::{build, Elem, Grammar, GrammarError, NonTerminal, Terminal};

/// A grammar compiled from rule text.
pub type TextGrammar = Grammar<Terminal, NonTerminal>;

type TextElem = Elem<Terminal, NonTerminal>;

const ARROW: &str = "->";

/// Why a rule could not be parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
  #[error("missing `->` separator")]
  MissingArrow,
  #[error("empty left-hand side")]
  EmptyHead,
  #[error("left-hand side is not a single identifier")]
  InvalidHead,
  #[error("empty right-hand side")]
  EmptyBody,
  #[error("unterminated quoted literal")]
  UnterminatedLiteral,
  #[error("empty quoted literal")]
  EmptyLiteral,
  #[error("quote not separated from an adjacent symbol")]
  StrayQuote,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
  #[error("malformed rule {rule:?}: {reason}")]
  MalformedRule {
    rule: String,
    reason: MalformedReason,
  },
  #[error("rule {head} references undefined nonterminal {missing}")]
  UnresolvedSymbol { head: String, missing: String },
  #[error("root nonterminal {0} has no rule")]
  UnknownRoot(String),
  #[error("no rules to compile")]
  NoRules,
}

impl From<GrammarError<NonTerminal>> for CompileError {
  fn from(err: GrammarError<NonTerminal>) -> Self {
    match err {
      GrammarError::MissingStartRule(nt) => {
        CompileError::UnknownRoot(nt.as_str().to_string())
      }
      GrammarError::UnresolvedNonTerm { head, missing } => {
        CompileError::UnresolvedSymbol {
          head: head.as_str().to_string(),
          missing: missing.as_str().to_string(),
        }
      }
      GrammarError::EmptyRule(nt) => CompileError::MalformedRule {
        rule: nt.as_str().to_string(),
        reason: MalformedReason::EmptyBody,
      },
    }
  }
}

/// A single parsed rule: its head and its alternatives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedRule {
  pub head: NonTerminal,
  pub alternatives: Vec<Vec<TextElem>>,
}

fn parse_head(head: &str) -> Result<NonTerminal, MalformedReason> {
  let head = head.trim();
  if head.is_empty() {
    return Err(MalformedReason::EmptyHead);
  }

  if head
    .chars()
    .any(|c| c.is_whitespace() || c == '"' || c == '|')
  {
    return Err(MalformedReason::InvalidHead);
  }

  Ok(NonTerminal::new(head))
}

fn parse_body(body: &str) -> Result<Vec<Vec<TextElem>>, MalformedReason> {
  if body.trim().is_empty() {
    return Err(MalformedReason::EmptyBody);
  }

  let mut alternatives = vec![Vec::new()];
  let mut chars = body.char_indices().peekable();
  while let Some((start, c)) = chars.next() {
    let elem = match c {
      c if c.is_whitespace() => continue,
      '|' => {
        alternatives.push(Vec::new());
        continue;
      }
      '"' => {
        let end = chars
          .by_ref()
          .find(|(_, c)| *c == '"')
          .map(|(i, _)| i)
          .ok_or(MalformedReason::UnterminatedLiteral)?;
        let literal = &body[start + 1..end];
        if literal.is_empty() {
          return Err(MalformedReason::EmptyLiteral);
        }
        // Only whitespace or `|` may follow a closing quote.
        if let Some(&(_, next)) = chars.peek() {
          if !next.is_whitespace() && next != '|' {
            return Err(MalformedReason::StrayQuote);
          }
        }
        Elem::Term(Terminal::new(literal))
      }
      _ => {
        let mut end = body.len();
        while let Some(&(i, c)) = chars.peek() {
          if c.is_whitespace() || c == '|' {
            end = i;
            break;
          }
          if c == '"' {
            return Err(MalformedReason::StrayQuote);
          }
          chars.next();
        }
        Elem::NonTerm(NonTerminal::new(&body[start..end]))
      }
    };

    if let Some(alt) = alternatives.last_mut() {
      alt.push(elem);
    }
  }

  Ok(alternatives)
}

/// Parses a single rule line without resolving its references.
pub fn parse_rule(rule: &str) -> Result<ParsedRule, CompileError> {
  let malformed = |reason| CompileError::MalformedRule {
    rule: rule.to_string(),
    reason,
  };

  let arrow = rule
    .find(ARROW)
    .ok_or_else(|| malformed(MalformedReason::MissingArrow))?;
  let head = parse_head(&rule[..arrow]).map_err(malformed)?;
  let alternatives =
    parse_body(&rule[arrow + ARROW.len()..]).map_err(malformed)?;

  Ok(ParsedRule { head, alternatives })
}

/// Compiles rule text into grammars.
///
/// By default the root of the compiled grammar is the head of the first
/// rule. Use `with_root` when the rules are not ordered with the root first.
#[derive(Clone, Debug, Default)]
pub struct GrammarCompiler {
  root: Option<NonTerminal>,
}

impl GrammarCompiler {
  pub fn new() -> Self {
    GrammarCompiler::default()
  }

  /// Sets the root nonterminal explicitly.
  pub fn with_root(mut self, root: &str) -> Self {
    self.root = Some(NonTerminal::new(root.trim()));
    self
  }

  pub fn compile<I, S>(&self, rules: I) -> Result<TextGrammar, CompileError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let parsed = rules
      .into_iter()
      .map(|rule| parse_rule(rule.as_ref()))
      .collect::<Result<Vec<_>, _>>()?;

    let root = match (&self.root, parsed.first()) {
      (Some(root), _) => root.clone(),
      (None, Some(first)) => first.head.clone(),
      (None, None) => return Err(CompileError::NoRules),
    };

    let grammar = build(&root, |gb| {
      for ParsedRule { head, alternatives } in parsed {
        gb.add_rule(head, |rb| {
          for alt in alternatives {
            rb.add_prod_with_elems(alt);
          }
        });
      }
    })?;

    log::debug!(
      "Compiled grammar with root {} ({} rules, {} productions).",
      root,
      grammar.rules().count(),
      grammar.prods().count()
    );

    Ok(grammar)
  }
}

/// Compiles `rules`, using the head of the first rule as the root.
pub fn compile<I, S>(rules: I) -> Result<TextGrammar, CompileError>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  GrammarCompiler::new().compile(rules)
}

/// Compiles `rules` with an explicit root nonterminal.
pub fn compile_with_root<I, S>(
  rules: I,
  root: &str,
) -> Result<TextGrammar, CompileError>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  GrammarCompiler::new().with_root(root).compile(rules)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::examples::ARITHMETIC_RULES;

  fn term(s: &str) -> TextElem {
    Elem::Term(Terminal::new(s))
  }

  fn nonterm(s: &str) -> TextElem {
    Elem::NonTerm(NonTerminal::new(s))
  }

  fn reason_of(rule: &str) -> MalformedReason {
    match parse_rule(rule) {
      Err(CompileError::MalformedRule { reason, .. }) => reason,
      other => panic!("expected malformed rule, got {:?}", other),
    }
  }

  #[test]
  fn test_parse_simple_rule() {
    let parsed = parse_rule("S -> S \"+\" M | M").unwrap();
    assert_eq!(parsed.head, NonTerminal::new("S"));
    assert_eq!(
      parsed.alternatives,
      vec![vec![nonterm("S"), term("+"), nonterm("M")], vec![nonterm("M")]]
    );
  }

  #[test]
  fn test_parse_without_spaces() {
    let parsed = parse_rule("T->\"1\"|\"2\"|x").unwrap();
    assert_eq!(parsed.head, NonTerminal::new("T"));
    assert_eq!(
      parsed.alternatives,
      vec![vec![term("1")], vec![term("2")], vec![nonterm("x")]]
    );
  }

  #[test]
  fn test_parse_quoted_separators() {
    let parsed = parse_rule("op -> \"|\" | \"->\"").unwrap();
    assert_eq!(parsed.alternatives, vec![vec![term("|")], vec![term("->")]]);
  }

  #[test]
  fn test_parse_empty_alternative() {
    let parsed = parse_rule("A -> \"a\" A |").unwrap();
    assert_eq!(
      parsed.alternatives,
      vec![vec![term("a"), nonterm("A")], vec![]]
    );
  }

  #[test]
  fn test_malformed_rules() {
    assert_eq!(reason_of("A \"a\""), MalformedReason::MissingArrow);
    assert_eq!(reason_of(" -> \"a\""), MalformedReason::EmptyHead);
    assert_eq!(reason_of("A B -> \"a\""), MalformedReason::InvalidHead);
    assert_eq!(reason_of("\"a\" -> \"a\""), MalformedReason::InvalidHead);
    assert_eq!(reason_of("A ->   "), MalformedReason::EmptyBody);
    assert_eq!(reason_of("A -> \"a"), MalformedReason::UnterminatedLiteral);
    assert_eq!(reason_of("A -> \"\""), MalformedReason::EmptyLiteral);
    assert_eq!(reason_of("A -> b\"c\""), MalformedReason::StrayQuote);
    assert_eq!(reason_of("A -> \"a\"b"), MalformedReason::StrayQuote);
    assert_eq!(reason_of("A -> \"a\"\"b\""), MalformedReason::StrayQuote);
    assert_eq!(reason_of("A -> b | \"a\"b"), MalformedReason::StrayQuote);
  }

  #[test]
  fn test_malformed_error_names_rule() {
    let err = compile(&["P -> \"a\"", "broken"]).unwrap_err();
    assert_eq!(
      err,
      CompileError::MalformedRule {
        rule: "broken".to_string(),
        reason: MalformedReason::MissingArrow,
      }
    );
    assert_eq!(
      err.to_string(),
      "malformed rule \"broken\": missing `->` separator"
    );
  }

  #[test]
  fn test_compile_arithmetic() {
    let g = compile(ARITHMETIC_RULES).unwrap();
    assert_eq!(g.start_nt(), &NonTerminal::new("P"));
    assert_eq!(g.rules().count(), 4);
    assert_eq!(g.prods().count(), 1 + 2 + 2 + 4);
  }

  #[test]
  fn test_symbols_need_separators() {
    assert!(compile(&["A -> \"a\"b", "b -> \"c\""]).is_err());
    let parsed = parse_rule("A -> \"a\" b|\"c\"").unwrap();
    assert_eq!(
      parsed.alternatives,
      vec![vec![term("a"), nonterm("b")], vec![term("c")]]
    );
  }

  #[test]
  fn test_unresolved_symbol() {
    let err = compile(&["P -> A \"x\"", "A -> B"]).unwrap_err();
    assert_eq!(
      err,
      CompileError::UnresolvedSymbol {
        head: "A".to_string(),
        missing: "B".to_string(),
      }
    );
  }

  #[test]
  fn test_explicit_root() {
    let rules = ["A -> \"a\"", "B -> A A"];
    let g = compile_with_root(&rules, "B").unwrap();
    assert_eq!(g.start_nt(), &NonTerminal::new("B"));

    let err = compile_with_root(&rules, "C").unwrap_err();
    assert_eq!(err, CompileError::UnknownRoot("C".to_string()));
  }

  #[test]
  fn test_no_rules() {
    let rules: Vec<String> = Vec::new();
    assert_eq!(compile(rules).unwrap_err(), CompileError::NoRules);
  }

  #[test]
  fn test_repeated_heads_merge() {
    let g = compile(&["A -> \"a\"", "A -> \"b\" A"]).unwrap();
    assert_eq!(g.rules().count(), 1);
    assert_eq!(g.prods().count(), 2);
  }
}
