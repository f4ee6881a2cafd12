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

//! Grammars shared by the unit tests.

use crate::grammar::{build, Grammar, NonTerminal, Terminal};

pub type BaseGrammar = Grammar<Terminal, NonTerminal>;

pub const ARITHMETIC_RULES: &[&str] = &[
  "P -> S",
  "S -> S \"+\" M | M",
  "M -> M \"*\" T | T",
  "T -> \"1\"|\"2\"|\"3\"|\"4\"",
];

pub const NESTED_RULES: &[&str] = &[
  "0 -> 8 11",
  "8 -> 42 | 42 8",
  "11 -> 42 31 | 42 11 31",
  "42 -> \"a\"",
  "31 -> \"b\"",
];

/// `start => a | b`, `a => "A"`, `b => "B"`.
pub fn make_simple() -> BaseGrammar {
  build("start", |gb| {
    gb.add_rule("start", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("a");
      })
      .add_prod(|pb| {
        pb.add_nonterm("b");
      });
    })
    .add_rule("a", |rb| {
      rb.add_prod(|pb| {
        pb.add_term("A");
      });
    })
    .add_rule("b", |rb| {
      rb.add_prod(|pb| {
        pb.add_term("B");
      });
    });
  })
  .unwrap()
}

/// Every nonterminal of this grammar is nullable.
pub fn make_simple_nullable() -> BaseGrammar {
  build("start", |gb| {
    gb.add_rule("start", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("a").add_nonterm("b").add_nonterm("c");
      });
    })
    .add_rule("a", |rb| {
      rb.add_prod(|_| {}).add_prod(|pb| {
        pb.add_term("A");
      });
    })
    .add_rule("b", |rb| {
      rb.add_prod(|_| {});
    })
    .add_rule("c", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("a").add_nonterm("b");
      });
    });
  })
  .unwrap()
}

/// Parenthesized lists of `x`, where lists may be empty.
pub fn make_paren() -> BaseGrammar {
  build("start", |gb| {
    gb.add_rule("start", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("expr");
      });
    })
    .add_rule("expr", |rb| {
      rb.add_prod(|pb| {
        pb.add_term("(").add_nonterm("expr_list").add_term(")");
      })
      .add_prod(|pb| {
        pb.add_term("x");
      });
    })
    .add_rule("expr_list", |rb| {
      rb.add_prod(|_| {}).add_prod(|pb| {
        pb.add_nonterm("expr").add_nonterm("expr_list");
      });
    });
  })
  .unwrap()
}

/// `list => list "x" | "x"`.
pub fn make_left_recursive() -> BaseGrammar {
  build("list", |gb| {
    gb.add_rule("list", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("list").add_term("x");
      })
      .add_prod(|pb| {
        pb.add_term("x");
      });
    });
  })
  .unwrap()
}
