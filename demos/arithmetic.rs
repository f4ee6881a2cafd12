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

use anyhow::Context;
use cfgmatch::{compile, Matcher};

const RULES: &[&str] = &[
  "P -> S",
  "S -> S \"+\" M | M",
  "M -> M \"*\" T | T",
  "T -> \"1\" | \"2\" | \"3\" | \"4\"",
];

fn main() -> anyhow::Result<()> {
  let g = compile(RULES).context("compiling the arithmetic grammar")?;
  eprintln!("Grammar: {}", g.to_pretty());

  let matcher = Matcher::new(&g);
  let sentences: Vec<String> = std::env::args().skip(1).collect();
  let sentences = if sentences.is_empty() {
    vec!["2 + 3 * 4".to_string(), "2 + * 4".to_string()]
  } else {
    sentences
  };

  for sentence in &sentences {
    println!("{:?}: {}", sentence, matcher.matches(sentence));
  }

  Ok(())
}
