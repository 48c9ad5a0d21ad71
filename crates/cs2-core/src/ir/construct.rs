//! Structured control-flow tree produced by upstream CFG reconstruction.
//!
//! Each node carries its own body plus an optional `next`: the code that
//! follows it at the same nesting level. `next` is `None` only at the end of
//! a block.

use serde::{Deserialize, Serialize};

use super::expr::Expression;
use super::inst::Instruction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IfBranch {
    pub condition: Expression,
    pub body: Construct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchCase {
    /// Case labels sharing this body, in source order.
    pub labels: Vec<i32>,
    pub body: Construct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "construct", rename_all = "lowercase")]
pub enum Construct {
    Seq {
        instructions: Vec<Instruction>,
        #[serde(default)]
        next: Option<Box<Construct>>,
    },
    If {
        branches: Vec<IfBranch>,
        #[serde(default)]
        elze: Option<Box<Construct>>,
        #[serde(default)]
        next: Option<Box<Construct>>,
    },
    While {
        condition: Expression,
        body: Box<Construct>,
        #[serde(default)]
        next: Option<Box<Construct>>,
    },
    Switch {
        scrutinee: Expression,
        cases: Vec<SwitchCase>,
        #[serde(default)]
        elze: Option<Box<Construct>>,
        #[serde(default)]
        next: Option<Box<Construct>>,
    },
}

impl Construct {
    pub fn seq(instructions: Vec<Instruction>) -> Self {
        Construct::Seq {
            instructions,
            next: None,
        }
    }

    pub fn next(&self) -> Option<&Construct> {
        match self {
            Construct::Seq { next, .. }
            | Construct::If { next, .. }
            | Construct::While { next, .. }
            | Construct::Switch { next, .. } => next.as_deref(),
        }
    }

    fn next_slot(&mut self) -> &mut Option<Box<Construct>> {
        match self {
            Construct::Seq { next, .. }
            | Construct::If { next, .. }
            | Construct::While { next, .. }
            | Construct::Switch { next, .. } => next,
        }
    }

    /// Append `tail` after the last node of this chain.
    pub fn then(mut self, tail: Construct) -> Self {
        self.append(tail);
        self
    }

    fn append(&mut self, tail: Construct) {
        let slot = self.next_slot();
        if let Some(next) = slot {
            next.append(tail);
        } else {
            *slot = Some(Box::new(tail));
        }
    }

    /// Visit every instruction in the tree, in textual order.
    pub fn for_each_instruction<'a>(&'a self, f: &mut impl FnMut(&'a Instruction)) {
        match self {
            Construct::Seq { instructions, .. } => instructions.iter().for_each(&mut *f),
            Construct::If { branches, elze, .. } => {
                for branch in branches {
                    branch.body.for_each_instruction(f);
                }
                if let Some(elze) = elze {
                    elze.for_each_instruction(f);
                }
            }
            Construct::While { body, .. } => body.for_each_instruction(f),
            Construct::Switch { cases, elze, .. } => {
                for case in cases {
                    case.body.for_each_instruction(f);
                }
                if let Some(elze) = elze {
                    elze.for_each_instruction(f);
                }
            }
        }
        if let Some(next) = self.next() {
            next.for_each_instruction(f);
        }
    }

    /// Visit every instruction list in the tree, in textual order.
    pub fn for_each_seq_mut(&mut self, f: &mut impl FnMut(&mut Vec<Instruction>)) {
        match self {
            Construct::Seq { instructions, .. } => f(instructions),
            Construct::If { branches, elze, .. } => {
                for branch in branches {
                    branch.body.for_each_seq_mut(f);
                }
                if let Some(elze) = elze {
                    elze.for_each_seq_mut(f);
                }
            }
            Construct::While { body, .. } => body.for_each_seq_mut(f),
            Construct::Switch { cases, elze, .. } => {
                for case in cases {
                    case.body.for_each_seq_mut(f);
                }
                if let Some(elze) = elze {
                    elze.for_each_seq_mut(f);
                }
            }
        }
        if let Some(next) = self.next_slot() {
            next.for_each_seq_mut(f);
        }
    }
}
