use serde::{Deserialize, Serialize};

use super::construct::Construct;
use super::expr::Variable;
use super::inst::Instruction;
use super::ty::Type;

/// A decompiled script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    /// Script id in the cache archive.
    pub id: i32,
    /// Declared arguments, in order. Always `Variable::Local`.
    #[serde(default)]
    pub arguments: Vec<Variable>,
    #[serde(default)]
    pub return_types: Vec<Type>,
    /// Structured body. Owns every instruction of the script.
    pub body: Construct,
}

impl Function {
    pub fn new(id: i32, body: Construct) -> Self {
        Self {
            id,
            arguments: Vec::new(),
            return_types: Vec::new(),
            body,
        }
    }

    /// All instructions, in textual order.
    pub fn instructions(&self) -> Vec<&Instruction> {
        let mut out = Vec::new();
        self.body.for_each_instruction(&mut |insn| out.push(insn));
        out
    }
}
