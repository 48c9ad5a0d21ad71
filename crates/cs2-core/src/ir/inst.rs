use serde::{Deserialize, Serialize};

use super::expr::{Expression, Variable};

/// A statement inside a [`Construct::Seq`](super::Construct::Seq).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "insn", rename_all = "lowercase")]
pub enum Instruction {
    /// `defs = expression`. With no definitions the expression is evaluated
    /// for its effect only.
    Assignment {
        #[serde(default)]
        definitions: Vec<Variable>,
        expression: Expression,
    },
    /// Return the (possibly empty) compound operand.
    Return { expression: Expression },
}

impl Instruction {
    pub fn assign(definitions: Vec<Variable>, expression: Expression) -> Self {
        Instruction::Assignment {
            definitions,
            expression,
        }
    }

    pub fn effect(expression: Expression) -> Self {
        Instruction::Assignment {
            definitions: Vec::new(),
            expression,
        }
    }

    pub fn ret(values: Vec<Expression>) -> Self {
        Instruction::Return {
            expression: Expression::Compound(values),
        }
    }

    /// Residual "discard top of stack" placeholder: an assignment with no
    /// targets whose whole expression is one anonymous stack slot.
    pub fn is_stack_discard(&self) -> bool {
        match self {
            Instruction::Assignment {
                definitions,
                expression,
            } => {
                definitions.is_empty()
                    && matches!(
                        expression.as_list(),
                        [Expression::Variable(Variable::Stack { .. })]
                    )
            }
            Instruction::Return { .. } => false,
        }
    }
}
