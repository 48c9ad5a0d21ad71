use serde::{Deserialize, Serialize};

use super::opcode::Opcode;
use super::ty::Type;

/// A storage location.
///
/// Each namespace is distinct storage: a `Varp` never aliases a `Local` with
/// the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Variable {
    /// Script-local variable, including arguments.
    Local { ty: Type, id: u32 },
    /// Player variable.
    Varp { ty: Type, id: u32 },
    /// Bit-packed slice of a player variable.
    Varbit { ty: Type, id: u32 },
    /// Client-side variable.
    Varc { ty: Type, id: u32 },
    /// Anonymous evaluation-stack slot left over from disassembly.
    Stack { ty: Type, id: u32 },
}

impl Variable {
    pub fn local(ty: Type, id: u32) -> Self {
        Variable::Local { ty, id }
    }

    pub fn ty(&self) -> Type {
        match self {
            Variable::Local { ty, .. }
            | Variable::Varp { ty, .. }
            | Variable::Varbit { ty, .. }
            | Variable::Varc { ty, .. }
            | Variable::Stack { ty, .. } => *ty,
        }
    }
}

/// Raw constant payload. Only `STRING` constants carry text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i32),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constant {
    pub ty: Type,
    pub value: Value,
}

impl Constant {
    pub fn int(ty: Type, value: i32) -> Self {
        Self {
            ty,
            value: Value::Int(value),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self {
            ty: Type::String,
            value: Value::String(value.into()),
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self.value {
            Value::Int(n) => Some(n),
            Value::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => Some(s),
            Value::Int(_) => None,
        }
    }
}

/// An expression tree node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "expr", content = "value", rename_all = "lowercase")]
pub enum Expression {
    Variable(Variable),
    Constant(Constant),
    Operation {
        opcode: Opcode,
        /// Types of the values the operation leaves on the stack.
        #[serde(default)]
        types: Vec<Type>,
        arguments: Vec<Expression>,
    },
    /// A flattenable list of expressions (multi-value returns, argument
    /// lists).
    Compound(Vec<Expression>),
}

impl Expression {
    pub fn local(ty: Type, id: u32) -> Self {
        Expression::Variable(Variable::local(ty, id))
    }

    pub fn int(ty: Type, value: i32) -> Self {
        Expression::Constant(Constant::int(ty, value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Constant(Constant::string(value))
    }

    pub fn op(opcode: Opcode, types: Vec<Type>, arguments: Vec<Expression>) -> Self {
        Expression::Operation {
            opcode,
            types,
            arguments,
        }
    }

    /// The types of the values this expression produces.
    pub fn types(&self) -> Vec<Type> {
        match self {
            Expression::Variable(v) => vec![v.ty()],
            Expression::Constant(c) => vec![c.ty],
            Expression::Operation { types, .. } => types.clone(),
            Expression::Compound(es) => es.iter().flat_map(Expression::types).collect(),
        }
    }

    /// View this expression as a list: compounds yield their elements,
    /// anything else yields itself.
    pub fn as_list(&self) -> &[Expression] {
        match self {
            Expression::Compound(es) => es,
            other => std::slice::from_ref(other),
        }
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Expression::Constant(c) => Some(c),
            _ => None,
        }
    }
}
