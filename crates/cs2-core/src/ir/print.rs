//! Raw IR dump format used by `--dump-ir`.
//!
//! Unlike the strict backend this never consults name tables or decodes
//! constants, so it works on any IR, including malformed input.

use std::fmt::{self, Display, Formatter};

use super::construct::Construct;
use super::expr::{Constant, Expression, Value, Variable};
use super::func::Function;
use super::inst::Instruction;

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Local { ty, id } => write!(f, "local{id}:{ty}"),
            Variable::Varp { ty, id } => write!(f, "varp{id}:{ty}"),
            Variable::Varbit { ty, id } => write!(f, "varbit{id}:{ty}"),
            Variable::Varc { ty, id } => write!(f, "varc{id}:{ty}"),
            Variable::Stack { ty, id } => write!(f, "stack{id}:{ty}"),
        }
    }
}

impl Display for Constant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::Int(n) => write!(f, "{}({n})", self.ty),
            Value::String(s) => write!(f, "{}({s:?})", self.ty),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Variable(v) => v.fmt(f),
            Expression::Constant(c) => c.fmt(f),
            Expression::Operation {
                opcode, arguments, ..
            } => {
                write!(f, "{opcode}")?;
                write_list(f, "(", arguments, ")")
            }
            Expression::Compound(es) => write_list(f, "[", es, "]"),
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Assignment {
                definitions,
                expression,
            } => {
                if !definitions.is_empty() {
                    write_list(f, "", definitions, " = ")?;
                }
                write!(f, "{expression}")
            }
            Instruction::Return { expression } => write!(f, "return {expression}"),
        }
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "script {}", self.id)?;
        write_list(f, "(", &self.arguments, ")")?;
        if !self.return_types.is_empty() {
            write_list(f, " -> (", &self.return_types, ")")?;
        }
        writeln!(f)?;
        write_construct(f, &self.body, 1)
    }
}

fn write_list<T: Display>(f: &mut Formatter<'_>, open: &str, items: &[T], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

fn write_construct(f: &mut Formatter<'_>, construct: &Construct, depth: usize) -> fmt::Result {
    let pad = "  ".repeat(depth);
    match construct {
        Construct::Seq { instructions, .. } => {
            for insn in instructions {
                writeln!(f, "{pad}{insn}")?;
            }
        }
        Construct::If { branches, elze, .. } => {
            for (i, branch) in branches.iter().enumerate() {
                let kw = if i == 0 { "if" } else { "elif" };
                writeln!(f, "{pad}{kw} {}", branch.condition)?;
                write_construct(f, &branch.body, depth + 1)?;
            }
            if let Some(elze) = elze {
                writeln!(f, "{pad}else")?;
                write_construct(f, elze, depth + 1)?;
            }
        }
        Construct::While {
            condition, body, ..
        } => {
            writeln!(f, "{pad}while {condition}")?;
            write_construct(f, body, depth + 1)?;
        }
        Construct::Switch {
            scrutinee,
            cases,
            elze,
            ..
        } => {
            writeln!(f, "{pad}switch {scrutinee}")?;
            for case in cases {
                writeln!(f, "{pad}case {:?}", case.labels)?;
                write_construct(f, &case.body, depth + 1)?;
            }
            if let Some(elze) = elze {
                writeln!(f, "{pad}default")?;
                write_construct(f, elze, depth + 1)?;
            }
        }
    }
    match construct.next() {
        Some(next) => write_construct(f, next, depth),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use crate::ir::{Construct, Expression, Function, Instruction, Opcode, Type, Variable};

    #[test]
    fn dump_is_readable() {
        let mut func = Function::new(
            12,
            Construct::seq(vec![
                Instruction::assign(
                    vec![Variable::local(Type::Int, 1)],
                    Expression::op(
                        Opcode::ADD,
                        vec![Type::Int],
                        vec![Expression::local(Type::Int, 0), Expression::int(Type::Int, 1)],
                    ),
                ),
                Instruction::ret(vec![]),
            ]),
        );
        func.arguments.push(Variable::local(Type::Int, 0));
        let dump = func.to_string();
        assert_eq!(
            dump,
            "script 12(local0:int)\n  local1:int = 4000(add)(local0:int, int(1))\n  return []\n"
        );
    }
}
