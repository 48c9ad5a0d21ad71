use std::fmt::Write;

use cs2_core::error::EmitError;
use cs2_core::ir::{Constant, Expression, HookNamespace, Opcode, Variable};
use cs2_core::names::NameKind;

use crate::literal::encode_constant;
use crate::printer::ScriptEmitter;

impl ScriptEmitter<'_> {
    // -----------------------------------------------------------------------
    // Expressions
    // -----------------------------------------------------------------------

    pub(crate) fn write_expr(&mut self, expr: &Expression) -> Result<(), EmitError> {
        match expr {
            Expression::Variable(var) => self.write_var(var),
            Expression::Constant(constant) => {
                let text = encode_constant(constant, self.names)?;
                self.w.push_str(&text);
                Ok(())
            }
            Expression::Operation {
                opcode, arguments, ..
            } => self.write_operation(*opcode, arguments),
            Expression::Compound(exprs) => self.write_list(exprs),
        }
    }

    pub(crate) fn write_list(&mut self, exprs: &[Expression]) -> Result<(), EmitError> {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.w.push_str(", ");
            }
            self.write_expr(expr)?;
        }
        Ok(())
    }

    pub(crate) fn write_var(&mut self, var: &Variable) -> Result<(), EmitError> {
        let _ = match var {
            Variable::Local { ty, id } => write!(self.w, "${ty}{id}"),
            Variable::Varp { id, .. } => write!(self.w, "%var{id}"),
            Variable::Varbit { id, .. } => write!(self.w, "%varbit{id}"),
            Variable::Varc { ty, id } => write!(self.w, "%varc{}{id}", ty.top_type().literal()),
            Variable::Stack { id, .. } => return Err(EmitError::StackVariable(*id)),
        };
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    fn write_operation(&mut self, opcode: Opcode, args: &[Expression]) -> Result<(), EmitError> {
        match opcode {
            Opcode::INVOKE => return self.write_invoke(args),
            Opcode::DEFINE_ARRAY => {
                let [array, elem, size] = take::<3>(args, "define_array")?;
                self.w.push_str("def_");
                self.write_expr(elem)?;
                self.w.push_str(" $array");
                self.write_expr(array)?;
                self.w.push('(');
                self.write_expr(size)?;
                self.w.push(')');
                return Ok(());
            }
            Opcode::GET_ARRAY_INT => {
                let [array, index] = take::<2>(args, "array read")?;
                self.write_array_slot(array, index)?;
                return Ok(());
            }
            Opcode::SET_ARRAY_INT => {
                let [array, index, value] = take::<3>(args, "array write")?;
                self.write_array_slot(array, index)?;
                self.w.push_str(" = ");
                return self.write_expr(value);
            }
            Opcode::JOIN_STRING => return self.write_join(args),
            _ => {}
        }

        if let Some(namespace) = opcode.hook() {
            return self.write_hook(opcode, namespace, args);
        }
        if let Some(sym) = opcode.branch_infix() {
            return self.write_infix(sym, args, "branch");
        }
        if let Some(sym) = opcode.calc_infix() {
            let was_calc = self.in_calc;
            if !was_calc {
                self.w.push_str("calc");
                self.in_calc = true;
            }
            let result = self.write_infix(sym, args, "calc");
            self.in_calc = was_calc;
            return result;
        }

        let mut args = args;
        if opcode.is_dot() {
            let (flag, rest) = args
                .split_last()
                .ok_or_else(|| EmitError::shape("dot call", format!("{opcode} has no target flag")))?;
            if int_constant(flag, "dot call")? == 1 {
                self.w.push('.');
            }
            args = rest;
        }
        let name = opcode.name().ok_or(EmitError::UnknownOpcode(opcode))?;
        self.w.push_str(name);
        if !args.is_empty() {
            self.w.push('(');
            self.write_list(args)?;
            self.w.push(')');
        }
        Ok(())
    }

    fn write_infix(
        &mut self,
        sym: &str,
        args: &[Expression],
        context: &'static str,
    ) -> Result<(), EmitError> {
        let [lhs, rhs] = take::<2>(args, context)?;
        self.w.push('(');
        self.write_expr(lhs)?;
        let _ = write!(self.w, " {sym} ");
        self.write_expr(rhs)?;
        self.w.push(')');
        Ok(())
    }

    fn write_array_slot(&mut self, array: &Expression, index: &Expression) -> Result<(), EmitError> {
        self.w.push_str("$array");
        self.write_expr(array)?;
        self.w.push('(');
        self.write_expr(index)?;
        self.w.push(')');
        Ok(())
    }

    /// `"text<expr>text"`: string constants inline, everything else in
    /// angle brackets.
    fn write_join(&mut self, args: &[Expression]) -> Result<(), EmitError> {
        self.w.push('"');
        for arg in args {
            match arg.as_constant().and_then(Constant::as_str) {
                Some(s) => self.w.push_str(s),
                None => {
                    self.w.push('<');
                    self.write_expr(arg)?;
                    self.w.push('>');
                }
            }
        }
        self.w.push('"');
        Ok(())
    }

    fn write_invoke(&mut self, args: &[Expression]) -> Result<(), EmitError> {
        let (callee, rest) = args
            .split_first()
            .ok_or_else(|| EmitError::shape("invoke", "missing script id"))?;
        let id = int_constant(callee, "invoke")?;
        self.w.push('~');
        let names = self.names;
        match names.resolve(NameKind::Script, id) {
            Some(name) => self.w.push_str(strip_brackets(name, "[proc,")),
            None => {
                let _ = write!(self.w, "script{id}");
            }
        }
        if !rest.is_empty() {
            self.w.push('(');
            self.write_list(rest)?;
            self.w.push(')');
        }
        Ok(())
    }

    /// Hook setters pack a callback invocation into one string argument:
    /// `cc_setonclick("handler(args){triggers}")`.
    ///
    /// Argument layout: script id, fixed args, triggers, trigger count,
    /// component. `cc_*` hooks turn a component of `1` into a leading dot;
    /// `if_*` hooks print the component after the string.
    fn write_hook(
        &mut self,
        opcode: Opcode,
        namespace: HookNamespace,
        args: &[Expression],
    ) -> Result<(), EmitError> {
        const CTX: &str = "hook";
        let (component, args) = args
            .split_last()
            .ok_or_else(|| EmitError::shape(CTX, format!("{opcode} has no component")))?;
        if namespace == HookNamespace::Cc {
            let target = component.as_constant().ok_or_else(|| {
                EmitError::shape(CTX, format!("{opcode} component {component} is not a constant"))
            })?;
            if target.as_int() == Some(1) {
                self.w.push('.');
            }
        }
        let name = opcode.name().ok_or(EmitError::UnknownOpcode(opcode))?;
        self.w.push_str(name);
        self.w.push('(');

        let (script, args) = args
            .split_first()
            .ok_or_else(|| EmitError::shape(CTX, format!("{opcode} has no script id")))?;
        let script = int_constant(script, CTX)?;
        if script == -1 {
            self.w.push_str("null");
        } else {
            self.w.push('"');
            let names = self.names;
            match names.resolve(NameKind::Script, script) {
                Some(name) => self.w.push_str(strip_brackets(name, "[clientscript,")),
                None => {
                    let _ = write!(self.w, "script{script}");
                }
            }

            let (count, args) = args
                .split_last()
                .ok_or_else(|| EmitError::shape(CTX, format!("{opcode} has no trigger count")))?;
            let count = int_constant(count, CTX)?;
            let count = usize::try_from(count)
                .ok()
                .filter(|&n| n <= args.len())
                .ok_or_else(|| {
                    EmitError::shape(
                        CTX,
                        format!("trigger count {count} with {} arguments left", args.len()),
                    )
                })?;
            let (fixed, triggers) = args.split_at(args.len() - count);

            self.w.push('(');
            self.write_list(fixed)?;
            self.w.push(')');
            if !triggers.is_empty() {
                self.w.push('{');
                self.write_list(triggers)?;
                self.w.push('}');
            }
            self.w.push('"');
        }

        if namespace == HookNamespace::If {
            self.w.push_str(", ");
            self.write_expr(component)?;
        }
        self.w.push(')');
        Ok(())
    }
}

/// The arguments of an operation that takes exactly `N`.
fn take<'e, const N: usize>(
    args: &'e [Expression],
    context: &'static str,
) -> Result<&'e [Expression; N], EmitError> {
    <&[Expression; N]>::try_from(args).map_err(|_| {
        EmitError::shape(
            context,
            format!("expected {N} arguments, found {}", args.len()),
        )
    })
}

fn int_constant(expr: &Expression, context: &'static str) -> Result<i32, EmitError> {
    expr.as_constant()
        .and_then(Constant::as_int)
        .ok_or_else(|| EmitError::shape(context, format!("expected an int constant, found {expr}")))
}

/// `[proc,name]` → `name`. Names without the prefix are kept whole.
fn strip_brackets<'n>(name: &'n str, prefix: &str) -> &'n str {
    match name.strip_prefix(prefix) {
        Some(inner) => inner.strip_suffix(']').unwrap_or(inner),
        None => name,
    }
}
