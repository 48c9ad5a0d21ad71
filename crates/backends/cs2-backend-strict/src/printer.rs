use std::collections::HashSet;
use std::fmt::Write;

use cs2_core::error::EmitError;
use cs2_core::ir::{Construct, Expression, Function, IfBranch, Instruction, SwitchCase, Variable};
use cs2_core::names::{script_name, NameResolver};

use crate::literal::encode_int;
use crate::writer::LineWriter;
use crate::StrictOptions;

/// Per-function emission state.
///
/// Owned by a single emission and dropped with it: nothing here is shared
/// between functions, so independent scripts can be emitted concurrently.
pub(crate) struct ScriptEmitter<'a> {
    pub(crate) w: LineWriter,
    pub(crate) names: &'a dyn NameResolver,
    func: &'a Function,
    /// Locals that already carry their `def_<type>`; seeded with arguments.
    declared: HashSet<Variable>,
    /// Inside the outermost `calc(...)` of the current statement.
    pub(crate) in_calc: bool,
    /// Set once the final top-level return has been elided.
    fell_off: bool,
}

impl<'a> ScriptEmitter<'a> {
    pub(crate) fn new(
        func: &'a Function,
        names: &'a dyn NameResolver,
        options: &StrictOptions,
    ) -> Self {
        Self {
            w: LineWriter::new(&options.indent),
            names,
            func,
            declared: func.arguments.iter().cloned().collect(),
            in_calc: false,
            fell_off: false,
        }
    }

    /// Render the whole function. On error nothing is returned, so callers
    /// never see a truncated script.
    pub(crate) fn emit(mut self) -> Result<String, EmitError> {
        let func = self.func;
        self.write_header()?;
        self.write_construct(&func.body)?;
        if !self.fell_off {
            self.w.next_line();
        }
        Ok(self.w.finish())
    }

    // -----------------------------------------------------------------------
    // Header
    // -----------------------------------------------------------------------

    fn write_header(&mut self) -> Result<(), EmitError> {
        let func = self.func;
        let _ = write!(self.w, "// {}", func.id);
        self.w.next_line();
        self.w.push_str(&script_name(self.names, func.id));

        if !func.arguments.is_empty() || !func.return_types.is_empty() {
            self.w.push('(');
            for (i, arg) in func.arguments.iter().enumerate() {
                if i > 0 {
                    self.w.push_str(", ");
                }
                let Variable::Local { ty, id } = arg else {
                    return Err(EmitError::shape(
                        "header",
                        format!("argument {arg} is not a local"),
                    ));
                };
                let _ = write!(self.w, "{ty} ${ty}{id}");
            }
            self.w.push(')');
        }

        if !func.return_types.is_empty() {
            self.w.push('(');
            for (i, ty) in func.return_types.iter().enumerate() {
                if i > 0 {
                    self.w.push_str(", ");
                }
                self.w.push_str(ty.literal());
            }
            self.w.push(')');
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Constructs
    // -----------------------------------------------------------------------

    /// Start a new statement line.
    fn line(&mut self) -> Result<(), EmitError> {
        if self.fell_off {
            return Err(EmitError::StatementAfterReturn);
        }
        self.w.next_line();
        Ok(())
    }

    fn write_construct(&mut self, construct: &Construct) -> Result<(), EmitError> {
        match construct {
            Construct::Seq { instructions, .. } => {
                for insn in instructions {
                    self.line()?;
                    self.write_instruction(insn)?;
                }
            }
            Construct::If { branches, elze, .. } => self.write_if(branches, elze.as_deref())?,
            Construct::While {
                condition, body, ..
            } => {
                self.line()?;
                self.w.push_str("while ");
                self.write_expr(condition)?;
                self.w.push_str(" {");
                self.write_block(body)?;
            }
            Construct::Switch {
                scrutinee,
                cases,
                elze,
                ..
            } => self.write_switch(scrutinee, cases, elze.as_deref())?,
        }
        match construct.next() {
            Some(next) => self.write_construct(next),
            None => Ok(()),
        }
    }

    /// Indented body followed by the closing brace on its own line.
    fn write_block(&mut self, body: &Construct) -> Result<(), EmitError> {
        self.w.indent();
        self.write_construct(body)?;
        self.w.dedent();
        self.line()?;
        self.w.push('}');
        Ok(())
    }

    fn write_if(&mut self, branches: &[IfBranch], elze: Option<&Construct>) -> Result<(), EmitError> {
        let (first, rest) = branches
            .split_first()
            .ok_or_else(|| EmitError::shape("if", "no branches"))?;
        self.line()?;
        self.w.push_str("if ");
        self.write_expr(&first.condition)?;
        self.w.push_str(" {");
        self.write_block(&first.body)?;
        for branch in rest {
            self.w.push_str(" else if ");
            self.write_expr(&branch.condition)?;
            self.w.push_str(" {");
            self.write_block(&branch.body)?;
        }
        if let Some(elze) = elze {
            self.w.push_str(" else {");
            self.write_block(elze)?;
        }
        Ok(())
    }

    fn write_switch(
        &mut self,
        scrutinee: &Expression,
        cases: &[SwitchCase],
        elze: Option<&Construct>,
    ) -> Result<(), EmitError> {
        let ty = match scrutinee.types().as_slice() {
            [ty] => *ty,
            types => {
                return Err(EmitError::shape(
                    "switch",
                    format!("scrutinee {scrutinee} produces {} values", types.len()),
                ))
            }
        };
        self.line()?;
        let _ = write!(self.w, "switch_{ty} (");
        self.write_expr(scrutinee)?;
        self.w.push_str(") {");

        for case in cases {
            if case.labels.is_empty() {
                return Err(EmitError::shape("switch", "case without labels"));
            }
            self.w.indent();
            self.line()?;
            self.w.push_str("case ");
            for (i, label) in case.labels.iter().enumerate() {
                if i > 0 {
                    self.w.push_str(", ");
                }
                let text = encode_int(ty, *label, self.names)?;
                self.w.push_str(&text);
            }
            self.w.push_str(" :");
            self.write_case_body(&case.body)?;
        }
        if let Some(elze) = elze {
            self.w.indent();
            self.line()?;
            self.w.push_str("case default :");
            self.write_case_body(elze)?;
        }

        self.line()?;
        self.w.push('}');
        Ok(())
    }

    /// Case bodies sit one level below their label, which is itself one level
    /// inside the switch.
    fn write_case_body(&mut self, body: &Construct) -> Result<(), EmitError> {
        self.w.indent();
        self.write_construct(body)?;
        self.w.dedent();
        self.w.dedent();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Instructions
    // -----------------------------------------------------------------------

    fn write_instruction(&mut self, insn: &Instruction) -> Result<(), EmitError> {
        match insn {
            Instruction::Assignment {
                definitions,
                expression,
            } => {
                match definitions.as_slice() {
                    [] => {}
                    [def] => {
                        if matches!(def, Variable::Local { .. }) && self.declared.insert(def.clone()) {
                            let _ = write!(self.w, "def_{} ", def.ty());
                        }
                        self.write_var(def)?;
                        self.w.push_str(" = ");
                    }
                    defs => {
                        for (i, def) in defs.iter().enumerate() {
                            if i > 0 {
                                self.w.push_str(", ");
                            }
                            self.write_var(def)?;
                        }
                        self.w.push_str(" = ");
                    }
                }
                self.write_expr(expression)?;
            }
            Instruction::Return { expression } => {
                if self.w.indents() == 0 && self.func.return_types.is_empty() {
                    self.fell_off = true;
                    return Ok(());
                }
                self.w.push_str("return");
                let values = expression.as_list();
                if !values.is_empty() {
                    self.w.push('(');
                    self.write_list(values)?;
                    self.w.push(')');
                }
            }
        }
        self.w.push(';');
        Ok(())
    }
}
