use crate::error::CoreError;
use crate::ir::{Function, Module};
use crate::pipeline::{Transform, TransformResult};

/// Dead stack-pop pruning: removes the `discard top of stack` placeholders
/// that stack-to-variable conversion leaves behind.
///
/// A placeholder is an assignment with no definitions whose expression is a
/// single anonymous stack slot. Nothing else is touched, and the remaining
/// instructions keep their relative order.
pub struct DeleteNops;

impl Transform for DeleteNops {
    fn name(&self) -> &str {
        "delete-nops"
    }

    fn apply(&self, mut module: Module) -> Result<TransformResult, CoreError> {
        let mut removed = 0;
        for func in &mut module.functions {
            removed += delete_nops(func);
        }
        Ok(TransformResult {
            module,
            changed: removed > 0,
        })
    }
}

/// Prune one function in place. Returns the number of instructions removed.
pub fn delete_nops(func: &mut Function) -> usize {
    let mut removed = 0;
    func.body.for_each_seq_mut(&mut |insns| {
        let before = insns.len();
        insns.retain(|insn| !insn.is_stack_discard());
        removed += before - insns.len();
    });
    removed
}
