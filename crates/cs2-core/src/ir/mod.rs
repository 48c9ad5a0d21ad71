pub mod construct;
pub mod expr;
pub mod func;
pub mod inst;
pub mod module;
pub mod opcode;
mod print;
pub mod ty;

pub use construct::{Construct, IfBranch, SwitchCase};
pub use expr::{Constant, Expression, Value, Variable};
pub use func::Function;
pub use inst::Instruction;
pub use module::Module;
pub use opcode::{HookNamespace, Opcode};
pub use ty::{TopType, Type};
