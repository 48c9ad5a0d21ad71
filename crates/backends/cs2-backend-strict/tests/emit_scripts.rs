use std::fs;

use cs2_backend_strict::{
    emit_function_to_string, emit_module_to_string, script_file_name, StrictBackend,
    StrictOptions,
};
use cs2_core::error::{CoreError, EmitError};
use cs2_core::ir::{
    Construct, Expression, Function, IfBranch, Instruction, Module, Opcode, SwitchCase, Type,
    Variable,
};
use cs2_core::names::{NameKind, NameResolver, NameTable, NoNames};
use cs2_core::pipeline::{default_pipeline, Backend, BackendInput, PassConfig};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn emit(func: &Function) -> String {
    emit_with(func, &NoNames)
}

fn emit_with(func: &Function, names: &dyn NameResolver) -> String {
    emit_function_to_string(func, names, &StrictOptions::default()).unwrap()
}

fn emit_err(func: &Function) -> EmitError {
    emit_function_to_string(func, &NoNames, &StrictOptions::default()).unwrap_err()
}

fn int(n: i32) -> Expression {
    Expression::int(Type::Int, n)
}

fn local(ty: Type, id: u32) -> Expression {
    Expression::local(ty, id)
}

fn op(opcode: Opcode, args: Vec<Expression>) -> Expression {
    Expression::op(opcode, vec![], args)
}

fn typed_op(opcode: Opcode, ty: Type, args: Vec<Expression>) -> Expression {
    Expression::op(opcode, vec![ty], args)
}

fn mes(text: &str) -> Instruction {
    Instruction::effect(op(Opcode::MES, vec![Expression::string(text)]))
}

fn set(var: Variable, expr: Expression) -> Instruction {
    Instruction::assign(vec![var], expr)
}

fn script(id: i32, args: Vec<Variable>, body: Construct) -> Function {
    let mut func = Function::new(id, body);
    func.arguments = args;
    func
}

/// Statement text of a one-statement script.
fn statement(expr: Expression) -> String {
    let func = Function::new(0, Construct::seq(vec![Instruction::effect(expr)]));
    let text = emit(&func);
    text.strip_prefix("// 0\nscript0\n")
        .and_then(|s| s.strip_suffix('\n'))
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Header and returns
// ---------------------------------------------------------------------------

#[test]
fn declaration_and_elided_return() {
    let func = Function::new(
        1,
        Construct::seq(vec![
            set(Variable::local(Type::Int, 0), int(42)),
            Instruction::ret(vec![]),
        ]),
    );
    assert_eq!(emit(&func), "// 1\nscript1\ndef_int $int0 = 42;\n");
}

#[test]
fn header_with_arguments_and_returns() {
    let mut func = script(
        2,
        vec![Variable::local(Type::Int, 0), Variable::local(Type::String, 1)],
        Construct::seq(vec![Instruction::ret(vec![
            local(Type::Int, 0),
            local(Type::String, 1),
        ])]),
    );
    func.return_types = vec![Type::Int, Type::String];
    assert_eq!(
        emit(&func),
        "// 2\nscript2(int $int0, string $string1)(int, string)\nreturn($int0, $string1);\n"
    );
}

#[test]
fn return_types_force_empty_argument_group() {
    let mut func = Function::new(3, Construct::seq(vec![Instruction::ret(vec![int(0)])]));
    func.return_types = vec![Type::Boolean];
    assert_eq!(emit(&func), "// 3\nscript3()(boolean)\nreturn(0);\n");
}

#[test]
fn resolved_script_name_in_header() {
    let mut names = NameTable::new();
    names.insert(NameKind::Script, 4, "[clientscript,bank_init]");
    let func = Function::new(4, Construct::seq(vec![mes("hi")]));
    assert_eq!(
        emit_with(&func, &names),
        "// 4\n[clientscript,bank_init]\nmes(\"hi\");\n"
    );
}

#[test]
fn empty_body_ends_with_newline() {
    let func = Function::new(5, Construct::seq(vec![]));
    assert_eq!(emit(&func), "// 5\nscript5\n");
}

#[test]
fn nested_return_is_written() {
    let func = script(
        10,
        vec![Variable::local(Type::Boolean, 0)],
        Construct::If {
            branches: vec![IfBranch {
                condition: local(Type::Boolean, 0),
                body: Construct::seq(vec![Instruction::ret(vec![])]),
            }],
            elze: None,
            next: Some(Box::new(Construct::seq(vec![mes("x")]))),
        },
    );
    assert_eq!(
        emit(&func),
        "// 10\nscript10(boolean $boolean0)\nif $boolean0 {\n    return;\n}\nmes(\"x\");\n"
    );
}

#[test]
fn statement_after_elided_return_fails() {
    let func = Function::new(
        11,
        Construct::seq(vec![Instruction::ret(vec![]), mes("dead")]),
    );
    assert_eq!(emit_err(&func), EmitError::StatementAfterReturn);
}

#[test]
fn argument_must_be_local() {
    let func = script(
        12,
        vec![Variable::Varp {
            ty: Type::Int,
            id: 1,
        }],
        Construct::seq(vec![]),
    );
    assert!(matches!(
        emit_err(&func),
        EmitError::Shape {
            context: "header",
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

#[test]
fn locals_are_declared_once() {
    let func = script(
        20,
        vec![Variable::local(Type::Int, 0)],
        Construct::seq(vec![
            set(Variable::local(Type::Int, 0), int(1)),
            set(Variable::local(Type::Int, 1), local(Type::Int, 0)),
        ])
        .then(Construct::While {
            condition: op(
                Opcode::BRANCH_LESS_THAN,
                vec![local(Type::Int, 1), int(10)],
            ),
            body: Box::new(Construct::seq(vec![set(
                Variable::local(Type::Int, 1),
                typed_op(Opcode::ADD, Type::Int, vec![local(Type::Int, 1), int(1)]),
            )])),
            next: Some(Box::new(Construct::seq(vec![set(
                Variable::local(Type::Int, 1),
                int(0),
            )]))),
        }),
    );
    let text = emit(&func);
    assert_eq!(
        text,
        "// 20\nscript20(int $int0)\n$int0 = 1;\ndef_int $int1 = $int0;\n\
         while ($int1 < 10) {\n    $int1 = calc($int1 + 1);\n}\n$int1 = 0;\n"
    );

    for var in ["$int0", "$int1"] {
        let decl = format!("def_int {var}");
        let decls = text.matches(&decl).count();
        assert!(decls <= 1, "{var} declared {decls} times");
        if decls == 1 {
            let first_decl = text.find(&decl).unwrap() + "def_int ".len();
            assert_eq!(text.find(var), Some(first_decl), "{var} used before its declaration");
        }
    }
}

#[test]
fn multi_target_assignment_never_declares() {
    let func = Function::new(
        21,
        Construct::seq(vec![Instruction::assign(
            vec![Variable::local(Type::Int, 0), Variable::local(Type::Int, 1)],
            op(Opcode::INVOKE, vec![int(9)]),
        )]),
    );
    assert_eq!(emit(&func), "// 21\nscript21\n$int0, $int1 = ~script9;\n");
}

#[test]
fn variable_namespaces() {
    let func = Function::new(
        22,
        Construct::seq(vec![
            set(
                Variable::Varp {
                    ty: Type::Int,
                    id: 1055,
                },
                Expression::Variable(Variable::Varbit {
                    ty: Type::Int,
                    id: 4,
                }),
            ),
            set(
                Variable::Varc {
                    ty: Type::String,
                    id: 30,
                },
                Expression::string("x"),
            ),
            set(
                Variable::Varc {
                    ty: Type::Coord,
                    id: 31,
                },
                Expression::int(Type::Coord, -1),
            ),
        ]),
    );
    assert_eq!(
        emit(&func),
        "// 22\nscript22\n%var1055 = %varbit4;\n%varcstring30 = \"x\";\n%varcint31 = null;\n"
    );
}

#[test]
fn stack_variables_are_rejected() {
    let func = Function::new(
        23,
        Construct::seq(vec![Instruction::effect(Expression::Variable(
            Variable::Stack {
                ty: Type::Int,
                id: 7,
            },
        ))]),
    );
    assert_eq!(emit_err(&func), EmitError::StackVariable(7));
}

// ---------------------------------------------------------------------------
// Control constructs
// ---------------------------------------------------------------------------

#[test]
fn if_chain_layout() {
    let func = script(
        30,
        vec![Variable::local(Type::Int, 0)],
        Construct::If {
            branches: vec![
                IfBranch {
                    condition: op(Opcode::BRANCH_EQUALS, vec![local(Type::Int, 0), int(1)]),
                    body: Construct::seq(vec![mes("a")]),
                },
                IfBranch {
                    condition: op(
                        Opcode::BRANCH_GREATER_THAN,
                        vec![local(Type::Int, 0), int(1)],
                    ),
                    body: Construct::seq(vec![mes("b")]),
                },
            ],
            elze: Some(Box::new(Construct::seq(vec![mes("c")]))),
            next: Some(Box::new(Construct::seq(vec![Instruction::ret(vec![])]))),
        },
    );
    assert_eq!(
        emit(&func),
        "// 30\nscript30(int $int0)\nif ($int0 = 1) {\n    mes(\"a\");\n} else if ($int0 > 1) {\n    \
         mes(\"b\");\n} else {\n    mes(\"c\");\n}\n"
    );
}

#[test]
fn switch_layout() {
    let func = script(
        31,
        vec![Variable::local(Type::Int, 0)],
        Construct::Switch {
            scrutinee: local(Type::Int, 0),
            cases: vec![
                SwitchCase {
                    labels: vec![1, 2],
                    body: Construct::seq(vec![mes("low")]),
                },
                SwitchCase {
                    labels: vec![3],
                    body: Construct::seq(vec![mes("three")]),
                },
            ],
            elze: Some(Box::new(Construct::seq(vec![mes("other")]))),
            next: None,
        },
    );
    assert_eq!(
        emit(&func),
        "// 31\nscript31(int $int0)\nswitch_int ($int0) {\n    case 1, 2 :\n        mes(\"low\");\n    \
         case 3 :\n        mes(\"three\");\n    case default :\n        mes(\"other\");\n}\n"
    );
}

#[test]
fn switch_labels_use_scrutinee_type() {
    let func = script(
        32,
        vec![Variable::local(Type::ChatType, 0)],
        Construct::Switch {
            scrutinee: local(Type::ChatType, 0),
            cases: vec![SwitchCase {
                labels: vec![27, 28],
                body: Construct::seq(vec![mes("examine")]),
            }],
            elze: None,
            next: None,
        },
    );
    assert_eq!(
        emit(&func),
        "// 32\nscript32(chattype $chattype0)\nswitch_chattype ($chattype0) {\n    \
         case ^chattype_obj_examine, ^chattype_npc_examine :\n        mes(\"examine\");\n}\n"
    );
}

#[test]
fn switch_rejects_bad_label_and_scrutinee() {
    let bad_label = Function::new(
        33,
        Construct::Switch {
            scrutinee: local(Type::Boolean, 0),
            cases: vec![SwitchCase {
                labels: vec![2],
                body: Construct::seq(vec![]),
            }],
            elze: None,
            next: None,
        },
    );
    assert_eq!(
        emit_err(&bad_label),
        EmitError::Decode {
            ty: Type::Boolean,
            value: 2
        }
    );

    let untyped = Function::new(
        34,
        Construct::Switch {
            scrutinee: op(Opcode::INVOKE, vec![int(1)]),
            cases: vec![],
            elze: None,
            next: None,
        },
    );
    assert!(matches!(
        emit_err(&untyped),
        EmitError::Shape {
            context: "switch",
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

#[test]
fn invoke_names() {
    assert_eq!(statement(op(Opcode::INVOKE, vec![int(5), int(1)])), "~script5(1);");
    assert_eq!(statement(op(Opcode::INVOKE, vec![int(5)])), "~script5;");

    let mut names = NameTable::new();
    names.insert(NameKind::Script, 5, "[proc,max]");
    let func = Function::new(
        0,
        Construct::seq(vec![Instruction::effect(op(
            Opcode::INVOKE,
            vec![int(5), int(1), int(2)],
        ))]),
    );
    assert_eq!(emit_with(&func, &names), "// 0\nscript0\n~max(1, 2);\n");

    let func = Function::new(
        0,
        Construct::seq(vec![Instruction::effect(op(
            Opcode::INVOKE,
            vec![local(Type::Int, 0)],
        ))]),
    );
    assert!(matches!(
        emit_err(&func),
        EmitError::Shape {
            context: "invoke",
            ..
        }
    ));
}

#[test]
fn array_pseudo_ops() {
    assert_eq!(
        statement(op(
            Opcode::DEFINE_ARRAY,
            vec![int(0), Expression::int(Type::Type, 'i' as i32), int(10)],
        )),
        "def_int $array0(10);"
    );
    assert_eq!(
        statement(op(Opcode::GET_ARRAY_INT, vec![int(1), local(Type::Int, 3)])),
        "$array1($int3);"
    );
    assert_eq!(
        statement(op(Opcode::SET_ARRAY_INT, vec![int(1), int(2), int(5)])),
        "$array1(2) = 5;"
    );
}

#[test]
fn join_string_interpolates() {
    let joined = op(
        Opcode::JOIN_STRING,
        vec![
            Expression::string("You have "),
            local(Type::Int, 0),
            Expression::string(" coins."),
        ],
    );
    assert_eq!(
        statement(op(Opcode::MES, vec![joined])),
        "mes(\"You have <$int0> coins.\");"
    );
}

#[test]
fn branch_infix() {
    let both = op(
        Opcode::SS_AND,
        vec![
            op(Opcode::BRANCH_NOT, vec![local(Type::Int, 0), int(-1)]),
            op(
                Opcode::BRANCH_LESS_THAN_OR_EQUALS,
                vec![local(Type::Int, 0), int(5)],
            ),
        ],
    );
    assert_eq!(statement(both), "(($int0 ! -1) & ($int0 <= 5));");
}

#[test]
fn calc_wraps_outermost_only() {
    let expr = typed_op(
        Opcode::ADD,
        Type::Int,
        vec![
            typed_op(
                Opcode::MULTIPLY,
                Type::Int,
                vec![local(Type::Int, 1), int(2)],
            ),
            op(
                Opcode::INVOKE,
                vec![
                    int(7),
                    typed_op(Opcode::SUB, Type::Int, vec![local(Type::Int, 2), int(1)]),
                ],
            ),
        ],
    );
    let func = Function::new(
        40,
        Construct::seq(vec![
            set(Variable::local(Type::Int, 0), expr),
            set(
                Variable::local(Type::Int, 3),
                typed_op(Opcode::DIV, Type::Int, vec![local(Type::Int, 0), int(2)]),
            ),
        ]),
    );
    let text = emit(&func);
    assert_eq!(
        text,
        "// 40\nscript40\ndef_int $int0 = calc(($int1 * 2) + ~script7(($int2 - 1)));\n\
         def_int $int3 = calc($int0 / 2);\n"
    );
    for line in text.lines() {
        assert!(line.matches("calc(").count() <= 1, "nested calc in {line:?}");
    }
}

#[test]
fn dot_flag_selects_implicit_target() {
    let hide = |flag| {
        op(
            Opcode::CC_SETHIDE,
            vec![Expression::int(Type::Boolean, 1), int(flag)],
        )
    };
    assert_eq!(statement(hide(1)), ".cc_sethide(true);");
    assert_eq!(statement(hide(0)), "cc_sethide(true);");
    assert_eq!(
        statement(typed_op(Opcode::CC_GETX, Type::Int, vec![int(1)])),
        ".cc_getx;"
    );
    assert_eq!(
        statement(op(Opcode::IF_SETPOSITION, vec![int(1), int(2)])),
        "if_setposition(1, 2);"
    );
}

#[test]
fn unknown_opcode_fails() {
    let func = Function::new(
        41,
        Construct::seq(vec![Instruction::effect(op(Opcode(65000), vec![]))]),
    );
    assert_eq!(emit_err(&func), EmitError::UnknownOpcode(Opcode(65000)));
}

#[test]
fn extra_operands_are_rejected() {
    let cases = [
        (
            typed_op(Opcode::ADD, Type::Int, vec![int(1), int(2), int(3)]),
            "calc",
        ),
        (
            op(Opcode::BRANCH_EQUALS, vec![int(1), int(2), int(3)]),
            "branch",
        ),
        (
            op(Opcode::SET_ARRAY_INT, vec![int(0), int(1), int(2), int(3)]),
            "array write",
        ),
        (
            op(Opcode::GET_ARRAY_INT, vec![int(0), int(1), int(2)]),
            "array read",
        ),
    ];
    for (expr, expected) in cases {
        let func = Function::new(42, Construct::seq(vec![Instruction::effect(expr)]));
        match emit_err(&func) {
            EmitError::Shape { context, .. } => assert_eq!(context, expected),
            other => panic!("expected a {expected} shape error, got {other:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Hooks
// ---------------------------------------------------------------------------

#[test]
fn cc_hook_with_triggers() {
    let mut names = NameTable::new();
    names.insert(NameKind::Script, 12, "[clientscript,bank_click]");
    let hook = op(
        Opcode::CC_SETONCLICK,
        vec![
            int(12),
            local(Type::Int, 0),
            Expression::int(Type::Component, -2147483645),
            Expression::int(Type::Inv, 93),
            int(1),
            int(1),
        ],
    );
    let func = Function::new(50, Construct::seq(vec![Instruction::effect(hook)]));
    assert_eq!(
        emit_with(&func, &names),
        "// 50\nscript50\n.cc_setonclick(\"bank_click($int0, event_com){93}\");\n"
    );
}

#[test]
fn if_hook_appends_component() {
    let component = Expression::int(Type::Component, (161 << 16) | 3);
    assert_eq!(
        statement(op(
            Opcode::IF_SETONTIMER,
            vec![int(40), int(0), component.clone()],
        )),
        "if_setontimer(\"script40()\", 161:3);"
    );
    assert_eq!(
        statement(op(
            Opcode::IF_SETONCLICK,
            vec![int(-1), local(Type::Component, 3)],
        )),
        "if_setonclick(null, $component3);"
    );
}

#[test]
fn cc_hook_on_explicit_component_has_no_dot() {
    assert_eq!(
        statement(op(Opcode::CC_SETONOP, vec![int(12), int(0), int(0)])),
        "cc_setonop(\"script12()\");"
    );
}

#[test]
fn if_hook_with_triggers() {
    let mut names = NameTable::new();
    names.insert(NameKind::Script, 20, "[clientscript,name]");
    let hook = op(
        Opcode::IF_SETONCLICK,
        vec![
            int(20),
            local(Type::Int, 0),
            Expression::int(Type::Inv, 93),
            int(1),
            Expression::int(Type::Component, (161 << 16) | 3),
        ],
    );
    let func = Function::new(53, Construct::seq(vec![Instruction::effect(hook)]));
    assert_eq!(
        emit_with(&func, &names),
        "// 53\nscript53\nif_setonclick(\"name($int0){93}\", 161:3);\n"
    );
}

#[test]
fn hook_shape_errors() {
    let dynamic_cc = Function::new(
        51,
        Construct::seq(vec![Instruction::effect(op(
            Opcode::CC_SETONCLICK,
            vec![int(-1), local(Type::Int, 0)],
        ))]),
    );
    assert!(matches!(
        emit_err(&dynamic_cc),
        EmitError::Shape { context: "hook", .. }
    ));

    let too_many_triggers = Function::new(
        52,
        Construct::seq(vec![Instruction::effect(op(
            Opcode::IF_SETONCLICK,
            vec![int(3), int(2), local(Type::Component, 0)],
        ))]),
    );
    assert!(matches!(
        emit_err(&too_many_triggers),
        EmitError::Shape { context: "hook", .. }
    ));
}

// ---------------------------------------------------------------------------
// Pipeline and backend
// ---------------------------------------------------------------------------

#[test]
fn emission_is_deterministic() {
    let func = script(
        60,
        vec![Variable::local(Type::Int, 0)],
        Construct::seq(vec![
            set(
                Variable::local(Type::Int, 1),
                typed_op(Opcode::ADD, Type::Int, vec![local(Type::Int, 0), int(1)]),
            ),
            mes("done"),
        ]),
    );
    assert_eq!(emit(&func), emit(&func));
}

#[test]
fn pruning_makes_stack_pops_emittable() {
    let mut module = Module::new("cache".into());
    module.functions.push(Function::new(
        61,
        Construct::seq(vec![
            Instruction::effect(Expression::Variable(Variable::Stack {
                ty: Type::Int,
                id: 0,
            })),
            set(Variable::local(Type::Int, 0), int(1)),
        ]),
    ));
    assert!(emit_module_to_string(&module, &NoNames, &StrictOptions::default()).is_err());

    let module = default_pipeline(&PassConfig::default()).run(module).unwrap();
    assert_eq!(
        emit_module_to_string(&module, &NoNames, &StrictOptions::default()).unwrap(),
        "// 61\nscript61\ndef_int $int0 = 1;\n"
    );
}

#[test]
fn module_string_separates_scripts() {
    let mut module = Module::new("cache".into());
    module
        .functions
        .push(Function::new(1, Construct::seq(vec![mes("a")])));
    module
        .functions
        .push(Function::new(2, Construct::seq(vec![mes("b")])));
    assert_eq!(
        emit_module_to_string(&module, &NoNames, &StrictOptions::default()).unwrap(),
        "// 1\nscript1\nmes(\"a\");\n\n// 2\nscript2\nmes(\"b\");\n"
    );
}

#[test]
fn custom_indent() {
    let func = Function::new(
        62,
        Construct::While {
            condition: local(Type::Boolean, 0),
            body: Box::new(Construct::seq(vec![mes("x")])),
            next: None,
        },
    );
    let options = StrictOptions {
        indent: "\t".to_string(),
    };
    assert_eq!(
        emit_function_to_string(&func, &NoNames, &options).unwrap(),
        "// 62\nscript62\nwhile $boolean0 {\n\tmes(\"x\");\n}\n"
    );
}

#[test]
fn backend_writes_one_file_per_script() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");

    let mut names = NameTable::new();
    names.insert(NameKind::Script, 12, "[clientscript,bank_init]");

    let mut module = Module::new("cache".into());
    module
        .functions
        .push(Function::new(12, Construct::seq(vec![mes("hi")])));
    module
        .functions
        .push(Function::new(13, Construct::seq(vec![mes("there")])));

    let backend = StrictBackend::new(Box::new(names.clone()));
    assert_eq!(backend.name(), "strict");
    backend
        .emit(BackendInput {
            module,
            output_dir: out.clone(),
        })
        .unwrap();

    let first = fs::read_to_string(out.join(script_file_name(&names, 12))).unwrap();
    assert_eq!(first, "// 12\n[clientscript,bank_init]\nmes(\"hi\");\n");
    let second = fs::read_to_string(out.join("script13.cs2")).unwrap();
    assert_eq!(second, "// 13\nscript13\nmes(\"there\");\n");
}

#[test]
fn backend_skips_failed_scripts_and_reports() {
    let dir = tempfile::tempdir().unwrap();

    let mut module = Module::new("cache".into());
    module
        .functions
        .push(Function::new(1, Construct::seq(vec![mes("ok")])));
    module.functions.push(Function::new(
        2,
        Construct::seq(vec![set(
            Variable::local(Type::Boolean, 0),
            Expression::int(Type::Boolean, 5),
        )]),
    ));
    module
        .functions
        .push(Function::new(3, Construct::seq(vec![mes("also ok")])));

    let err = StrictBackend::new(Box::new(NoNames))
        .emit(BackendInput {
            module,
            output_dir: dir.path().to_path_buf(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::EmitFailures {
            failed: 1,
            total: 3
        }
    ));
    assert!(dir.path().join("script1.cs2").is_file());
    assert!(!dir.path().join("script2.cs2").exists());
    assert!(dir.path().join("script3.cs2").is_file());
}
