//! Constant rendering.
//!
//! Every type has its own decode rule: the same integer prints as a packed
//! coordinate, a component pair, a keyword or a resolved symbol depending on
//! the type it was tagged with. Closed keyword tables reject values they do
//! not list.

use cs2_core::error::EmitError;
use cs2_core::ir::{Constant, Type, Value};
use cs2_core::names::{NameKind, NameResolver};

const NULL: &str = "null";

/// Render a constant according to its type.
pub fn encode_constant(constant: &Constant, names: &dyn NameResolver) -> Result<String, EmitError> {
    match (&constant.value, constant.ty) {
        (Value::String(s), Type::String) => Ok(encode_string(s)),
        (Value::Int(n), ty) if ty != Type::String => encode_int(ty, *n, names),
        (Value::Int(n), _) => Err(EmitError::shape(
            "constant",
            format!("string constant holds integer {n}"),
        )),
        (Value::String(s), ty) => Err(EmitError::shape(
            "constant",
            format!("{ty} constant holds string {s:?}"),
        )),
    }
}

/// Render a string constant. `event_opbase` is a keyword, not text.
pub fn encode_string(s: &str) -> String {
    match s {
        "event_opbase" => s.to_string(),
        _ => format!("\"{s}\""),
    }
}

/// Render an integer constant of type `ty`.
pub fn encode_int(ty: Type, n: i32, names: &dyn NameResolver) -> Result<String, EmitError> {
    let decode_error = || EmitError::Decode { ty, value: n };
    let text = match ty {
        Type::Type => Type::from_descriptor(n)
            .ok_or_else(decode_error)?
            .literal()
            .to_string(),
        Type::Component => match n {
            -1 => NULL.to_string(),
            -2147483645 => "event_com".to_string(),
            -2147483642 => "event_dragtarget".to_string(),
            _ => format!("{}:{}", (n as u32) >> 16, n & 0xFFFF),
        },
        Type::Boolean => match n {
            0 => "false".to_string(),
            1 => "true".to_string(),
            -1 => NULL.to_string(),
            _ => return Err(decode_error()),
        },
        Type::Coord => match n {
            -1 => NULL.to_string(),
            _ => {
                let packed = n as u32;
                let plane = packed >> 28;
                let x = (packed >> 14) & 0x3FFF;
                let y = packed & 0x3FFF;
                format!("{plane}_{}_{}_{}_{}", x / 64, y / 64, x & 0x3F, y & 0x3F)
            }
        },
        Type::Graphic => match lookup(names, NameKind::Graphic, n) {
            Lookup::Null => NULL.to_string(),
            Lookup::Name(name) => format!("\"{name}\""),
            Lookup::Raw => n.to_string(),
        },
        Type::FontMetrics => named(names, NameKind::Graphic, n),
        Type::Colour => match n {
            0xFF0000 => "^red".to_string(),
            0x00FF00 => "^green".to_string(),
            0x0000FF => "^blue".to_string(),
            0xFFFF00 => "^yellow".to_string(),
            0xFF00FF => "^magenta".to_string(),
            0x00FFFF => "^cyan".to_string(),
            0xFFFFFF => "^white".to_string(),
            0x000000 => "^black".to_string(),
            _ => format!("0x{:06x}", n as u32),
        },
        Type::Int => match n {
            i32::MAX => "^max_32bit_int".to_string(),
            i32::MIN => "^min_32bit_int".to_string(),
            -2147483647 => "event_mousex".to_string(),
            -2147483646 => "event_mousey".to_string(),
            -2147483644 => "event_opindex".to_string(),
            -2147483643 => "event_comid".to_string(),
            -2147483641 => "event_dragtargetid".to_string(),
            -2147483640 => "event_keytyped".to_string(),
            _ => n.to_string(),
        },
        Type::Char => match n {
            -2147483639 => "event_keypressed".to_string(),
            -1 => NULL.to_string(),
            _ => return Err(decode_error()),
        },
        Type::Stat => named(names, NameKind::Stat, n),
        Type::Obj | Type::NamedObj => named(names, NameKind::Obj, n),
        Type::Inv => named(names, NameKind::Inv, n),
        Type::MapArea => named(names, NameKind::MapArea, n),
        Type::Param => named(names, NameKind::Param, n),
        Type::IfType => {
            let s = match n {
                3 => "rectangle",
                4 => "text",
                5 => "graphic",
                6 => "model",
                9 => "line",
                _ => return Err(decode_error()),
            };
            format!("^iftype_{s}")
        }
        Type::SetSize => {
            let s = match n {
                0 => "abs",
                1 => "minus",
                2 => "2",
                _ => return Err(decode_error()),
            };
            format!("^setsize_{s}")
        }
        Type::SetPosH => {
            let s = match n {
                0 => "abs_left",
                1 => "abs_centre",
                2 => "abs_right",
                3 => "3",
                4 => "4",
                5 => "5",
                _ => return Err(decode_error()),
            };
            format!("^setpos_{s}")
        }
        Type::SetPosV => {
            let s = match n {
                0 => "abs_top",
                1 => "abs_centre",
                2 => "abs_bottom",
                3 => "3",
                4 => "4",
                5 => "5",
                _ => return Err(decode_error()),
            };
            format!("^setpos_{s}")
        }
        Type::SetTextAlignH => {
            let s = match n {
                0 => "left",
                1 => "centre",
                2 => "right",
                _ => return Err(decode_error()),
            };
            format!("^settextalign_{s}")
        }
        Type::SetTextAlignV => {
            let s = match n {
                0 => "top",
                1 => "centre",
                2 => "bottom",
                _ => return Err(decode_error()),
            };
            format!("^settextalign_{s}")
        }
        Type::Var => format!("var{n}"),
        Type::ChatType => format!("^chattype_{}", chat_type(n).ok_or_else(decode_error)?),
        Type::Bit => match n {
            0 => "^false".to_string(),
            1 => "^true".to_string(),
            _ => return Err(decode_error()),
        },
        Type::String
        | Type::Seq
        | Type::Idkit
        | Type::Midi
        | Type::Synth
        | Type::Category
        | Type::Enum
        | Type::Loc
        | Type::Model
        | Type::Npc
        | Type::SpotAnim
        | Type::Texture
        | Type::MapSceneIcon
        | Type::MapElement
        | Type::Hitmark
        | Type::Struct => match n {
            -1 => NULL.to_string(),
            _ => n.to_string(),
        },
    };
    Ok(text)
}

fn chat_type(n: i32) -> Option<&'static str> {
    let s = match n {
        0 => "gamemessage",
        1 => "modchat",
        2 => "publicchat",
        3 => "privatechat",
        4 => "engine",
        5 => "loginlogoutnotification",
        6 => "privatechatout",
        7 => "modprivatechat",
        9 => "friendschat",
        11 => "friendschatnotification",
        14 => "broadcast",
        26 => "snapshotfeedback",
        27 => "obj_examine",
        28 => "npc_examine",
        29 => "loc_examine",
        30 => "friendnotification",
        31 => "ignorenotification",
        90 => "autotyper",
        91 => "modautotyper",
        99 => "console",
        101 => "tradereq",
        102 => "trade",
        103 => "chalreq_trade",
        104 => "chalreq_friendschat",
        105 => "spam",
        106 => "playerrelated",
        107 => "10sectimeout",
        108 => "108",
        _ => return None,
    };
    Some(s)
}

enum Lookup<'a> {
    Null,
    Name(&'a str),
    Raw,
}

fn lookup(names: &dyn NameResolver, kind: NameKind, n: i32) -> Lookup<'_> {
    if n == -1 {
        return Lookup::Null;
    }
    match names.resolve(kind, n) {
        Some(name) => Lookup::Name(name),
        None => Lookup::Raw,
    }
}

/// Unquoted symbol name, `null` for `-1`, raw integer on a miss.
fn named(names: &dyn NameResolver, kind: NameKind, n: i32) -> String {
    match lookup(names, kind, n) {
        Lookup::Null => NULL.to_string(),
        Lookup::Name(name) => name.to_string(),
        Lookup::Raw => n.to_string(),
    }
}
