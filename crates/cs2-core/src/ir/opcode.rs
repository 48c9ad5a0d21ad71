//! Opcode registry.
//!
//! Only opcodes that survive IR construction as [`Operation`]s are listed
//! here; stack pushes, pops and branches are folded into variables, constants
//! and constructs upstream.
//!
//! [`Operation`]: super::Expression::Operation

use std::fmt;

use serde::{Deserialize, Serialize};

/// A ClientScript opcode id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Opcode(pub u16);

/// Which component namespace a hook setter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookNamespace {
    /// `cc_*`: the dynamically created component, selected by a dot flag.
    Cc,
    /// `if_*`: a component addressed explicitly by a trailing argument.
    If,
}

macro_rules! define_opcodes {
    ($($name:ident = $id:literal => $display:literal,)*) => {
        #[allow(non_upper_case_globals)]
        impl Opcode {
            $(pub const $name: Opcode = Opcode($id);)*

            /// Display name used when the operation renders as a call.
            pub fn name(self) -> Option<&'static str> {
                match self.0 {
                    $($id => Some($display),)*
                    _ => None,
                }
            }
        }
    };
}

define_opcodes! {
    BRANCH_NOT = 7 => "branch_not",
    BRANCH_EQUALS = 8 => "branch_equals",
    BRANCH_LESS_THAN = 9 => "branch_less_than",
    BRANCH_GREATER_THAN = 10 => "branch_greater_than",
    BRANCH_LESS_THAN_OR_EQUALS = 31 => "branch_less_than_or_equals",
    BRANCH_GREATER_THAN_OR_EQUALS = 32 => "branch_greater_than_or_equals",
    JOIN_STRING = 37 => "join_string",
    INVOKE = 40 => "gosub_with_params",
    DEFINE_ARRAY = 44 => "define_array",
    GET_ARRAY_INT = 45 => "push_array_int",
    SET_ARRAY_INT = 46 => "pop_array_int",

    CC_CREATE = 100 => "cc_create",
    CC_DELETE = 101 => "cc_delete",
    CC_DELETEALL = 102 => "cc_deleteall",
    CC_FIND = 200 => "cc_find",
    IF_FIND = 201 => "if_find",

    CC_SETPOSITION = 1000 => "cc_setposition",
    CC_SETSIZE = 1001 => "cc_setsize",
    CC_SETHIDE = 1003 => "cc_sethide",
    CC_SETNOCLICKTHROUGH = 1005 => "cc_setnoclickthrough",
    _1006 = 1006 => "_1006",
    CC_SETSCROLLPOS = 1100 => "cc_setscrollpos",
    CC_SETCOLOUR = 1101 => "cc_setcolour",
    CC_SETFILL = 1102 => "cc_setfill",
    CC_SETTRANS = 1103 => "cc_settrans",
    CC_SETLINEWID = 1104 => "cc_setlinewid",
    CC_SETGRAPHIC = 1105 => "cc_setgraphic",
    CC_SET2DANGLE = 1106 => "cc_set2dangle",
    CC_SETTILING = 1107 => "cc_settiling",
    CC_SETMODEL = 1108 => "cc_setmodel",
    CC_SETMODELANGLE = 1109 => "cc_setmodelangle",
    CC_SETMODELANIM = 1110 => "cc_setmodelanim",
    CC_SETMODELORTHOG = 1111 => "cc_setmodelorthog",
    CC_SETTEXT = 1112 => "cc_settext",
    CC_SETTEXTFONT = 1113 => "cc_settextfont",
    CC_SETTEXTALIGN = 1114 => "cc_settextalign",
    CC_SETTEXTSHADOW = 1115 => "cc_settextshadow",
    CC_SETOUTLINE = 1116 => "cc_setoutline",
    CC_SETGRAPHICSHADOW = 1117 => "cc_setgraphicshadow",
    CC_SETVFLIP = 1118 => "cc_setvflip",
    CC_SETHFLIP = 1119 => "cc_sethflip",
    CC_SETSCROLLSIZE = 1120 => "cc_setscrollsize",
    CC_RESUME_PAUSEBUTTON = 1121 => "cc_resume_pausebutton",
    _1122 = 1122 => "_1122",
    CC_SETFILLCOLOUR = 1123 => "cc_setfillcolour",
    _1124 = 1124 => "_1124",
    _1125 = 1125 => "_1125",
    CC_SETLINEDIRECTION = 1126 => "cc_setlinedirection",
    _1127 = 1127 => "_1127",
    CC_SETOBJECT = 1200 => "cc_setobject",
    CC_SETNPCHEAD = 1201 => "cc_setnpchead",
    CC_SETPLAYERHEAD_SELF = 1202 => "cc_setplayerhead_self",
    CC_SETOBJECT_NONUM = 1205 => "cc_setobject_nonum",
    CC_SETOBJECT_ALWAYS_NUM = 1212 => "cc_setobject_always_num",
    CC_SETOP = 1300 => "cc_setop",
    CC_SETDRAGGABLE = 1301 => "cc_setdraggable",
    CC_SETDRAGGABLEBEHAVIOR = 1302 => "cc_setdraggablebehavior",
    CC_SETDRAGDEADZONE = 1303 => "cc_setdragdeadzone",
    CC_SETDRAGDEADTIME = 1304 => "cc_setdragdeadtime",
    CC_SETOPBASE = 1305 => "cc_setopbase",
    CC_SETTARGETVERB = 1306 => "cc_settargetverb",
    CC_CLEAROPS = 1307 => "cc_clearops",
    CC_SETOPKEY = 1350 => "cc_setopkey",
    CC_SETOPTKEY = 1351 => "cc_setoptkey",
    CC_SETOPKEYRATE = 1352 => "cc_setopkeyrate",
    CC_SETOPTKEYRATE = 1353 => "cc_setoptkeyrate",
    CC_SETOPKEYIGNOREHELD = 1354 => "cc_setopkeyignoreheld",
    CC_SETOPTKEYIGNOREHELD = 1355 => "cc_setoptkeyignoreheld",

    CC_SETONCLICK = 1400 => "cc_setonclick",
    CC_SETONHOLD = 1401 => "cc_setonhold",
    CC_SETONRELEASE = 1402 => "cc_setonrelease",
    CC_SETONMOUSEOVER = 1403 => "cc_setonmouseover",
    CC_SETONMOUSELEAVE = 1404 => "cc_setonmouseleave",
    CC_SETONDRAG = 1405 => "cc_setondrag",
    CC_SETONTARGETLEAVE = 1406 => "cc_setontargetleave",
    CC_SETONVARTRANSMIT = 1407 => "cc_setonvartransmit",
    CC_SETONTIMER = 1408 => "cc_setontimer",
    CC_SETONOP = 1409 => "cc_setonop",
    CC_SETONDRAGCOMPLETE = 1410 => "cc_setondragcomplete",
    CC_SETONCLICKREPEAT = 1411 => "cc_setonclickrepeat",
    CC_SETONMOUSEREPEAT = 1412 => "cc_setonmouserepeat",
    CC_SETONINVTRANSMIT = 1414 => "cc_setoninvtransmit",
    CC_SETONSTATTRANSMIT = 1415 => "cc_setonstattransmit",
    CC_SETONTARGETENTER = 1416 => "cc_setontargetenter",
    CC_SETONSCROLLWHEEL = 1417 => "cc_setonscrollwheel",
    CC_SETONCHATTRANSMIT = 1418 => "cc_setonchattransmit",
    CC_SETONKEY = 1419 => "cc_setonkey",
    CC_SETONFRIENDTRANSMIT = 1420 => "cc_setonfriendtransmit",
    CC_SETONCLANTRANSMIT = 1421 => "cc_setonclantransmit",
    CC_SETONMISCTRANSMIT = 1422 => "cc_setonmisctransmit",
    CC_SETONDIALOGABORT = 1423 => "cc_setondialogabort",
    CC_SETONSUBCHANGE = 1424 => "cc_setonsubchange",
    CC_SETONSTOCKTRANSMIT = 1425 => "cc_setonstocktransmit",
    CC_SETONRESIZE = 1426 => "cc_setonresize",

    CC_GETX = 1500 => "cc_getx",
    CC_GETY = 1501 => "cc_gety",
    CC_GETWIDTH = 1502 => "cc_getwidth",
    CC_GETHEIGHT = 1503 => "cc_getheight",
    CC_GETHIDE = 1504 => "cc_gethide",
    CC_GETLAYER = 1505 => "cc_getlayer",
    CC_GETSCROLLX = 1600 => "cc_getscrollx",
    CC_GETSCROLLY = 1601 => "cc_getscrolly",
    CC_GETTEXT = 1602 => "cc_gettext",
    CC_GETSCROLLWIDTH = 1603 => "cc_getscrollwidth",
    CC_GETSCROLLHEIGHT = 1604 => "cc_getscrollheight",
    CC_GETMODELZOOM = 1605 => "cc_getmodelzoom",
    CC_GETMODELANGLE_X = 1606 => "cc_getmodelangle_x",
    CC_GETMODELANGLE_Z = 1607 => "cc_getmodelangle_z",
    CC_GETMODELANGLE_Y = 1608 => "cc_getmodelangle_y",
    CC_GETTRANS = 1609 => "cc_gettrans",
    _1610 = 1610 => "_1610",
    CC_GETCOLOUR = 1611 => "cc_getcolour",
    CC_GETFILLCOLOUR = 1612 => "cc_getfillcolour",
    _1613 = 1613 => "_1613",
    _1614 = 1614 => "_1614",
    CC_GETINVOBJECT = 1700 => "cc_getinvobject",
    CC_GETINVCOUNT = 1701 => "cc_getinvcount",
    CC_GETID = 1702 => "cc_getid",
    CC_GETTARGETMASK = 1800 => "cc_gettargetmask",
    CC_GETOP = 1801 => "cc_getop",
    CC_GETOPBASE = 1802 => "cc_getopbase",
    IF_CALLONRESIZE = 1927 => "if_callonresize",

    IF_SETPOSITION = 2000 => "if_setposition",
    IF_SETSIZE = 2001 => "if_setsize",
    IF_SETHIDE = 2003 => "if_sethide",
    IF_SETCOLOUR = 2101 => "if_setcolour",
    IF_SETGRAPHIC = 2105 => "if_setgraphic",
    IF_SETTEXT = 2112 => "if_settext",

    IF_SETONCLICK = 2400 => "if_setonclick",
    IF_SETONHOLD = 2401 => "if_setonhold",
    IF_SETONRELEASE = 2402 => "if_setonrelease",
    IF_SETONMOUSEOVER = 2403 => "if_setonmouseover",
    IF_SETONMOUSELEAVE = 2404 => "if_setonmouseleave",
    IF_SETONDRAG = 2405 => "if_setondrag",
    IF_SETONTARGETLEAVE = 2406 => "if_setontargetleave",
    IF_SETONVARTRANSMIT = 2407 => "if_setonvartransmit",
    IF_SETONTIMER = 2408 => "if_setontimer",
    IF_SETONOP = 2409 => "if_setonop",
    IF_SETONDRAGCOMPLETE = 2410 => "if_setondragcomplete",
    IF_SETONCLICKREPEAT = 2411 => "if_setonclickrepeat",
    IF_SETONMOUSEREPEAT = 2412 => "if_setonmouserepeat",
    IF_SETONINVTRANSMIT = 2414 => "if_setoninvtransmit",
    IF_SETONSTATTRANSMIT = 2415 => "if_setonstattransmit",
    IF_SETONTARGETENTER = 2416 => "if_setontargetenter",
    IF_SETONSCROLLWHEEL = 2417 => "if_setonscrollwheel",
    IF_SETONCHATTRANSMIT = 2418 => "if_setonchattransmit",
    IF_SETONKEY = 2419 => "if_setonkey",
    IF_SETONFRIENDTRANSMIT = 2420 => "if_setonfriendtransmit",
    IF_SETONCLANTRANSMIT = 2421 => "if_setonclantransmit",
    IF_SETONMISCTRANSMIT = 2422 => "if_setonmisctransmit",
    IF_SETONDIALOGABORT = 2423 => "if_setondialogabort",
    IF_SETONSUBCHANGE = 2424 => "if_setonsubchange",
    IF_SETONSTOCKTRANSMIT = 2425 => "if_setonstocktransmit",
    IF_SETONRESIZE = 2426 => "if_setonresize",

    IF_GETX = 2500 => "if_getx",
    IF_GETY = 2501 => "if_gety",
    IF_GETWIDTH = 2502 => "if_getwidth",
    IF_GETHEIGHT = 2503 => "if_getheight",

    MES = 3100 => "mes",
    ANIM = 3101 => "anim",
    IF_CLOSE = 3103 => "if_close",
    RESUME_COUNTDIALOG = 3104 => "resume_countdialog",
    CC_DRAGPICKUP = 3139 => "cc_dragpickup",
    _3140 = 3140 => "_3140",
    SOUND_SYNTH = 3200 => "sound_synth",
    CLIENTCLOCK = 3300 => "clientclock",
    INV_GETOBJ = 3301 => "inv_getobj",
    INV_GETNUM = 3302 => "inv_getnum",
    INV_TOTAL = 3303 => "inv_total",
    STAT = 3305 => "stat",
    STAT_BASE = 3306 => "stat_base",
    COORD = 3308 => "coord",
    COORDX = 3309 => "coordx",
    COORDY = 3310 => "coordy",
    COORDZ = 3311 => "coordz",
    ENUM_STRING = 3400 => "enum_string",
    ENUM = 3408 => "enum",

    ADD = 4000 => "add",
    SUB = 4001 => "sub",
    MULTIPLY = 4002 => "multiply",
    DIV = 4003 => "div",
    RANDOM = 4004 => "random",
    RANDOMINC = 4005 => "randominc",
    INTERPOLATE = 4006 => "interpolate",
    ADDPERCENT = 4007 => "addpercent",
    SETBIT = 4008 => "setbit",
    CLEARBIT = 4009 => "clearbit",
    TESTBIT = 4010 => "testbit",
    MOD = 4011 => "mod",
    POW = 4012 => "pow",
    INVPOW = 4013 => "invpow",
    AND = 4014 => "and",
    OR = 4015 => "or",
    APPEND_NUM = 4100 => "append_num",
    APPEND = 4101 => "append",
    TOSTRING = 4106 => "tostring",
    COMPARE = 4107 => "compare",
    APPEND_CHAR = 4112 => "append_char",
    OC_NAME = 4200 => "oc_name",
    OC_PARAM = 4208 => "oc_param",

    // Synthetic: produced when upstream folds short-circuit branch chains.
    SS_OR = 10000 => "ss_or",
    SS_AND = 10001 => "ss_and",
}

impl Opcode {
    /// Symbol for opcodes rendered as infix comparisons and boolean joins.
    pub fn branch_infix(self) -> Option<&'static str> {
        let sym = match self {
            Opcode::BRANCH_EQUALS => "=",
            Opcode::BRANCH_GREATER_THAN => ">",
            Opcode::BRANCH_GREATER_THAN_OR_EQUALS => ">=",
            Opcode::BRANCH_LESS_THAN => "<",
            Opcode::BRANCH_LESS_THAN_OR_EQUALS => "<=",
            Opcode::BRANCH_NOT => "!",
            Opcode::SS_OR => "|",
            Opcode::SS_AND => "&",
            _ => return None,
        };
        Some(sym)
    }

    /// Symbol for arithmetic opcodes rendered inside `calc(...)`.
    pub fn calc_infix(self) -> Option<&'static str> {
        let sym = match self {
            Opcode::ADD => "+",
            Opcode::SUB => "-",
            Opcode::MULTIPLY => "*",
            Opcode::DIV => "/",
            Opcode::MOD => "%",
            Opcode::AND => "&",
            Opcode::OR => "|",
            _ => return None,
        };
        Some(sym)
    }

    /// Opcodes whose trailing argument is a flag selecting the implicit
    /// (dotted) component rather than the active one.
    pub fn is_dot(self) -> bool {
        matches!(
            self,
            Opcode::CC_CREATE
                | Opcode::CC_DELETE
                | Opcode::CC_FIND
                | Opcode::IF_FIND
                | Opcode::CC_SETPOSITION
                | Opcode::CC_SETSIZE
                | Opcode::CC_SETHIDE
                | Opcode::CC_SETNOCLICKTHROUGH
                | Opcode::_1006
                | Opcode::CC_SETSCROLLPOS
                | Opcode::CC_SETCOLOUR
                | Opcode::CC_SETFILL
                | Opcode::CC_SETTRANS
                | Opcode::CC_SETLINEWID
                | Opcode::CC_SETGRAPHIC
                | Opcode::CC_SET2DANGLE
                | Opcode::CC_SETTILING
                | Opcode::CC_SETMODEL
                | Opcode::CC_SETMODELANGLE
                | Opcode::CC_SETMODELANIM
                | Opcode::CC_SETMODELORTHOG
                | Opcode::CC_SETTEXT
                | Opcode::CC_SETTEXTFONT
                | Opcode::CC_SETTEXTALIGN
                | Opcode::CC_SETTEXTSHADOW
                | Opcode::CC_SETOUTLINE
                | Opcode::CC_SETGRAPHICSHADOW
                | Opcode::CC_SETVFLIP
                | Opcode::CC_SETHFLIP
                | Opcode::CC_SETSCROLLSIZE
                | Opcode::CC_RESUME_PAUSEBUTTON
                | Opcode::_1122
                | Opcode::CC_SETFILLCOLOUR
                | Opcode::_1124
                | Opcode::_1125
                | Opcode::CC_SETLINEDIRECTION
                | Opcode::_1127
                | Opcode::CC_SETOBJECT
                | Opcode::CC_SETNPCHEAD
                | Opcode::CC_SETPLAYERHEAD_SELF
                | Opcode::CC_SETOBJECT_NONUM
                | Opcode::CC_SETOBJECT_ALWAYS_NUM
                | Opcode::CC_SETOP
                | Opcode::CC_SETDRAGGABLE
                | Opcode::CC_SETDRAGGABLEBEHAVIOR
                | Opcode::CC_SETDRAGDEADZONE
                | Opcode::CC_SETDRAGDEADTIME
                | Opcode::CC_SETOPBASE
                | Opcode::CC_SETTARGETVERB
                | Opcode::CC_CLEAROPS
                | Opcode::CC_SETOPKEY
                | Opcode::CC_SETOPTKEY
                | Opcode::CC_SETOPKEYRATE
                | Opcode::CC_SETOPTKEYRATE
                | Opcode::CC_SETOPKEYIGNOREHELD
                | Opcode::CC_SETOPTKEYIGNOREHELD
                | Opcode::CC_GETX
                | Opcode::CC_GETY
                | Opcode::CC_GETWIDTH
                | Opcode::CC_GETHEIGHT
                | Opcode::CC_GETHIDE
                | Opcode::CC_GETLAYER
                | Opcode::CC_GETSCROLLX
                | Opcode::CC_GETSCROLLY
                | Opcode::CC_GETTEXT
                | Opcode::CC_GETSCROLLWIDTH
                | Opcode::CC_GETSCROLLHEIGHT
                | Opcode::CC_GETMODELZOOM
                | Opcode::CC_GETMODELANGLE_X
                | Opcode::CC_GETMODELANGLE_Z
                | Opcode::CC_GETMODELANGLE_Y
                | Opcode::CC_GETTRANS
                | Opcode::_1610
                | Opcode::CC_GETCOLOUR
                | Opcode::CC_GETFILLCOLOUR
                | Opcode::_1613
                | Opcode::_1614
                | Opcode::CC_GETINVOBJECT
                | Opcode::CC_GETINVCOUNT
                | Opcode::CC_GETID
                | Opcode::CC_GETTARGETMASK
                | Opcode::CC_GETOP
                | Opcode::CC_GETOPBASE
                | Opcode::IF_CALLONRESIZE
                | Opcode::CC_DRAGPICKUP
                | Opcode::_3140
        )
    }

    /// Namespace of a hook-setter opcode, or `None` for everything else.
    pub fn hook(self) -> Option<HookNamespace> {
        if (Opcode::CC_SETONCLICK..=Opcode::CC_SETONRESIZE).contains(&self) {
            Some(HookNamespace::Cc)
        } else if (Opcode::IF_SETONCLICK..=Opcode::IF_SETONRESIZE).contains(&self) {
            Some(HookNamespace::If)
        } else {
            None
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}({name})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}
