use std::fmt;

use serde::{Deserialize, Serialize};

/// A ClientScript value type.
///
/// Most variants correspond to a descriptor character used by the VM's own
/// type tags. The rest are synthetic: upstream type inference assigns them to
/// arguments of specific opcodes so that constants can be rendered with the
/// right keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Int,
    Boolean,
    Seq,
    Colour,
    Component,
    Idkit,
    Midi,
    NamedObj,
    Synth,
    Stat,
    Category,
    Coord,
    Graphic,
    FontMetrics,
    Enum,
    Loc,
    Model,
    Npc,
    Obj,
    String,
    SpotAnim,
    Inv,
    Texture,
    Char,
    MapSceneIcon,
    MapElement,
    Hitmark,
    Struct,
    Param,
    MapArea,
    // Synthetic types.
    Type,
    IfType,
    SetSize,
    SetPosH,
    SetPosV,
    SetTextAlignH,
    SetTextAlignV,
    Var,
    ChatType,
    Bit,
}

/// Storage class of a type: the VM keeps separate int and string stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopType {
    Int,
    String,
}

impl TopType {
    pub fn literal(self) -> &'static str {
        match self {
            TopType::Int => "int",
            TopType::String => "string",
        }
    }
}

impl Type {
    pub const ALL: [Type; 40] = [
        Type::Int,
        Type::Boolean,
        Type::Seq,
        Type::Colour,
        Type::Component,
        Type::Idkit,
        Type::Midi,
        Type::NamedObj,
        Type::Synth,
        Type::Stat,
        Type::Category,
        Type::Coord,
        Type::Graphic,
        Type::FontMetrics,
        Type::Enum,
        Type::Loc,
        Type::Model,
        Type::Npc,
        Type::Obj,
        Type::String,
        Type::SpotAnim,
        Type::Inv,
        Type::Texture,
        Type::Char,
        Type::MapSceneIcon,
        Type::MapElement,
        Type::Hitmark,
        Type::Struct,
        Type::Param,
        Type::MapArea,
        Type::Type,
        Type::IfType,
        Type::SetSize,
        Type::SetPosH,
        Type::SetPosV,
        Type::SetTextAlignH,
        Type::SetTextAlignV,
        Type::Var,
        Type::ChatType,
        Type::Bit,
    ];

    /// Spelling used in declarations (`def_int`), signatures, `switch_*`
    /// keywords and local variable names (`$int0`).
    pub fn literal(self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Boolean => "boolean",
            Type::Seq => "seq",
            Type::Colour => "colour",
            Type::Component => "component",
            Type::Idkit => "idkit",
            Type::Midi => "midi",
            Type::NamedObj => "namedobj",
            Type::Synth => "synth",
            Type::Stat => "stat",
            Type::Category => "category",
            Type::Coord => "coord",
            Type::Graphic => "graphic",
            Type::FontMetrics => "fontmetrics",
            Type::Enum => "enum",
            Type::Loc => "loc",
            Type::Model => "model",
            Type::Npc => "npc",
            Type::Obj => "obj",
            Type::String => "string",
            Type::SpotAnim => "spotanim",
            Type::Inv => "inv",
            Type::Texture => "texture",
            Type::Char => "char",
            Type::MapSceneIcon => "mapsceneicon",
            Type::MapElement => "mapelement",
            Type::Hitmark => "hitmark",
            Type::Struct => "struct",
            Type::Param => "param",
            Type::MapArea => "maparea",
            Type::Type => "type",
            Type::IfType => "iftype",
            Type::SetSize => "setsize",
            Type::SetPosH => "setposh",
            Type::SetPosV => "setposv",
            Type::SetTextAlignH => "settextalignh",
            Type::SetTextAlignV => "settextalignv",
            Type::Var => "var",
            Type::ChatType => "chattype",
            Type::Bit => "bit",
        }
    }

    /// VM descriptor character, for the types that have one.
    pub fn descriptor(self) -> Option<char> {
        let c = match self {
            Type::Int => 'i',
            Type::Boolean => '1',
            Type::Seq => 'A',
            Type::Colour => 'C',
            Type::Component => 'I',
            Type::Idkit => 'K',
            Type::Midi => 'M',
            Type::NamedObj => 'O',
            Type::Synth => 'P',
            Type::Stat => 'S',
            Type::Category => 'y',
            Type::Coord => 'c',
            Type::Graphic => 'd',
            Type::FontMetrics => 'f',
            Type::Enum => 'g',
            Type::Loc => 'l',
            Type::Model => 'm',
            Type::Npc => 'n',
            Type::Obj => 'o',
            Type::String => 's',
            Type::SpotAnim => 't',
            Type::Inv => 'v',
            Type::Texture => 'x',
            Type::Char => 'z',
            Type::MapSceneIcon => '£',
            Type::MapElement => 'µ',
            Type::Hitmark => '×',
            Type::Struct => 'J',
            _ => return None,
        };
        Some(c)
    }

    /// Look up a type by the integer code of its descriptor character, as
    /// stored in `TYPE` constants.
    pub fn from_descriptor(code: i32) -> Option<Type> {
        let c = u32::try_from(code).ok().and_then(char::from_u32)?;
        Type::ALL.into_iter().find(|t| t.descriptor() == Some(c))
    }

    pub fn top_type(self) -> TopType {
        match self {
            Type::String => TopType::String,
            _ => TopType::Int,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}
