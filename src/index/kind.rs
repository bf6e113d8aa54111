use std::fmt;
use std::str::FromStr;

/// Item type codes written by the rustdoc search index generator.
///
/// The numeric values are part of the wire format and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ItemKind {
    Module = 0,
    ExternCrate = 1,
    Import = 2,
    Struct = 3,
    Enum = 4,
    Function = 5,
    TypeAlias = 6,
    Static = 7,
    Trait = 8,
    Impl = 9,
    TyMethod = 10,
    Method = 11,
    StructField = 12,
    Variant = 13,
    Macro = 14,
    Primitive = 15,
    AssociatedType = 16,
    Constant = 17,
    AssociatedConst = 18,
    Union = 19,
}

const ALL_KINDS: [ItemKind; 20] = [
    ItemKind::Module,
    ItemKind::ExternCrate,
    ItemKind::Import,
    ItemKind::Struct,
    ItemKind::Enum,
    ItemKind::Function,
    ItemKind::TypeAlias,
    ItemKind::Static,
    ItemKind::Trait,
    ItemKind::Impl,
    ItemKind::TyMethod,
    ItemKind::Method,
    ItemKind::StructField,
    ItemKind::Variant,
    ItemKind::Macro,
    ItemKind::Primitive,
    ItemKind::AssociatedType,
    ItemKind::Constant,
    ItemKind::AssociatedConst,
    ItemKind::Union,
];

/// A kind code outside the known enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownKindCode(pub u64);

impl fmt::Display for UnknownKindCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown item kind code {}", self.0)
    }
}

impl ItemKind {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Short name used by the documentation browser, e.g. `fn` or `variant`
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Module => "mod",
            ItemKind::ExternCrate => "externcrate",
            ItemKind::Import => "import",
            ItemKind::Struct => "struct",
            ItemKind::Enum => "enum",
            ItemKind::Function => "fn",
            ItemKind::TypeAlias => "type",
            ItemKind::Static => "static",
            ItemKind::Trait => "trait",
            ItemKind::Impl => "impl",
            ItemKind::TyMethod => "tymethod",
            ItemKind::Method => "method",
            ItemKind::StructField => "structfield",
            ItemKind::Variant => "variant",
            ItemKind::Macro => "macro",
            ItemKind::Primitive => "primitive",
            ItemKind::AssociatedType => "associatedtype",
            ItemKind::Constant => "constant",
            ItemKind::AssociatedConst => "associatedconstant",
            ItemKind::Union => "union",
        }
    }

    /// Whether entries of this kind may carry a call signature
    pub fn is_callable(self) -> bool {
        matches!(
            self,
            ItemKind::Function | ItemKind::TyMethod | ItemKind::Method
        )
    }
}

impl TryFrom<u64> for ItemKind {
    type Error = UnknownKindCode;

    fn try_from(code: u64) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| ALL_KINDS.get(idx).copied())
            .ok_or(UnknownKindCode(code))
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        match needle.as_str() {
            "module" => return Ok(ItemKind::Module),
            "function" => return Ok(ItemKind::Function),
            "type_alias" | "typedef" => return Ok(ItemKind::TypeAlias),
            _ => {}
        }
        ALL_KINDS
            .iter()
            .copied()
            .find(|kind| kind.as_str() == needle)
            .ok_or_else(|| format!("Unknown item kind '{s}'"))
    }
}
