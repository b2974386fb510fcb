use indexmap::IndexMap;

/// Insertion-ordered named children of a compound tag.
pub type Compound = IndexMap<String, Tag>;

pub const TAG_END: u8 = 0;
pub const TAG_BYTE: u8 = 1;
pub const TAG_SHORT: u8 = 2;
pub const TAG_INT: u8 = 3;
pub const TAG_LONG: u8 = 4;
pub const TAG_FLOAT: u8 = 5;
pub const TAG_DOUBLE: u8 = 6;
pub const TAG_BYTE_ARRAY: u8 = 7;
pub const TAG_STRING: u8 = 8;
pub const TAG_LIST: u8 = 9;
pub const TAG_COMPOUND: u8 = 10;
pub const TAG_INT_ARRAY: u8 = 11;
pub const TAG_LONG_ARRAY: u8 = 12;

/// A single tag payload. Names live in the parent `Compound`.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(TagList),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

/// Homogeneous list. The element id is kept so empty lists round-trip with
/// their declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct TagList {
    pub element_id: u8,
    pub items: Vec<Tag>,
}

impl TagList {
    pub fn empty() -> Self {
        Self {
            element_id: TAG_END,
            items: Vec::new(),
        }
    }

    pub fn of(items: Vec<Tag>) -> Self {
        let element_id = items.first().map(Tag::id).unwrap_or(TAG_END);
        Self { element_id, items }
    }
}

impl Tag {
    pub fn id(&self) -> u8 {
        match self {
            Tag::Byte(_) => TAG_BYTE,
            Tag::Short(_) => TAG_SHORT,
            Tag::Int(_) => TAG_INT,
            Tag::Long(_) => TAG_LONG,
            Tag::Float(_) => TAG_FLOAT,
            Tag::Double(_) => TAG_DOUBLE,
            Tag::ByteArray(_) => TAG_BYTE_ARRAY,
            Tag::String(_) => TAG_STRING,
            Tag::List(_) => TAG_LIST,
            Tag::Compound(_) => TAG_COMPOUND,
            Tag::IntArray(_) => TAG_INT_ARRAY,
            Tag::LongArray(_) => TAG_LONG_ARRAY,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// Widening read for the integer kinds; `DataVersion` is an int in
    /// practice but nothing stops a tool from writing it narrower.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Tag::Byte(v) => Some(*v as i64),
            Tag::Short(v) => Some(*v as i64),
            Tag::Int(v) => Some(*v as i64),
            Tag::Long(v) => Some(*v),
            _ => None,
        }
    }
}

/// Walks `path` from `root`, returning the compound at the end of it.
/// Any missing key or non-compound step yields `None`.
pub fn compound_at<'a>(root: &'a Compound, path: &[&str]) -> Option<&'a Compound> {
    path.iter()
        .try_fold(root, |node, key| node.get(*key).and_then(Tag::as_compound))
}

pub fn compound_at_mut<'a>(root: &'a mut Compound, path: &[&str]) -> Option<&'a mut Compound> {
    let mut node = root;
    for key in path {
        node = node.get_mut(*key).and_then(Tag::as_compound_mut)?;
    }
    Some(node)
}
