use std::fmt;

/// Block kinds understood by the copier.
///
/// Unknown tags survive as [`BlockKind::Other`] so a template using a kind
/// added to the store later is still copied verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    BulletedListItem,
    NumberedListItem,
    ToDo,
    Toggle,
    Quote,
    Callout,
    Code,
    Divider,
    Breadcrumb,
    TableOfContents,
    ChildPage,
    LinkToPage,
    Bookmark,
    Equation,
    Image,
    Embed,
    ColumnList,
    Column,
    Table,
    TableRow,
    SyncedBlock,
    Unsupported,
    Other(String),
}

/// What a kind's payload may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindShape {
    /// Payload has a `rich_text` run sequence.
    pub rich_text: bool,
    /// Payload may own nested `children`.
    pub children: bool,
    /// An empty payload object is well-formed (e.g. `divider: {}`).
    pub empty_ok: bool,
}

impl KindShape {
    const TEXT: Self = Self {
        rich_text: true,
        children: false,
        empty_ok: false,
    };
    const TEXT_AND_CHILDREN: Self = Self {
        rich_text: true,
        children: true,
        empty_ok: false,
    };
    const CONTAINER: Self = Self {
        rich_text: false,
        children: true,
        empty_ok: true,
    };
    const BARE: Self = Self {
        rich_text: false,
        children: false,
        empty_ok: true,
    };
    const OPAQUE: Self = Self {
        rich_text: false,
        children: false,
        empty_ok: false,
    };
}

static TAGS: &[(&str, BlockKind)] = &[
    ("paragraph", BlockKind::Paragraph),
    ("heading_1", BlockKind::Heading1),
    ("heading_2", BlockKind::Heading2),
    ("heading_3", BlockKind::Heading3),
    ("bulleted_list_item", BlockKind::BulletedListItem),
    ("numbered_list_item", BlockKind::NumberedListItem),
    ("to_do", BlockKind::ToDo),
    ("toggle", BlockKind::Toggle),
    ("quote", BlockKind::Quote),
    ("callout", BlockKind::Callout),
    ("code", BlockKind::Code),
    ("divider", BlockKind::Divider),
    ("breadcrumb", BlockKind::Breadcrumb),
    ("table_of_contents", BlockKind::TableOfContents),
    ("child_page", BlockKind::ChildPage),
    ("link_to_page", BlockKind::LinkToPage),
    ("bookmark", BlockKind::Bookmark),
    ("equation", BlockKind::Equation),
    ("image", BlockKind::Image),
    ("embed", BlockKind::Embed),
    ("column_list", BlockKind::ColumnList),
    ("column", BlockKind::Column),
    ("table", BlockKind::Table),
    ("table_row", BlockKind::TableRow),
    ("synced_block", BlockKind::SyncedBlock),
    ("unsupported", BlockKind::Unsupported),
];

impl BlockKind {
    pub fn from_tag(tag: &str) -> Self {
        TAGS.iter()
            .find(|(name, _)| *name == tag)
            .map_or_else(|| Self::Other(tag.to_string()), |(_, kind)| kind.clone())
    }

    pub fn as_str(&self) -> &str {
        if let Self::Other(tag) = self {
            return tag;
        }
        TAGS.iter()
            .find(|(_, kind)| kind == self)
            .map_or("unsupported", |(name, _)| *name)
    }

    pub fn shape(&self) -> KindShape {
        match self {
            Self::Paragraph
            | Self::BulletedListItem
            | Self::NumberedListItem
            | Self::ToDo
            | Self::Toggle
            | Self::Quote
            | Self::Callout
            | Self::Heading1
            | Self::Heading2
            | Self::Heading3 => KindShape::TEXT_AND_CHILDREN,
            Self::Code => KindShape::TEXT,
            Self::ColumnList | Self::Column | Self::SyncedBlock => KindShape::CONTAINER,
            Self::Table => KindShape {
                empty_ok: false,
                ..KindShape::CONTAINER
            },
            Self::Divider | Self::Breadcrumb => KindShape::BARE,
            // Unknown kinds may still nest; their children get sanitized.
            Self::Other(_) => KindShape {
                children: true,
                ..KindShape::OPAQUE
            },
            Self::TableOfContents
            | Self::ChildPage
            | Self::LinkToPage
            | Self::Bookmark
            | Self::Equation
            | Self::Image
            | Self::Embed
            | Self::TableRow
            | Self::Unsupported => KindShape::OPAQUE,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
