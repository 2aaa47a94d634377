use super::Empty;
use crate::types::{
    plain_text, BlockId, CodeLanguage, Color, DatabaseId, FileObject, Icon, PageId, PartialUser,
    RichText, Timestamp,
};
use serde::{Deserialize, Serialize};

string_enum! {
    #[derive(Default)]
    pub enum BlockObject {
        #[default]
        Block => "block",
    }
}

/// A content block. Children, when present, are decoded eagerly and in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub object: BlockObject,
    pub id: BlockId,
    pub created_time: Timestamp,
    pub created_by: PartialUser,
    pub last_edited_time: Timestamp,
    pub last_edited_by: PartialUser,
    pub archived: bool,
    pub has_children: bool,
    #[serde(flatten)]
    pub content: BlockContent,
}

/// The typed payload of a block, keyed by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockContent {
    Paragraph {
        paragraph: TextBlock,
    },
    #[serde(rename = "heading_1")]
    Heading1 {
        heading_1: Heading,
    },
    #[serde(rename = "heading_2")]
    Heading2 {
        heading_2: Heading,
    },
    #[serde(rename = "heading_3")]
    Heading3 {
        heading_3: Heading,
    },
    Callout {
        callout: Callout,
    },
    Quote {
        quote: TextBlock,
    },
    BulletedListItem {
        bulleted_list_item: TextBlock,
    },
    NumberedListItem {
        numbered_list_item: TextBlock,
    },
    ToDo {
        to_do: ToDo,
    },
    Toggle {
        toggle: TextBlock,
    },
    Code {
        code: Code,
    },
    ChildPage {
        child_page: ChildTitle,
    },
    ChildDatabase {
        child_database: ChildTitle,
    },
    Embed {
        embed: UrlBlock,
    },
    Image {
        image: Media,
    },
    Video {
        video: Media,
    },
    File {
        file: Media,
    },
    Pdf {
        pdf: Media,
    },
    Bookmark {
        bookmark: Bookmark,
    },
    Equation {
        equation: Equation,
    },
    Divider {
        divider: Empty,
    },
    TableOfContents {
        table_of_contents: TableOfContents,
    },
    Breadcrumb {
        breadcrumb: Empty,
    },
    ColumnList {
        column_list: Container,
    },
    Column {
        column: Container,
    },
    LinkPreview {
        link_preview: UrlBlock,
    },
    Template {
        template: Template,
    },
    LinkToPage {
        link_to_page: LinkTarget,
    },
}

/// Payload shared by paragraphs, quotes, list items and toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callout {
    pub rich_text: Vec<RichText>,
    pub icon: Option<Icon>,
    #[serde(default)]
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToDo {
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub caption: Vec<RichText>,
    pub language: CodeLanguage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTitle {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlBlock {
    pub url: String,
}

/// Image, video, file and pdf payload: a file reference plus a caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub caption: Vec<RichText>,
    #[serde(flatten)]
    pub file: FileObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub url: String,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableOfContents {
    #[serde(default)]
    pub color: Color,
}

/// Payload of columns and column lists, which only hold children.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Container {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinkTarget {
    PageId { page_id: PageId },
    DatabaseId { database_id: DatabaseId },
}

impl Block {
    /// Get the block type name
    pub fn block_type(&self) -> &'static str {
        self.content.type_name()
    }

    /// Child blocks embedded in the payload; empty for leaf kinds and for
    /// containers whose children were not included.
    pub fn children(&self) -> &[Block] {
        self.content.children().unwrap_or(&[])
    }
}

impl BlockContent {
    pub fn paragraph(text: impl Into<String>) -> Self {
        BlockContent::Paragraph {
            paragraph: TextBlock::plain(text),
        }
    }

    pub fn heading_1(text: impl Into<String>) -> Self {
        BlockContent::Heading1 {
            heading_1: Heading {
                rich_text: vec![RichText::plain(text)],
                color: Color::Default,
            },
        }
    }

    pub fn bulleted_list_item(text: impl Into<String>) -> Self {
        BlockContent::BulletedListItem {
            bulleted_list_item: TextBlock::plain(text),
        }
    }

    pub fn to_do(text: impl Into<String>, checked: bool) -> Self {
        BlockContent::ToDo {
            to_do: ToDo {
                rich_text: vec![RichText::plain(text)],
                checked,
                color: Color::Default,
                children: None,
            },
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            BlockContent::Paragraph { .. } => "paragraph",
            BlockContent::Heading1 { .. } => "heading_1",
            BlockContent::Heading2 { .. } => "heading_2",
            BlockContent::Heading3 { .. } => "heading_3",
            BlockContent::Callout { .. } => "callout",
            BlockContent::Quote { .. } => "quote",
            BlockContent::BulletedListItem { .. } => "bulleted_list_item",
            BlockContent::NumberedListItem { .. } => "numbered_list_item",
            BlockContent::ToDo { .. } => "to_do",
            BlockContent::Toggle { .. } => "toggle",
            BlockContent::Code { .. } => "code",
            BlockContent::ChildPage { .. } => "child_page",
            BlockContent::ChildDatabase { .. } => "child_database",
            BlockContent::Embed { .. } => "embed",
            BlockContent::Image { .. } => "image",
            BlockContent::Video { .. } => "video",
            BlockContent::File { .. } => "file",
            BlockContent::Pdf { .. } => "pdf",
            BlockContent::Bookmark { .. } => "bookmark",
            BlockContent::Equation { .. } => "equation",
            BlockContent::Divider { .. } => "divider",
            BlockContent::TableOfContents { .. } => "table_of_contents",
            BlockContent::Breadcrumb { .. } => "breadcrumb",
            BlockContent::ColumnList { .. } => "column_list",
            BlockContent::Column { .. } => "column",
            BlockContent::LinkPreview { .. } => "link_preview",
            BlockContent::Template { .. } => "template",
            BlockContent::LinkToPage { .. } => "link_to_page",
        }
    }

    /// Embedded children of container kinds.
    pub fn children(&self) -> Option<&[Block]> {
        let children = match self {
            BlockContent::Paragraph { paragraph: b }
            | BlockContent::Quote { quote: b }
            | BlockContent::BulletedListItem { bulleted_list_item: b }
            | BlockContent::NumberedListItem { numbered_list_item: b }
            | BlockContent::Toggle { toggle: b } => &b.children,
            BlockContent::Callout { callout } => &callout.children,
            BlockContent::ToDo { to_do } => &to_do.children,
            BlockContent::ColumnList { column_list: c } | BlockContent::Column { column: c } => {
                &c.children
            }
            BlockContent::Template { template } => &template.children,
            _ => return None,
        };
        children.as_deref()
    }

    /// Where embedded children go, for kinds that can hold them.
    pub fn children_slot_mut(&mut self) -> Option<&mut Option<Vec<Block>>> {
        match self {
            BlockContent::Paragraph { paragraph: b }
            | BlockContent::Quote { quote: b }
            | BlockContent::BulletedListItem { bulleted_list_item: b }
            | BlockContent::NumberedListItem { numbered_list_item: b }
            | BlockContent::Toggle { toggle: b } => Some(&mut b.children),
            BlockContent::Callout { callout } => Some(&mut callout.children),
            BlockContent::ToDo { to_do } => Some(&mut to_do.children),
            BlockContent::ColumnList { column_list: c } | BlockContent::Column { column: c } => {
                Some(&mut c.children)
            }
            BlockContent::Template { template } => Some(&mut template.children),
            _ => None,
        }
    }

    /// Plain text of the payload's spans, for kinds that carry text.
    pub fn plain_text(&self) -> Option<String> {
        let spans = match self {
            BlockContent::Paragraph { paragraph: b }
            | BlockContent::Quote { quote: b }
            | BlockContent::BulletedListItem { bulleted_list_item: b }
            | BlockContent::NumberedListItem { numbered_list_item: b }
            | BlockContent::Toggle { toggle: b } => &b.rich_text,
            BlockContent::Heading1 { heading_1: h }
            | BlockContent::Heading2 { heading_2: h }
            | BlockContent::Heading3 { heading_3: h } => &h.rich_text,
            BlockContent::Callout { callout } => &callout.rich_text,
            BlockContent::ToDo { to_do } => &to_do.rich_text,
            BlockContent::Code { code } => &code.rich_text,
            BlockContent::Template { template } => &template.rich_text,
            _ => return None,
        };
        Some(plain_text(spans))
    }
}

impl TextBlock {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            rich_text: vec![RichText::plain(text)],
            color: Color::Default,
            children: None,
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = Some(children);
        self
    }
}
