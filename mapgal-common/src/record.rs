//! Map records and the dataset parser
//!
//! The dataset is header-less, comma separated and ragged:
//!
//! | Column | Meaning                                    |
//! |--------|--------------------------------------------|
//! | 0      | Thumbnail id (locates the thumbnail image) |
//! | 1      | Full image id (used as alt text)           |
//! | 2      | Biome, also a tag                          |
//! | 3      | Tree count, also a tag                     |
//! | 4..    | Free-form tags                             |
//!
//! Fields are split on raw commas; quoting is not supported.

use tracing::debug;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

const COL_THUMBNAIL: usize = 0;
const COL_FULL_IMAGE: usize = 1;
const COL_BIOME: usize = 2;
const COL_TREE_COUNT: usize = 3;
const COL_FIRST_TAG: usize = 4;

/// One map image and its descriptive tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Identifier used to locate the thumbnail asset
    pub thumbnail_id: String,
    /// Identifier of the full-size image, shown as alt text
    pub full_image_id: String,
    /// Tree count carried as text; `None` when the column is absent or empty
    pub tree_count: Option<String>,
    /// Distinct tags in first-seen order
    pub tags: Vec<String>,
}

impl Record {
    /// Whether `label` is one of this record's tags
    pub fn has_tag(&self, label: &str) -> bool {
        self.tags.iter().any(|t| t == label)
    }

    /// Build a record from the already trimmed fields of one line
    fn from_fields(fields: &[&str]) -> Self {
        let field = |i: usize| fields.get(i).copied().unwrap_or("");

        let mut tags = Vec::new();
        push_tag(&mut tags, field(COL_BIOME));
        push_tag(&mut tags, field(COL_TREE_COUNT));
        for extra in fields.iter().skip(COL_FIRST_TAG) {
            push_tag(&mut tags, extra);
        }

        let tree_count = Some(field(COL_TREE_COUNT))
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Self {
            thumbnail_id: field(COL_THUMBNAIL).to_string(),
            full_image_id: field(COL_FULL_IMAGE).to_string(),
            tree_count,
            tags,
        }
    }
}

/// Append `value` unless it is empty or already present
fn push_tag(tags: &mut Vec<String>, value: &str) {
    if value.is_empty() || tags.iter().any(|t| t == value) {
        return;
    }
    tags.push(value.to_string());
}

/// Parse the raw dataset text into records
///
/// Never fails: blank lines are skipped and missing trailing columns
/// simply contribute nothing.
pub fn parse_records(text: &str) -> Vec<Record> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);

    let records: Vec<Record> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            Record::from_fields(&fields)
        })
        .collect();

    debug!("Parsed {} map records", records.len());
    records
}
