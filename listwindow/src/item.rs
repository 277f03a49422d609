use alloc::format;
use alloc::string::String;

/// An opaque identifier carried through activation notifications.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attributes of a section header row (e.g. an album grouping its tracks).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderInfo {
    pub id: ItemId,
    pub title: String,
    pub subtitle: Option<String>,
    pub enabled_count: usize,
    pub total_count: usize,
    /// Headers with a cover use the taller layout.
    pub has_cover: bool,
    /// Marks the group collecting items that belong to no other section.
    pub is_catch_all: bool,
}

impl HeaderInfo {
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            enabled_count: 0,
            total_count: 0,
            has_cover: true,
            is_catch_all: false,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_counts(mut self, enabled_count: usize, total_count: usize) -> Self {
        self.enabled_count = enabled_count;
        self.total_count = total_count;
        self
    }

    pub fn with_cover(mut self, has_cover: bool) -> Self {
        self.has_cover = has_cover;
        self
    }

    pub fn with_catch_all(mut self, is_catch_all: bool) -> Self {
        self.is_catch_all = is_catch_all;
        self
    }

    /// Formats the `enabled/total` counter shown next to the title.
    pub fn stats_text(&self) -> String {
        format!("{}/{}", self.enabled_count, self.total_count)
    }
}

/// Precomputed heights per item kind.
///
/// Heights are injected once and copied into each [`Item`] at construction; the engine never
/// measures layout.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemHeights {
    pub row: f32,
    /// Header height when the header shows a cover.
    pub header: f32,
    /// Header height without a cover.
    pub compact_header: f32,
}

impl ItemHeights {
    pub const DEFAULT: Self = Self {
        row: 60.0,
        header: 90.0,
        compact_header: 65.0,
    };

    pub fn uniform(height: f32) -> Self {
        Self {
            row: height,
            header: height,
            compact_header: height,
        }
    }

    pub fn with_row(mut self, row: f32) -> Self {
        self.row = row;
        self
    }

    pub fn with_header(mut self, header: f32, compact_header: f32) -> Self {
        self.header = header;
        self.compact_header = compact_header;
        self
    }

    pub fn header_height(&self, info: &HeaderInfo) -> f32 {
        if info.has_cover {
            self.header
        } else {
            self.compact_header
        }
    }
}

impl Default for ItemHeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind<P> {
    Row {
        payload: P,
        /// Position of the payload in the source collection before grouping.
        original_index: usize,
    },
    SectionHeader(HeaderInfo),
}

/// One logical list entry with an immutable height.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<P> {
    kind: ItemKind<P>,
    height: f32,
}

impl<P> Item<P> {
    pub fn row(payload: P, original_index: usize, heights: &ItemHeights) -> Self {
        Self::with_height(
            ItemKind::Row {
                payload,
                original_index,
            },
            heights.row,
        )
    }

    pub fn header(info: HeaderInfo, heights: &ItemHeights) -> Self {
        let height = heights.header_height(&info);
        Self::with_height(ItemKind::SectionHeader(info), height)
    }

    /// Creates an item with an explicit height.
    ///
    /// Negative or non-finite heights are replaced with `0`.
    pub fn with_height(kind: ItemKind<P>, height: f32) -> Self {
        let height = if height.is_finite() && height >= 0.0 {
            height
        } else {
            vwarn!(height, "Item::with_height: invalid height replaced with 0");
            0.0
        };
        Self { kind, height }
    }

    pub fn kind(&self) -> &ItemKind<P> {
        &self.kind
    }

    pub fn into_kind(self) -> ItemKind<P> {
        self.kind
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn is_header(&self) -> bool {
        matches!(self.kind, ItemKind::SectionHeader(_))
    }

    pub fn payload(&self) -> Option<&P> {
        match &self.kind {
            ItemKind::Row { payload, .. } => Some(payload),
            ItemKind::SectionHeader(_) => None,
        }
    }

    pub fn original_index(&self) -> Option<usize> {
        match &self.kind {
            ItemKind::Row { original_index, .. } => Some(*original_index),
            ItemKind::SectionHeader(_) => None,
        }
    }

    pub fn header_info(&self) -> Option<&HeaderInfo> {
        match &self.kind {
            ItemKind::SectionHeader(info) => Some(info),
            ItemKind::Row { .. } => None,
        }
    }

    /// The activation identifier. Only section headers carry one.
    pub fn id(&self) -> Option<&ItemId> {
        self.header_info().map(|info| &info.id)
    }
}
