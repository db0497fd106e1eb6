use crate::content::{Caption, ContentEntry};
use crate::reveal::RevealNodes;
use crate::{Error, NodeId, Result};

/// A preview image the host can load.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetRef {
    /// File name of the asset, e.g. `3.jpg`.
    pub name: String,
    /// Where the host loads it from.
    pub url: String,
}

impl AssetRef {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The ordered set of preview assets a menu may reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetCatalog {
    assets: Vec<AssetRef>,
}

impl AssetCatalog {
    pub fn new(assets: impl IntoIterator<Item = AssetRef>) -> Self {
        Self {
            assets: assets.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AssetRef> {
        self.assets.get(index)
    }

    /// Resolves a `data-img` style reference (e.g. `img/3.jpg`) to a catalog index.
    ///
    /// The stem of the last path segment selects the asset: a number `n` means the `n`-th asset
    /// (1-based), anything else must equal the stem of an asset name.
    pub fn resolve(&self, reference: &str) -> Result<usize> {
        let stem = file_stem(reference);
        let found = match stem.parse::<usize>() {
            Ok(n) => n.checked_sub(1).filter(|&i| i < self.assets.len()),
            Err(_) if stem.is_empty() => None,
            Err(_) => self.assets.iter().position(|a| file_stem(&a.name) == stem),
        };
        found.ok_or_else(|| Error::AssetNotFound {
            reference: reference.to_owned(),
            available: self.assets.len(),
        })
    }
}

/// The leading `[A-Za-z0-9_-]` run of the last path segment.
fn file_stem(reference: &str) -> &str {
    let segment = reference.rsplit(['/', '\\']).next().unwrap_or(reference);
    let end = segment
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(segment.len());
    &segment[..end]
}

/// One `.menu__item`, as found by the host.
///
/// Fields are optional so query results can be passed through unchecked; [`MenuMarkup`]
/// validation reports what is missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuEntryMarkup {
    pub el: Option<NodeId>,
    pub inner: Option<NodeId>,
    pub number: Option<NodeId>,
    /// The floating preview. The host creates it as `reveal > inner > image`.
    pub reveal: Option<NodeId>,
    pub reveal_inner: Option<NodeId>,
    pub reveal_image: Option<NodeId>,
    /// The `data-img` attribute.
    pub image: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptionMarkup {
    pub title: Option<NodeId>,
    pub meta: Option<NodeId>,
    pub more: Option<NodeId>,
    /// The caption title split into characters.
    pub title_chars: Vec<NodeId>,
}

/// One `.content` block of the detail view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentMarkup {
    pub el: Option<NodeId>,
    pub title: Option<NodeId>,
    pub number: Option<NodeId>,
    pub images: Vec<NodeId>,
    /// One caption per gallery image, in gallery order.
    pub captions: Vec<CaptionMarkup>,
}

/// The host document structure the controller mounts onto.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuMarkup {
    /// Carries the loading indicator.
    pub root: Option<NodeId>,
    pub menu: Option<NodeId>,
    pub back: Option<NodeId>,
    pub entries: Vec<MenuEntryMarkup>,
    pub contents: Vec<ContentMarkup>,
}

#[derive(Clone, Debug)]
pub(crate) struct MenuEntryNodes {
    pub(crate) el: NodeId,
    pub(crate) inner: NodeId,
    pub(crate) number: NodeId,
    pub(crate) reveal: RevealNodes,
    pub(crate) asset: usize,
}

#[derive(Clone, Debug)]
pub(crate) struct Document {
    pub(crate) root: NodeId,
    pub(crate) menu: NodeId,
    pub(crate) back: NodeId,
    pub(crate) entries: Vec<MenuEntryNodes>,
    pub(crate) contents: Vec<ContentEntry>,
}

fn require(node: Option<NodeId>, element: &'static str, entry: Option<usize>) -> Result<NodeId> {
    node.ok_or(Error::MissingElement { element, entry })
}

impl MenuMarkup {
    pub(crate) fn validate(&self, catalog: &AssetCatalog) -> Result<Document> {
        let root = require(self.root, "root", None)?;
        let menu = require(self.menu, "menu", None)?;
        let back = require(self.back, "back", None)?;

        if self.entries.is_empty() {
            return Err(Error::EmptyMenu);
        }
        if self.entries.len() != self.contents.len() {
            return Err(Error::EntryCountMismatch {
                menu: self.entries.len(),
                content: self.contents.len(),
            });
        }

        let entries = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| e.validate(i, catalog))
            .collect::<Result<Vec<_>>>()?;
        let contents = self
            .contents
            .iter()
            .enumerate()
            .map(|(i, c)| c.validate(i))
            .collect::<Result<Vec<_>>>()?;

        Ok(Document {
            root,
            menu,
            back,
            entries,
            contents,
        })
    }
}

impl MenuEntryMarkup {
    fn validate(&self, i: usize, catalog: &AssetCatalog) -> Result<MenuEntryNodes> {
        let entry = Some(i);
        let el = require(self.el, "menu__item", entry)?;
        let image = self.image.as_deref().ok_or(Error::MissingElement {
            element: "data-img",
            entry,
        })?;
        Ok(MenuEntryNodes {
            el,
            inner: require(self.inner, "menu__item-inner", entry)?,
            number: require(self.number, "menu__item-number", entry)?,
            reveal: RevealNodes {
                trigger: el,
                reveal: require(self.reveal, "hover-reveal", entry)?,
                inner: require(self.reveal_inner, "hover-reveal__inner", entry)?,
                image: require(self.reveal_image, "hover-reveal__img", entry)?,
            },
            asset: catalog.resolve(image)?,
        })
    }
}

impl ContentMarkup {
    fn validate(&self, i: usize) -> Result<ContentEntry> {
        let entry = Some(i);
        if self.images.len() != self.captions.len() {
            return Err(Error::GalleryMismatch {
                entry: i,
                images: self.images.len(),
                captions: self.captions.len(),
            });
        }
        let captions = self
            .captions
            .iter()
            .map(|c| {
                Ok(Caption {
                    title: require(c.title, "gallery__item-title", entry)?,
                    meta: require(c.meta, "gallery__item-meta", entry)?,
                    more: require(c.more, "gallery__item-more", entry)?,
                    chars: c.title_chars.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ContentEntry {
            index: i,
            el: require(self.el, "content", entry)?,
            title: require(self.title, "content__title-inner", entry)?,
            number: require(self.number, "content__title-number", entry)?,
            images: self.images.clone(),
            captions,
        })
    }
}
