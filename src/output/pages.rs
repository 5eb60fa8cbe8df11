use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::atlas::{AtlasEntry, NineSliceMargins};
use crate::import::AtlasConsumer;

#[derive(Serialize)]
struct PagesOutput<'a> {
    pages: &'a [Page],
    meta: PagesMeta,
}

#[derive(Serialize)]
struct PagesMeta {
    app: &'static str,
    version: &'static str,
}

/// One source image and the regions cut from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub image: String,
    pub regions: Vec<PageRegion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRegion {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
    pub bounds: PageBounds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nine_slice: Option<NineSliceMargins>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageBounds {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Groups imported regions under their source image
#[derive(Debug, Default)]
pub struct PageCollector {
    pages: Vec<Page>,
}

impl PageCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn current_region(&mut self) -> Option<&mut PageRegion> {
        self.pages.last_mut().and_then(|p| p.regions.last_mut())
    }
}

impl AtlasConsumer for PageCollector {
    fn source_image(&mut self, entry: &AtlasEntry) -> Result<()> {
        self.pages.push(Page {
            image: entry.name.clone(),
            regions: Vec::new(),
        });
        Ok(())
    }

    fn region(&mut self, _source: &AtlasEntry, entry: &AtlasEntry) -> Result<()> {
        let page = self
            .pages
            .last_mut()
            .ok_or_else(|| anyhow::anyhow!("region '{}' arrived before any page", entry.name))?;

        page.regions.push(PageRegion {
            name: entry.name.clone(),
            index: entry.has_index().then_some(entry.index),
            bounds: PageBounds {
                x: entry.bounds.x,
                y: entry.bounds.y,
                w: entry.bounds.width,
                h: entry.bounds.height,
            },
            nine_slice: None,
        });
        Ok(())
    }

    fn nine_slice(
        &mut self,
        _source: &AtlasEntry,
        entry: &AtlasEntry,
        margins: NineSliceMargins,
    ) -> Result<()> {
        let region = self
            .current_region()
            .ok_or_else(|| anyhow::anyhow!("nine-slice '{}' has no region", entry.name))?;
        region.nine_slice = Some(margins);
        Ok(())
    }
}

/// Write collected pages as one JSON document
pub fn write_pages_json(collector: &PageCollector, writer: impl Write, pretty: bool) -> Result<()> {
    let output = PagesOutput {
        pages: collector.pages(),
        meta: PagesMeta {
            app: "gdxatlas",
            version: env!("CARGO_PKG_VERSION"),
        },
    };

    if pretty {
        serde_json::to_writer_pretty(writer, &output)?;
    } else {
        serde_json::to_writer(writer, &output)?;
    }

    Ok(())
}
