// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Slide reader — shape text of a .pptx deck, read straight from the package
// with `zip` and `quick-xml`.
//
// Slide order comes from `p:sldIdLst` in `ppt/presentation.xml`, resolved
// through the presentation's relationships part. Within a slide, shapes are
// the direct children of `p:spTree` in z-order; only `p:sp` elements (text
// boxes, placeholders, autoshapes) carry text. Pictures, graphic frames,
// connectors and groups are skipped as a whole.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use examwerk_core::error::{ExamwerkError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, instrument};
use zip::ZipArchive;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

/// Holds the slide XML parts of a deck, in presentation order.
pub struct SlideReader {
    slides: Vec<String>,
}

impl SlideReader {
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(data))
            .map_err(|err| ExamwerkError::SlideError(format!("not a PPTX package: {err}")))?;

        let order = slide_relationship_ids(&read_part(&mut archive, PRESENTATION_PART)?)?;
        let targets = relationship_targets(&read_part(&mut archive, PRESENTATION_RELS_PART)?)?;

        let mut slides = Vec::with_capacity(order.len());
        for rel_id in &order {
            let target = targets.get(rel_id).ok_or_else(|| {
                ExamwerkError::SlideError(format!("slide relationship {rel_id} has no target"))
            })?;
            slides.push(read_part(&mut archive, &resolve_target(target))?);
        }

        debug!(slides = slides.len(), "PPTX package opened");
        Ok(Self { slides })
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Text of every text-bearing shape, each followed by a newline.
    pub fn extract_text(&self) -> Result<String> {
        let mut text = String::new();
        for (index, slide) in self.slides.iter().enumerate() {
            let shapes = push_slide_text(slide, &mut text)?;
            debug!(slide = index + 1, shapes, "Slide text extracted");
        }
        Ok(text)
    }
}

fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<String> {
    let mut part = archive
        .by_name(name)
        .map_err(|err| ExamwerkError::SlideError(format!("missing part {name}: {err}")))?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|err| ExamwerkError::SlideError(format!("unreadable part {name}: {err}")))?;
    Ok(xml)
}

/// Relationship targets are relative to the `ppt/` folder unless absolute.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_owned(),
        None => format!("ppt/{target}"),
    }
}

fn xml_error(err: impl std::fmt::Display) -> ExamwerkError {
    ExamwerkError::SlideError(format!("malformed XML: {err}"))
}

/// `r:id` values of `p:sldId` entries, in list order.
fn slide_relationship_ids(presentation: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(presentation);
    let mut ids = Vec::new();
    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sldId" => {
                // The relationship id is the namespaced `r:id`, not the bare
                // numeric `id`.
                for attr in e.attributes() {
                    let attr = attr.map_err(xml_error)?;
                    if attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id" {
                        ids.push(attr.unescape_value().map_err(xml_error)?.into_owned());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(ids)
}

/// Relationship `Id` → `Target`.
fn relationship_targets(rels: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(rels);
    let mut targets = HashMap::new();
    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attr_value(&e, b"Id")?, attr_value(&e, b"Target")?)
                {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(targets)
}

fn attr_value(element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(xml_error)?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value().map_err(xml_error)?.into_owned()));
        }
    }
    Ok(None)
}

/// Text collected from one `p:sp` while it is open.
struct ShapeText {
    /// Element depth of the `p:sp` start tag.
    depth: usize,
    text: String,
    in_body: bool,
    in_run_text: bool,
    paragraphs: usize,
}

impl ShapeText {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            text: String::new(),
            in_body: false,
            in_run_text: false,
            paragraphs: 0,
        }
    }

    fn open(&mut self, name: &[u8]) {
        match name {
            b"txBody" => self.in_body = true,
            b"t" if self.in_body => self.in_run_text = true,
            _ => self.empty(name),
        }
    }

    fn empty(&mut self, name: &[u8]) {
        match name {
            b"p" if self.in_body => {
                if self.paragraphs > 0 {
                    self.text.push('\n');
                }
                self.paragraphs += 1;
            }
            b"br" if self.in_body => self.text.push('\n'),
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"t" => self.in_run_text = false,
            b"txBody" => self.in_body = false,
            _ => {}
        }
    }
}

/// Append each text-bearing shape's text plus a newline to `out`. Returns the
/// number of shapes appended.
fn push_slide_text(slide: &str, out: &mut String) -> Result<usize> {
    let mut reader = Reader::from_str(slide);
    let mut depth = 0usize;
    let mut tree_depth: Option<usize> = None;
    let mut shape: Option<ShapeText> = None;
    let mut shapes = 0usize;

    let is_tree_child = |tree_depth: Option<usize>, child_depth: usize| {
        tree_depth.is_some_and(|tree| child_depth == tree + 1)
    };

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => {
                depth += 1;
                let name = e.local_name();
                if let Some(current) = shape.as_mut() {
                    current.open(name.as_ref());
                } else if tree_depth.is_none() && name.as_ref() == b"spTree" {
                    tree_depth = Some(depth);
                } else if is_tree_child(tree_depth, depth) && name.as_ref() == b"sp" {
                    shape = Some(ShapeText::new(depth));
                }
            }
            Event::Empty(e) => {
                let name = e.local_name();
                if let Some(current) = shape.as_mut() {
                    current.empty(name.as_ref());
                } else if is_tree_child(tree_depth, depth + 1) && name.as_ref() == b"sp" {
                    // A shape with no children has empty text.
                    out.push('\n');
                    shapes += 1;
                }
            }
            Event::Text(t) => {
                if let Some(current) = shape.as_mut().filter(|s| s.in_run_text) {
                    current.text.push_str(&t.unescape().map_err(xml_error)?);
                }
            }
            Event::End(e) => {
                match shape.take() {
                    Some(finished) if finished.depth == depth => {
                        out.push_str(&finished.text);
                        out.push('\n');
                        shapes += 1;
                    }
                    Some(mut current) => {
                        current.close(e.local_name().as_ref());
                        shape = Some(current);
                    }
                    None if tree_depth == Some(depth) => tree_depth = None,
                    None => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(shapes)
}
