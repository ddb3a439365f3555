//! Parsing and emission of the persisted workspace filter document.
//!
//! The wire format is a small XML grammar:
//!
//! ```xml
//! <workspaceFilter version="1.0">
//!     <filter root="/apps/site" mode="merge" type="cleanup">
//!         <include pattern="/apps/site(/.*)?"/>
//!         <exclude pattern="/apps/site/install(/.*)?"/>
//!     </filter>
//! </workspaceFilter>
//! ```
//!
//! Consumers diff and hash the serialized form, so emission is part of the
//! wire contract rather than an implementation detail: UTF-8, `\n` line
//! separators, 4-space indentation, attributes in `root`, `mode`, `type`
//! order, `mode` omitted when it equals the default and `type="cleanup"`
//! omitted when the cleanup flag is off. The writer therefore emits the
//! fixed layout directly; only attribute escaping is delegated to
//! [`quick_xml::escape`].

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};

use crate::{ImportMode, ParseError, PathFilterSet, PathMatcher, WorkspaceFilter};

const ROOT_ELEMENT: &str = "workspaceFilter";
const FILTER_ELEMENT: &str = "filter";
const INCLUDE_ELEMENT: &str = "include";
const EXCLUDE_ELEMENT: &str = "exclude";
const CLEANUP_TYPE: &str = "cleanup";

/// Parsed form of a filter document.
#[derive(Debug)]
pub(crate) struct Document {
    pub(crate) version: f64,
    pub(crate) filter_sets: Vec<PathFilterSet>,
}

/// Parses a serialized filter document.
pub(crate) fn parse(bytes: &[u8]) -> Result<Document, ParseError> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();

    let mut version = WorkspaceFilter::SUPPORTED_VERSION;
    let mut filter_sets = Vec::new();
    let mut current: Option<PathFilterSet> = None;
    let mut seen_root = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) => {
                open_element(
                    &element,
                    &mut version,
                    &mut current,
                    &mut seen_root,
                )?;
            }
            Event::Empty(element) => {
                open_element(
                    &element,
                    &mut version,
                    &mut current,
                    &mut seen_root,
                )?;
                close_element(
                    element.local_name().as_ref(),
                    &mut current,
                    &mut filter_sets,
                );
            }
            Event::End(element) => {
                close_element(
                    element.local_name().as_ref(),
                    &mut current,
                    &mut filter_sets,
                );
            }
            Event::Text(text) => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(ParseError::UnexpectedText);
                }
            }
            Event::CData(_) => return Err(ParseError::UnexpectedText),
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry no filter content.
            _ => {}
        }
        buf.clear();
    }

    Ok(Document {
        version,
        filter_sets,
    })
}

/// Handles an opening tag, dispatching on the current nesting level.
fn open_element(
    element: &BytesStart<'_>,
    version: &mut f64,
    current: &mut Option<PathFilterSet>,
    seen_root: &mut bool,
) -> Result<(), ParseError> {
    let name = element_name(element);

    if !*seen_root {
        if name != ROOT_ELEMENT {
            return Err(ParseError::UnexpectedRootElement { found: name });
        }
        *version = parse_version(element)?;
        *seen_root = true;
        return Ok(());
    }

    match current {
        None => {
            if name != FILTER_ELEMENT {
                return Err(ParseError::UnexpectedElement { element: name });
            }
            *current = Some(parse_filter(element)?);
            Ok(())
        }
        Some(set) => {
            let include = match name.as_str() {
                INCLUDE_ELEMENT => true,
                EXCLUDE_ELEMENT => false,
                _ => return Err(ParseError::UnexpectedElement { element: name }),
            };
            parse_entry(element, set, include)
        }
    }
}

/// Handles a closing tag, finalizing the filter set under construction.
fn close_element(
    local_name: &[u8],
    current: &mut Option<PathFilterSet>,
    filter_sets: &mut Vec<PathFilterSet>,
) {
    if local_name == FILTER_ELEMENT.as_bytes() {
        if let Some(set) = current.take() {
            filter_sets.push(set);
        }
    }
}

/// Reads the `version` attribute of the document root, defaulting to the
/// supported version and rejecting anything newer.
fn parse_version(element: &BytesStart<'_>) -> Result<f64, ParseError> {
    let mut version = WorkspaceFilter::SUPPORTED_VERSION;
    for attribute in element.attributes() {
        let attribute = attribute?;
        if attribute.key.local_name().as_ref() == b"version" {
            let value = attribute.unescape_value()?;
            version = value
                .parse()
                .map_err(|_| ParseError::InvalidVersion {
                    value: value.clone().into_owned(),
                })?;
        }
    }
    if version > WorkspaceFilter::SUPPORTED_VERSION {
        return Err(ParseError::UnsupportedVersion { version });
    }
    Ok(version)
}

/// Builds a filter set from a `<filter>` element's attributes.
fn parse_filter(element: &BytesStart<'_>) -> Result<PathFilterSet, ParseError> {
    let mut root = String::from("/");
    let mut import_mode = ImportMode::default();
    let mut cleanup = false;

    for attribute in element.attributes() {
        let attribute = attribute?;
        match attribute.key.local_name().as_ref() {
            b"root" => {
                let value = attribute.unescape_value()?;
                if !value.is_empty() {
                    root = value.into_owned();
                }
            }
            b"mode" => {
                let value = attribute.unescape_value()?;
                import_mode = ImportMode::from_name(&value).ok_or_else(|| {
                    ParseError::InvalidMode {
                        mode: value.clone().into_owned(),
                    }
                })?;
            }
            b"type" => {
                let value = attribute.unescape_value()?;
                if value != CLEANUP_TYPE {
                    return Err(ParseError::InvalidType {
                        value: value.into_owned(),
                    });
                }
                cleanup = true;
            }
            _ => {}
        }
    }

    Ok(PathFilterSet::new(root)?
        .with_import_mode(import_mode)
        .with_cleanup(cleanup))
}

/// Appends an `<include>`/`<exclude>` entry to the filter set under
/// construction.
fn parse_entry(
    element: &BytesStart<'_>,
    set: &mut PathFilterSet,
    include: bool,
) -> Result<(), ParseError> {
    let mut pattern = None;
    for attribute in element.attributes() {
        let attribute = attribute?;
        if attribute.key.local_name().as_ref() == b"pattern" {
            let value = attribute.unescape_value()?;
            if !value.is_empty() {
                pattern = Some(value.into_owned());
            }
        }
    }
    let Some(pattern) = pattern else {
        return Err(ParseError::MissingPattern {
            root: set.root().to_owned(),
        });
    };

    let matcher = PathMatcher::new(pattern)?;
    if include {
        set.add_include(matcher);
    } else {
        set.add_exclude(matcher);
    }
    Ok(())
}

fn element_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

/// Emits the canonical serialized form of a filter document.
pub(crate) fn write(version: f64, filter_sets: &[PathFilterSet]) -> Vec<u8> {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push('<');
    out.push_str(ROOT_ELEMENT);
    out.push_str(" version=\"");
    out.push_str(&format!("{version:.1}"));
    out.push('"');
    if filter_sets.is_empty() {
        out.push_str("/>\n");
        return out.into_bytes();
    }
    out.push_str(">\n");

    for set in filter_sets {
        out.push_str("    <");
        out.push_str(FILTER_ELEMENT);
        out.push_str(" root=\"");
        out.push_str(&escape(set.root()));
        out.push('"');
        if set.import_mode() != ImportMode::default() {
            out.push_str(" mode=\"");
            out.push_str(set.import_mode().as_str());
            out.push('"');
        }
        if set.is_cleanup() {
            out.push_str(" type=\"");
            out.push_str(CLEANUP_TYPE);
            out.push('"');
        }

        if set.entries().is_empty() {
            out.push_str("/>\n");
            continue;
        }
        out.push_str(">\n");
        for rule in set.entries().entries() {
            let element = if rule.action().is_include() {
                INCLUDE_ELEMENT
            } else {
                EXCLUDE_ELEMENT
            };
            out.push_str("        <");
            out.push_str(element);
            out.push_str(" pattern=\"");
            out.push_str(&escape(rule.matcher().pattern()));
            out.push_str("\"/>\n");
        }
        out.push_str("    </");
        out.push_str(FILTER_ELEMENT);
        out.push_str(">\n");
    }

    out.push_str("</");
    out.push_str(ROOT_ELEMENT);
    out.push_str(">\n");
    out.into_bytes()
}
