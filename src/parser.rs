use std::cell::Cell;
use std::rc::Rc;

use lol_html::errors::{RewritingError, SelectorError};
use lol_html::html_content::EndTag;
use lol_html::{EndTagHandler, HandlerResult, HtmlRewriter, Selector, Settings, element};
use thiserror::Error;

/// Selectors for the results container and the result entries inside it.
///
/// Both are validated up front so that parsing a response never has to deal
/// with a malformed selector.
#[derive(Debug, Clone)]
pub struct ResultSelectors {
    container: String,
    entries: String,
    url_attribute: String,
}

impl ResultSelectors {
    pub fn new(container_id: &str, url_attribute: &str) -> Result<Self, ParseError> {
        let container = format!("#{container_id}");
        let entries = format!("{container} [{url_attribute}]");
        for selector in [&container, &entries] {
            selector
                .parse::<Selector>()
                .map_err(|source| ParseError::InvalidSelector {
                    selector: selector.clone(),
                    source,
                })?;
        }
        Ok(Self {
            container,
            entries,
            url_attribute: url_attribute.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResults {
    /// Whether the results container was present at all.
    pub container_found: bool,
    /// Result URLs in document order.
    pub urls: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid selector {selector:?}: {source}")]
    InvalidSelector {
        selector: String,
        #[source]
        source: SelectorError,
    },
    #[error("HTML rewriting failed: {0}")]
    Rewriting(#[from] RewritingError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerState {
    NotSeen,
    Inside,
    Closed,
}

/// Streams `input` once, collecting the URL attribute of every element nested
/// under the first results container. Later elements reusing the container id
/// are ignored. Elements whose attribute is blank after entity decoding and
/// trimming are skipped.
pub fn parse_results(input: &str, selectors: &ResultSelectors) -> Result<ParsedResults, ParseError> {
    let url_attribute = selectors.url_attribute.as_str();
    let state = Rc::new(Cell::new(ContainerState::NotSeen));
    let mut urls = Vec::new();

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![
                element!(selectors.container, |el| {
                    if state.get() != ContainerState::NotSeen {
                        return Ok(());
                    }
                    state.set(ContainerState::Inside);

                    let closing = Rc::clone(&state);
                    let on_close: EndTagHandler<'static> =
                        Box::new(move |_end: &mut EndTag<'_>| -> HandlerResult {
                            closing.set(ContainerState::Closed);
                            Ok(())
                        });
                    match el.end_tag_handlers() {
                        Some(handlers) => handlers.push(on_close),
                        // Void element: nothing can be nested inside it.
                        None => state.set(ContainerState::Closed),
                    }
                    Ok(())
                }),
                element!(selectors.entries, |el| {
                    if state.get() != ContainerState::Inside {
                        return Ok(());
                    }
                    if let Some(raw) = el.get_attribute(url_attribute) {
                        let decoded = html_escape::decode_html_entities(&raw);
                        let value = decoded.trim();
                        if !value.is_empty() {
                            urls.push(value.to_string());
                        }
                    }
                    Ok(())
                }),
            ],
            ..Settings::new()
        },
        |_: &[u8]| {},
    );

    rewriter.write(input.as_bytes())?;
    rewriter.end()?;

    Ok(ParsedResults {
        container_found: state.get() != ContainerState::NotSeen,
        urls,
    })
}
