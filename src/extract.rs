use std::{any::type_name_of_val, fmt::Debug, io::BufRead};

use quick_xml::events::Event;

/// Default size at which the accumulation buffer is cut into a fragment.
pub const DEFAULT_FRAGMENT_THRESHOLD: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Emit a fragment once the accumulation buffer has grown to at least
    /// this many bytes. A single text node is never split, so fragments may
    /// overshoot by up to one node's length.
    pub fragment_threshold: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            fragment_threshold: DEFAULT_FRAGMENT_THRESHOLD,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("XML error")]
    Xml(#[from] quick_xml::Error),
}

/// Streams markup-free text fragments out of an XML document.
///
/// Text-bearing events are trimmed and joined with single spaces into an
/// accumulation buffer; the buffer is handed out as a fragment each time it
/// reaches the configured threshold, plus once more for the remainder at end
/// of input. Tags, comments, processing instructions and declarations are
/// discarded. At no point does the extractor hold more than the event buffer
/// and one fragment's worth of text.
///
/// Malformed markup does not abort extraction: the offending token is
/// reported and dropped, and scanning resumes. With the `strict` feature the
/// first XML error propagates instead.
///
/// An extractor is single-pass; reprocessing a document needs a fresh one.
pub struct TextExtractor<R: BufRead> {
    xml_parser: quick_xml::Reader<R>,
    buf: Vec<u8>,
    pending: String,
    fragment_threshold: usize,
    finished: bool,
    last_error_position: Option<u64>,
}

impl<R: BufRead> Debug for TextExtractor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextExtractor")
            .field("xml_parser", &type_name_of_val(&self.xml_parser))
            .field("buf.len", &self.buf.len())
            .field("buf.capacity", &self.buf.capacity())
            .field("pending.len", &self.pending.len())
            .field("fragment_threshold", &self.fragment_threshold)
            .field("finished", &self.finished)
            .finish()
    }
}

impl<R: BufRead> TextExtractor<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ExtractorConfig::default())
    }

    pub fn with_config(reader: R, config: ExtractorConfig) -> Self {
        Self {
            xml_parser: quick_xml::Reader::from_reader(reader),
            // preallocate 1 MiB for the event buffer
            buf: Vec::with_capacity(1024 * 1024),
            pending: String::new(),
            // a zero threshold would hand out empty fragments forever
            fragment_threshold: config.fragment_threshold.max(1),
            finished: false,
            last_error_position: None,
        }
    }

    /// Pull the next text fragment, or `None` once the document is exhausted.
    pub fn next_fragment(&mut self) -> Result<Option<String>, ExtractError> {
        if self.finished {
            return Ok(self.take_remainder());
        }

        loop {
            // field-precise borrows: the event borrows `self.buf`, so the
            // arms must only touch the other fields
            match self.xml_parser.read_event_into(&mut self.buf) {
                Ok(Event::Text(e)) => match e.unescape() {
                    Ok(text) => Self::append_node(&mut self.pending, &text),
                    Err(error) => Self::recover(
                        error,
                        &self.xml_parser,
                        &mut self.last_error_position,
                        &mut self.finished,
                    )?,
                },
                Ok(Event::CData(e)) => {
                    // CDATA content is already unescaped raw text
                    let text = String::from_utf8_lossy(&e);
                    Self::append_node(&mut self.pending, &text);
                }
                Ok(Event::Eof) => self.finished = true,
                // everything else is markup
                Ok(_) => {}
                Err(error) => Self::recover(
                    error,
                    &self.xml_parser,
                    &mut self.last_error_position,
                    &mut self.finished,
                )?,
            }
            self.buf.clear();

            if self.finished {
                return Ok(self.take_remainder());
            }
            if self.pending.len() >= self.fragment_threshold {
                return Ok(Some(std::mem::take(&mut self.pending)));
            }
        }
    }

    fn append_node(pending: &mut String, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        pending.push_str(trimmed);
        pending.push(' ');
    }

    fn take_remainder(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.pending))
        }
    }

    fn recover(
        error: quick_xml::Error,
        xml_parser: &quick_xml::Reader<R>,
        last_error_position: &mut Option<u64>,
        finished: &mut bool,
    ) -> Result<(), ExtractError> {
        if cfg!(feature = "strict") {
            return Err(error.into());
        }

        let position = xml_parser.buffer_position() as u64;
        tracing::warn!(
            message = "Malformed XML, dropping the offending token and resuming",
            error = %error,
            position
        );

        if *last_error_position == Some(position) {
            // the reader made no forward progress since the last error;
            // nothing more can be recovered from this stream
            tracing::error!(
                message = "XML parser is not advancing, ending extraction early",
                position
            );
            *finished = true;
        }
        *last_error_position = Some(position);

        Ok(())
    }
}
