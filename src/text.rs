use midly::{Arena, MetaMessage, Smf, TrackEvent, TrackEventKind};
use std::fmt;

/// The meta-event variants that carry a human readable text payload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextKind {
    Text,
    Copyright,
    TrackName,
    InstrumentName,
    Lyric,
    Marker,
    CuePoint,
    ProgramName,
    DeviceName,
}

impl fmt::Display for TextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextKind::Text => "text",
            TextKind::Copyright => "copyright notice",
            TextKind::TrackName => "track name",
            TextKind::InstrumentName => "instrument name",
            TextKind::Lyric => "lyric",
            TextKind::Marker => "marker",
            TextKind::CuePoint => "cue point",
            TextKind::ProgramName => "program name",
            TextKind::DeviceName => "device name",
        };
        f.write_str(name)
    }
}

/// Where a text field lives in a sequence: 0-based track and event indices plus the variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextLocation {
    pub track: usize,
    pub event: usize,
    pub kind: TextKind,
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at track {} event {}", self.kind, self.track, self.event)
    }
}

/// Capability of exposing a text payload.
///
/// Events without text simply answer `None`, so visitors never have to enumerate the
/// variants themselves.
pub trait TextPayload<'a> {
    fn text(&self) -> Option<(TextKind, &'a [u8])>;
    fn text_mut(&mut self) -> Option<(TextKind, &mut &'a [u8])>;
}

impl<'a> TextPayload<'a> for MetaMessage<'a> {
    fn text(&self) -> Option<(TextKind, &'a [u8])> {
        let mut message = *self;
        message.text_mut().map(|(kind, text)| (kind, *text))
    }

    fn text_mut(&mut self) -> Option<(TextKind, &mut &'a [u8])> {
        let field = match self {
            MetaMessage::Text(text) => (TextKind::Text, text),
            MetaMessage::Copyright(text) => (TextKind::Copyright, text),
            MetaMessage::TrackName(text) => (TextKind::TrackName, text),
            MetaMessage::InstrumentName(text) => (TextKind::InstrumentName, text),
            MetaMessage::Lyric(text) => (TextKind::Lyric, text),
            MetaMessage::Marker(text) => (TextKind::Marker, text),
            MetaMessage::CuePoint(text) => (TextKind::CuePoint, text),
            MetaMessage::ProgramName(text) => (TextKind::ProgramName, text),
            MetaMessage::DeviceName(text) => (TextKind::DeviceName, text),
            _ => return None,
        };
        Some(field)
    }
}

impl<'a> TextPayload<'a> for TrackEventKind<'a> {
    fn text(&self) -> Option<(TextKind, &'a [u8])> {
        match self {
            TrackEventKind::Meta(message) => message.text(),
            _ => None,
        }
    }

    fn text_mut(&mut self) -> Option<(TextKind, &mut &'a [u8])> {
        match self {
            TrackEventKind::Meta(message) => message.text_mut(),
            _ => None,
        }
    }
}

impl<'a> TextPayload<'a> for TrackEvent<'a> {
    fn text(&self) -> Option<(TextKind, &'a [u8])> {
        self.kind.text()
    }

    fn text_mut(&mut self) -> Option<(TextKind, &mut &'a [u8])> {
        self.kind.text_mut()
    }
}

/// Calls `visit` with every text payload of the sequence, track by track and event by event.
///
/// When `visit` answers `Some(bytes)` the payload is replaced in place, the new bytes being
/// kept alive by `arena`. The first error stops the walk and is returned as is: payloads
/// replaced before it stay replaced, later ones are never visited.
///
/// Returns the number of visited fields.
pub fn for_each_text_field<'a, E, F>(
    smf: &mut Smf<'a>,
    arena: &'a Arena,
    mut visit: F,
) -> Result<usize, E>
where
    F: FnMut(TextLocation, &'a [u8]) -> Result<Option<Vec<u8>>, E>,
{
    let mut visited = 0;
    for (track_index, track) in smf.tracks.iter_mut().enumerate() {
        for (event_index, event) in track.iter_mut().enumerate() {
            if let Some((kind, text)) = event.text_mut() {
                let location = TextLocation {
                    track: track_index,
                    event: event_index,
                    kind,
                };
                if let Some(new_text) = visit(location, *text)? {
                    *text = arena.add_vec(new_text);
                }
                visited += 1;
            }
        }
    }
    Ok(visited)
}

/// Read-only counterpart of [`for_each_text_field`]
pub fn text_fields<'b, 'a: 'b>(
    smf: &'b Smf<'a>,
) -> impl Iterator<Item = (TextLocation, &'a [u8])> + 'b {
    smf.tracks
        .iter()
        .enumerate()
        .flat_map(|(track, events)| {
            events.iter().enumerate().filter_map(move |(event, track_event)| {
                track_event
                    .text()
                    .map(|(kind, text)| (TextLocation { track, event, kind }, text))
            })
        })
}
